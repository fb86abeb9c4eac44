use crate::domain_model::*;
use crate::domain_port::SessionStoreError;
use chrono::{DateTime, Utc};

/// Outcome of a login attempt that may go ahead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Allow,
    /// The user's least recently active session was idle long enough and has
    /// been deleted to make room.
    AllowAfterEviction { evicted: Verifier },
}

#[derive(Debug, thiserror::Error)]
pub enum AdmissionError {
    /// The user is at the limit and no session may be evicted. Raised both when
    /// no session carries activity data and when the oldest one is still
    /// inside the idle window.
    #[error("Maximum {max_sessions} login sessions are allowed. Please contact site administrator.")]
    MaxSessionReached { max_sessions: usize },
    #[error("infra error: {0}")]
    Store(String),
}

impl AdmissionError {
    pub fn code(&self) -> &'static str {
        match self {
            AdmissionError::MaxSessionReached { .. } => "max_session_reached",
            AdmissionError::Store(_) => "store_unavailable",
        }
    }
}

impl From<SessionStoreError> for AdmissionError {
    fn from(err: SessionStoreError) -> Self {
        AdmissionError::Store(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait SessionAdmission: Send + Sync {
    /// Decide whether `user_id` may open one more session at `now`.
    ///
    /// Any `Err` means the login must not proceed.
    async fn admit(&self, user_id: UserId, now: DateTime<Utc>)
    -> Result<Admission, AdmissionError>;
}
