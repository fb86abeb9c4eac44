use super::{AdmissionError, IssuedSession};
use crate::domain_model::UserId;
use crate::domain_port::SessionStoreError;
use chrono::{DateTime, Utc};

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error(transparent)]
    Admission(#[from] AdmissionError),
    #[error("infra error: {0}")]
    Store(#[from] SessionStoreError),
}

/// Entry point for a user whose credentials were already checked upstream.
#[async_trait::async_trait]
pub trait LoginGate: Send + Sync {
    async fn open_session(
        &self,
        user_id: UserId,
        remember: bool,
        now: DateTime<Utc>,
    ) -> Result<IssuedSession, LoginError>;
}
