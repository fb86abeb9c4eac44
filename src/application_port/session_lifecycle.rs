use crate::domain_model::*;
use crate::domain_port::SessionStoreError;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: SessionToken,
    pub session: Session,
}

#[async_trait::async_trait]
pub trait SessionLifecycle: Send + Sync {
    /// Create and store a new session, stamped with `now` as its last activity.
    async fn issue(
        &self,
        user_id: UserId,
        remember: bool,
        now: DateTime<Utc>,
    ) -> Result<IssuedSession, SessionStoreError>;

    /// Log out one session. Unknown tokens are ignored.
    async fn destroy(&self, user_id: UserId, token: &SessionToken)
    -> Result<(), SessionStoreError>;

    /// Sessions of the user that have not expired at `now`.
    async fn list(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<SessionCollection, SessionStoreError>;

    /// Delete the user's expired sessions, returning how many were removed.
    async fn purge_expired(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<usize, SessionStoreError>;
}
