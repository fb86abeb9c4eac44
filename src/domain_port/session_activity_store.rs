use crate::domain_model::*;

/// Per-user session collections.
///
/// Each call must be atomic on its own; callers read, decide and write in
/// separate calls and accept lost updates in between.
#[async_trait::async_trait]
pub trait SessionActivityStore: Send + Sync {
    /// All sessions of the user, empty when none are stored.
    async fn get_all(&self, user_id: UserId) -> Result<SessionCollection, SessionStoreError>;

    async fn get(
        &self,
        user_id: UserId,
        verifier: &Verifier,
    ) -> Result<Option<Session>, SessionStoreError>;

    /// Insert or replace the whole session record.
    async fn update(
        &self,
        user_id: UserId,
        verifier: &Verifier,
        session: &Session,
    ) -> Result<(), SessionStoreError>;

    /// Remove one session. Removing the last one removes the user's collection
    /// itself; removing a missing one succeeds.
    async fn delete(&self, user_id: UserId, verifier: &Verifier) -> Result<(), SessionStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("infra error: {0}")]
    Store(String),
    #[error("malformed session record: {0}")]
    Codec(String),
}
