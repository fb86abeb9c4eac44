use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct SessionLifecycleConfig {
    pub ttl: Duration,
    /// Lifetime when the user asked to be remembered.
    pub remember_ttl: Duration,
}

impl Default for SessionLifecycleConfig {
    fn default() -> Self {
        SessionLifecycleConfig {
            ttl: Duration::days(2),
            remember_ttl: Duration::days(14),
        }
    }
}

pub struct RealSessionLifecycle {
    store: Arc<dyn SessionActivityStore>,
    config: SessionLifecycleConfig,
}

impl RealSessionLifecycle {
    pub fn new(store: Arc<dyn SessionActivityStore>, config: SessionLifecycleConfig) -> Self {
        Self { store, config }
    }
}

#[async_trait::async_trait]
impl SessionLifecycle for RealSessionLifecycle {
    async fn issue(
        &self,
        user_id: UserId,
        remember: bool,
        now: DateTime<Utc>,
    ) -> Result<IssuedSession, SessionStoreError> {
        let ttl = if remember {
            self.config.remember_ttl
        } else {
            self.config.ttl
        };
        let token = SessionToken::generate();
        let expiration = now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);
        let session = Session::new(now, expiration).with_last_activity(now);

        self.store
            .update(user_id, &token.verifier(), &session)
            .await?;
        debug!(%user_id, expiration = %session.expiration, "session issued");

        Ok(IssuedSession { token, session })
    }

    async fn destroy(
        &self,
        user_id: UserId,
        token: &SessionToken,
    ) -> Result<(), SessionStoreError> {
        self.store.delete(user_id, &token.verifier()).await
    }

    async fn list(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<SessionCollection, SessionStoreError> {
        let mut sessions = self.store.get_all(user_id).await?;
        sessions.retain(|_, session| !session.is_expired(now));
        Ok(sessions)
    }

    async fn purge_expired(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<usize, SessionStoreError> {
        let sessions = self.store.get_all(user_id).await?;
        let mut purged = 0;
        for (verifier, session) in &sessions {
            if session.is_expired(now) {
                self.store.delete(user_id, verifier).await?;
                purged += 1;
            }
        }
        if purged > 0 {
            debug!(%user_id, purged, "expired sessions purged");
        }
        Ok(purged)
    }
}
