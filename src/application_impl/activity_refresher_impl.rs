use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

pub const DEFAULT_REFRESH_THROTTLE: Duration = Duration::minutes(5);

/// Stamps `last_activity` on request traffic, at most once per throttle window
/// per session. Idle eviction can therefore see a session as up to one window
/// more recent than it really is.
pub struct RealActivityRefresher {
    store: Arc<dyn SessionActivityStore>,
    throttle: Duration,
}

impl RealActivityRefresher {
    pub fn new(store: Arc<dyn SessionActivityStore>, throttle: Duration) -> Self {
        Self { store, throttle }
    }
}

#[async_trait::async_trait]
impl ActivityRefresher for RealActivityRefresher {
    async fn refresh(
        &self,
        user_id: UserId,
        token: Option<&SessionToken>,
        now: DateTime<Utc>,
    ) -> Result<RefreshOutcome, SessionStoreError> {
        let Some(token) = token else {
            return Ok(RefreshOutcome::NoContext);
        };
        let verifier = token.verifier();

        let Some(mut session) = self.store.get(user_id, &verifier).await? else {
            return Ok(RefreshOutcome::NotFound);
        };

        if session.is_expired(now) {
            return Ok(RefreshOutcome::Expired);
        }
        // A window that runs past the calendar end never closes.
        if let Some(last_activity) = session.last_activity
            && last_activity
                .checked_add_signed(self.throttle)
                .is_none_or(|next_write| next_write > now)
        {
            return Ok(RefreshOutcome::Throttled);
        }

        session.last_activity = Some(now);
        self.store.update(user_id, &verifier, &session).await?;
        debug!(%user_id, %verifier, "session activity refreshed");

        Ok(RefreshOutcome::Refreshed)
    }
}
