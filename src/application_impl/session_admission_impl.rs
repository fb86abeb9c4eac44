use super::find_oldest;
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AdmissionConfig {
    pub max_sessions: usize,
    /// How long the least recently active session must have been idle before
    /// it may be evicted.
    pub max_idle: Duration,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        AdmissionConfig {
            max_sessions: 5,
            max_idle: Duration::hours(4),
        }
    }
}

pub struct RealSessionAdmission {
    store: Arc<dyn SessionActivityStore>,
    config: AdmissionConfig,
}

impl RealSessionAdmission {
    pub fn new(store: Arc<dyn SessionActivityStore>, config: AdmissionConfig) -> Self {
        Self { store, config }
    }

    /// Instant from which a session last active at `at` may be evicted.
    /// `None` when the window is negative or the sum overflows; such a
    /// session is never evicted.
    fn evictable_from(&self, at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if self.config.max_idle < Duration::zero() {
            return None;
        }
        at.checked_add_signed(self.config.max_idle)
    }

    fn max_session_reached(&self) -> AdmissionError {
        AdmissionError::MaxSessionReached {
            max_sessions: self.config.max_sessions,
        }
    }
}

#[async_trait::async_trait]
impl SessionAdmission for RealSessionAdmission {
    async fn admit(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<Admission, AdmissionError> {
        let sessions = self.store.get_all(user_id).await.map_err(|e| {
            error!(%user_id, error = %e, "failed to load sessions, refusing login");
            AdmissionError::from(e)
        })?;

        if sessions.len() < self.config.max_sessions {
            return Ok(Admission::Allow);
        }

        let Some((verifier, oldest)) = find_oldest(&sessions) else {
            warn!(%user_id, count = sessions.len(), "session limit reached, no activity data to evict by");
            return Err(self.max_session_reached());
        };

        let evictable = oldest
            .last_activity
            .and_then(|at| self.evictable_from(at))
            .is_some_and(|from| from <= now);
        if !evictable {
            warn!(%user_id, count = sessions.len(), "session limit reached, oldest session still active");
            return Err(self.max_session_reached());
        }

        self.store.delete(user_id, verifier).await.map_err(|e| {
            error!(%user_id, error = %e, "failed to evict idle session, refusing login");
            AdmissionError::from(e)
        })?;

        info!(
            %user_id,
            %verifier,
            idle_secs = oldest.idle_for(now).map(|d| d.num_seconds()),
            "evicted idle session to admit new login"
        );

        Ok(Admission::AllowAfterEviction {
            evicted: verifier.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application_impl::test_support::*;

    fn session_active_at(last_activity: Option<DateTime<Utc>>) -> Session {
        let now = fixed_now();
        let mut session = Session::new(now - Duration::days(1), now + Duration::days(1));
        session.last_activity = last_activity;
        session
    }

    async fn seed_hours_ago(store: &RecordingStore, user: UserId, hours: &[i64]) -> Vec<Verifier> {
        let mut verifiers = Vec::new();
        for h in hours {
            let at = fixed_now() - Duration::hours(*h);
            verifiers.push(store.seed(user, session_active_at(Some(at))).await);
        }
        verifiers
    }

    fn policy(store: Arc<RecordingStore>) -> RealSessionAdmission {
        RealSessionAdmission::new(store, AdmissionConfig::default())
    }

    #[tokio::test]
    async fn below_limit_allows_without_mutation() {
        let store = Arc::new(RecordingStore::default());
        let user = UserId::new_v4();
        seed_hours_ago(&store, user, &[0, 0, 0, 0]).await;

        let admission = policy(store.clone()).admit(user, fixed_now()).await.unwrap();

        assert_eq!(admission, Admission::Allow);
        assert_eq!(store.mutations(), 0);
    }

    #[tokio::test]
    async fn user_without_sessions_is_allowed() {
        let store = Arc::new(RecordingStore::default());
        let admission = policy(store.clone())
            .admit(UserId::new_v4(), fixed_now())
            .await
            .unwrap();
        assert_eq!(admission, Admission::Allow);
    }

    #[tokio::test]
    async fn evicts_oldest_idle_session() {
        let store = Arc::new(RecordingStore::default());
        let user = UserId::new_v4();
        let verifiers = seed_hours_ago(&store, user, &[10, 1, 2, 3, 4]).await;

        let admission = policy(store.clone()).admit(user, fixed_now()).await.unwrap();

        assert_eq!(
            admission,
            Admission::AllowAfterEviction {
                evicted: verifiers[0].clone()
            }
        );
        assert_eq!(store.deletes(), 1);
        assert_eq!(store.updates(), 0);
        let remaining = store.get_all(user).await.unwrap();
        assert_eq!(remaining.len(), 4);
        assert!(!remaining.contains_key(&verifiers[0]));
    }

    #[tokio::test]
    async fn denies_when_oldest_is_within_idle_window() {
        let store = Arc::new(RecordingStore::default());
        let user = UserId::new_v4();
        seed_hours_ago(&store, user, &[3, 1, 2, 3, 0]).await;

        let err = policy(store.clone())
            .admit(user, fixed_now())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AdmissionError::MaxSessionReached { max_sessions: 5 }
        ));
        assert_eq!(err.code(), "max_session_reached");
        assert_eq!(
            err.to_string(),
            "Maximum 5 login sessions are allowed. Please contact site administrator."
        );
        assert_eq!(store.mutations(), 0);
        assert_eq!(store.get_all(user).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn idle_exactly_at_limit_is_evicted() {
        let store = Arc::new(RecordingStore::default());
        let user = UserId::new_v4();
        let verifiers = seed_hours_ago(&store, user, &[4, 1, 1, 1, 1]).await;

        let admission = policy(store.clone()).admit(user, fixed_now()).await.unwrap();

        assert_eq!(
            admission,
            Admission::AllowAfterEviction {
                evicted: verifiers[0].clone()
            }
        );
    }

    #[tokio::test]
    async fn one_second_short_of_limit_is_denied() {
        let store = Arc::new(RecordingStore::default());
        let user = UserId::new_v4();
        let almost = fixed_now() - Duration::hours(4) + Duration::seconds(1);
        store.seed(user, session_active_at(Some(almost))).await;
        seed_hours_ago(&store, user, &[1, 1, 1, 1]).await;

        let result = policy(store.clone()).admit(user, fixed_now()).await;

        assert!(matches!(result, Err(AdmissionError::MaxSessionReached { .. })));
        assert_eq!(store.mutations(), 0);
    }

    #[tokio::test]
    async fn denies_when_no_session_has_activity() {
        let store = Arc::new(RecordingStore::default());
        let user = UserId::new_v4();
        for _ in 0..5 {
            store.seed(user, session_active_at(None)).await;
        }

        let result = policy(store.clone()).admit(user, fixed_now()).await;

        assert!(matches!(result, Err(AdmissionError::MaxSessionReached { .. })));
        assert_eq!(store.mutations(), 0);
    }

    #[tokio::test]
    async fn evicts_only_one_of_several_stale_sessions() {
        let store = Arc::new(RecordingStore::default());
        let user = UserId::new_v4();
        let verifiers = seed_hours_ago(&store, user, &[20, 10, 9, 8, 7, 6]).await;

        let admission = policy(store.clone()).admit(user, fixed_now()).await.unwrap();

        assert_eq!(
            admission,
            Admission::AllowAfterEviction {
                evicted: verifiers[0].clone()
            }
        );
        assert_eq!(store.deletes(), 1);
        assert_eq!(store.get_all(user).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn honours_configured_limits() {
        let store = Arc::new(RecordingStore::default());
        let user = UserId::new_v4();
        seed_hours_ago(&store, user, &[2, 1]).await;
        let config = AdmissionConfig {
            max_sessions: 2,
            max_idle: Duration::hours(1),
        };

        let admission = RealSessionAdmission::new(store.clone(), config)
            .admit(user, fixed_now())
            .await
            .unwrap();

        assert!(matches!(admission, Admission::AllowAfterEviction { .. }));
    }

    #[tokio::test]
    async fn store_failure_fails_closed() {
        let admission = RealSessionAdmission::new(
            Arc::new(UnavailableStore),
            AdmissionConfig::default(),
        );

        let result = admission.admit(UserId::new_v4(), fixed_now()).await;

        assert!(matches!(result, Err(AdmissionError::Store(_))));
    }

    #[tokio::test]
    async fn failed_eviction_fails_closed_and_keeps_sessions() {
        let store = Arc::new(DeleteFailingStore::default());
        let user = UserId::new_v4();
        for h in [10, 9, 8, 7, 6] {
            let at = fixed_now() - Duration::hours(h);
            store
                .inner
                .update(user, &SessionToken::generate().verifier(), &session_active_at(Some(at)))
                .await
                .unwrap();
        }

        let result = RealSessionAdmission::new(store.clone(), AdmissionConfig::default())
            .admit(user, fixed_now())
            .await;

        assert!(matches!(result, Err(AdmissionError::Store(_))));
        assert_eq!(store.get_all(user).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn idle_window_past_calendar_end_denies_instead_of_panicking() {
        let store = Arc::new(RecordingStore::default());
        let user = UserId::new_v4();
        seed_hours_ago(&store, user, &[10_000]).await;
        let config = AdmissionConfig {
            max_sessions: 1,
            max_idle: Duration::days(365 * 1_000_000),
        };

        let result = RealSessionAdmission::new(store.clone(), config)
            .admit(user, fixed_now())
            .await;

        assert!(matches!(result, Err(AdmissionError::MaxSessionReached { .. })));
        assert_eq!(store.mutations(), 0);
    }

    #[tokio::test]
    async fn negative_idle_window_never_evicts() {
        let store = Arc::new(RecordingStore::default());
        let user = UserId::new_v4();
        store.seed(user, session_active_at(Some(fixed_now()))).await;
        let config = AdmissionConfig {
            max_sessions: 1,
            max_idle: Duration::hours(-1),
        };

        let result = RealSessionAdmission::new(store.clone(), config)
            .admit(user, fixed_now())
            .await;

        assert!(matches!(result, Err(AdmissionError::MaxSessionReached { .. })));
        assert_eq!(store.mutations(), 0);
    }
}
