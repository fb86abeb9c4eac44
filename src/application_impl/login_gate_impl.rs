use crate::application_port::*;
use crate::domain_model::UserId;
use crate::logger::*;
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub struct RealLoginGate {
    admission: Arc<dyn SessionAdmission>,
    lifecycle: Arc<dyn SessionLifecycle>,
}

impl RealLoginGate {
    pub fn new(admission: Arc<dyn SessionAdmission>, lifecycle: Arc<dyn SessionLifecycle>) -> Self {
        Self {
            admission,
            lifecycle,
        }
    }
}

#[async_trait::async_trait]
impl LoginGate for RealLoginGate {
    async fn open_session(
        &self,
        user_id: UserId,
        remember: bool,
        now: DateTime<Utc>,
    ) -> Result<IssuedSession, LoginError> {
        // Expired sessions must not count against the limit.
        self.lifecycle.purge_expired(user_id, now).await?;

        // Eviction is not reported to the caller.
        if let Admission::AllowAfterEviction { evicted } =
            self.admission.admit(user_id, now).await?
        {
            trace!(%user_id, %evicted, "login admitted after eviction");
        }

        Ok(self.lifecycle.issue(user_id, remember, now).await?)
    }
}
