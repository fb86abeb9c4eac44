use crate::domain_model::*;
use crate::domain_port::SessionStoreError;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// The request carried no session credential.
    NoContext,
    NotFound,
    Expired,
    /// Activity was written recently enough; nothing stored.
    Throttled,
    Refreshed,
}

#[async_trait::async_trait]
pub trait ActivityRefresher: Send + Sync {
    async fn refresh(
        &self,
        user_id: UserId,
        token: Option<&SessionToken>,
        now: DateTime<Utc>,
    ) -> Result<RefreshOutcome, SessionStoreError>;
}
