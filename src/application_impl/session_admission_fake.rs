use crate::application_port::*;
use crate::domain_model::UserId;
use chrono::{DateTime, Utc};

#[derive(Debug)]
pub struct FakeSessionAdmission;

impl FakeSessionAdmission {
    pub fn new() -> Self {
        Self
    }
}

// Lets every login through; for local runs without a session limit.
#[async_trait::async_trait]
impl SessionAdmission for FakeSessionAdmission {
    async fn admit(
        &self,
        _user_id: UserId,
        _now: DateTime<Utc>,
    ) -> Result<Admission, AdmissionError> {
        Ok(Admission::Allow)
    }
}
