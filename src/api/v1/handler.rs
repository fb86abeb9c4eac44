use super::error::*;
use crate::application_port::*;
use crate::domain_model::{SessionToken, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::{self, reject};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(code: ApiErrorCode, message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OpenSessionRequest {
    pub user_id: UserId,
    #[serde(default)]
    pub remember: bool,
}

#[derive(Debug, Serialize)]
pub struct OpenSessionResponse {
    pub token: SessionToken,
    pub expiration: DateTime<Utc>,
}

pub async fn open_session(
    body: OpenSessionRequest,
    login_gate: Arc<dyn LoginGate>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let issued = login_gate
        .open_session(body.user_id, body.remember, Utc::now())
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    let response = OpenSessionResponse {
        token: issued.token,
        expiration: issued.session.expiration,
    };
    Ok(warp::reply::json(&ApiResponse::ok(response)))
}

#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    pub outcome: RefreshOutcome,
}

pub async fn record_activity(
    user_id: UserId,
    token: Option<SessionToken>,
    activity_refresher: Arc<dyn ActivityRefresher>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let outcome = activity_refresher
        .refresh(user_id, token.as_ref(), Utc::now())
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(ActivityResponse {
        outcome,
    })))
}

pub async fn close_session(
    user_id: UserId,
    token: Option<SessionToken>,
    session_lifecycle: Arc<dyn SessionLifecycle>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let token = token.ok_or_else(|| reject::custom(ApiError::new(ApiErrorCode::InvalidSession)))?;
    session_lifecycle
        .destroy(user_id, &token)
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(())))
}

#[derive(Debug, Serialize)]
pub struct SessionCountResponse {
    pub count: usize,
}

pub async fn count_sessions(
    user_id: UserId,
    session_lifecycle: Arc<dyn SessionLifecycle>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let sessions = session_lifecycle
        .list(user_id, Utc::now())
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(SessionCountResponse {
        count: sessions.len(),
    })))
}
