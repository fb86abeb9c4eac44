use super::error::*;
use super::handler;
use crate::domain_model::{SessionToken, UserId};
use crate::server::*;
use std::convert::Infallible;
use std::sync::Arc;
use warp::{Filter, http, reject};

/// Session routes for an internal sidecar.
///
/// Callers are trusted to have checked credentials already: `POST /sessions`
/// opens a session for whatever `user_id` it is given and `GET /sessions/{id}`
/// needs no token. Bind the listener to a private network only.
pub fn routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let open_session = warp::post()
        .and(warp::path("sessions"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with(server.login_gate.clone()))
        .and_then(handler::open_session);

    let record_activity = warp::post()
        .and(warp::path!("sessions" / UserId / "activity"))
        .and(with_session_token())
        .and(with(server.activity_refresher.clone()))
        .and_then(handler::record_activity);

    let close_session = warp::delete()
        .and(warp::path!("sessions" / UserId))
        .and(with_session_token())
        .and(with(server.session_lifecycle.clone()))
        .and_then(handler::close_session);

    let count_sessions = warp::get()
        .and(warp::path!("sessions" / UserId))
        .and(with(server.session_lifecycle.clone()))
        .and_then(handler::count_sessions);

    open_session
        .or(record_activity)
        .or(close_session)
        .or(count_sessions)
}

fn with<ServiceType>(
    service: Arc<ServiceType>,
) -> impl Filter<Extract = (Arc<ServiceType>,), Error = Infallible> + Clone
where
    ServiceType: Send + Sync + ?Sized,
{
    warp::any().map(move || service.clone())
}

/// Session token from an `Authorization: Bearer` header, if one was sent.
/// A header with any other scheme is rejected.
fn with_session_token() -> impl Filter<Extract = (Option<SessionToken>,), Error = warp::Rejection> + Clone {
    warp::header::optional::<String>(http::header::AUTHORIZATION.as_ref()).and_then(
        |header: Option<String>| async move {
            match header {
                None => Ok(None),
                Some(value) => match value.strip_prefix("Bearer ") {
                    Some(token) if !token.is_empty() => Ok(Some(SessionToken(token.to_string()))),
                    _ => Err(reject::custom(ApiError::new(ApiErrorCode::InvalidSession))),
                },
            }
        },
    )
}
