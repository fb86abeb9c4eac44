use crate::api::v1::handler::ApiResponse;
use crate::application_port::*;
use crate::domain_port::SessionStoreError;
use serde::Serialize;
use std::convert::Infallible;
use thiserror::Error;
use tracing::warn;
use warp::http::StatusCode;
use warp::{Rejection, reject};

pub async fn recover_error(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    if let Some(err) = err.find::<ApiError>() {
        let json = warp::reply::json(&ApiResponse::<()>::err(err.code.clone(), &err.message));
        Ok(warp::reply::with_status(json, StatusCode::OK))
    } else if err.is_not_found() {
        let json = warp::reply::json(&ApiResponse::<()>::err(
            ApiErrorCode::NotFound,
            ApiErrorCode::NotFound.to_string(),
        ));
        Ok(warp::reply::with_status(json, StatusCode::NOT_FOUND))
    } else {
        let json = warp::reply::json(&ApiResponse::<()>::err(
            ApiErrorCode::InternalError,
            format!("Unhandled error: {:?}", err),
        ));
        Ok(warp::reply::with_status(
            json,
            StatusCode::INTERNAL_SERVER_ERROR,
        ))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ApiErrorCode) -> Self {
        let message = code.to_string();
        ApiError { code, message }
    }
}

impl reject::Reject for ApiError {}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorCode {
    #[error("Maximum login sessions reached")]
    MaxSessionReached,
    #[error("Session credential is missing or malformed")]
    InvalidSession,
    #[error("Not found")]
    NotFound,
    #[error("Internal error")]
    InternalError,
}

impl ApiErrorCode {
    pub fn internal<E: std::fmt::Display>(error: E) -> ApiError {
        warn!("Internal error: {}", error);
        ApiError::new(ApiErrorCode::InternalError)
    }
}

impl From<SessionStoreError> for ApiError {
    fn from(error: SessionStoreError) -> Self {
        ApiErrorCode::internal(error)
    }
}

impl From<AdmissionError> for ApiError {
    fn from(error: AdmissionError) -> Self {
        match error {
            AdmissionError::MaxSessionReached { .. } => ApiError {
                code: ApiErrorCode::MaxSessionReached,
                message: error.to_string(),
            },
            AdmissionError::Store(e) => ApiErrorCode::internal(e),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::Admission(e) => ApiError::from(e),
            LoginError::Store(e) => ApiError::from(e),
        }
    }
}
