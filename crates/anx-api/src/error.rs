use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use anx_graph::{InvalidFlow, StepError};
use anx_loader::LoaderError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidFlow(#[from] InvalidFlow),

    #[error("{0}")]
    Loader(#[from] LoaderError),

    #[error("{0}")]
    Step(#[from] StepError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Forbidden path: {0}")]
    Forbidden(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidFlow(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Loader(_) | ApiError::Step(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable error name reported to clients
    pub fn name(&self) -> &'static str {
        match self {
            ApiError::InvalidFlow(_) => "InvalidFlow",
            ApiError::Loader(_) => "LoaderError",
            ApiError::Step(_) => "StepError",
            ApiError::BadRequest(_) => "BadRequest",
            ApiError::Forbidden(_) => "Unauthorized",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Loader(ref e) => {
                tracing::error!("Loader error: {}", e);
                "failed to fetch bot lines and flows".to_string()
            }
            ApiError::Step(ref e) => {
                tracing::error!("Step error: {}", e);
                self.to_string()
            }
            _ => self.to_string(),
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error_name": self.name(),
            "error_message": message,
        }));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
