use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use super::validation::{FieldError, ValidationError};
use crate::db::StoreError;

/// Every way a request can fail. All of them end at the response boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("malformed note id: {0:?}")]
    MalformedId(FieldError),

    #[error("Note not found")]
    NotFound,

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Validation(err) => {
                tracing::warn!("Validation failed for {:?}: {}", err.fields(), err);
                (StatusCode::UNPROCESSABLE_ENTITY, json!(err.errors))
            }
            ApiError::MalformedId(err) => {
                tracing::warn!("Malformed id: {}", err.msg);
                (StatusCode::UNPROCESSABLE_ENTITY, json!([err]))
            }
            ApiError::NotFound => (StatusCode::NOT_FOUND, json!("Note not found")),
            // Full error stays in the log; clients get a generic message.
            ApiError::Storage(err) => {
                tracing::error!("Storage error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!("Internal server error"),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
