//! Helpers shared by the route handlers: error mapping and validation messages.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::{CoreError, ErrorKind};
use serde::Serialize;
use validator::ValidationErrors;

use crate::response::ApiResponse;

/// Payload of every failed response: a stable, machine-readable code.
#[derive(Debug, Serialize)]
pub struct ErrorCode {
    pub code: &'static str,
}

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::PreconditionFailed => StatusCode::PRECONDITION_FAILED,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps a core failure onto the response envelope.
///
/// Database errors are logged and answered with a generic message.
pub fn core_error_response(err: CoreError) -> Response {
    let status = status_for(err.kind());
    let message = match &err {
        CoreError::Database(e) => {
            tracing::error!(error = %e, "Database error while handling request");
            "Internal server error".to_string()
        }
        other => other.to_string(),
    };

    (
        status,
        Json(ApiResponse::failure(ErrorCode { code: err.code() }, message)),
    )
        .into_response()
}

pub fn validation_error_response(errors: &ValidationErrors) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::failure(
            ErrorCode {
                code: "INVALID_REQUEST",
            },
            format_validation_errors(errors),
        )),
    )
        .into_response()
}
