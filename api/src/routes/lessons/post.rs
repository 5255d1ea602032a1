use axum::{
    Extension, Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use db::progress::Telemetry;
use util::state::AppState;
use validator::Validate;

use super::common::{CompletionResponse, LessonProgressResponse, TelemetryRequest};
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{ErrorCode, core_error_response, validation_error_response};

/// POST /api/lessons/{lesson_id}/complete
///
/// Marks the lesson complete for the caller and returns the recounted course
/// percentage. The body is optional telemetry:
///
/// ```json
/// { "time_spent": 300, "watched_duration": 280, "last_position": 295 }
/// ```
///
/// ### Responses
/// - `200 OK` with `{ progress, course_progress }`
/// - `400 Bad Request` (`INVALID_REQUEST`) for negative telemetry
/// - `403 Forbidden` (`NOT_ENROLLED`)
/// - `404 Not Found` (`NOT_FOUND`)
/// - `412 Precondition Failed` (`PREREQUISITES_INCOMPLETE` or `NOT_YET_AVAILABLE`)
pub async fn complete_lesson(
    State(state): State<AppState>,
    Path(lesson_id): Path<i64>,
    Extension(user): Extension<AuthUser>,
    body: Bytes,
) -> Response {
    let req: TelemetryRequest = if body.is_empty() {
        TelemetryRequest::default()
    } else {
        match serde_json::from_slice(&body) {
            Ok(req) => req,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::failure(
                        ErrorCode {
                            code: "INVALID_REQUEST",
                        },
                        format!("Invalid telemetry: {e}"),
                    )),
                )
                    .into_response();
            }
        }
    };
    if let Err(errors) = req.validate() {
        return validation_error_response(&errors);
    }

    let principal = user.principal();
    let telemetry: Telemetry = req.into();

    match db::progress::mark_lesson_complete(
        state.db(),
        principal.id,
        lesson_id,
        &telemetry,
        Utc::now(),
    )
    .await
    {
        Ok(outcome) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                CompletionResponse {
                    progress: LessonProgressResponse::from(outcome.progress),
                    course_progress: outcome.course_progress,
                },
                "Lesson completed",
            )),
        )
            .into_response(),
        Err(e) => core_error_response(e),
    }
}
