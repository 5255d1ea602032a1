use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use db::progress::Telemetry;
use util::state::AppState;
use validator::Validate;

use super::common::{LessonProgressResponse, TelemetryRequest};
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{core_error_response, validation_error_response};

/// PUT /api/lessons/{lesson_id}/progress
///
/// Records viewing telemetry without completing the lesson. Prerequisites and
/// release time are not checked; enrollment is.
///
/// ### Responses
/// - `200 OK` with the progress row
/// - `400 Bad Request` (`INVALID_REQUEST`)
/// - `403 Forbidden` (`NOT_ENROLLED`)
/// - `404 Not Found` (`NOT_FOUND`)
pub async fn record_activity(
    State(state): State<AppState>,
    Path(lesson_id): Path<i64>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<TelemetryRequest>,
) -> Response {
    if let Err(errors) = req.validate() {
        return validation_error_response(&errors);
    }

    let principal = user.principal();
    let telemetry: Telemetry = req.into();

    match db::progress::record_lesson_activity(
        state.db(),
        principal.id,
        lesson_id,
        &telemetry,
        Utc::now(),
    )
    .await
    {
        Ok(progress) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                LessonProgressResponse::from(progress),
                "Lesson activity recorded",
            )),
        )
            .into_response(),
        Err(e) => core_error_response(e),
    }
}
