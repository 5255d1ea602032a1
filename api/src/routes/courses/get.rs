use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::core_error_response;

/// GET /api/courses/{course_id}/progress
///
/// Per-lesson completion and lock state for the caller, ordered by module and
/// lesson position. Locked lessons carry a `lock_reason` of
/// `PREREQUISITES_INCOMPLETE` or `NOT_YET_AVAILABLE`.
///
/// ### Responses
/// - `200 OK`
/// - `403 Forbidden` (`NOT_ENROLLED`)
/// - `404 Not Found` (`NOT_FOUND`)
pub async fn get_course_progress(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
    Extension(user): Extension<AuthUser>,
) -> Response {
    let principal = user.principal();

    match db::progress::course_progress(state.db(), principal.id, course_id, Utc::now()).await {
        Ok(report) => (
            StatusCode::OK,
            Json(ApiResponse::success(report, "Course progress retrieved")),
        )
            .into_response(),
        Err(e) => core_error_response(e),
    }
}
