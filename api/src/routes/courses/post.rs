use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use util::state::AppState;

use super::common::EnrollmentResponse;
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::core_error_response;

/// POST /api/courses/{course_id}/enroll
///
/// Enrolls the caller in a published course (free enrollment path).
///
/// ### Responses
/// - `201 Created` with the new enrollment
/// - `404 Not Found` (`NOT_FOUND`) if the course does not exist or is unpublished
/// - `409 Conflict` (`ALREADY_ENROLLED`) if the caller is already enrolled
pub async fn enroll_in_course(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
    Extension(user): Extension<AuthUser>,
) -> Response {
    let principal = user.principal();

    match db::progress::enroll(state.db(), principal.id, course_id, Utc::now()).await {
        Ok(enrollment) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                EnrollmentResponse::from(enrollment),
                "Enrolled successfully",
            )),
        )
            .into_response(),
        Err(e) => core_error_response(e),
    }
}
