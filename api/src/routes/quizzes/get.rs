use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use util::state::AppState;

use super::common::AttemptResponse;
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::core_error_response;

/// GET /api/quizzes/{quiz_id}
///
/// The quiz with its questions in order. Correctness flags are never returned,
/// and short-answer or essay questions list no options.
///
/// ### Responses
/// - `200 OK`
/// - `403 Forbidden` (`NOT_ENROLLED`)
/// - `404 Not Found` (`NOT_FOUND`)
pub async fn get_quiz(
    State(state): State<AppState>,
    Path(quiz_id): Path<i64>,
    Extension(user): Extension<AuthUser>,
) -> Response {
    let principal = user.principal();

    match db::quiz_grading::quiz_for_student(state.db(), principal.id, quiz_id).await {
        Ok(quiz) => (
            StatusCode::OK,
            Json(ApiResponse::success(quiz, "Quiz retrieved")),
        )
            .into_response(),
        Err(e) => core_error_response(e),
    }
}

/// GET /api/quizzes/{quiz_id}/attempts
///
/// The caller's attempts at the quiz, newest first.
pub async fn list_my_attempts(
    State(state): State<AppState>,
    Path(quiz_id): Path<i64>,
    Extension(user): Extension<AuthUser>,
) -> Response {
    let principal = user.principal();

    match db::quiz_grading::list_attempts(state.db(), principal.id, quiz_id).await {
        Ok(attempts) => {
            let attempts: Vec<AttemptResponse> =
                attempts.into_iter().map(AttemptResponse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(attempts, "Attempts retrieved")),
            )
                .into_response()
        }
        Err(e) => core_error_response(e),
    }
}
