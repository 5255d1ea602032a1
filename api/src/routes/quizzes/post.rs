use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use db::quiz_grading::SubmittedAnswer;
use util::state::AppState;
use validator::Validate;

use super::common::{GradedAttemptResponse, SubmitAttemptRequest};
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{core_error_response, validation_error_response};

/// POST /api/quizzes/{quiz_id}/attempts
///
/// Grades and stores an attempt by the caller.
///
/// ```json
/// {
///   "answers": [{ "question_id": 1, "answer": "Paris" }],
///   "time_spent": 95
/// }
/// ```
///
/// Questions left unanswered count towards the total but earn nothing.
///
/// ### Responses
/// - `201 Created` with `{ attempt, score, passed, total_questions, correct_answers, answers }`
/// - `400 Bad Request` (`INVALID_REQUEST`)
/// - `403 Forbidden` (`NOT_ENROLLED`)
/// - `404 Not Found` (`NOT_FOUND`)
pub async fn submit_attempt(
    State(state): State<AppState>,
    Path(quiz_id): Path<i64>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<SubmitAttemptRequest>,
) -> Response {
    if let Err(errors) = req.validate() {
        return validation_error_response(&errors);
    }

    let principal = user.principal();
    let answers: Vec<SubmittedAnswer> = req.answers.into_iter().map(Into::into).collect();

    match db::quiz_grading::grade_attempt(
        state.db(),
        quiz_id,
        principal.id,
        &answers,
        req.time_spent,
        Utc::now(),
    )
    .await
    {
        Ok(graded) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                GradedAttemptResponse::from(graded),
                "Quiz attempt graded",
            )),
        )
            .into_response(),
        Err(e) => core_error_response(e),
    }
}
