//! `/api/quizzes/{quiz_id}/...`: taking quizzes and reviewing attempts.

use axum::{
    Router,
    routing::get,
};
use util::state::AppState;

mod common;
mod get;
mod post;

pub use get::{get_quiz, list_my_attempts};
pub use post::submit_attempt;

pub fn quizzes_routes() -> Router<AppState> {
    Router::new()
        .route("/{quiz_id}", get(get_quiz))
        .route("/{quiz_id}/attempts", get(list_my_attempts).post(submit_attempt))
}
