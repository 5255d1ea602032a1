//! `/api/lessons/{lesson_id}/...`: lesson completion and viewing activity.

use axum::{
    Router,
    routing::{post, put},
};
use util::state::AppState;

mod common;
mod post;
mod put;

pub use post::complete_lesson;
pub use put::record_activity;

pub fn lessons_routes() -> Router<AppState> {
    Router::new()
        .route("/{lesson_id}/complete", post(complete_lesson))
        .route("/{lesson_id}/progress", put(record_activity))
}
