//! `/api/courses/{course_id}/...`: enrollment and per-course progress.

use axum::{
    Router,
    routing::{get, post},
};
use util::state::AppState;

mod common;
mod get;
mod post;

pub use get::get_course_progress;
pub use post::enroll_in_course;

pub fn courses_routes() -> Router<AppState> {
    Router::new()
        .route("/{course_id}/enroll", post(enroll_in_course))
        .route("/{course_id}/progress", get(get_course_progress))
}
