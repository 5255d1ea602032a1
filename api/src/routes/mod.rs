//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → Health check endpoint (public)
//! - `/courses` → Enrollment and course progress (authenticated users)
//! - `/lessons` → Lesson completion and activity (authenticated users)
//! - `/quizzes` → Quiz retrieval, submission and attempt history (authenticated users)
//! - `/me` → Certificates of the caller (authenticated users)

use crate::auth::guards::allow_authenticated;
use crate::routes::{
    courses::courses_routes, health::health_routes, lessons::lessons_routes, me::me_routes,
    quizzes::quizzes_routes,
};
use axum::{Router, middleware::from_fn};
use util::state::AppState;

pub mod common;
pub mod courses;
pub mod health;
pub mod lessons;
pub mod me;
pub mod quizzes;

pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/courses", courses_routes().route_layer(from_fn(allow_authenticated)))
        .nest("/lessons", lessons_routes().route_layer(from_fn(allow_authenticated)))
        .nest("/quizzes", quizzes_routes().route_layer(from_fn(allow_authenticated)))
        .nest("/me", me_routes().route_layer(from_fn(allow_authenticated)))
        .with_state(app_state)
}
