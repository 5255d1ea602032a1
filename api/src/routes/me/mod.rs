//! `/api/me/...`: data owned by the caller.

use axum::{Router, routing::get};
use util::state::AppState;

pub mod certificates;

use certificates::{download_certificate, list_my_certificates};

pub fn me_routes() -> Router<AppState> {
    Router::new()
        .route("/certificates", get(list_my_certificates))
        .route("/certificates/{course_id}/download", get(download_certificate))
}
