use api::auth::generate_jwt;
use api::routes::routes;
use axum::{Router, body::Body, response::Response};
use db::models::user::Role;
use db::test_utils::setup_test_db;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use util::{config::AppConfig, state::AppState};

pub const TEST_SECRET: &str = "test-secret";

/// A fresh router over an empty, migrated in-memory database.
pub async fn make_test_app() -> (Router, DatabaseConnection) {
    AppConfig::set_jwt_secret(TEST_SECRET);

    let db = setup_test_db().await;
    let app = Router::new().nest("/api", routes(AppState::new(db.clone())));

    (app, db)
}

pub fn bearer(user_id: i64, role: Role) -> String {
    let (token, _) = generate_jwt(user_id, role).unwrap();
    format!("Bearer {token}")
}

pub async fn json_body(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
