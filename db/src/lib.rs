pub mod certificates;
pub mod error;
pub mod models;
pub mod progress;
pub mod quiz_grading;
pub mod test_utils;

use sea_orm::{Database, DatabaseConnection, DbErr};
use std::path::Path;
use util::config;

pub use error::{CoreError, CoreResult, ErrorKind};

/// Opens the configured SQLite database.
///
/// `DATABASE_PATH` may be a `sqlite:` URL or a plain file path; for a path the
/// parent directory and the file are created if missing.
pub async fn connect() -> Result<DatabaseConnection, DbErr> {
    let path_or_url = config::database_path();
    if !path_or_url.starts_with("sqlite:") {
        if let Some(parent) = Path::new(&path_or_url).parent() {
            let _ = std::fs::create_dir_all(parent);
        }
    }

    Database::connect(&database_url(&path_or_url)).await
}

/// Turns `DATABASE_PATH` into a SQLite connection URL.
pub fn database_url(path_or_url: &str) -> String {
    if path_or_url.starts_with("sqlite:") {
        path_or_url.to_string()
    } else {
        format!("sqlite://{path_or_url}?mode=rwc")
    }
}
