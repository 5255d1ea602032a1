//! Schema management for the LMS database.
//!
//! ```text
//! migration [up]   apply pending migrations (default)
//! migration status list every migration and whether it is applied
//! migration down   roll back every migration
//! migration fresh  roll back everything, then apply from scratch
//! migration clean  delete the SQLite file
//! ```

use colored::*;
use sea_orm::{Database, DatabaseConnection, DbErr};
use std::{fs, path::Path};
use util::config;

mod runner;

#[tokio::main]
async fn main() {
    let target = config::database_path();
    let command = std::env::args().nth(1).unwrap_or_else(|| "up".into());

    if command == "clean" {
        remove_db_file(&target);
        return;
    }

    let result = match connect(&target).await {
        Ok(db) => run(&command, &db).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(command: &str, db: &DatabaseConnection) -> Result<(), DbErr> {
    match command {
        "up" => runner::apply_pending(db).await.map(|_| ()),
        "status" => runner::print_status(db).await,
        "down" => runner::rollback_all(db).await,
        "fresh" => {
            runner::rollback_all(db).await?;
            runner::apply_pending(db).await.map(|_| ())
        }
        other => Err(DbErr::Custom(format!(
            "unknown command `{other}` (expected up, status, down, fresh or clean)"
        ))),
    }
}

/// Accepts a `sqlite:` URL or a plain file path, creating the parent directory
/// for the latter.
async fn connect(target: &str) -> Result<DatabaseConnection, DbErr> {
    let url = if target.starts_with("sqlite:") {
        target.to_string()
    } else {
        if let Some(parent) = Path::new(target).parent() {
            fs::create_dir_all(parent).map_err(|e| DbErr::Custom(e.to_string()))?;
        }
        format!("sqlite://{target}?mode=rwc")
    };
    Database::connect(&url).await
}

fn remove_db_file(path: &str) {
    let db_path = Path::new(path);
    if !db_path.exists() {
        println!("DB file does not exist: {}", db_path.display());
        return;
    }
    match fs::remove_file(db_path) {
        Ok(()) => println!("Deleted DB: {}", db_path.display()),
        Err(e) => {
            eprintln!("{} {}: {}", "error:".red().bold(), db_path.display(), e);
            std::process::exit(1);
        }
    }
}
