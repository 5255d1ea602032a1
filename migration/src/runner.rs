use colored::*;
use sea_orm::DatabaseConnection;
use sea_orm_migration::{MigrationStatus, prelude::*};
use std::io::{self, Write};
use std::time::Instant;

use migration::Migrator;

const STATUS_COLUMN: usize = 72;

/// Applies every pending migration one step at a time, printing a status line
/// per migration. Returns how many were applied.
pub async fn apply_pending(db: &DatabaseConnection) -> Result<usize, DbErr> {
    let pending = Migrator::get_pending_migrations(db).await?;
    if pending.is_empty() {
        println!("{}", "Schema is up to date".green());
        return Ok(0);
    }

    println!("Applying {} migration(s)...", pending.len());
    for migration in &pending {
        print_label("Applying", migration.name());

        let start = Instant::now();
        match Migrator::up(db, Some(1)).await {
            Ok(()) => {
                let time_str = format!("({:.2?})", start.elapsed()).dimmed();
                println!("{} {}", "done".green(), time_str);
            }
            Err(e) => {
                println!("{}", "failed".red());
                return Err(e);
            }
        }
    }

    Ok(pending.len())
}

/// Rolls back every applied migration.
pub async fn rollback_all(db: &DatabaseConnection) -> Result<(), DbErr> {
    print_label("Rolling back", "all migrations");
    let start = Instant::now();
    Migrator::reset(db).await?;
    let time_str = format!("({:.2?})", start.elapsed()).dimmed();
    println!("{} {}", "done".green(), time_str);
    Ok(())
}

pub async fn print_status(db: &DatabaseConnection) -> Result<(), DbErr> {
    for migration in Migrator::get_migration_with_status(db).await? {
        let status = match migration.status() {
            MigrationStatus::Applied => "applied".green(),
            MigrationStatus::Pending => "pending".yellow(),
        };
        print_label("", migration.name());
        println!("{status}");
    }
    Ok(())
}

fn print_label(verb: &str, name: &str) {
    let label = if verb.is_empty() {
        name.bold().to_string()
    } else {
        format!("{} {}", verb, name.bold())
    };
    let dots = ".".repeat(STATUS_COLUMN.saturating_sub(label.len()));
    print!("{}{} ", label, dots);
    let _ = io::stdout().flush();
}
