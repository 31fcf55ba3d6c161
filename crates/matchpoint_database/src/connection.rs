//! Database connection utilities.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use matchpoint_error::{DatabaseError, DatabaseErrorKind, DatabaseResult};
use tracing::info;

/// Migrations compiled into the binary.
///
/// The second migration adds the singles/doubles columns onto tables created
/// by the first, so a legacy database upgrades in place without data loss.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Open a connection to the SQLite roster database.
///
/// `database_url` is a filesystem path (or `:memory:` in tests).
///
/// # Errors
///
/// Returns an error if the database file cannot be opened or created.
pub fn establish_connection(database_url: &str) -> DatabaseResult<SqliteConnection> {
    SqliteConnection::establish(database_url)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))
}

/// Apply any pending embedded migrations.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub fn run_migrations(conn: &mut SqliteConnection) -> DatabaseResult<()> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Migration(e.to_string())))?;

    if !applied.is_empty() {
        info!(count = applied.len(), "Applied roster migrations");
    }

    Ok(())
}
