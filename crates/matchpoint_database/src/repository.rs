//! SQLite repository for the member roster.
//!
//! The repository owns the single connection to the roster database and
//! serializes access behind an async mutex; every event handler in the bot
//! reaches the store through these operations.

use crate::models::{MemberRow, NewMember, RoleFlag};
use crate::schema::server_members;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use matchpoint_error::{DatabaseError, DatabaseResult};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::instrument;

/// SQLite repository for member role flags.
///
/// # Example
/// ```no_run
/// use matchpoint_database::{RosterRepository, establish_connection};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let conn = establish_connection("matchpoint.db")?;
///     let roster = RosterRepository::new(conn);
///     // Use roster.get_by_username(), upsert(), etc.
///     Ok(())
/// }
/// ```
pub struct RosterRepository {
    /// Database connection wrapped in Arc<Mutex> for async access.
    conn: Arc<Mutex<SqliteConnection>>,
}

impl RosterRepository {
    /// Create a new roster repository.
    pub fn new(conn: SqliteConnection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Create a repository from an Arc<Mutex<SqliteConnection>> (for sharing connections).
    pub fn from_arc(conn: Arc<Mutex<SqliteConnection>>) -> Self {
        Self { conn }
    }

    /// Look up a member by username.
    #[instrument(skip(self))]
    pub async fn get_by_username(&self, username: &str) -> DatabaseResult<Option<MemberRow>> {
        let mut conn = self.conn.lock().await;

        server_members::table
            .filter(server_members::username.eq(username))
            .first(&mut *conn)
            .optional()
            .map_err(DatabaseError::from)
    }

    /// Insert or replace the full row for a username.
    ///
    /// The conflict target is the username, so the primary key of an
    /// existing row survives replacement.
    #[instrument(skip(self, member), fields(username = %member.username))]
    pub async fn upsert(&self, member: &NewMember) -> DatabaseResult<()> {
        let mut conn = self.conn.lock().await;

        diesel::insert_into(server_members::table)
            .values(member)
            .on_conflict(server_members::username)
            .do_update()
            .set((
                server_members::has_general_role.eq(member.has_general_role),
                server_members::has_singles_role.eq(member.has_singles_role),
                server_members::has_doubles_role.eq(member.has_doubles_role),
            ))
            .execute(&mut *conn)
            .map_err(DatabaseError::from)?;

        Ok(())
    }

    /// Insert a row only when the username is not yet present.
    ///
    /// Returns true when a row was written, false when the member already
    /// existed (the existing flags are left untouched).
    #[instrument(skip(self, member), fields(username = %member.username))]
    pub async fn insert_if_absent(&self, member: &NewMember) -> DatabaseResult<bool> {
        let mut conn = self.conn.lock().await;

        let rows = diesel::insert_into(server_members::table)
            .values(member)
            .on_conflict(server_members::username)
            .do_nothing()
            .execute(&mut *conn)
            .map_err(DatabaseError::from)?;

        Ok(rows == 1)
    }

    /// Update a single flag column for a username.
    ///
    /// Returns the number of rows touched; zero when the username has no
    /// row yet, matching a plain UPDATE.
    #[instrument(skip(self))]
    pub async fn set_flag(
        &self,
        username: &str,
        flag: RoleFlag,
        value: bool,
    ) -> DatabaseResult<usize> {
        let mut conn = self.conn.lock().await;

        let target = server_members::table.filter(server_members::username.eq(username));
        let rows = match flag {
            RoleFlag::General => diesel::update(target)
                .set(server_members::has_general_role.eq(value))
                .execute(&mut *conn),
            RoleFlag::Singles => diesel::update(target)
                .set(server_members::has_singles_role.eq(value))
                .execute(&mut *conn),
            RoleFlag::Doubles => diesel::update(target)
                .set(server_members::has_doubles_role.eq(value))
                .execute(&mut *conn),
        }
        .map_err(DatabaseError::from)?;

        Ok(rows)
    }

    /// List every roster row in primary-key order.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> DatabaseResult<Vec<MemberRow>> {
        let mut conn = self.conn.lock().await;

        server_members::table
            .order(server_members::id.asc())
            .load(&mut *conn)
            .map_err(DatabaseError::from)
    }
}
