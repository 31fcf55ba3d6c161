//! SQLite roster for Matchpoint.
//!
//! This crate provides the roster store backing the bot: one row per guild
//! member, tracking which of the club roles (`general`, `singles`,
//! `doubles`) the member held when the bot last looked.
//!
//! # Example
//!
//! ```rust,ignore
//! use matchpoint_database::{RosterRepository, establish_connection, run_migrations};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut conn = establish_connection("matchpoint.db")?;
//! run_migrations(&mut conn)?;
//! let roster = RosterRepository::new(conn);
//!
//! for member in roster.list_all().await? {
//!     println!("{}: general={}", member.username, member.has_general_role);
//! }
//! # Ok(())
//! # }
//! ```

mod connection;
mod models;
mod repository;

// Public module for external access
pub mod schema;

// Re-export connection utilities
pub use connection::{MIGRATIONS, establish_connection, run_migrations};

// Re-export model types
pub use models::{MemberRow, NewMember, RoleFlag};

// Re-export the repository
pub use repository::RosterRepository;

// Re-export the error types callers match on
pub use matchpoint_error::{DatabaseError, DatabaseErrorKind, DatabaseResult};
