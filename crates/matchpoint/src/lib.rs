//! Matchpoint - Discord community bot for a tennis club.
//!
//! Matchpoint listens for chat commands and emoji reactions in the club's
//! Discord server, assigns and removes the membership roles, and keeps a
//! roster of who holds what in a local SQLite database, optionally
//! mirrored to MongoDB.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use matchpoint::{BotContext, MatchpointBot, Settings};
//! use matchpoint::{RosterRepository, establish_connection, run_migrations};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::from_env()?;
//!     let mut conn = establish_connection(&settings.database_url)?;
//!     run_migrations(&mut conn)?;
//!
//!     let context = BotContext::new(RosterRepository::new(conn), None, settings.rules_channel);
//!     let mut bot = MatchpointBot::new(settings.token, context).await?;
//!     bot.start().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Matchpoint is organized as a workspace with focused crates:
//!
//! - `matchpoint_error` - Error types
//! - `matchpoint_database` - SQLite roster (the record store)
//! - `matchpoint_mirror` - Best-effort MongoDB mirror
//! - `matchpoint_social` - Discord integration
//!
//! This crate (`matchpoint`) re-exports everything for convenience and
//! carries the binary.

// Re-export the workspace crates
pub use matchpoint_database::*;
pub use matchpoint_error::*;
pub use matchpoint_mirror::*;
pub use matchpoint_social::*;

pub mod settings;
pub mod telemetry;

pub use settings::Settings;
