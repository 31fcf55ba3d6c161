//! Discord integration for the Matchpoint club bot.
//!
//! This crate turns gateway events into role changes and roster writes:
//! chat commands prefixed with `$bot `, emoji reactions on the two
//! tracked messages, and a startup pass that snapshots live membership.
//! All state the handlers need travels in a [`BotContext`] built by the
//! binary at startup.
//!
//! # Example
//!
//! ```rust,ignore
//! use matchpoint_database::{RosterRepository, establish_connection};
//! use matchpoint_social::{BotContext, MatchpointBot};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let conn = establish_connection("matchpoint.db")?;
//!     let context = BotContext::new(RosterRepository::new(conn), None, None);
//!     let mut bot = MatchpointBot::new(std::env::var("DISCORD_TOKEN")?, context).await?;
//!     bot.start().await?;
//!     Ok(())
//! }
//! ```

mod context;
pub mod discord;

// Re-export the shared context
pub use context::BotContext;

// Re-export the Discord surface
pub use discord::{
    BotCommand, COMMAND_PREFIX, DiscordError, DiscordErrorKind, DiscordResult, MatchpointBot,
    MatchpointHandler,
};
