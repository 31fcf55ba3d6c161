//! Discord integration for Matchpoint.
//!
//! This module provides the complete Discord bot implementation using the
//! Serenity library. It enables Matchpoint to:
//! - Connect to the club's Discord server
//! - Answer `$bot` chat commands
//! - Turn reactions on the tracked messages into role changes
//! - Snapshot live role possession into the roster at startup
//!
//! # Architecture
//!
//! ## Integration Layer
//! - **client**: Serenity client setup and lifecycle management
//! - **handler**: Event handler implementing Serenity's EventHandler trait
//! - **error**: Discord-specific error types
//!
//! ## Feature Layer
//! - **commands**: `$bot` chat command parsing and dispatch
//! - **reactions**: Reaction-to-role routing on the tracked messages
//! - **roles**: Role lookup, lazy creation, permission checks
//! - **sync**: Startup roster snapshot and rules channel bootstrap

mod client;
pub mod commands;
mod error;
mod handler;
pub mod reactions;
pub mod roles;
pub mod sync;

// Public re-exports
pub use client::MatchpointBot;
pub use commands::{BotCommand, COMMAND_PREFIX, render_roster_table};
pub use error::{DiscordError, DiscordErrorKind, DiscordResult};
pub use handler::MatchpointHandler;
pub use reactions::{FORMAT_PICKER_MESSAGE, ROLE_OPT_IN_MESSAGE, ReactionIntent};
