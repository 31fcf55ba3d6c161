//! Error types for the Matchpoint bot.
//!
//! This crate provides the foundation error types used throughout the
//! Matchpoint workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use matchpoint_error::{ConfigError, MatchpointResult};
//!
//! fn load_token() -> MatchpointResult<String> {
//!     Err(ConfigError::new("DISCORD_TOKEN not set"))?
//! }
//!
//! match load_token() {
//!     Ok(token) => println!("Got token of length {}", token.len()),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
#[cfg(feature = "database")]
mod database;
mod error;
#[cfg(feature = "mirror")]
mod mirror;

pub use config::ConfigError;
#[cfg(feature = "database")]
pub use database::{DatabaseError, DatabaseErrorKind, DatabaseResult};
pub use error::{MatchpointError, MatchpointErrorKind, MatchpointResult};
#[cfg(feature = "mirror")]
pub use mirror::{MirrorError, MirrorErrorKind, MirrorResult};
