//! Best-effort MongoDB mirror for Matchpoint.
//!
//! This crate duplicates the local roster into a remote document store so
//! club tooling outside the bot can read membership state. The mirror is
//! optional at runtime and advisory in nature: every failure is surfaced
//! as a [`MirrorError`] for the caller to log and move past, never to
//! abort on.
//!
//! # Example
//!
//! ```rust,ignore
//! use matchpoint_mirror::{MemberDocument, MirrorStore, normalize_uri};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mirror = MirrorStore::connect(&std::env::var("MONGO_URI")?).await?;
//! mirror.set_flag("alice", MemberDocument::FIELD_SINGLES, true).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod documents;

// Re-export the store and the URI repair helper
pub use client::{MirrorStore, normalize_uri};

// Re-export document types
pub use documents::MemberDocument;

// Re-export the error types callers match on
pub use matchpoint_error::{MirrorError, MirrorErrorKind, MirrorResult};
