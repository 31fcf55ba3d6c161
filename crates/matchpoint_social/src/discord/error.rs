//! Discord-specific error types.
//!
//! Platform failures arrive as `serenity::Error` values; the `From` impl
//! below classifies them by HTTP status so callers can branch on
//! permission problems and missing entities without digging through the
//! serenity error tree.

use derive_getters::Getters;
use matchpoint_database::DatabaseError;
use serenity::http::HttpError;

/// Discord error variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum DiscordErrorKind {
    /// The bot or invoker lacks permission for an operation (HTTP 403).
    #[display("Missing permission: {_0}")]
    Forbidden(String),

    /// A guild, channel, message, member, or role does not exist (HTTP 404).
    #[display("Not found: {_0}")]
    NotFound(String),

    /// Bot token is invalid or expired (HTTP 401).
    #[display("Invalid or expired bot token")]
    InvalidToken,

    /// Any other gateway or HTTP failure.
    #[display("Gateway error: {_0}")]
    Gateway(String),

    /// Connection to Discord failed.
    #[display("Connection failed: {_0}")]
    ConnectionFailed(String),

    /// Roster database operation failed.
    #[display("Database error: {_0}")]
    Database(String),
}

/// Discord error with source location tracking.
///
/// Captures the error kind along with the file and line where the error occurred.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Discord Error: {} at line {} in {}", kind, line, file)]
pub struct DiscordError {
    kind: DiscordErrorKind,
    line: u32,
    file: &'static str,
}

impl DiscordError {
    /// Create a new DiscordError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use matchpoint_social::{DiscordError, DiscordErrorKind};
    ///
    /// let err = DiscordError::new(DiscordErrorKind::InvalidToken);
    /// ```
    #[track_caller]
    pub fn new(kind: DiscordErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether this error is a permission failure.
    pub fn is_forbidden(&self) -> bool {
        matches!(self.kind, DiscordErrorKind::Forbidden(_))
    }
}

/// Result type for Discord operations.
pub type DiscordResult<T> = Result<T, DiscordError>;

impl From<serenity::Error> for DiscordError {
    #[track_caller]
    fn from(err: serenity::Error) -> Self {
        let kind = match &err {
            serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
                match response.status_code.as_u16() {
                    401 => DiscordErrorKind::InvalidToken,
                    403 => DiscordErrorKind::Forbidden(response.error.message.clone()),
                    404 => DiscordErrorKind::NotFound(response.error.message.clone()),
                    _ => DiscordErrorKind::Gateway(err.to_string()),
                }
            }
            serenity::Error::Gateway(_) => DiscordErrorKind::ConnectionFailed(err.to_string()),
            _ => DiscordErrorKind::Gateway(err.to_string()),
        };
        DiscordError::new(kind)
    }
}

impl From<DatabaseError> for DiscordError {
    #[track_caller]
    fn from(err: DatabaseError) -> Self {
        DiscordError::new(DiscordErrorKind::Database(err.to_string()))
    }
}
