//! Top-level error wrapper types.

use crate::ConfigError;
#[cfg(feature = "database")]
use crate::DatabaseError;
#[cfg(feature = "mirror")]
use crate::MirrorError;

/// Foundation error enum. Crates in the workspace convert their own error
/// types into one of these variants at the boundary to the binary.
///
/// # Examples
///
/// ```
/// use matchpoint_error::{ConfigError, MatchpointError};
///
/// let config_err = ConfigError::new("missing variable");
/// let err: MatchpointError = config_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum MatchpointErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Database error
    #[cfg(feature = "database")]
    #[from(DatabaseError)]
    Database(DatabaseError),
    /// Mirror store error
    #[cfg(feature = "mirror")]
    #[from(MirrorError)]
    Mirror(MirrorError),
}

/// Matchpoint error with kind discrimination.
///
/// # Examples
///
/// ```
/// use matchpoint_error::{ConfigError, MatchpointResult};
///
/// fn might_fail() -> MatchpointResult<()> {
///     Err(ConfigError::new("missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Matchpoint Error: {}", _0)]
pub struct MatchpointError(Box<MatchpointErrorKind>);

impl MatchpointError {
    /// Create a new error from a kind.
    pub fn new(kind: MatchpointErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MatchpointErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to MatchpointErrorKind
impl<T> From<T> for MatchpointError
where
    T: Into<MatchpointErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Matchpoint operations.
pub type MatchpointResult<T> = std::result::Result<T, MatchpointError>;
