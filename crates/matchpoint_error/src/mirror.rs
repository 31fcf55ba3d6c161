//! Mirror store error types.

/// Mirror store error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum MirrorErrorKind {
    /// Connection string is malformed or names no default database.
    #[display("Mirror configuration error: {}", _0)]
    Configuration(String),
    /// Client construction or server selection failed.
    #[display("Mirror connection error: {}", _0)]
    Connection(String),
    /// The liveness probe (`ping`) was rejected.
    #[display("Mirror liveness probe failed: {}", _0)]
    Probe(String),
    /// A write against the mirror collection failed.
    #[display("Mirror write failed: {}", _0)]
    Write(String),
    /// Any other driver error.
    #[display("Mirror driver error: {}", _0)]
    Driver(String),
}

/// Mirror store error with source location tracking.
///
/// # Examples
///
/// ```
/// use matchpoint_error::{MirrorError, MirrorErrorKind};
///
/// let err = MirrorError::new(MirrorErrorKind::Probe("timed out".to_string()));
/// assert!(format!("{}", err).contains("probe"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Mirror Error: {} at line {} in {}", kind, line, file)]
pub struct MirrorError {
    /// The kind of error that occurred
    pub kind: MirrorErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl MirrorError {
    /// Create a new MirrorError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: MirrorErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for mirror store operations.
pub type MirrorResult<T> = std::result::Result<T, MirrorError>;

impl From<mongodb::error::Error> for MirrorError {
    #[track_caller]
    fn from(err: mongodb::error::Error) -> Self {
        MirrorError::new(MirrorErrorKind::Driver(err.to_string()))
    }
}
