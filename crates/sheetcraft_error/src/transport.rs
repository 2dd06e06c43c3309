//! Transport error types.

/// Transport-level failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    /// Request never produced an HTTP response (DNS, connect, timeout)
    Network(String),
    /// Remote answered with a non-success status
    HttpStatus {
        /// HTTP status code
        status_code: u16,
        /// Response body or reason phrase
        message: String,
    },
    /// Credential for the direct path not found in the environment
    MissingApiKey(String),
    /// Failed to build the outgoing request
    RequestBuild(String),
    /// Response envelope did not have the expected shape
    InvalidEnvelope(String),
    /// Generation was blocked by the remote service
    Blocked(String),
}

impl std::fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportErrorKind::Network(msg) => write!(f, "Network failure: {}", msg),
            TransportErrorKind::HttpStatus {
                status_code,
                message,
            } => write!(f, "HTTP {} error: {}", status_code, message),
            TransportErrorKind::MissingApiKey(var) => {
                write!(f, "{} environment variable not set", var)
            }
            TransportErrorKind::RequestBuild(msg) => {
                write!(f, "Failed to build generation request: {}", msg)
            }
            TransportErrorKind::InvalidEnvelope(msg) => {
                write!(f, "Unexpected response envelope: {}", msg)
            }
            TransportErrorKind::Blocked(reason) => {
                write!(f, "Generation blocked by remote service: {}", reason)
            }
        }
    }
}

impl TransportErrorKind {
    /// Whether the relay path should hand over to the direct path.
    ///
    /// Any network failure or non-success status qualifies; envelope and
    /// build problems are local and would fail the same way again.
    pub fn falls_through(&self) -> bool {
        matches!(
            self,
            TransportErrorKind::Network(_) | TransportErrorKind::HttpStatus { .. }
        )
    }
}

/// Transport error with source location tracking.
///
/// # Examples
///
/// ```
/// use sheetcraft_error::{TransportError, TransportErrorKind};
///
/// let err = TransportError::new(TransportErrorKind::HttpStatus {
///     status_code: 502,
///     message: "Bad Gateway".to_string(),
/// });
/// assert!(format!("{}", err).contains("HTTP 502"));
/// assert!(err.kind.falls_through());
/// ```
#[derive(Debug, Clone)]
pub struct TransportError {
    /// The kind of error that occurred
    pub kind: TransportErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl TransportError {
    /// Create a new TransportError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: TransportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Transport Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for TransportError {}
