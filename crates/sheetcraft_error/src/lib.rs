//! Error types for the Sheetcraft structured-generation pipeline.
//!
//! Every error records the source location where it was created. The
//! aggregate [`SheetcraftError`] separates recoverable failures (which send
//! the orchestrator down the offline path) from fatal ones.

mod activity;
mod config;
mod empty;
mod format;
mod template;
mod transport;

pub use activity::{ActivityError, ActivityErrorKind};
pub use config::ConfigError;
pub use empty::EmptyResponseError;
pub use format::{FormatError, FormatErrorKind};
pub use template::{TemplateError, TemplateErrorKind};
pub use transport::{TransportError, TransportErrorKind};

/// Crate-level error variants.
#[derive(Debug, derive_more::From)]
pub enum SheetcraftErrorKind {
    /// Network or status failure on the generation transport
    Transport(TransportError),
    /// Generator output could not be repaired or did not fit its schema
    Format(FormatError),
    /// Successful response without content
    EmptyResponse(EmptyResponseError),
    /// Activity resolution or generator failure
    Activity(ActivityError),
    /// Custom prompt template failure
    Template(TemplateError),
    /// Configuration error
    Config(ConfigError),
}

impl std::fmt::Display for SheetcraftErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetcraftErrorKind::Transport(e) => write!(f, "{}", e),
            SheetcraftErrorKind::Format(e) => write!(f, "{}", e),
            SheetcraftErrorKind::EmptyResponse(e) => write!(f, "{}", e),
            SheetcraftErrorKind::Activity(e) => write!(f, "{}", e),
            SheetcraftErrorKind::Template(e) => write!(f, "{}", e),
            SheetcraftErrorKind::Config(e) => write!(f, "{}", e),
        }
    }
}

/// Sheetcraft error with kind discrimination.
#[derive(Debug)]
pub struct SheetcraftError(Box<SheetcraftErrorKind>);

impl SheetcraftError {
    /// Create a new error from a kind.
    pub fn new(kind: SheetcraftErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &SheetcraftErrorKind {
        &self.0
    }

    /// Whether the fallback orchestrator may answer this error with the
    /// offline generator.
    ///
    /// Unknown activities, a missing offline generator and configuration
    /// problems are fatal. Everything else is recoverable.
    ///
    /// # Examples
    ///
    /// ```
    /// use sheetcraft_error::{
    ///     ActivityError, ActivityErrorKind, EmptyResponseError, SheetcraftError,
    /// };
    ///
    /// let empty = SheetcraftError::from(EmptyResponseError::new("direct"));
    /// assert!(empty.is_recoverable());
    ///
    /// let unknown = SheetcraftError::from(ActivityError::new(ActivityErrorKind::Unknown(
    ///     "nope".into(),
    /// )));
    /// assert!(!unknown.is_recoverable());
    /// ```
    pub fn is_recoverable(&self) -> bool {
        match self.kind() {
            SheetcraftErrorKind::Activity(e) => {
                matches!(e.kind, ActivityErrorKind::GeneratorFailed { .. })
            }
            SheetcraftErrorKind::Config(_) => false,
            _ => true,
        }
    }

    /// The activity-level kind, if this is an activity error.
    pub fn activity_kind(&self) -> Option<&ActivityErrorKind> {
        match self.kind() {
            SheetcraftErrorKind::Activity(e) => Some(&e.kind),
            _ => None,
        }
    }

    /// Short, user-facing description without source locations.
    pub fn user_message(&self) -> String {
        match self.kind() {
            SheetcraftErrorKind::Activity(e) => e.kind.user_message(),
            SheetcraftErrorKind::Config(e) => format!("Configuration problem: {}", e.message),
            _ => "Generation failed.".to_string(),
        }
    }
}

impl std::fmt::Display for SheetcraftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sheetcraft Error: {}", self.0)
    }
}

impl std::error::Error for SheetcraftError {}

// Generic From implementation for any type that converts to SheetcraftErrorKind
impl<T> From<T> for SheetcraftError
where
    T: Into<SheetcraftErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Sheetcraft operations.
pub type SheetcraftResult<T> = std::result::Result<T, SheetcraftError>;
