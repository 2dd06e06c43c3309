//! Activity resolution and generator error types.

use derive_more::Display;

/// Activity-level error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub enum ActivityErrorKind {
    /// No compiled or custom binding exists for the identifier
    #[display("Unknown activity '{}'", _0)]
    Unknown(String),

    /// Offline path reached but the activity has no offline generator
    #[display("Fast mode is not yet supported for activity '{}'", _0)]
    OfflineUnavailable(String),

    /// A generator rejected its own output or its options
    #[display("Generator for '{}' failed: {}", activity, message)]
    GeneratorFailed {
        /// Activity identifier
        activity: String,
        /// What went wrong
        message: String,
    },
}

impl ActivityErrorKind {
    /// Message suitable for showing to the person who requested the worksheet.
    pub fn user_message(&self) -> String {
        match self {
            ActivityErrorKind::Unknown(id) => {
                format!("The activity '{}' is not available.", id)
            }
            ActivityErrorKind::OfflineUnavailable(id) => format!(
                "Fast mode is not yet supported for '{}'. Try again with AI mode.",
                id
            ),
            ActivityErrorKind::GeneratorFailed { activity, .. } => {
                format!("Could not generate '{}'.", activity)
            }
        }
    }
}

/// Activity error with location tracking.
///
/// # Examples
///
/// ```
/// use sheetcraft_error::{ActivityError, ActivityErrorKind};
///
/// let err = ActivityError::new(ActivityErrorKind::OfflineUnavailable("story_map".into()));
/// assert!(format!("{}", err).contains("story_map"));
/// ```
#[derive(Debug, Clone, Display, derive_more::Error)]
#[display("Activity Error: {} at line {} in {}", kind, line, file)]
pub struct ActivityError {
    /// The specific error kind.
    pub kind: ActivityErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// File where error occurred.
    pub file: &'static str,
}

impl ActivityError {
    /// Creates a new error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ActivityErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for a generator-level failure.
    #[track_caller]
    pub fn generator(activity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ActivityErrorKind::GeneratorFailed {
            activity: activity.into(),
            message: message.into(),
        })
    }
}
