//! Format error types raised while interpreting generator output.

/// Conditions under which generator output cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormatErrorKind {
    /// Every repair strategy was exhausted
    Unrecoverable {
        /// The original text, kept for diagnostics
        raw: String,
        /// Parser message from the final attempt
        reason: String,
    },
    /// Parsed value does not match the schema descriptor
    SchemaMismatch {
        /// JSON path of the offending value (e.g. `$.pages[2].title`)
        path: String,
        /// What the descriptor asked for
        expected: String,
        /// What was found instead
        found: String,
    },
    /// Generator returned an empty page sequence
    EmptyPages,
    /// Generator returned a bare scalar where pages were expected
    NotAPage(String),
}

impl std::fmt::Display for FormatErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatErrorKind::Unrecoverable { raw, reason } => write!(
                f,
                "Unrecoverable generator output ({} chars): {}",
                raw.chars().count(),
                reason
            ),
            FormatErrorKind::SchemaMismatch {
                path,
                expected,
                found,
            } => write!(
                f,
                "Schema mismatch at {}: expected {}, found {}",
                path, expected, found
            ),
            FormatErrorKind::EmptyPages => write!(f, "Generator returned no pages"),
            FormatErrorKind::NotAPage(found) => {
                write!(f, "Generator returned {} instead of a page", found)
            }
        }
    }
}

/// Format error with source location tracking.
///
/// # Examples
///
/// ```
/// use sheetcraft_error::{FormatError, FormatErrorKind};
///
/// let err = FormatError::new(FormatErrorKind::EmptyPages);
/// assert!(format!("{}", err).contains("no pages"));
/// ```
#[derive(Debug, Clone)]
pub struct FormatError {
    /// The kind of error that occurred
    pub kind: FormatErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl FormatError {
    /// Create a new FormatError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: FormatErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for an exhausted repair carrying the original text.
    #[track_caller]
    pub fn unrecoverable(raw: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(FormatErrorKind::Unrecoverable {
            raw: raw.into(),
            reason: reason.into(),
        })
    }

    /// Original generator text, when this error carries it.
    pub fn raw_text(&self) -> Option<&str> {
        match &self.kind {
            FormatErrorKind::Unrecoverable { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Format Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for FormatError {}
