//! Custom prompt template error types.

/// Failure conditions for user-authored prompt templates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TemplateErrorKind {
    /// Placeholder has no value in the variable bindings
    MissingVariable {
        /// Template identifier
        template: String,
        /// Placeholder name
        variable: String,
    },
    /// Placeholder opened with `{{` but never closed
    Unterminated(String),
    /// Template store could not answer
    Store(String),
}

impl std::fmt::Display for TemplateErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateErrorKind::MissingVariable { template, variable } => write!(
                f,
                "Template '{}' references unbound variable '{}'",
                template, variable
            ),
            TemplateErrorKind::Unterminated(template) => {
                write!(f, "Template '{}' has an unterminated placeholder", template)
            }
            TemplateErrorKind::Store(msg) => write!(f, "Template store failure: {}", msg),
        }
    }
}

/// Template error with source location tracking.
#[derive(Debug, Clone)]
pub struct TemplateError {
    /// The kind of error that occurred
    pub kind: TemplateErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl TemplateError {
    /// Create a new TemplateError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: TemplateErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Template Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for TemplateError {}
