//! Empty response error.

/// A successful response that carried no content.
#[derive(Debug, Clone)]
pub struct EmptyResponseError {
    /// Which transport path produced the empty body
    pub path: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl EmptyResponseError {
    /// Create a new EmptyResponseError for the given transport path.
    ///
    /// # Examples
    ///
    /// ```
    /// use sheetcraft_error::EmptyResponseError;
    ///
    /// let err = EmptyResponseError::new("relay");
    /// assert!(format!("{}", err).contains("relay"));
    /// ```
    #[track_caller]
    pub fn new(path: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            path: path.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for EmptyResponseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Empty Response: {} path returned no content at line {} in {}",
            self.path, self.line, self.file
        )
    }
}

impl std::error::Error for EmptyResponseError {}
