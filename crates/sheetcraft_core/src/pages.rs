//! Result pages and generation outcomes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sheetcraft_error::{FormatError, FormatErrorKind};

/// Non-empty ordered sequence of page objects.
///
/// Each page is an activity-shaped record that renders independently of the
/// others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Value>", into = "Vec<Value>")]
pub struct ResultPages(Vec<Value>);

impl ResultPages {
    /// Wrap a page list, rejecting an empty one.
    ///
    /// # Errors
    ///
    /// Returns [`FormatErrorKind::EmptyPages`] when `pages` is empty.
    #[track_caller]
    pub fn new(pages: Vec<Value>) -> Result<Self, FormatError> {
        if pages.is_empty() {
            return Err(FormatError::new(FormatErrorKind::EmptyPages));
        }
        Ok(Self(pages))
    }

    /// A single page.
    pub fn single(page: Value) -> Self {
        Self(vec![page])
    }

    /// Borrow the pages.
    pub fn pages(&self) -> &[Value] {
        &self.0
    }

    /// Number of pages (at least one).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First page.
    pub fn first(&self) -> &Value {
        &self.0[0]
    }

    /// Consume into the underlying vector.
    pub fn into_inner(self) -> Vec<Value> {
        self.0
    }

    /// Consume into a JSON array.
    pub fn into_value(self) -> Value {
        Value::Array(self.0)
    }
}

impl TryFrom<Vec<Value>> for ResultPages {
    type Error = FormatError;

    fn try_from(pages: Vec<Value>) -> Result<Self, Self::Error> {
        Self::new(pages)
    }
}

impl From<ResultPages> for Vec<Value> {
    fn from(pages: ResultPages) -> Self {
        pages.0
    }
}

/// Which path produced a result.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GenerationPath {
    /// Compiled online generator
    Online,
    /// User-authored prompt template
    CustomTemplate,
    /// Offline rule-based generator
    Offline,
}

/// Final result of one orchestrated generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOutcome {
    /// Activity identifier that was generated
    pub activity_id: String,
    /// Generated pages
    pub pages: ResultPages,
    /// True when the offline path answered after the online path failed
    pub degraded: bool,
    /// Path that produced `pages`
    pub path: GenerationPath,
    /// Why the online attempt failed, when `degraded`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_cause: Option<String>,
}
