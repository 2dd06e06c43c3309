//! Result normalization into page lists.

use serde_json::{Map, Value};
use sheetcraft_core::{ResultPages, json_type_name};
use sheetcraft_error::{FormatError, FormatErrorKind, SheetcraftResult};
use tracing::debug;

/// Field names generators commonly wrap a page list in.
pub const ENVELOPE_KEYS: &[&str] = &["pages", "worksheets", "items", "data", "results"];

/// Turn generator output into a non-empty page list.
///
/// * A non-empty array is returned unchanged; an empty one is rejected with
///   [`FormatErrorKind::EmptyPages`].
/// * An envelope object (no `title`, and either a known envelope key or a
///   single field holding an array of objects) is unwrapped. An envelope
///   around an empty array is rejected like an empty array.
/// * Any other object becomes a one-page list.
/// * Scalars are rejected with [`FormatErrorKind::NotAPage`].
///
/// Normalizing the pages of an earlier result returns them unchanged.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use sheetcraft_pipeline::normalize;
///
/// let pages = normalize(json!({"worksheets": [{"title": "A"}, {"title": "B"}]})).unwrap();
/// assert_eq!(pages.len(), 2);
///
/// let single = normalize(json!({"title": "Alone", "items": [{"q": 1}]})).unwrap();
/// assert_eq!(single.len(), 1);
/// ```
pub fn normalize(value: Value) -> SheetcraftResult<ResultPages> {
    match value {
        Value::Array(pages) => Ok(ResultPages::new(pages)?),
        Value::Object(mut object) => match envelope_key(&object).map(str::to_string) {
            Some(key) => {
                debug!(key = %key, "Unwrapping page envelope");
                let pages = match object.remove(&key) {
                    Some(Value::Array(pages)) => pages,
                    _ => Vec::new(),
                };
                Ok(ResultPages::new(pages)?)
            }
            None => Ok(ResultPages::single(Value::Object(object))),
        },
        other => Err(FormatError::new(FormatErrorKind::NotAPage(
            json_type_name(&other).to_string(),
        ))
        .into()),
    }
}

fn envelope_key(object: &Map<String, Value>) -> Option<&str> {
    if object.contains_key("title") {
        return None;
    }
    if let Some(key) = ENVELOPE_KEYS
        .iter()
        .copied()
        .find(|key| object.get(*key).is_some_and(is_page_list))
    {
        return Some(key);
    }
    match object.iter().next() {
        Some((key, value)) if object.len() == 1 && is_page_list(value) => Some(key.as_str()),
        _ => None,
    }
}

fn is_page_list(value: &Value) -> bool {
    value
        .as_array()
        .is_some_and(|items| items.iter().all(Value::is_object))
}
