//! Code-fence and surrounding-prose removal.

const FENCE: &str = "```";

/// Strip markdown code fences and surrounding whitespace.
///
/// Handles a leading fence with or without a language tag, a trailing fence,
/// and a fenced block preceded by prose ("Here is your worksheet: ```json").
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    if !text.starts_with(FENCE) {
        if let Some(start) = text.find(FENCE) {
            text = &text[start..];
        } else {
            return text;
        }
    }

    // Opening fence: drop the whole first line (```json, ```JSON, ```)
    text = match text.find('\n') {
        Some(newline) => &text[newline + 1..],
        None => text
            .trim_start_matches(FENCE)
            .trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };

    if let Some(end) = text.rfind(FENCE) {
        text = &text[..end];
    }

    text.trim()
}

/// Drop conversational text before the first `{` or `[`.
///
/// Only applies when the prefix contains no quote or bracket, so a bare JSON
/// string or literal is never touched.
pub fn strip_leading_prose(text: &str) -> &str {
    let Some(start) = text.find(['{', '[']) else {
        return text;
    };
    let prefix = &text[..start];
    if start == 0 || prefix.contains('"') || prefix.contains(']') || prefix.contains('}') {
        return text;
    }
    &text[start..]
}
