//! Separator, quote and bracket repairs.

use crate::scan::{scan, structural_cut_points};
use serde_json::Value;
use tracing::trace;

/// Maximum number of truncation points tried during salvage.
pub const MAX_SALVAGE_ATTEMPTS: usize = 16;

/// Insert a comma between a closer and an opener that follow each other
/// outside a string (`}{`, `][`, `} {`, `}[`).
pub fn insert_missing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut in_string = false;
    let mut escaped = false;
    let mut after_closer = false;

    for c in text.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            out.push(c);
            continue;
        }

        if after_closer && (c == '{' || c == '[') {
            // Keep whitespace where it was, put the comma right after the closer
            let trailing_ws = out.len() - out.trim_end().len();
            let insert_at = out.len() - trailing_ws;
            out.insert(insert_at, ',');
        }

        match c {
            '"' => {
                in_string = true;
                after_closer = false;
            }
            '}' | ']' => after_closer = true,
            c if c.is_whitespace() => {}
            _ => after_closer = false,
        }
        out.push(c);
    }
    out
}

/// Close a string left open by truncation.
///
/// A trailing lone backslash would escape the appended quote, so it is
/// dropped first.
pub fn balance_quotes(text: &str) -> String {
    let state = scan(text);
    let mut out = text.to_string();
    if state.dangling_escape {
        out.pop();
    }
    if state.quotes % 2 == 1 {
        out.push('"');
    }
    out
}

/// Candidate texts with every missing closer appended.
///
/// The first candidate closes in nesting order (innermost first) and is only
/// offered when it balances the counts. The second appends the brace deficit
/// and then the bracket deficit. Duplicates are dropped.
pub fn close_brackets(text: &str) -> Vec<String> {
    let body = strip_trailing_separator(text);
    let state = scan(body);

    let mut nested = body.to_string();
    for opener in state.unclosed.iter().rev() {
        nested.push(if *opener == '{' { '}' } else { ']' });
    }

    let mut literal = body.to_string();
    for _ in state.close_braces..state.open_braces {
        literal.push('}');
    }
    for _ in state.close_brackets..state.open_brackets {
        literal.push(']');
    }

    let balanced_nested = is_balanced(&nested);
    let mut candidates = Vec::with_capacity(2);
    if balanced_nested {
        candidates.push(nested);
    }
    if !candidates.contains(&literal) {
        candidates.push(literal);
    }
    candidates
}

/// Whether opener and closer counts match outside string literals.
pub fn is_balanced(text: &str) -> bool {
    let state = scan(text);
    state.open_braces == state.close_braces && state.open_brackets == state.close_brackets
}

/// Keep the longest structurally complete prefix that parses.
///
/// First truncates at the rightmost `}` or `]`. Then walks cut points from
/// the end, rebalancing each prefix, for at most [`MAX_SALVAGE_ATTEMPTS`]
/// attempts.
pub fn salvage(text: &str) -> Option<(String, Value)> {
    if let Some(end) = text.rfind(['}', ']']) {
        let truncated = &text[..=end];
        if let Ok(value) = serde_json::from_str::<Value>(truncated) {
            return Some((truncated.to_string(), value));
        }
    }

    let points = structural_cut_points(text);
    for point in points.iter().rev().take(MAX_SALVAGE_ATTEMPTS) {
        let prefix = &text[..point.offset()];
        if prefix.trim().is_empty() {
            continue;
        }
        for candidate in close_brackets(&balance_quotes(prefix)) {
            trace!(cut = ?point, len = candidate.len(), "Trying salvage candidate");
            if let Ok(value) = serde_json::from_str::<Value>(&candidate) {
                return Some((candidate, value));
            }
        }
    }
    None
}

// A trailing comma makes an otherwise closable text invalid once the closers
// are appended.
fn strip_trailing_separator(text: &str) -> &str {
    let state = scan(text);
    if state.in_string {
        return text;
    }
    text.trim_end().trim_end_matches(',').trim_end()
}
