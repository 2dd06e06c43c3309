//! String-aware scanning over JSON-ish text.

/// Result of walking the text with string/escape tracking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Scan {
    /// Openers (`{` or `[`) still waiting for a closer, outermost first
    pub unclosed: Vec<char>,
    /// Unescaped `"` count
    pub quotes: usize,
    /// Text ends inside a string literal
    pub in_string: bool,
    /// Text ends right after an unfinished escape (`\`)
    pub dangling_escape: bool,
    /// `{` count outside strings
    pub open_braces: usize,
    /// `}` count outside strings
    pub close_braces: usize,
    /// `[` count outside strings
    pub open_brackets: usize,
    /// `]` count outside strings
    pub close_brackets: usize,
}

pub(crate) fn scan(text: &str) -> Scan {
    let mut out = Scan::default();
    let mut escaped = false;

    for c in text.chars() {
        if out.in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                out.quotes += 1;
                out.in_string = false;
            }
            continue;
        }
        match c {
            '"' => {
                out.quotes += 1;
                out.in_string = true;
            }
            '{' => {
                out.open_braces += 1;
                out.unclosed.push('{');
            }
            '[' => {
                out.open_brackets += 1;
                out.unclosed.push('[');
            }
            '}' => {
                out.close_braces += 1;
                pop_matching(&mut out.unclosed, '{');
            }
            ']' => {
                out.close_brackets += 1;
                pop_matching(&mut out.unclosed, '[');
            }
            _ => {}
        }
    }
    out.dangling_escape = out.in_string && escaped;
    out
}

// Mismatched closers pop nothing; the surplus is left for salvage.
fn pop_matching(stack: &mut Vec<char>, opener: char) {
    if stack.last() == Some(&opener) {
        stack.pop();
    }
}

/// Byte offsets of structural characters outside string literals.
///
/// Returns positions of `}`/`]` (cut after) and `,` (cut before), in order.
pub(crate) fn structural_cut_points(text: &str) -> Vec<CutPoint> {
    let mut points = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (index, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '}' | ']' => points.push(CutPoint::After(index + c.len_utf8())),
            ',' => points.push(CutPoint::Before(index)),
            _ => {}
        }
    }
    points
}

/// Where a salvage truncation may end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CutPoint {
    /// Keep text up to and including a closer
    After(usize),
    /// Keep text up to (excluding) a separator
    Before(usize),
}

impl CutPoint {
    pub fn offset(&self) -> usize {
        match self {
            CutPoint::After(i) | CutPoint::Before(i) => *i,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn braces_inside_strings_are_ignored() {
        let s = scan(r#"{"a": "}{][", "b": ["#);
        assert_eq!(s.unclosed, vec!['{', '[']);
        assert_eq!(s.quotes, 6);
        assert!(!s.in_string);
    }

    #[test]
    fn escaped_quotes_do_not_close() {
        let s = scan(r#"{"a": "say \"hi"#);
        assert!(s.in_string);
        assert_eq!(s.quotes, 3);
    }

    #[test]
    fn dangling_escape_detected() {
        assert!(scan(r#"["abc\"#).dangling_escape);
        assert!(!scan(r#"["abc\\"#).dangling_escape);
    }

    #[test]
    fn cut_points_skip_strings() {
        let points = structural_cut_points(r#"[{"a": "x,}"}, 1]"#);
        assert_eq!(
            points,
            vec![CutPoint::After(13), CutPoint::Before(13), CutPoint::After(17)]
        );
    }
}
