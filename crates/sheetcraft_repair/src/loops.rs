//! Detection and collapse of generator loops.
//!
//! A text generator that starts repeating itself produces the same span over
//! and over until it runs out of tokens. Such runs are found per candidate
//! period with a single linear pass comparing each character with the one a
//! period later.

use tracing::{debug, warn};

/// Shortest repeated span considered a loop, in characters.
pub const MIN_LOOP_UNIT: usize = 50;

/// Longest repeated span searched for, in characters.
pub const MAX_LOOP_UNIT: usize = 1024;

/// Consecutive repetitions at which a loop is reported.
pub const DETECT_REPETITIONS: usize = 3;

/// Consecutive repetitions at which a loop is collapsed to one occurrence.
pub const COLLAPSE_REPETITIONS: usize = 5;

/// A repeated span found in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopRun {
    /// Character offset of the first occurrence
    pub start: usize,
    /// Length of the repeated unit in characters
    pub unit_len: usize,
    /// Number of consecutive occurrences
    pub repetitions: usize,
}

/// Find every run of at least [`DETECT_REPETITIONS`] repetitions, shortest
/// period first. Runs of different periods may overlap.
pub fn detect_loops(text: &str) -> Vec<LoopRun> {
    let chars: Vec<char> = text.chars().collect();
    let mut runs = Vec::new();
    let max_unit = MAX_LOOP_UNIT.min(chars.len() / DETECT_REPETITIONS);

    for unit_len in MIN_LOOP_UNIT..=max_unit {
        runs.extend(runs_with_period(&chars, unit_len, DETECT_REPETITIONS));
    }
    runs
}

/// Collapse every run of [`COLLAPSE_REPETITIONS`] or more repetitions to a
/// single occurrence.
///
/// Returns the new text and the number of runs collapsed.
pub fn collapse_loops(text: &str) -> (String, usize) {
    let mut chars: Vec<char> = text.chars().collect();
    let mut collapsed = 0;
    let mut unit_len = MIN_LOOP_UNIT;

    while unit_len <= MAX_LOOP_UNIT && unit_len * COLLAPSE_REPETITIONS <= chars.len() {
        let runs = runs_with_period(&chars, unit_len, DETECT_REPETITIONS);
        let mut rebuilt: Vec<char> = Vec::with_capacity(chars.len());
        let mut cursor = 0;

        for run in &runs {
            if run.start < cursor {
                continue;
            }
            if run.repetitions < COLLAPSE_REPETITIONS {
                debug!(
                    start = run.start,
                    unit_len = run.unit_len,
                    repetitions = run.repetitions,
                    "Repetition below collapse threshold"
                );
                continue;
            }
            warn!(
                start = run.start,
                unit_len = run.unit_len,
                repetitions = run.repetitions,
                "Collapsing generator loop"
            );
            let keep_until = run.start + run.unit_len;
            rebuilt.extend_from_slice(&chars[cursor..keep_until]);
            cursor = run.start + run.unit_len * run.repetitions;
            collapsed += 1;
        }

        if cursor > 0 {
            rebuilt.extend_from_slice(&chars[cursor..]);
            chars = rebuilt;
        }
        unit_len += 1;
    }

    (chars.into_iter().collect(), collapsed)
}

/// Non-overlapping runs of period `unit_len` with at least `min_reps`
/// occurrences, in text order.
fn runs_with_period(chars: &[char], unit_len: usize, min_reps: usize) -> Vec<LoopRun> {
    let mut runs = Vec::new();
    if chars.len() < unit_len * min_reps {
        return runs;
    }

    let limit = chars.len() - unit_len;
    let mut j = 0;
    while j < limit {
        if chars[j] != chars[j + unit_len] {
            j += 1;
            continue;
        }
        let start = j;
        while j < limit && chars[j] == chars[j + unit_len] {
            j += 1;
        }
        // chars[start..j + unit_len] has period unit_len
        let repetitions = (j - start) / unit_len + 1;
        if repetitions >= min_reps {
            runs.push(LoopRun {
                start,
                unit_len,
                repetitions,
            });
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZABCDEFGHIJKLMNOPQRSTUVWX";

    #[test]
    fn unit_is_fifty_chars() {
        assert_eq!(UNIT.chars().count(), 50);
    }

    #[test]
    fn collapses_eight_repetitions() {
        let text = format!("[\"{}\"]", UNIT.repeat(8));
        let (out, count) = collapse_loops(&text);
        assert_eq!(out, format!("[\"{}\"]", UNIT));
        assert_eq!(count, 1);
    }

    #[test]
    fn leaves_four_repetitions() {
        let text = format!("[\"{}\"]", UNIT.repeat(4));
        let (out, count) = collapse_loops(&text);
        assert_eq!(out, text);
        assert_eq!(count, 0);
        assert!(!detect_loops(&text).is_empty());
    }

    #[test]
    fn short_units_ignored() {
        let text = "abc".repeat(100);
        assert_eq!(collapse_loops(&text).1, 0);
    }

    #[test]
    fn multibyte_text_stays_valid() {
        let unit = "ÄÖÜ ñandú café 東京 « the same sentence again and again. ";
        let text = format!("{}{}", unit.repeat(6), "end");
        let (out, count) = collapse_loops(&text);
        assert_eq!(count, 1);
        assert_eq!(out, format!("{}end", unit));
    }
}
