//! Heuristic repair of malformed JSON returned by text generators.
//!
//! Generator output fails in a handful of recurring ways: markdown fences
//! around the payload, the model looping on itself, missing separators
//! between list items, and truncation mid-string or mid-structure. [`repair`]
//! runs a fixed sequence of stages and re-attempts a parse after each one.
//!
//! | Stage | Fixes |
//! |-------|-------|
//! | Direct | fences, leading prose |
//! | LoopCollapse | spans of 50+ chars repeated 5+ times |
//! | CommaInsertion | `}{` and `][` |
//! | QuoteBalance | text truncated inside a string |
//! | BracketBalance | missing `}` and `]` |
//! | Salvage | trailing garbage after the last complete item |
//!
//! # Example
//!
//! ```
//! use sheetcraft_repair::repair;
//!
//! let value = repair("```json\n{\"title\": \"Hello").unwrap();
//! assert_eq!(value["title"], "Hello");
//! ```

#![warn(missing_docs)]

mod balance;
mod fence;
mod loops;
mod scan;

pub use balance::{
    MAX_SALVAGE_ATTEMPTS, balance_quotes, close_brackets, insert_missing_commas, is_balanced,
    salvage,
};
pub use fence::{strip_code_fences, strip_leading_prose};
pub use loops::{
    COLLAPSE_REPETITIONS, DETECT_REPETITIONS, LoopRun, MAX_LOOP_UNIT, MIN_LOOP_UNIT,
    collapse_loops, detect_loops,
};

use serde_json::Value;
use sheetcraft_error::FormatError;
use tracing::{debug, instrument, warn};

/// Repair stage that produced a parseable text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum RepairStage {
    /// Parsed after fence and prose stripping alone
    Direct,
    /// Parsed after collapsing generator loops
    LoopCollapse,
    /// Parsed after inserting missing commas
    CommaInsertion,
    /// Parsed after closing an open string
    QuoteBalance,
    /// Parsed after appending missing closers
    BracketBalance,
    /// Parsed after truncating to the last complete fragment
    Salvage,
}

/// A successful repair with the text that finally parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Repaired {
    /// Parsed value
    pub value: Value,
    /// Stage at which parsing succeeded
    pub stage: RepairStage,
    /// Text handed to the parser on the successful attempt
    pub text: String,
}

/// Parse `raw` as JSON, repairing it if needed.
///
/// Fails with [`FormatErrorKind::Unrecoverable`](sheetcraft_error::FormatErrorKind::Unrecoverable)
/// carrying the original text once every stage is exhausted.
///
/// Input that already parses is returned as is: repeated spans inside valid
/// JSON are never collapsed.
pub fn repair(raw: &str) -> Result<Value, FormatError> {
    repair_with_report(raw).map(|repaired| repaired.value)
}

/// Like [`repair`], also reporting which stage succeeded.
#[instrument(skip(raw), fields(raw_len = raw.len()))]
pub fn repair_with_report(raw: &str) -> Result<Repaired, FormatError> {
    // Valid JSON is returned untouched, even when a string inside it holds
    // a fence marker or a repeated span.
    if let Ok(value) = serde_json::from_str::<Value>(raw) {
        return Ok(done(value, RepairStage::Direct, raw.trim().to_string()));
    }

    let stripped = strip_leading_prose(strip_code_fences(raw));

    let mut last_error = match serde_json::from_str::<Value>(stripped) {
        Ok(value) => return Ok(done(value, RepairStage::Direct, stripped.to_string())),
        Err(e) => e.to_string(),
    };
    debug!(error = %last_error, "Direct parse failed, repairing");

    let mut text = stripped.to_string();
    let stages: [(RepairStage, fn(&str) -> String); 3] = [
        (RepairStage::LoopCollapse, collapsed),
        (RepairStage::CommaInsertion, insert_missing_commas),
        (RepairStage::QuoteBalance, balance_quotes),
    ];

    for (stage, apply) in stages {
        let next = apply(&text);
        if next == text {
            continue;
        }
        text = next;
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => return Ok(done(value, stage, text)),
            Err(e) => last_error = e.to_string(),
        }
    }

    for candidate in close_brackets(&text) {
        match serde_json::from_str::<Value>(&candidate) {
            Ok(value) => return Ok(done(value, RepairStage::BracketBalance, candidate)),
            Err(e) => last_error = e.to_string(),
        }
    }

    if let Some((salvaged, value)) = salvage(&text) {
        warn!(
            kept = salvaged.len(),
            dropped = text.len().saturating_sub(salvaged.len()),
            "Salvaged truncated generator output"
        );
        return Ok(done(value, RepairStage::Salvage, salvaged));
    }

    warn!(error = %last_error, "Generator output is unrecoverable");
    Err(FormatError::unrecoverable(raw, last_error))
}

fn collapsed(text: &str) -> String {
    collapse_loops(text).0
}

fn done(value: Value, stage: RepairStage, text: String) -> Repaired {
    debug!(%stage, "Repair succeeded");
    Repaired { value, stage, text }
}
