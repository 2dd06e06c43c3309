//! Closed set of compiled activity identifiers.

use serde::{Deserialize, Serialize};

/// Identifier of a compiled activity.
///
/// The string form is the stable external identifier (`word_search`,
/// `math_drill`, ...). Custom template activities use free-form identifiers
/// and never appear here.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActivityId {
    /// Find hidden words in a letter grid
    WordSearch,
    /// Arithmetic practice
    MathDrill,
    /// Pairs of matching cards
    MemoryMatch,
    /// Unscramble jumbled words
    WordScramble,
    /// Spot the item that does not belong
    OddOneOut,
    /// Continue a number sequence
    NumberPattern,
    /// Cross out every target symbol in a grid
    LetterCancellation,
    /// Put the steps of a routine in order
    Sequencing,
    /// Short passage with questions
    ReadingComprehension,
    /// Guided writing prompts
    CreativeWriting,
}

impl ActivityId {
    /// Human-readable title.
    pub fn title(&self) -> &'static str {
        match self {
            ActivityId::WordSearch => "Word Search",
            ActivityId::MathDrill => "Math Drill",
            ActivityId::MemoryMatch => "Memory Match",
            ActivityId::WordScramble => "Word Scramble",
            ActivityId::OddOneOut => "Odd One Out",
            ActivityId::NumberPattern => "Number Patterns",
            ActivityId::LetterCancellation => "Letter Cancellation",
            ActivityId::Sequencing => "Sequencing",
            ActivityId::ReadingComprehension => "Reading Comprehension",
            ActivityId::CreativeWriting => "Creative Writing",
        }
    }
}
