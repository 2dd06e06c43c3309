//! Activity options supplied per generation request.
//!
//! Every field is optional; each generator supplies its own defaults through
//! the `*_or` accessors.

use crate::MediaAttachment;
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// Difficulty level of a worksheet.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Difficulty {
    /// Entry level
    #[strum(ascii_case_insensitive)]
    Beginner,
    /// Default level
    #[default]
    #[strum(ascii_case_insensitive)]
    Medium,
    /// Challenging
    #[strum(ascii_case_insensitive)]
    Hard,
    /// Most demanding
    #[strum(ascii_case_insensitive)]
    Expert,
}

impl Difficulty {
    /// Numeric level from 1 (Beginner) to 4 (Expert).
    pub fn level(&self) -> u32 {
        match self {
            Difficulty::Beginner => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
            Difficulty::Expert => 4,
        }
    }
}

/// Which generation path the caller asked for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GenerationMode {
    /// Remote generation with offline fallback
    #[default]
    Ai,
    /// Offline rule-based generation only
    Fast,
}

/// Read-only snapshot of the learner a worksheet is made for.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Getters)]
pub struct StudentContext {
    /// Display name
    #[serde(default)]
    name: String,
    /// Diagnoses relevant to material design (e.g. "dyslexia")
    #[serde(default)]
    diagnosis: Vec<String>,
    /// Skill areas needing practice
    #[serde(default)]
    weaknesses: Vec<String>,
    /// Topics the learner enjoys
    #[serde(default)]
    interests: Vec<String>,
}

impl StudentContext {
    /// Create a snapshot.
    pub fn new(
        name: impl Into<String>,
        diagnosis: Vec<String>,
        weaknesses: Vec<String>,
        interests: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            diagnosis,
            weaknesses,
            interests,
        }
    }

    /// Prompt paragraph describing the learner.
    pub fn prompt_clause(&self) -> String {
        let mut clause = String::from("Tailor the material to this learner.");
        if !self.name.is_empty() {
            clause.push_str(&format!(" Name: {}.", self.name));
        }
        if !self.diagnosis.is_empty() {
            clause.push_str(&format!(" Diagnosis: {}.", self.diagnosis.join(", ")));
        }
        if !self.weaknesses.is_empty() {
            clause.push_str(&format!(
                " Needs practice with: {}.",
                self.weaknesses.join(", ")
            ));
        }
        if !self.interests.is_empty() {
            clause.push_str(&format!(
                " Interests (use them in examples): {}.",
                self.interests.join(", ")
            ));
        }
        clause
    }
}

/// User-supplied material to build the activity from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomInput {
    /// Free-text blueprint, e.g. an educator's outline
    #[serde(default)]
    pub blueprint_text: Option<String>,
    /// Attached image, e.g. a photographed worksheet to adapt
    #[serde(default)]
    pub image: Option<MediaAttachment>,
}

/// Configuration record for one generation request.
///
/// # Examples
///
/// ```
/// use sheetcraft_core::{ActivityOptions, Difficulty, GenerationMode};
///
/// let options = ActivityOptions::default()
///     .with_topic("ocean animals")
///     .with_difficulty(Difficulty::Hard)
///     .with_item_count(8u32)
///     .with_mode(GenerationMode::Fast);
///
/// assert_eq!(options.item_count_or(5), 8);
/// assert_eq!(options.worksheet_count_or_one(), 1);
/// assert_eq!(options.topic_or("animals"), "ocean animals");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_", into)]
#[serde(default)]
pub struct ActivityOptions {
    /// Subject matter
    #[setters(strip_option)]
    topic: Option<String>,
    /// Difficulty level
    difficulty: Difficulty,
    /// Items per worksheet
    #[setters(strip_option)]
    item_count: Option<u32>,
    /// Number of worksheets (pages) to produce
    #[setters(strip_option)]
    worksheet_count: Option<u32>,
    /// Requested generation path
    mode: GenerationMode,
    /// Learner snapshot merged into prompts
    #[setters(strip_option)]
    student_context: Option<StudentContext>,
    /// Attached blueprint or image
    #[setters(strip_option)]
    custom_input: Option<CustomInput>,
    /// Square grid edge length (word search, cancellation grids)
    #[setters(strip_option)]
    grid_size: Option<u32>,
    /// Activity-specific variant name
    #[setters(strip_option)]
    variant: Option<String>,
    /// Distractor density from 0 (none) to 10
    #[setters(strip_option)]
    distraction_level: Option<u8>,
    /// Largest operand for numeric activities
    #[setters(strip_option)]
    max_number: Option<u32>,
    /// Length of sequences and patterns
    #[setters(strip_option)]
    sequence_length: Option<u32>,
    /// Target letter or symbol for cancellation activities
    #[setters(strip_option)]
    target_symbol: Option<String>,
    /// Language of the generated content
    #[setters(strip_option)]
    language: Option<String>,
    /// Whether pages carry an answer key
    include_answer_key: bool,
    /// Fixed seed for offline generation
    #[setters(strip_option)]
    seed: Option<u64>,
}

/// Upper bound on worksheets per request.
pub const MAX_WORKSHEETS: u32 = 20;

/// Upper bound on items per page.
pub const MAX_ITEMS: u32 = 100;

/// Upper bound on grid rows and columns.
pub const MAX_GRID_SIZE: u32 = 30;

/// Upper bound on sequence length.
pub const MAX_SEQUENCE_LENGTH: u32 = 20;

/// Upper bound on the largest number in numeric activities.
pub const MAX_NUMBER: u32 = 1_000_000;

impl ActivityOptions {
    /// Topic, or the generator's default.
    pub fn topic_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.topic.as_deref().filter(|t| !t.trim().is_empty()).unwrap_or(default)
    }

    /// Item count, or the generator's default, clamped to `1..=MAX_ITEMS`.
    pub fn item_count_or(&self, default: u32) -> u32 {
        self.item_count.unwrap_or(default).clamp(1, MAX_ITEMS)
    }

    /// Worksheet count clamped to `1..=MAX_WORKSHEETS`.
    pub fn worksheet_count_or_one(&self) -> u32 {
        self.worksheet_count.unwrap_or(1).clamp(1, MAX_WORKSHEETS)
    }

    /// Grid size, or the generator's default, clamped to `1..=MAX_GRID_SIZE`.
    pub fn grid_size_or(&self, default: u32) -> u32 {
        self.grid_size.unwrap_or(default).clamp(1, MAX_GRID_SIZE)
    }

    /// Distraction level clamped to `0..=10`.
    pub fn distraction_level_or(&self, default: u8) -> u8 {
        self.distraction_level.unwrap_or(default).min(10)
    }

    /// Largest operand, or the generator's default.
    pub fn max_number_or(&self, default: u32) -> u32 {
        self.max_number.unwrap_or(default).clamp(1, MAX_NUMBER)
    }

    /// Sequence length, or the generator's default, clamped to
    /// `2..=MAX_SEQUENCE_LENGTH`.
    pub fn sequence_length_or(&self, default: u32) -> u32 {
        self.sequence_length.unwrap_or(default).clamp(2, MAX_SEQUENCE_LENGTH)
    }

    /// Language, defaulting to English.
    pub fn language_or_default(&self) -> &str {
        self.language.as_deref().unwrap_or("English")
    }

    /// Return a copy with the learner snapshot merged in.
    ///
    /// The snapshot is cloned, never modified.
    pub fn merged_with_student(&self, student: &StudentContext) -> Self {
        let mut merged = self.clone();
        merged.student_context = Some(student.clone());
        merged
    }

    /// Seed used by offline generators for `activity`.
    ///
    /// An explicit seed wins. Otherwise the seed is derived from the activity,
    /// topic and difficulty so identical requests produce identical sheets.
    pub fn seed_for(&self, activity: &str) -> u64 {
        if let Some(seed) = self.seed {
            return seed;
        }
        // FNV-1a: stable across platforms and compiler versions.
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        let difficulty = self.difficulty.to_string();
        let parts = [activity, self.topic.as_deref().unwrap_or(""), difficulty.as_str()];
        for part in parts {
            for byte in part.bytes().chain(std::iter::once(0xff)) {
                hash ^= u64::from(byte);
                hash = hash.wrapping_mul(0x0100_0000_01b3);
            }
        }
        hash
    }
}
