//! Tests for activity options defaults, merging and seeding.

use serde_json::json;
use sheetcraft_core::{
    ActivityOptions, Difficulty, GenerationMode, MAX_WORKSHEETS, ResultPages, StudentContext,
};
use std::str::FromStr;

#[test]
fn test_defaults() {
    let options = ActivityOptions::default();
    assert_eq!(*options.mode(), GenerationMode::Ai);
    assert_eq!(*options.difficulty(), Difficulty::Medium);
    assert_eq!(options.item_count_or(6), 6);
    assert_eq!(options.worksheet_count_or_one(), 1);
    assert_eq!(options.topic_or("animals"), "animals");
    assert_eq!(options.language_or_default(), "English");
}

#[test]
fn test_clamping() {
    let options = ActivityOptions::default()
        .with_worksheet_count(500u32)
        .with_item_count(0u32)
        .with_distraction_level(42u8);
    assert_eq!(options.worksheet_count_or_one(), MAX_WORKSHEETS);
    assert_eq!(options.item_count_or(5), 1);
    assert_eq!(options.distraction_level_or(3), 10);
}

#[test]
fn test_blank_topic_uses_default() {
    let options = ActivityOptions::default().with_topic("   ");
    assert_eq!(options.topic_or("shapes"), "shapes");
}

#[test]
fn test_student_merge_leaves_snapshot_untouched() {
    let student = StudentContext::new(
        "Ada",
        vec!["dyscalculia".to_string()],
        vec!["subtraction".to_string()],
        vec!["trains".to_string()],
    );
    let before = student.clone();
    let options = ActivityOptions::default().merged_with_student(&student);

    assert_eq!(student, before);
    assert_eq!(options.student_context().as_ref(), Some(&student));

    let clause = student.prompt_clause();
    assert!(clause.contains("Ada"));
    assert!(clause.contains("dyscalculia"));
    assert!(clause.contains("trains"));
}

#[test]
fn test_seed_is_stable_and_sensitive() {
    let a = ActivityOptions::default().with_topic("farm");
    let b = ActivityOptions::default().with_topic("farm");
    let c = ActivityOptions::default().with_topic("ocean");

    assert_eq!(a.seed_for("word_search"), b.seed_for("word_search"));
    assert_ne!(a.seed_for("word_search"), c.seed_for("word_search"));
    assert_ne!(a.seed_for("word_search"), a.seed_for("math_drill"));

    let fixed = a.clone().with_seed(7u64);
    assert_eq!(fixed.seed_for("anything"), 7);
}

#[test]
fn test_options_deserialize_with_missing_fields() {
    let options: ActivityOptions = serde_json::from_value(json!({
        "topic": "weather",
        "mode": "fast",
        "difficulty": "Hard"
    }))
    .unwrap();
    assert_eq!(*options.mode(), GenerationMode::Fast);
    assert_eq!(*options.difficulty(), Difficulty::Hard);
    assert_eq!(options.item_count(), &None);
}

#[test]
fn test_difficulty_parses_case_insensitively() {
    assert_eq!(Difficulty::from_str("expert").unwrap(), Difficulty::Expert);
    assert_eq!(Difficulty::from_str("BEGINNER").unwrap(), Difficulty::Beginner);
    assert!(Difficulty::from_str("impossible").is_err());
    assert_eq!(GenerationMode::from_str("fast").unwrap(), GenerationMode::Fast);
}

#[test]
fn test_result_pages_reject_empty() {
    assert!(ResultPages::new(vec![]).is_err());
    let pages = ResultPages::new(vec![json!({"a": 1}), json!({"b": 2})]).unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages.first(), &json!({"a": 1}));

    let decoded: Result<ResultPages, _> = serde_json::from_value(json!([]));
    assert!(decoded.is_err());
}

#[test]
fn numeric_knobs_have_upper_bounds() {
    let options = ActivityOptions::default()
        .with_item_count(u32::MAX)
        .with_grid_size(u32::MAX)
        .with_max_number(u32::MAX)
        .with_sequence_length(u32::MAX);
    assert_eq!(options.item_count_or(5), sheetcraft_core::MAX_ITEMS);
    assert_eq!(options.grid_size_or(10), sheetcraft_core::MAX_GRID_SIZE);
    assert_eq!(options.max_number_or(10), sheetcraft_core::MAX_NUMBER);
    assert_eq!(options.sequence_length_or(5), sheetcraft_core::MAX_SEQUENCE_LENGTH);
}
