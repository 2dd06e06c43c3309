use super::{offline_pages, page_object, page_title};
use crate::{ActivityBlueprint, ActivityId, OfflineGenerator};
use rand::Rng;
use serde_json::{Value, json};
use sheetcraft_core::{ActivityOptions, Difficulty, ResultPages, SchemaDescriptor};
use sheetcraft_error::SheetcraftResult;

const BLANK: &str = "__";

/// Number sequences with one missing term.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberPattern;

#[derive(Debug, Clone, Copy)]
enum Rule {
    Step(i64),
    Double,
    Alternate(i64, i64),
}

impl Rule {
    fn pick<R: Rng>(rng: &mut R, difficulty: Difficulty) -> Self {
        let max_step = difficulty.level() as i64 * 3;
        match difficulty {
            Difficulty::Beginner | Difficulty::Medium => Rule::Step(rng.gen_range(1..=max_step)),
            Difficulty::Hard | Difficulty::Expert => match rng.gen_range(0..3) {
                0 => Rule::Step(rng.gen_range(1..=max_step)),
                1 => Rule::Double,
                _ => {
                    let first = rng.gen_range(1..=max_step);
                    Rule::Alternate(first, rng.gen_range(1..=max_step))
                }
            },
        }
    }

    fn describe(&self) -> String {
        match self {
            Rule::Step(n) => format!("add {n}"),
            Rule::Double => "double".to_string(),
            Rule::Alternate(a, b) => format!("add {a}, then add {b}"),
        }
    }

    fn terms(&self, start: i64, len: usize) -> Vec<i64> {
        let mut terms = Vec::with_capacity(len);
        let mut current = start;
        for i in 0..len {
            terms.push(current);
            current = match self {
                Rule::Step(n) => current + n,
                Rule::Double => current * 2,
                Rule::Alternate(a, b) => current + if i % 2 == 0 { a } else { b },
            };
        }
        terms
    }
}

impl ActivityBlueprint for NumberPattern {
    fn activity_id(&self) -> ActivityId {
        ActivityId::NumberPattern
    }

    fn page_schema(&self, _options: &ActivityOptions) -> SchemaDescriptor {
        page_object()
            .required(
                "patterns",
                SchemaDescriptor::array(
                    SchemaDescriptor::object()
                        .required("sequence", SchemaDescriptor::array(SchemaDescriptor::string()))
                        .required("answer", SchemaDescriptor::integer())
                        .optional("rule", SchemaDescriptor::string())
                        .build(),
                ),
            )
            .build()
    }

    fn instructions(&self, options: &ActivityOptions) -> String {
        format!(
            "Write {} number sequences of {} terms each. Replace exactly one term \
             with \"{BLANK}\"; every other term is a number written as a string. \
             Give the missing number as the answer and state the rule.",
            options.item_count_or(6),
            options.sequence_length_or(5),
        )
    }
}

impl OfflineGenerator for NumberPattern {
    fn generate(&self, options: &ActivityOptions) -> SheetcraftResult<ResultPages> {
        let difficulty = *options.difficulty();
        let count = options.item_count_or(6);
        let len = options.sequence_length_or(5).min(12) as usize;
        let max_start = options.max_number_or(10) as i64;

        offline_pages(ActivityId::NumberPattern, options, |rng, index| {
            let patterns: Vec<Value> = (0..count)
                .map(|_| {
                    let rule = Rule::pick(rng, difficulty);
                    let start = rng.gen_range(1..=max_start);
                    let terms = rule.terms(start, len);
                    let blank = match difficulty {
                        Difficulty::Beginner | Difficulty::Medium => len - 1,
                        Difficulty::Hard | Difficulty::Expert => rng.gen_range(0..len),
                    };
                    let sequence: Vec<String> = terms
                        .iter()
                        .enumerate()
                        .map(|(i, t)| if i == blank { BLANK.to_string() } else { t.to_string() })
                        .collect();
                    json!({
                        "sequence": sequence,
                        "answer": terms[blank],
                        "rule": rule.describe(),
                    })
                })
                .collect();

            json!({
                "title": page_title(ActivityId::NumberPattern, "patterns", index, options),
                "instructions": "Find the rule and fill in the missing number.",
                "patterns": patterns,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_blank_per_sequence_and_answer_fits() {
        for difficulty in [Difficulty::Beginner, Difficulty::Expert] {
            let options = ActivityOptions::default()
                .with_difficulty(difficulty)
                .with_sequence_length(6u32);
            let pages = NumberPattern.generate(&options).unwrap();
            for pattern in pages.first()["patterns"].as_array().unwrap() {
                let sequence = pattern["sequence"].as_array().unwrap();
                assert_eq!(sequence.len(), 6);
                let blanks: Vec<usize> = sequence
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.as_str() == Some(BLANK))
                    .map(|(i, _)| i)
                    .collect();
                assert_eq!(blanks.len(), 1);
                if difficulty == Difficulty::Beginner {
                    assert_eq!(blanks[0], 5);
                }
                assert!(pattern["answer"].is_i64());
            }
        }
    }

    #[test]
    fn rules_produce_expected_terms() {
        assert_eq!(Rule::Step(3).terms(2, 4), vec![2, 5, 8, 11]);
        assert_eq!(Rule::Double.terms(1, 4), vec![1, 2, 4, 8]);
        assert_eq!(Rule::Alternate(1, 5).terms(0, 5), vec![0, 1, 6, 7, 12]);
    }
}
