use super::{offline_pages, page_object, page_title};
use crate::{ActivityBlueprint, ActivityId, OfflineGenerator};
use rand::Rng;
use serde_json::json;
use sheetcraft_core::{ActivityOptions, Difficulty, ResultPages, SchemaDescriptor};
use sheetcraft_error::SheetcraftResult;

const LETTERS: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'k', 'm', 'n', 'p', 'q', 'r', 's', 't', 'u', 'w',
];

/// Letters commonly confused with each other.
const LOOKALIKES: &[(char, &[char])] = &[
    ('b', &['d', 'p', 'q']),
    ('d', &['b', 'p', 'q']),
    ('p', &['q', 'b', 'd']),
    ('q', &['p', 'd', 'b']),
    ('m', &['n', 'w']),
    ('n', &['m', 'u']),
    ('u', &['n', 'w']),
    ('w', &['m', 'u']),
];

/// Cross out every occurrence of a target letter in a grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct LetterCancellation;

fn default_rows(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Beginner => 6,
        Difficulty::Medium => 8,
        Difficulty::Hard => 10,
        Difficulty::Expert => 12,
    }
}

fn lookalikes(target: char) -> &'static [char] {
    LOOKALIKES
        .iter()
        .find(|(letter, _)| *letter == target)
        .map(|(_, similar)| *similar)
        .unwrap_or(&[])
}

impl ActivityBlueprint for LetterCancellation {
    fn activity_id(&self) -> ActivityId {
        ActivityId::LetterCancellation
    }

    fn page_schema(&self, _options: &ActivityOptions) -> SchemaDescriptor {
        page_object()
            .required("target", SchemaDescriptor::string())
            .required("rows", SchemaDescriptor::array(SchemaDescriptor::string()))
            .optional("target_count", SchemaDescriptor::integer())
            .build()
    }

    fn instructions(&self, options: &ActivityOptions) -> String {
        let size = options.grid_size_or(default_rows(*options.difficulty()));
        let target = options
            .target_symbol()
            .clone()
            .unwrap_or_else(|| "a letter of your choice".to_string());
        format!(
            "Build a letter cancellation grid of {size} rows with {size} lowercase letters \
             each. The target is {target}. Use look-alike letters as distractors at a \
             density of {}/10 and report how many targets the grid contains.",
            options.distraction_level_or(3),
        )
    }
}

impl OfflineGenerator for LetterCancellation {
    fn generate(&self, options: &ActivityOptions) -> SheetcraftResult<ResultPages> {
        let size = options
            .grid_size_or(default_rows(*options.difficulty()))
            .clamp(4, 20) as usize;
        let distraction = f64::from(options.distraction_level_or(3)) / 10.0;
        let fixed_target = options
            .target_symbol()
            .as_deref()
            .and_then(|s| s.chars().next())
            .map(|c| c.to_ascii_lowercase());

        offline_pages(ActivityId::LetterCancellation, options, |rng, index| {
            let target = fixed_target.unwrap_or_else(|| LETTERS[rng.gen_range(0..LETTERS.len())]);
            let similar = lookalikes(target);
            let fillers: Vec<char> = LETTERS.iter().copied().filter(|c| *c != target).collect();
            let mut count = 0u32;

            let rows: Vec<String> = (0..size)
                .map(|_| {
                    (0..size)
                        .map(|_| {
                            if rng.gen_bool(0.2) {
                                count += 1;
                                target
                            } else if !similar.is_empty() && rng.gen_bool(distraction) {
                                similar[rng.gen_range(0..similar.len())]
                            } else {
                                fillers[rng.gen_range(0..fillers.len())]
                            }
                        })
                        .collect()
                })
                .collect();

            let mut page = json!({
                "title": page_title(ActivityId::LetterCancellation, &target.to_string(), index, options),
                "instructions": format!("Cross out every letter {target}."),
                "target": target.to_string(),
                "rows": rows,
            });
            if *options.include_answer_key() {
                page["target_count"] = json!(count);
            }
            page
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_matches_grid() {
        let options = ActivityOptions::default()
            .with_target_symbol("B")
            .with_distraction_level(10u8)
            .with_include_answer_key(true);
        let pages = LetterCancellation.generate(&options).unwrap();
        let page = pages.first();
        assert_eq!(page["target"], "b");

        let rows = page["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 8);
        let found = rows
            .iter()
            .flat_map(|r| r.as_str().unwrap().chars().collect::<Vec<_>>())
            .filter(|c| *c == 'b')
            .count();
        assert_eq!(found as u64, page["target_count"].as_u64().unwrap());
    }

    #[test]
    fn full_distraction_uses_lookalikes() {
        let options = ActivityOptions::default()
            .with_target_symbol("p")
            .with_distraction_level(10u8);
        let pages = LetterCancellation.generate(&options).unwrap();
        for row in pages.first()["rows"].as_array().unwrap() {
            assert!(row.as_str().unwrap().chars().all(|c| "pqbd".contains(c)));
        }
    }
}
