use super::{offline_pages, page_object, page_title, words};
use crate::{ActivityBlueprint, ActivityId, OfflineGenerator};
use rand::Rng;
use rand::seq::SliceRandom;
use serde_json::{Value, json};
use sheetcraft_core::{ActivityOptions, Difficulty, ResultPages, SchemaDescriptor};
use sheetcraft_error::SheetcraftResult;

const SHUFFLE_ATTEMPTS: usize = 8;

/// Words with their letters mixed up.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordScramble;

fn max_len(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Beginner => 5,
        Difficulty::Medium => 7,
        Difficulty::Hard | Difficulty::Expert => 12,
    }
}

/// Shuffle `word` until it differs from the original; reverse as a last resort.
fn scramble<R: Rng>(rng: &mut R, word: &str) -> String {
    let mut letters: Vec<char> = word.chars().collect();
    for _ in 0..SHUFFLE_ATTEMPTS {
        letters.shuffle(rng);
        let candidate: String = letters.iter().collect();
        if candidate != word {
            return candidate;
        }
    }
    word.chars().rev().collect()
}

impl ActivityBlueprint for WordScramble {
    fn activity_id(&self) -> ActivityId {
        ActivityId::WordScramble
    }

    fn page_schema(&self, _options: &ActivityOptions) -> SchemaDescriptor {
        page_object()
            .required(
                "words",
                SchemaDescriptor::array(
                    SchemaDescriptor::object()
                        .required("scrambled", SchemaDescriptor::string())
                        .required("answer", SchemaDescriptor::string())
                        .optional("hint", SchemaDescriptor::string())
                        .build(),
                ),
            )
            .build()
    }

    fn instructions(&self, options: &ActivityOptions) -> String {
        format!(
            "Pick {} words about {} of at most {} letters. For each give the \
             scrambled letters, the answer in capitals and a one-line hint. \
             The scrambled form must differ from the answer.",
            options.item_count_or(8),
            options.topic_or("animals"),
            max_len(*options.difficulty()),
        )
    }
}

impl OfflineGenerator for WordScramble {
    fn generate(&self, options: &ActivityOptions) -> SheetcraftResult<ResultPages> {
        let difficulty = *options.difficulty();
        let topic = options.topic_or("animals");
        let count = options.item_count_or(8) as usize;
        let hints = difficulty == Difficulty::Beginner;

        offline_pages(ActivityId::WordScramble, options, |rng, index| {
            let items: Vec<Value> = words::pick_words(rng, topic, count, Some(max_len(difficulty)))
                .into_iter()
                .filter(|w| w.chars().count() > 1)
                .map(|word| {
                    let mut item = json!({
                        "scrambled": scramble(rng, &word),
                        "answer": word,
                    });
                    if hints {
                        if let Some(first) = word.chars().next() {
                            item["hint"] = json!(format!("Starts with {first}"));
                        }
                    }
                    item
                })
                .collect();

            json!({
                "title": page_title(ActivityId::WordScramble, topic, index, options),
                "instructions": "Unscramble the letters to make a word.",
                "words": items,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn scrambled_is_an_anagram_that_differs() {
        let pages = WordScramble
            .generate(&ActivityOptions::default().with_topic("space"))
            .unwrap();
        for item in pages.first()["words"].as_array().unwrap() {
            let scrambled = item["scrambled"].as_str().unwrap();
            let answer = item["answer"].as_str().unwrap();
            assert_ne!(scrambled, answer);
            let mut a: Vec<char> = scrambled.chars().collect();
            let mut b: Vec<char> = answer.chars().collect();
            a.sort();
            b.sort();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn palindrome_falls_back_to_reversal() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(scramble(&mut rng, "AA"), "AA");
        let mixed = scramble(&mut rng, "AB");
        assert_eq!(mixed, "BA");
    }

    #[test]
    fn beginner_pages_carry_hints() {
        let options = ActivityOptions::default().with_difficulty(Difficulty::Beginner);
        let pages = WordScramble.generate(&options).unwrap();
        let words = pages.first()["words"].as_array().unwrap();
        assert!(words.iter().all(|w| w["hint"].is_string()));
    }
}
