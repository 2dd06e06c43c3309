use super::{offline_pages, page_object, page_title, words};
use crate::{ActivityBlueprint, ActivityId, OfflineGenerator};
use rand::seq::SliceRandom;
use serde_json::{Value, json};
use sheetcraft_core::{ActivityOptions, ResultPages, SchemaDescriptor};
use sheetcraft_error::SheetcraftResult;

const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen", "twenty",
];

/// Cut-out cards that form matching pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryMatch;

impl ActivityBlueprint for MemoryMatch {
    fn activity_id(&self) -> ActivityId {
        ActivityId::MemoryMatch
    }

    fn page_schema(&self, _options: &ActivityOptions) -> SchemaDescriptor {
        page_object()
            .required(
                "pairs",
                SchemaDescriptor::array(
                    SchemaDescriptor::object()
                        .required("front", SchemaDescriptor::string())
                        .required("match", SchemaDescriptor::string())
                        .build(),
                ),
            )
            .optional(
                "cards",
                SchemaDescriptor::array(
                    SchemaDescriptor::object()
                        .required("id", SchemaDescriptor::integer())
                        .required("label", SchemaDescriptor::string())
                        .build(),
                ),
            )
            .build()
    }

    fn instructions(&self, options: &ActivityOptions) -> String {
        format!(
            "Create {} matching pairs about {}. Each pair has a short front \
             (a word or number) and a match (its definition, picture description \
             or equivalent). Keep labels under six words.",
            options.item_count_or(6),
            options.topic_or("animals"),
        )
    }
}

impl OfflineGenerator for MemoryMatch {
    fn generate(&self, options: &ActivityOptions) -> SheetcraftResult<ResultPages> {
        let topic = options.topic_or("animals");
        let count = options.item_count_or(6).min(NUMBER_WORDS.len() as u32 - 1) as usize;
        let numbers = options.variant().as_deref() == Some("numbers");

        offline_pages(ActivityId::MemoryMatch, options, |rng, index| {
            let pairs: Vec<(String, String)> = if numbers {
                let mut values: Vec<usize> = (1..NUMBER_WORDS.len()).collect();
                values.shuffle(rng);
                values
                    .into_iter()
                    .take(count)
                    .map(|n| (n.to_string(), NUMBER_WORDS[n].to_string()))
                    .collect()
            } else {
                words::pick_words(rng, topic, count, None)
                    .into_iter()
                    .map(|w| (w.clone(), w.to_lowercase()))
                    .collect()
            };

            let mut cards: Vec<&str> = pairs
                .iter()
                .flat_map(|(front, matching)| [front.as_str(), matching.as_str()])
                .collect();
            cards.shuffle(rng);

            json!({
                "title": page_title(ActivityId::MemoryMatch, topic, index, options),
                "instructions": "Cut out the cards, turn them face down and find the pairs.",
                "pairs": pairs
                    .iter()
                    .map(|(front, matching)| json!({"front": front, "match": matching}))
                    .collect::<Vec<Value>>(),
                "cards": cards
                    .iter()
                    .enumerate()
                    .map(|(id, label)| json!({"id": id + 1, "label": label}))
                    .collect::<Vec<Value>>(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_card_belongs_to_a_pair() {
        let options = ActivityOptions::default().with_item_count(5u32);
        let pages = MemoryMatch.generate(&options).unwrap();
        let page = pages.first();
        let pairs = page["pairs"].as_array().unwrap();
        let cards = page["cards"].as_array().unwrap();
        assert_eq!(pairs.len(), 5);
        assert_eq!(cards.len(), 10);
        for pair in pairs {
            for side in ["front", "match"] {
                let label = &pair[side];
                assert!(cards.iter().any(|c| &c["label"] == label));
            }
        }
    }

    #[test]
    fn number_variant_pairs_digits_with_words() {
        let options = ActivityOptions::default().with_variant("numbers");
        let pages = MemoryMatch.generate(&options).unwrap();
        for pair in pages.first()["pairs"].as_array().unwrap() {
            let n: usize = pair["front"].as_str().unwrap().parse().unwrap();
            assert_eq!(pair["match"], NUMBER_WORDS[n]);
        }
    }
}
