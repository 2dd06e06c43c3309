use super::{offline_pages, page_object, page_title, words};
use crate::{ActivityBlueprint, ActivityId, OfflineGenerator};
use rand::seq::SliceRandom;
use serde_json::{Value, json};
use sheetcraft_core::{ActivityOptions, Difficulty, ResultPages, SchemaDescriptor};
use sheetcraft_error::SheetcraftResult;

/// Groups of words where one does not belong.
#[derive(Debug, Clone, Copy, Default)]
pub struct OddOneOut;

fn group_size(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Beginner => 3,
        Difficulty::Medium | Difficulty::Hard => 4,
        Difficulty::Expert => 5,
    }
}

impl ActivityBlueprint for OddOneOut {
    fn activity_id(&self) -> ActivityId {
        ActivityId::OddOneOut
    }

    fn page_schema(&self, _options: &ActivityOptions) -> SchemaDescriptor {
        page_object()
            .required(
                "groups",
                SchemaDescriptor::array(
                    SchemaDescriptor::object()
                        .required("options", SchemaDescriptor::array(SchemaDescriptor::string()))
                        .required("answer", SchemaDescriptor::string())
                        .optional("reason", SchemaDescriptor::string())
                        .build(),
                ),
            )
            .build()
    }

    fn instructions(&self, options: &ActivityOptions) -> String {
        format!(
            "Write {} groups of {} words. All but one word in each group relate to {}; \
             the answer is the word that does not belong, with a short reason.",
            options.item_count_or(5),
            group_size(*options.difficulty()),
            options.topic_or("animals"),
        )
    }
}

impl OfflineGenerator for OddOneOut {
    fn generate(&self, options: &ActivityOptions) -> SheetcraftResult<ResultPages> {
        let topic = options.topic_or("animals");
        let count = options.item_count_or(5);
        let size = group_size(*options.difficulty());
        let own = words::bank_for(topic);
        let other = words::other_bank(topic);

        offline_pages(ActivityId::OddOneOut, options, |rng, index| {
            let groups: Vec<Value> = (0..count)
                .filter_map(|_| {
                    let mut choices: Vec<&str> =
                        own.choose_multiple(rng, size - 1).copied().collect();
                    let odd = *other.choose(rng)?;
                    choices.push(odd);
                    choices.shuffle(rng);
                    Some(json!({
                        "options": choices,
                        "answer": odd,
                        "reason": format!("The other words are about {}.", topic.to_lowercase()),
                    }))
                })
                .collect();

            json!({
                "title": page_title(ActivityId::OddOneOut, topic, index, options),
                "instructions": "Circle the word that does not belong in each group.",
                "groups": groups,
            })
        })
    }
}
