use super::page_object;
use crate::{ActivityBlueprint, ActivityId};
use sheetcraft_core::{ActivityOptions, Difficulty, SchemaDescriptor};

/// A short passage followed by questions about it.
///
/// Only the online path can write a passage, so there is no offline generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadingComprehension;

fn passage_words(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Beginner => 60,
        Difficulty::Medium => 120,
        Difficulty::Hard => 200,
        Difficulty::Expert => 300,
    }
}

impl ActivityBlueprint for ReadingComprehension {
    fn activity_id(&self) -> ActivityId {
        ActivityId::ReadingComprehension
    }

    fn page_schema(&self, _options: &ActivityOptions) -> SchemaDescriptor {
        page_object()
            .required("passage", SchemaDescriptor::string())
            .required(
                "questions",
                SchemaDescriptor::array(
                    SchemaDescriptor::object()
                        .required("question", SchemaDescriptor::string())
                        .optional("choices", SchemaDescriptor::array(SchemaDescriptor::string()))
                        .optional("answer", SchemaDescriptor::string())
                        .build(),
                ),
            )
            .optional("vocabulary", SchemaDescriptor::array(SchemaDescriptor::string()))
            .build()
    }

    fn instructions(&self, options: &ActivityOptions) -> String {
        format!(
            "Write a passage of about {} words about {} in short, clear sentences, \
             then {} questions about it. Mix literal and inference questions; \
             multiple-choice questions list their choices. List up to five \
             vocabulary words from the passage.",
            passage_words(*options.difficulty()),
            options.topic_or("a day at the park"),
            options.item_count_or(4),
        )
    }
}
