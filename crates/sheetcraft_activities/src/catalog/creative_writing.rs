use super::page_object;
use crate::{ActivityBlueprint, ActivityId};
use sheetcraft_core::{ActivityOptions, SchemaDescriptor};

/// Open-ended writing prompts with scaffolding.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreativeWriting;

impl ActivityBlueprint for CreativeWriting {
    fn activity_id(&self) -> ActivityId {
        ActivityId::CreativeWriting
    }

    fn page_schema(&self, _options: &ActivityOptions) -> SchemaDescriptor {
        page_object()
            .required("prompts", SchemaDescriptor::array(SchemaDescriptor::string()))
            .optional(
                "sentence_starters",
                SchemaDescriptor::array(SchemaDescriptor::string()),
            )
            .optional("word_bank", SchemaDescriptor::array(SchemaDescriptor::string()))
            .build()
    }

    fn instructions(&self, options: &ActivityOptions) -> String {
        format!(
            "Write {} creative writing prompts about {}. Add three sentence starters \
             and a word bank of eight helpful words so a reluctant writer can begin.",
            options.item_count_or(3),
            options.topic_or("an unexpected adventure"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose_prompt;

    #[test]
    fn prompt_mentions_topic_and_scaffolding() {
        let options = ActivityOptions::default().with_topic("a lost kite");
        let prompt = compose_prompt(&CreativeWriting, &options);
        assert!(prompt.contains("a lost kite"));
        assert!(prompt.contains("sentence starters"));
        assert!(prompt.contains("Creative Writing"));
    }
}
