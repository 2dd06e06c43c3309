//! Compiled worksheet activities.
//!
//! Each activity is a unit struct implementing [`ActivityBlueprint`] (prompt
//! and page schema for the online path) and, except for the writing-heavy
//! activities, [`OfflineGenerator`] (seeded rule-based generation).

mod creative_writing;
mod letter_cancellation;
mod math_drill;
mod memory_match;
mod number_pattern;
mod odd_one_out;
mod reading_comprehension;
mod sequencing;
mod word_scramble;
mod word_search;
pub mod words;

pub use creative_writing::CreativeWriting;
pub use letter_cancellation::LetterCancellation;
pub use math_drill::MathDrill;
pub use memory_match::MemoryMatch;
pub use number_pattern::NumberPattern;
pub use odd_one_out::OddOneOut;
pub use reading_comprehension::ReadingComprehension;
pub use sequencing::Sequencing;
pub use word_scramble::WordScramble;
pub use word_search::WordSearch;

use crate::{
    ActivityBlueprint, ActivityId, GeneratorRegistry, OfflineGenerator, PromptedGenerator,
    RegistryBuilder,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::Value;
use sheetcraft_core::{ActivityOptions, ObjectSchemaBuilder, ResultPages, SchemaDescriptor};
use sheetcraft_error::SheetcraftResult;
use sheetcraft_transport::Transport;
use std::sync::Arc;

/// Register every compiled activity.
pub fn register_catalog(builder: &mut RegistryBuilder, transport: Arc<dyn Transport>) {
    fn both<A>(builder: &mut RegistryBuilder, activity: A, transport: &Arc<dyn Transport>)
    where
        A: ActivityBlueprint + OfflineGenerator + Clone + 'static,
    {
        let id = activity.activity_id();
        builder.register(
            id,
            Some(Arc::new(PromptedGenerator::new(activity.clone(), transport.clone()))),
            Some(Arc::new(activity)),
        );
    }

    both(builder, WordSearch, &transport);
    both(builder, MathDrill, &transport);
    both(builder, MemoryMatch, &transport);
    both(builder, WordScramble, &transport);
    both(builder, OddOneOut, &transport);
    both(builder, NumberPattern, &transport);
    both(builder, LetterCancellation, &transport);
    both(builder, Sequencing, &transport);

    builder.register(
        ActivityId::ReadingComprehension,
        Some(Arc::new(PromptedGenerator::new(
            ReadingComprehension,
            transport.clone(),
        ))),
        None,
    );
    builder.register(
        ActivityId::CreativeWriting,
        Some(Arc::new(PromptedGenerator::new(CreativeWriting, transport))),
        None,
    );
}

/// Registry holding the full compiled catalog.
pub fn default_registry(transport: Arc<dyn Transport>) -> GeneratorRegistry {
    let mut builder = GeneratorRegistry::builder();
    register_catalog(&mut builder, transport);
    builder.build()
}

/// Object schema with the `title` and `instructions` every page carries.
pub(crate) fn page_object() -> ObjectSchemaBuilder {
    SchemaDescriptor::object()
        .required("title", SchemaDescriptor::string())
        .required("instructions", SchemaDescriptor::string())
}

/// One page per worksheet from a single RNG seeded for the activity.
pub(crate) fn offline_pages<F>(
    id: ActivityId,
    options: &ActivityOptions,
    mut page: F,
) -> SheetcraftResult<ResultPages>
where
    F: FnMut(&mut StdRng, u32) -> Value,
{
    let mut rng = StdRng::seed_from_u64(options.seed_for(id.as_ref()));
    let pages = (0..options.worksheet_count_or_one())
        .map(|index| page(&mut rng, index))
        .collect();
    Ok(ResultPages::new(pages)?)
}

/// "Word Search: Farm (2/3)".
pub(crate) fn page_title(id: ActivityId, topic: &str, index: u32, options: &ActivityOptions) -> String {
    let total = options.worksheet_count_or_one();
    let mut title = format!("{}: {}", id.title(), capitalize(topic));
    if total > 1 {
        title.push_str(&format!(" ({}/{})", index + 1, total));
    }
    title
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
