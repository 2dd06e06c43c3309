//! Prompt-and-schema descriptions of compiled activities.

use crate::{ActivityId, OnlineGenerator};
use async_trait::async_trait;
use serde_json::Value;
use sheetcraft_core::{ActivityOptions, DEFAULT_MODEL, GenerationRequest, SchemaDescriptor};
use sheetcraft_error::{ActivityError, SheetcraftResult};
use sheetcraft_transport::Transport;
use std::sync::Arc;
use tracing::{debug, instrument};

/// What an online generator asks the remote service for.
pub trait ActivityBlueprint: Send + Sync {
    /// Activity this blueprint describes.
    fn activity_id(&self) -> ActivityId;

    /// Shape of one worksheet page.
    fn page_schema(&self, options: &ActivityOptions) -> SchemaDescriptor;

    /// Activity-specific instructions.
    fn instructions(&self, options: &ActivityOptions) -> String;

    /// Model to request.
    fn model_hint(&self) -> &str {
        DEFAULT_MODEL
    }

    /// Whether answers should be grounded with web search.
    fn uses_search(&self) -> bool {
        false
    }
}

/// Full prompt: activity instructions followed by the shared clauses.
pub fn compose_prompt(blueprint: &dyn ActivityBlueprint, options: &ActivityOptions) -> String {
    let worksheets = options.worksheet_count_or_one();
    let mut prompt = format!(
        "You are creating printable special-education worksheets.\n\
         Activity: {}.\n{}\n",
        blueprint.activity_id().title(),
        blueprint.instructions(options)
    );

    prompt.push_str(&format!(
        "Difficulty: {}. Write in {}.\n",
        options.difficulty(),
        options.language_or_default()
    ));
    prompt.push_str(&format!(
        "Return a JSON array with exactly {} worksheet object{}, one per page. \
         Each page must be usable on its own.\n",
        worksheets,
        if worksheets == 1 { "" } else { "s" }
    ));
    if *options.include_answer_key() {
        prompt.push_str("Include the answers in each page's answer fields.\n");
    }
    if let Some(student) = options.student_context() {
        prompt.push_str(&student.prompt_clause());
        prompt.push('\n');
    }
    if let Some(text) = options
        .custom_input()
        .as_ref()
        .and_then(|c| c.blueprint_text.as_deref())
        .filter(|t| !t.trim().is_empty())
    {
        prompt.push_str("Follow this outline from the educator:\n");
        prompt.push_str(text);
        prompt.push('\n');
    }
    if options
        .custom_input()
        .as_ref()
        .is_some_and(|c| c.image.is_some())
    {
        prompt.push_str("Base the content on the attached image.\n");
    }
    prompt
}

/// Build the transport request for a blueprint.
pub fn build_request(
    blueprint: &dyn ActivityBlueprint,
    options: &ActivityOptions,
) -> SheetcraftResult<GenerationRequest> {
    let mut builder = GenerationRequest::builder();
    builder
        .prompt_text(compose_prompt(blueprint, options))
        .schema(SchemaDescriptor::array(blueprint.page_schema(options)))
        .model_hint(blueprint.model_hint())
        .use_extended_search(blueprint.uses_search());
    if let Some(image) = options.custom_input().as_ref().and_then(|c| c.image.clone()) {
        builder.attached_media(image);
    }
    builder.build().map_err(|e| {
        ActivityError::generator(blueprint.activity_id().as_ref(), e.to_string()).into()
    })
}

/// Online generator that sends a blueprint's request through a transport.
pub struct PromptedGenerator<B> {
    blueprint: B,
    transport: Arc<dyn Transport>,
}

impl<B: ActivityBlueprint> PromptedGenerator<B> {
    /// Pair a blueprint with a transport.
    pub fn new(blueprint: B, transport: Arc<dyn Transport>) -> Self {
        Self {
            blueprint,
            transport,
        }
    }

    /// The wrapped blueprint.
    pub fn blueprint(&self) -> &B {
        &self.blueprint
    }
}

#[async_trait]
impl<B: ActivityBlueprint> OnlineGenerator for PromptedGenerator<B> {
    #[instrument(skip_all, fields(activity = %self.blueprint.activity_id()))]
    async fn generate(&self, options: &ActivityOptions) -> SheetcraftResult<Value> {
        let request = build_request(&self.blueprint, options)?;
        debug!(
            prompt_len = request.prompt_text().len(),
            media = request.attached_media().is_some(),
            "Sending activity request"
        );
        self.transport.send(&request).await
    }
}
