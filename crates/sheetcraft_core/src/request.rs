//! Generation request sent to the transport layer.

use crate::{MediaAttachment, SchemaDescriptor};
use derive_builder::Builder;
use derive_getters::Getters;

/// Model used when a generator does not ask for a specific one.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// A schema-constrained generation request.
///
/// Immutable once built: fields are only reachable through getters.
///
/// # Examples
///
/// ```
/// use sheetcraft_core::{GenerationRequest, SchemaDescriptor};
///
/// let request = GenerationRequest::builder()
///     .prompt_text("List three farm animals as JSON")
///     .schema(SchemaDescriptor::array(SchemaDescriptor::string()))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.model_hint(), sheetcraft_core::DEFAULT_MODEL);
/// assert!(!request.use_extended_search());
/// ```
#[derive(Debug, Clone, PartialEq, Getters, Builder)]
#[builder(setter(into))]
pub struct GenerationRequest {
    /// Full prompt text
    prompt_text: String,
    /// Expected result shape
    schema: SchemaDescriptor,
    /// Model identifier hint
    #[builder(default = "DEFAULT_MODEL.to_string()")]
    model_hint: String,
    /// Whether the remote service may ground the answer with web search
    #[builder(default)]
    #[getter(skip)]
    use_extended_search: bool,
    /// Optional inline media (multimodal call)
    #[builder(default, setter(into, strip_option))]
    attached_media: Option<MediaAttachment>,
}

impl GenerationRequest {
    /// Creates a new builder for GenerationRequest.
    pub fn builder() -> GenerationRequestBuilder {
        GenerationRequestBuilder::default()
    }

    /// Whether extended (search-grounded) generation was requested.
    pub fn use_extended_search(&self) -> bool {
        self.use_extended_search
    }
}
