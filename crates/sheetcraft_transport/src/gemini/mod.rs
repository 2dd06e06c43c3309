//! Direct path to the remote generation service.
//!
//! A single-turn `generateContent` call with a schema-guided, low-temperature
//! configuration. Attached media travels as an inline part next to the prompt.

mod client;
mod dto;

pub use client::{DEFAULT_API_BASE, DEFAULT_API_KEY_ENV, DIRECT_TEMPERATURE, GeminiClient};
pub use dto::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    InlineData, Part, PromptFeedback,
};
