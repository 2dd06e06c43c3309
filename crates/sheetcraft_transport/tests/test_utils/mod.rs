//! Test utilities for transport tests.
//!
//! Provides a minimal HTTP stub server and request helpers.

use sheetcraft_core::{GenerationRequest, SchemaDescriptor};

pub mod stub_server;

#[allow(unused_imports)]
pub use stub_server::{RecordedRequest, StubResponse, StubServer, unreachable_url};

/// Schema of a page list: `[{ "title": string, "items": [integer] }]`.
pub fn page_schema() -> SchemaDescriptor {
    SchemaDescriptor::array(
        SchemaDescriptor::object()
            .required("title", SchemaDescriptor::string())
            .required("items", SchemaDescriptor::array(SchemaDescriptor::integer()))
            .build(),
    )
}

/// Helper to create a test GenerationRequest using the builder pattern.
pub fn create_test_request(prompt: &str) -> GenerationRequest {
    GenerationRequest::builder()
        .prompt_text(prompt)
        .schema(page_schema())
        .build()
        .expect("Failed to build test request")
}

/// Envelope the direct API wraps generated text in.
pub fn direct_envelope(text: &str) -> String {
    serde_json::json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
    .to_string()
}
