//! Transport traits.

use async_trait::async_trait;
use serde_json::Value;
use sheetcraft_core::GenerationRequest;
use sheetcraft_error::SheetcraftResult;

/// Sends a generation request and returns the parsed result.
///
/// Implementations repair malformed output before returning it. Failures
/// are reported, never retried: the fallback orchestrator is the retry
/// boundary.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the repaired, schema-checked value.
    async fn send(&self, request: &GenerationRequest) -> SheetcraftResult<Value>;
}

/// One network path that returns the generator's raw text.
#[async_trait]
pub trait TextSource: Send + Sync {
    /// Short name used in logs and error messages ("relay", "direct").
    fn path_name(&self) -> &'static str;

    /// Fetch the raw response text for a request.
    async fn fetch_text(&self, request: &GenerationRequest) -> SheetcraftResult<String>;
}
