//! Relay-then-direct transport.

use crate::{GeminiClient, RelayClient, TextSource, Transport};
use async_trait::async_trait;
use serde_json::Value;
use sheetcraft_core::GenerationRequest;
use sheetcraft_error::{SheetcraftError, SheetcraftErrorKind, SheetcraftResult};
use sheetcraft_repair::repair_with_report;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Tries the primary path once, then the secondary path once.
///
/// Only network failures, non-success statuses and empty bodies on the
/// primary path fall through. Everything else, including the secondary
/// path's failures, propagates to the caller.
#[derive(Clone)]
pub struct FailoverTransport {
    primary: Option<Arc<dyn TextSource>>,
    secondary: Arc<dyn TextSource>,
}

impl FailoverTransport {
    /// Relay first (when configured), direct second.
    pub fn new(relay: Option<RelayClient>, direct: GeminiClient) -> Self {
        Self {
            primary: relay.map(|r| Arc::new(r) as Arc<dyn TextSource>),
            secondary: Arc::new(direct),
        }
    }

    /// Compose arbitrary text sources.
    pub fn with_sources(
        primary: Option<Arc<dyn TextSource>>,
        secondary: Arc<dyn TextSource>,
    ) -> Self {
        Self { primary, secondary }
    }

    #[instrument(skip(self, request))]
    async fn fetch(&self, request: &GenerationRequest) -> SheetcraftResult<(&'static str, String)> {
        if let Some(primary) = &self.primary {
            match primary.fetch_text(request).await {
                Ok(text) => return Ok((primary.path_name(), text)),
                Err(e) if falls_through(&e) => {
                    warn!(
                        from = primary.path_name(),
                        to = self.secondary.path_name(),
                        error = %e,
                        "Primary path failed, trying secondary"
                    );
                }
                Err(e) => return Err(e),
            }
        }
        let text = self.secondary.fetch_text(request).await?;
        Ok((self.secondary.path_name(), text))
    }
}

impl std::fmt::Debug for FailoverTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FailoverTransport")
            .field("primary", &self.primary.as_ref().map(|p| p.path_name()))
            .field("secondary", &self.secondary.path_name())
            .finish()
    }
}

fn falls_through(error: &SheetcraftError) -> bool {
    match error.kind() {
        SheetcraftErrorKind::Transport(e) => e.kind.falls_through(),
        SheetcraftErrorKind::EmptyResponse(_) => true,
        _ => false,
    }
}

#[async_trait]
impl Transport for FailoverTransport {
    #[instrument(skip(self, request), fields(model = %request.model_hint()))]
    async fn send(&self, request: &GenerationRequest) -> SheetcraftResult<Value> {
        let (path, raw) = self.fetch(request).await?;

        let repaired = repair_with_report(&raw)?;
        debug!(path, stage = %repaired.stage, "Response parsed");

        request.schema().validate(&repaired.value)?;

        info!(path, "Generation response accepted");
        Ok(repaired.value)
    }
}
