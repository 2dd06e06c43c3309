//! Generator traits and bindings.

use async_trait::async_trait;
use serde_json::Value;
use sheetcraft_core::{ActivityOptions, ResultPages};
use sheetcraft_error::SheetcraftResult;
use std::sync::Arc;

/// Builds a prompt and schema for an activity and calls the transport.
///
/// The returned value is the repaired generator output; the orchestrator
/// normalizes it into pages.
#[async_trait]
pub trait OnlineGenerator: Send + Sync {
    /// Generate content for the given options.
    ///
    /// # Errors
    ///
    /// Transport, format and template failures. All of them are recoverable
    /// by the offline path.
    async fn generate(&self, options: &ActivityOptions) -> SheetcraftResult<Value>;
}

/// Computes an activity purely from local rules and a seeded RNG.
pub trait OfflineGenerator: Send + Sync {
    /// Generate pages for the given options.
    ///
    /// Deterministic for equal options.
    fn generate(&self, options: &ActivityOptions) -> SheetcraftResult<ResultPages>;
}

/// Where a binding came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum BindingSource {
    /// Registered at startup from the compiled catalog
    Compiled,
    /// User-authored prompt template from the overlay
    CustomTemplate,
}

/// Generators resolved for one activity identifier.
#[derive(Clone)]
pub struct GeneratorBinding {
    activity_id: String,
    online: Option<Arc<dyn OnlineGenerator>>,
    offline: Option<Arc<dyn OfflineGenerator>>,
    source: BindingSource,
}

impl GeneratorBinding {
    /// A compiled binding.
    pub fn compiled(
        activity_id: impl Into<String>,
        online: Option<Arc<dyn OnlineGenerator>>,
        offline: Option<Arc<dyn OfflineGenerator>>,
    ) -> Self {
        Self {
            activity_id: activity_id.into(),
            online,
            offline,
            source: BindingSource::Compiled,
        }
    }

    /// A custom-template binding. It has no offline counterpart.
    pub fn custom(activity_id: impl Into<String>, online: Arc<dyn OnlineGenerator>) -> Self {
        Self {
            activity_id: activity_id.into(),
            online: Some(online),
            offline: None,
            source: BindingSource::CustomTemplate,
        }
    }

    /// Activity identifier.
    pub fn activity_id(&self) -> &str {
        &self.activity_id
    }

    /// Online generator, if any.
    pub fn online(&self) -> Option<&Arc<dyn OnlineGenerator>> {
        self.online.as_ref()
    }

    /// Offline generator, if any.
    pub fn offline(&self) -> Option<&Arc<dyn OfflineGenerator>> {
        self.offline.as_ref()
    }

    /// Binding origin.
    pub fn source(&self) -> BindingSource {
        self.source
    }
}

impl std::fmt::Debug for GeneratorBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorBinding")
            .field("activity_id", &self.activity_id)
            .field("online", &self.online.is_some())
            .field("offline", &self.offline.is_some())
            .field("source", &self.source)
            .finish()
    }
}
