//! Sheetcraft turns activity requests into worksheet pages.
//!
//! A request is tried against a remote generative model first (through a
//! same-origin relay, then directly), its output repaired and normalized into
//! pages. When the remote path fails in a recoverable way the activity's
//! offline generator answers instead and the result is marked degraded.
//!
//! This crate bundles the member crates behind one [`Sheetcraft`] handle
//! and ships the `sheetcraft` command-line binary.
//!
//! # Example
//!
//! ```no_run
//! use sheetcraft::{ActivityOptions, Sheetcraft, SheetcraftConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let app = Sheetcraft::from_config(SheetcraftConfig::load()?)?;
//! let outcome = app
//!     .generate("word_search", &ActivityOptions::default().with_topic("farm"))
//!     .await?;
//! if outcome.degraded {
//!     eprintln!("Generated offline");
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;

pub use config::{ENV_PREFIX, SheetcraftConfig};

pub use sheetcraft_activities::{
    ActivityBlueprint, ActivityId, GeneratorRegistry, InMemoryTemplateStore, PromptTemplate,
    TemplateStore, default_registry, load_templates, parse_templates, register_catalog,
};
pub use sheetcraft_core::{
    ActivityOptions, CustomInput, Difficulty, GenerationMode, GenerationOutcome, GenerationPath,
    MediaAttachment, ResultPages, StudentContext,
};
pub use sheetcraft_error::{SheetcraftError, SheetcraftErrorKind, SheetcraftResult};
pub use sheetcraft_pipeline::{
    ChannelObserver, FallbackNotice, FallbackObserver, FallbackOrchestrator, LoggingObserver,
    SessionSlots, SlotPermit,
};
pub use sheetcraft_repair::{RepairStage, Repaired, repair, repair_with_report};
pub use sheetcraft_transport::{FailoverTransport, Transport};

use std::sync::Arc;

/// Configured pipeline: transport, compiled registry and orchestrator.
#[derive(Debug)]
pub struct Sheetcraft {
    config: SheetcraftConfig,
    orchestrator: FallbackOrchestrator,
}

impl Sheetcraft {
    /// Build the relay-then-direct transport from `config` and bind the
    /// compiled catalog to it.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be constructed or the
    /// configured template file cannot be loaded.
    pub fn from_config(config: SheetcraftConfig) -> SheetcraftResult<Self> {
        let transport = config.build_transport()?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Bind the compiled catalog, and the configured custom templates, to
    /// an arbitrary transport.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the template file cannot be loaded.
    pub fn with_transport(
        config: SheetcraftConfig,
        transport: Arc<dyn Transport>,
    ) -> SheetcraftResult<Self> {
        let mut builder = GeneratorRegistry::builder();
        register_catalog(&mut builder, transport.clone());
        if let Some(path) = config.templates_file() {
            let templates = load_templates(path)?;
            builder.template_store(Arc::new(InMemoryTemplateStore::with_templates(
                transport, templates,
            )));
        }
        Ok(Self {
            config,
            orchestrator: FallbackOrchestrator::new(Arc::new(builder.build())),
        })
    }

    /// Deliver fallback notices to `observer`.
    pub fn with_observer(mut self, observer: Arc<dyn FallbackObserver>) -> Self {
        self.orchestrator = self.orchestrator.with_observer(observer);
        self
    }

    /// Generate pages for `activity_id`.
    ///
    /// # Errors
    ///
    /// See [`FallbackOrchestrator::generate`].
    pub async fn generate(
        &self,
        activity_id: &str,
        options: &ActivityOptions,
    ) -> SheetcraftResult<GenerationOutcome> {
        self.orchestrator.generate(activity_id, options).await
    }

    /// Activities of the compiled catalog.
    pub fn activities(&self) -> Vec<ActivityId> {
        self.orchestrator.registry().compiled_activities()
    }

    /// Registry used for resolution, e.g. to register custom templates.
    pub fn registry(&self) -> &Arc<GeneratorRegistry> {
        self.orchestrator.registry()
    }

    /// Active settings.
    pub fn config(&self) -> &SheetcraftConfig {
        &self.config
    }
}
