//! Fallback orchestration for Sheetcraft.
//!
//! [`FallbackOrchestrator::generate`] resolves an activity, tries its online
//! generator and answers any recoverable failure with the offline generator.
//! Whatever a generator returns passes through [`normalize`], so callers
//! always receive a non-empty page list.
//!
//! # Example
//!
//! ```
//! use sheetcraft_activities::{ActivityId, GeneratorRegistry, MathDrill};
//! use sheetcraft_core::{ActivityOptions, GenerationMode};
//! use sheetcraft_pipeline::FallbackOrchestrator;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut builder = GeneratorRegistry::builder();
//! builder.register(ActivityId::MathDrill, None, Some(Arc::new(MathDrill)));
//! let orchestrator = FallbackOrchestrator::new(Arc::new(builder.build()));
//!
//! let options = ActivityOptions::default().with_mode(GenerationMode::Fast);
//! let outcome = orchestrator.generate("math_drill", &options).await.unwrap();
//! assert!(!outcome.degraded);
//! # }
//! ```

#![warn(missing_docs)]

#[cfg(feature = "metrics")]
mod metrics;
mod normalize;
mod notice;
mod orchestrator;
mod slots;

#[cfg(feature = "metrics")]
pub use metrics::PipelineMetrics;
pub use normalize::{ENVELOPE_KEYS, normalize};
pub use notice::{ChannelObserver, FallbackNotice, FallbackObserver, LoggingObserver};
pub use orchestrator::{FallbackOrchestrator, OrchestratorState};
pub use slots::{SessionSlots, SlotPermit};
