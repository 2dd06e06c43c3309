//! Online-then-offline generation as an explicit state machine.

use crate::{FallbackNotice, FallbackObserver, LoggingObserver, normalize};
use sheetcraft_activities::{BindingSource, GeneratorBinding, GeneratorRegistry};
use sheetcraft_core::{ActivityOptions, GenerationMode, GenerationOutcome, GenerationPath};
use sheetcraft_error::{ActivityError, ActivityErrorKind, SheetcraftError, SheetcraftResult};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// One step of a generation.
///
/// `Done` and `Fatal` are terminal. Every other state moves to a later one,
/// so a generation takes at most three transitions.
#[derive(Debug)]
pub enum OrchestratorState {
    /// Nothing resolved yet
    Start,
    /// Calling the online generator
    OnlineAttempt(GeneratorBinding),
    /// Calling the offline generator
    Offline {
        /// Resolved generators
        binding: GeneratorBinding,
        /// Online failure that led here; `None` when offline was chosen up front
        cause: Option<String>,
    },
    /// Pages produced
    Done(GenerationOutcome),
    /// Generation failed with a non-recoverable error
    Fatal(SheetcraftError),
}

impl OrchestratorState {
    /// Short state name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            OrchestratorState::Start => "start",
            OrchestratorState::OnlineAttempt(_) => "online_attempt",
            OrchestratorState::Offline { .. } => "offline",
            OrchestratorState::Done(_) => "done",
            OrchestratorState::Fatal(_) => "fatal",
        }
    }

    /// Whether no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrchestratorState::Done(_) | OrchestratorState::Fatal(_))
    }
}

/// Runs one activity request through the online and offline paths.
///
/// Recoverable failures of the online path (transport, format, empty
/// response, template and generator errors) are answered by the offline
/// generator and reported as a degraded result. Unknown activities and a
/// missing offline generator are returned as errors.
pub struct FallbackOrchestrator {
    registry: Arc<GeneratorRegistry>,
    observer: Arc<dyn FallbackObserver>,
    #[cfg(feature = "metrics")]
    metrics: crate::PipelineMetrics,
}

impl FallbackOrchestrator {
    /// Orchestrate over `registry`, logging fallback notices.
    pub fn new(registry: Arc<GeneratorRegistry>) -> Self {
        Self {
            registry,
            observer: Arc::new(LoggingObserver),
            #[cfg(feature = "metrics")]
            metrics: crate::PipelineMetrics::new(),
        }
    }

    /// Deliver fallback notices to `observer` instead of the log.
    pub fn with_observer(mut self, observer: Arc<dyn FallbackObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// The registry generators are resolved from.
    pub fn registry(&self) -> &Arc<GeneratorRegistry> {
        &self.registry
    }

    /// Generate pages for `activity_id`.
    ///
    /// # Errors
    ///
    /// [`ActivityErrorKind::Unknown`] when the identifier has no binding,
    /// [`ActivityErrorKind::OfflineUnavailable`] when the offline path is
    /// needed and the activity has none, and any error the offline generator
    /// itself returns.
    #[instrument(
        skip(self, options),
        fields(generation_id = %uuid::Uuid::new_v4(), mode = %options.mode())
    )]
    pub async fn generate(
        &self,
        activity_id: &str,
        options: &ActivityOptions,
    ) -> SheetcraftResult<GenerationOutcome> {
        let mut state = OrchestratorState::Start;
        loop {
            state = match state {
                OrchestratorState::Done(outcome) => {
                    info!(
                        path = %outcome.path,
                        degraded = outcome.degraded,
                        pages = outcome.pages.len(),
                        "Generation complete"
                    );
                    #[cfg(feature = "metrics")]
                    self.metrics.record_generation(
                        activity_id,
                        &outcome.path.to_string(),
                        outcome.degraded,
                    );
                    return Ok(outcome);
                }
                OrchestratorState::Fatal(err) => {
                    error!(error = %err, "Generation failed");
                    return Err(err);
                }
                current => {
                    let from = current.name();
                    let next = self.step(current, activity_id, options).await;
                    debug!(from, to = next.name(), "Orchestrator transition");
                    next
                }
            };
        }
    }

    /// Advance a non-terminal state by one transition.
    ///
    /// Terminal states are returned unchanged.
    pub async fn step(
        &self,
        state: OrchestratorState,
        activity_id: &str,
        options: &ActivityOptions,
    ) -> OrchestratorState {
        match state {
            OrchestratorState::Start => self.start(activity_id, options).await,
            OrchestratorState::OnlineAttempt(binding) => self.online(binding, options).await,
            OrchestratorState::Offline { binding, cause } => self.offline(binding, cause, options),
            terminal => terminal,
        }
    }

    async fn start(&self, activity_id: &str, options: &ActivityOptions) -> OrchestratorState {
        let binding = match self.registry.resolve_with_templates(activity_id).await {
            Ok(binding) => binding,
            Err(err) => return OrchestratorState::Fatal(err),
        };
        match options.mode() {
            GenerationMode::Fast => OrchestratorState::Offline {
                binding,
                cause: None,
            },
            GenerationMode::Ai if binding.online().is_some() => {
                OrchestratorState::OnlineAttempt(binding)
            }
            GenerationMode::Ai => {
                debug!("No online generator, using offline path");
                OrchestratorState::Offline {
                    binding,
                    cause: None,
                }
            }
        }
    }

    async fn online(&self, binding: GeneratorBinding, options: &ActivityOptions) -> OrchestratorState {
        let Some(generator) = binding.online().cloned() else {
            return OrchestratorState::Offline {
                binding,
                cause: None,
            };
        };

        let result = match generator.generate(options).await {
            Ok(value) => normalize(value),
            Err(err) => Err(err),
        };

        match result {
            Ok(pages) => {
                let path = match binding.source() {
                    BindingSource::Compiled => GenerationPath::Online,
                    BindingSource::CustomTemplate => GenerationPath::CustomTemplate,
                };
                OrchestratorState::Done(GenerationOutcome {
                    activity_id: binding.activity_id().to_string(),
                    pages,
                    degraded: false,
                    path,
                    fallback_cause: None,
                })
            }
            Err(err) if err.is_recoverable() => {
                warn!(
                    activity = binding.activity_id(),
                    error = %err,
                    "Online generation failed, falling back to offline"
                );
                OrchestratorState::Offline {
                    binding,
                    cause: Some(err.to_string()),
                }
            }
            Err(err) => OrchestratorState::Fatal(err),
        }
    }

    fn offline(
        &self,
        binding: GeneratorBinding,
        cause: Option<String>,
        options: &ActivityOptions,
    ) -> OrchestratorState {
        let Some(generator) = binding.offline() else {
            if let Some(cause) = &cause {
                warn!(
                    activity = binding.activity_id(),
                    cause = %cause,
                    "Online failure cannot be answered offline"
                );
            }
            return OrchestratorState::Fatal(
                ActivityError::new(ActivityErrorKind::OfflineUnavailable(
                    binding.activity_id().to_string(),
                ))
                .into(),
            );
        };

        let pages = match generator.generate(options) {
            Ok(pages) => pages,
            Err(err) => return OrchestratorState::Fatal(err),
        };

        if let Some(cause) = &cause {
            #[cfg(feature = "metrics")]
            self.metrics.record_fallback(binding.activity_id());
            self.observer.notify(&FallbackNotice {
                activity_id: binding.activity_id().to_string(),
                cause: cause.clone(),
            });
        }

        OrchestratorState::Done(GenerationOutcome {
            activity_id: binding.activity_id().to_string(),
            pages,
            degraded: cause.is_some(),
            path: GenerationPath::Offline,
            fallback_cause: cause,
        })
    }
}

impl std::fmt::Debug for FallbackOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackOrchestrator")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
