//! Generation counters.
//!
//! Available with the `metrics` feature.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Meter},
};
use tracing::debug;

/// Counters recorded by the fallback orchestrator.
#[derive(Clone)]
pub struct PipelineMetrics {
    _meter: Meter,
    /// Completed generations, labelled by activity, path and degradation
    pub generations: Counter<u64>,
    /// Online failures answered by the offline path
    pub fallbacks: Counter<u64>,
}

impl PipelineMetrics {
    /// Build instruments on the global meter provider.
    pub fn new() -> Self {
        let meter = global::meter("sheetcraft_pipeline");
        let generations = meter
            .u64_counter("sheetcraft_generations_total")
            .with_description("Completed worksheet generations")
            .build();
        let fallbacks = meter
            .u64_counter("sheetcraft_fallbacks_total")
            .with_description("Online failures answered offline")
            .build();
        debug!("Pipeline metrics instruments created");
        Self {
            _meter: meter,
            generations,
            fallbacks,
        }
    }

    /// Record a finished generation.
    pub fn record_generation(&self, activity: &str, path: &str, degraded: bool) {
        self.generations.add(
            1,
            &[
                KeyValue::new("activity", activity.to_string()),
                KeyValue::new("path", path.to_string()),
                KeyValue::new("degraded", degraded),
            ],
        );
    }

    /// Record a fallback to the offline path.
    pub fn record_fallback(&self, activity: &str) {
        self.fallbacks
            .add(1, &[KeyValue::new("activity", activity.to_string())]);
    }
}

impl Default for PipelineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PipelineMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineMetrics").finish_non_exhaustive()
    }
}
