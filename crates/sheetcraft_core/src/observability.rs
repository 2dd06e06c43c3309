//! OpenTelemetry metrics initialization.

#[cfg(feature = "metrics")]
use opentelemetry::{KeyValue, global};
#[cfg(feature = "metrics")]
use opentelemetry_otlp::{MetricExporter as OtlpExporter, WithExportConfig};
#[cfg(feature = "metrics")]
use opentelemetry_sdk::{
    Resource,
    metrics::{PeriodicReader, SdkMeterProvider},
};
#[cfg(feature = "metrics")]
use opentelemetry_stdout::MetricExporter as StdoutExporter;
use sheetcraft_error::ConfigError;
#[cfg(feature = "metrics")]
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Where generation metrics are exported.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MetricsExporter {
    /// Print to stdout (development)
    #[default]
    Stdout,
    /// OTLP over HTTP to the given endpoint
    Otlp(String),
}

impl MetricsExporter {
    /// Read from `SHEETCRAFT_METRICS_EXPORTER` ("otlp" or "stdout") and
    /// `OTEL_EXPORTER_OTLP_ENDPOINT` (default `http://localhost:4318`).
    pub fn from_env() -> Self {
        match std::env::var("SHEETCRAFT_METRICS_EXPORTER").as_deref() {
            Ok("otlp") => MetricsExporter::Otlp(
                std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
                    .unwrap_or_else(|_| "http://localhost:4318".to_string()),
            ),
            _ => MetricsExporter::Stdout,
        }
    }
}

/// Install a global meter provider for the generation counters.
///
/// Without the `metrics` feature this only logs and returns `Ok(())`; the
/// counters recorded by the pipeline then go to the no-op global provider.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the OTLP exporter cannot be built.
#[instrument(skip_all, fields(service_name))]
pub fn init_observability(
    service_name: &'static str,
    exporter: MetricsExporter,
    export_interval_secs: u64,
) -> Result<(), ConfigError> {
    #[cfg(not(feature = "metrics"))]
    {
        let _ = (exporter, export_interval_secs);
        info!(service_name, "Metrics feature disabled, skipping exporter setup");
        Ok(())
    }

    #[cfg(feature = "metrics")]
    {
        info!(service_name, export_interval_secs, ?exporter, "Initializing metrics");

        let resource = Resource::builder_empty()
            .with_attributes([KeyValue::new("service.name", service_name)])
            .build();
        let interval = Duration::from_secs(export_interval_secs.max(1));

        let provider = match exporter {
            MetricsExporter::Otlp(endpoint) => {
                let exporter = OtlpExporter::builder()
                    .with_http()
                    .with_endpoint(&endpoint)
                    .with_timeout(Duration::from_secs(10))
                    .build()
                    .map_err(|e| ConfigError::new(format!("Failed to create OTLP exporter: {}", e)))?;
                debug!(endpoint = %endpoint, "OTLP metric exporter created");
                SdkMeterProvider::builder()
                    .with_resource(resource)
                    .with_reader(PeriodicReader::builder(exporter).with_interval(interval).build())
                    .build()
            }
            MetricsExporter::Stdout => SdkMeterProvider::builder()
                .with_resource(resource)
                .with_reader(
                    PeriodicReader::builder(StdoutExporter::default())
                        .with_interval(interval)
                        .build(),
                )
                .build(),
        };

        global::set_meter_provider(provider);
        info!(service_name, "Meter provider registered globally");
        Ok(())
    }
}

/// Shutdown hook; the provider flushes on drop.
#[instrument]
pub fn shutdown_observability() {
    debug!("Metrics shutdown complete");
}
