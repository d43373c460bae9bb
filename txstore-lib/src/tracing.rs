use crate::config::TelemetryConfig;
use anyhow::Context;
use opentelemetry::sdk::trace::Tracer;
use opentelemetry::sdk::Resource;
use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use tonic::metadata::{Ascii, MetadataMap, MetadataValue};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::registry::LookupSpan;

/// Exports spans over OTLP/gRPC. Needs to run inside a tokio runtime.
pub fn create_opentelemetry_layer<S>(
    service_name: &'static str,
    config: &TelemetryConfig,
) -> Result<OpenTelemetryLayer<S, Tracer>, anyhow::Error>
where
    S: tracing::Subscriber + for<'span> LookupSpan<'span>,
{
    let mut metadata_map = MetadataMap::with_capacity(1);
    if let Some(api_key) = &config.api_key {
        let api_key: MetadataValue<Ascii> =
            api_key.parse().context("Invalid telemetry API key")?;
        metadata_map.insert("x-honeycomb-team", api_key);
    }
    let exporter = opentelemetry_otlp::new_exporter()
        .tonic()
        .with_endpoint(config.endpoint.as_str())
        .with_metadata(metadata_map);

    let tracer = opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_trace_config(
            opentelemetry::sdk::trace::config().with_resource(Resource::new(vec![KeyValue::new(
                "service.name",
                service_name,
            )])),
        )
        .with_exporter(exporter)
        .install_simple()
        .context("Unable to create tracer")?;
    let telemetry_layer = tracing_opentelemetry::layer().with_tracer(tracer);
    Ok(telemetry_layer)
}

/// Flushes spans still held by the global tracer provider.
pub fn shutdown_telemetry() {
    opentelemetry::global::shutdown_tracer_provider();
}
