use color_eyre::Result;
use color_eyre::eyre::Context;
use opentelemetry::KeyValue;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const SERVICE_NAME: &str = "settify";

/// `EnvFilter` for the given directive. Falls back to `RUST_LOG` when the
/// directive is empty.
fn filter_layer(tracing_level: &str) -> Result<EnvFilter> {
    if tracing_level.trim().is_empty() {
        return Ok(EnvFilter::from_default_env());
    }
    EnvFilter::try_new(tracing_level).wrap_err("Failed to create tracing filter")
}

fn otlp_tracer_provider(service_name: &str, otlp_endpoint: &str) -> Result<SdkTracerProvider> {
    let resource = Resource::builder()
        .with_attributes(vec![KeyValue::new(
            opentelemetry_semantic_conventions::resource::SERVICE_NAME,
            service_name.to_string(),
        )])
        .build();

    let otlp_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(otlp_endpoint)
        .build()
        .wrap_err("Failed to create OTLP span exporter")?;

    Ok(SdkTracerProvider::builder()
        .with_batch_exporter(otlp_exporter)
        .with_resource(resource)
        .build())
}

/// Install the global subscriber. Spans are also exported over OTLP when an
/// endpoint is given; the returned provider must be shut down before exit so
/// the batch exporter flushes.
pub fn init_tracing(
    service_name: &str,
    otlp_endpoint: Option<&str>,
    tracing_level: &str,
) -> Result<Option<SdkTracerProvider>> {
    let filter_layer = filter_layer(tracing_level)?;
    let fmt_layer = tracing_subscriber::fmt::layer().pretty();

    let Some(otlp_endpoint) = otlp_endpoint else {
        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init()
            .wrap_err("Failed to install tracing subscriber")?;
        return Ok(None);
    };

    let tracer_provider = otlp_tracer_provider(service_name, otlp_endpoint)?;
    opentelemetry::global::set_tracer_provider(tracer_provider.clone());
    let telemetry_layer =
        tracing_opentelemetry::layer().with_tracer(tracer_provider.tracer(service_name.to_string()));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(telemetry_layer)
        .try_init()
        .wrap_err("Failed to install tracing subscriber")?;

    Ok(Some(tracer_provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_accepts_directives() {
        assert!(filter_layer("info").is_ok());
        assert!(filter_layer("settify=debug,tower_http=info").is_ok());
        assert!(filter_layer("").is_ok());
    }

    #[test]
    fn test_filter_rejects_garbage() {
        assert!(filter_layer("settify=notalevel").is_err());
    }
}
