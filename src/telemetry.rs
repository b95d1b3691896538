//! Telemetria do widget: log estruturado local e, quando há coletor, traces e
//! métricas via OTLP/HTTP.

use anyhow::Result;
use tracing::Level;

use opentelemetry::{global, trace::TracerProvider as _, KeyValue};
use opentelemetry_otlp::{MetricExporter, Protocol, SpanExporter, WithExportConfig};
use opentelemetry_sdk::{metrics::SdkMeterProvider, resource::Resource, trace::SdkTracerProvider};
use tracing_subscriber::{layer::SubscriberExt, Registry};

use crate::obs::tracingx::filter_from_env;

const COMMIT_ENV: &str = "SWAP_COMMIT_SHA";
const DEFAULT_COLLECTOR: &str = "http://localhost:4318";

/// Endpoints OTLP já resolvidos (base + overrides por sinal).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtlpEndpoints {
    pub traces: String,
    pub metrics: String,
}

impl OtlpEndpoints {
    pub fn from_env() -> Self {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Mesma precedência do SDK: variável por sinal > base + `/v1/<sinal>` > coletor local.
    pub fn resolve(var: impl Fn(&str) -> Option<String>) -> Self {
        let base = var("OTEL_EXPORTER_OTLP_ENDPOINT").unwrap_or_else(|| DEFAULT_COLLECTOR.into());
        let base = base.trim_end_matches('/');
        Self {
            traces: var("OTEL_EXPORTER_OTLP_TRACES_ENDPOINT")
                .unwrap_or_else(|| format!("{base}/v1/traces")),
            metrics: var("OTEL_EXPORTER_OTLP_METRICS_ENDPOINT")
                .unwrap_or_else(|| format!("{base}/v1/metrics")),
        }
    }
}

fn commit_sha() -> String {
    std::env::var(COMMIT_ENV).unwrap_or_else(|_| "unknown".into())
}

/// Providers instalados globalmente; `shutdown` drena o que ficou no batch.
pub struct TelemetryHandle {
    pub tracer_provider: SdkTracerProvider,
    pub meter_provider: SdkMeterProvider,
}

impl TelemetryHandle {
    pub fn shutdown(self) -> Result<()> {
        self.meter_provider.force_flush()?;
        self.tracer_provider.shutdown()?;
        self.meter_provider.shutdown()?;
        Ok(())
    }
}

pub fn init(service_name: &str) -> Result<TelemetryHandle> {
    let endpoints = OtlpEndpoints::from_env();
    let resource = Resource::builder()
        .with_service_name(service_name.to_string())
        .with_attributes([
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
            KeyValue::new("git.commit.sha", commit_sha()),
        ])
        .build();

    let span_exporter = SpanExporter::builder()
        .with_http()
        .with_protocol(Protocol::HttpBinary)
        .with_endpoint(endpoints.traces.clone())
        .build()?;
    let tracer_provider = SdkTracerProvider::builder()
        .with_resource(resource.clone())
        .with_batch_exporter(span_exporter)
        .build();

    let metric_exporter = MetricExporter::builder()
        .with_http()
        .with_protocol(Protocol::HttpBinary)
        .with_endpoint(endpoints.metrics.clone())
        .build()?;
    let meter_provider = SdkMeterProvider::builder()
        .with_resource(resource)
        .with_periodic_exporter(metric_exporter)
        .build();

    global::set_tracer_provider(tracer_provider.clone());
    global::set_meter_provider(meter_provider.clone());

    let tracer = tracer_provider.tracer(service_name.to_string());
    let subscriber = Registry::default()
        .with(filter_from_env())
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(tracing_opentelemetry::layer().with_tracer(tracer));
    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(traces = %endpoints.traces, metrics = %endpoints.metrics, "telemetria OTLP ativa");
    Ok(TelemetryHandle { tracer_provider, meter_provider })
}

/// Só o subscriber fmt + filtro, sem exportar (testes, execução offline).
pub fn init_local() {
    let subscriber = Registry::default()
        .with(filter_from_env())
        .with(tracing_subscriber::fmt::layer().with_target(false));
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Span INFO de nome fixo `op`; o nome dinâmico vai em `span_name`.
pub fn make_info_span(name: &str, op_id: u64, component: &str) -> tracing::Span {
    tracing::span!(
        target: "swap_quote_core",
        Level::INFO,
        "op",
        git_commit_sha = %commit_sha(),
        span_name = %name,
        op_id = op_id,
        component = component
    )
}

/// Conta desfechos de transação (`confirmed`/`failed`) no meter global.
pub fn record_tx_outcome(outcome: &'static str) {
    let counter = global::meter("swap_quote_core")
        .u64_counter("swap_tx_outcomes_total")
        .with_description("desfechos de swaps submetidos")
        .build();
    counter.add(1, &[KeyValue::new("outcome", outcome)]);
}
