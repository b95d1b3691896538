use once_cell::sync::OnceCell;
use opentelemetry::metrics::Histogram;
use opentelemetry::{global, KeyValue};
use std::time::Instant;

static HIST: OnceCell<Histogram<f64>> = OnceCell::new();

fn histogram() -> &'static Histogram<f64> {
    HIST.get_or_init(|| {
        global::meter("swap_quote_core.obs")
            .f64_histogram("op_duration_seconds")
            .with_unit("s")
            .with_description("duração de operações do núcleo (quote, parse, refresh)")
            .build()
    })
}

/// Executa `f` e registra a duração no histograma `op_duration_seconds{op}`.
/// Sem meter provider instalado o registro é no-op.
pub fn time<F, T>(op: &'static str, f: F) -> T
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let out = f();
    histogram().record(start.elapsed().as_secs_f64(), &[KeyValue::new("op", op)]);
    out
}
