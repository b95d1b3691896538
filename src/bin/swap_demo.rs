use anyhow::Result;
use std::time::Duration;
use tracing::info;

use swap_quote_core::config::{self, Address, SwapConfig};
use swap_quote_core::ledger::memory::InMemoryLedger;
use swap_quote_core::session::SwapSession;
use swap_quote_core::{telemetry, U256};

/// Uso: `swap_demo [config.toml] [valor]`. Sem `OTEL_EXPORTER_OTLP_ENDPOINT` roda só com log local.
#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let cfg = match args.next() {
        Some(path) => config::read_config(path)?,
        None => SwapConfig::default(),
    };
    let amount = args.next().unwrap_or_else(|| "10".to_string());

    let tel = if std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").is_ok() {
        Some(telemetry::init("swap-quote-core")?)
    } else {
        telemetry::init_local();
        None
    };

    let account: Address = "0x00000000000000000000000000000000000000aa".parse()?;
    let one = |decimals: u8| U256::exp10(decimals as usize);
    let mut ledger = InMemoryLedger::new(&cfg).with_reserves(
        U256::from(1_000_000u64) * one(cfg.token_a.decimals),
        U256::from(2_500_000_000u64) * one(cfg.token_b.decimals),
    );
    ledger.mint(&cfg.token_a.address, &account, U256::from(100u64) * one(cfg.token_a.decimals));

    let mut session = SwapSession::new(cfg)?;
    session.connect(account);
    session.refresh(&ledger);

    for (i, keystrokes) in ["", "1", amount.as_str()].into_iter().enumerate() {
        let span = telemetry::make_info_span("keystroke", i as u64, "swap_demo");
        let _guard = span.enter();
        session.set_input(keystrokes);
        let v = session.view();
        info!(
            input = keystrokes,
            out = %v.amount_out,
            rate = %format!("1 {} = {} {}", v.token_in, v.rate, v.token_out),
            fee = %v.fee,
            "cotação"
        );
    }

    let tx = session.submit(&mut ledger)?;
    // bloco simulado; o refresh só acontece quando o desfecho chega
    tokio::time::sleep(Duration::from_millis(200)).await;
    if let Some(outcome) = ledger.settle_next() {
        session.on_tx_outcome(outcome, &ledger);
    }

    let v = session.view();
    info!(%tx, balance_in = %v.balance_in, balance_out = %v.balance_out, "saldos após confirmação");

    if let Some(tel) = tel {
        tel.shutdown()?;
    }
    Ok(())
}
