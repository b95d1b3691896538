//! Fluxo completo do widget contra o ledger em memória: ida e volta do swap,
//! pool vazio e configuração lida de TOML.
use swap_quote_core::amm::error_catalog::AmmErrorCode;
use swap_quote_core::config::{parse_config, Address, SwapConfig};
use swap_quote_core::ledger::memory::InMemoryLedger;
use swap_quote_core::ledger::{LedgerReader, TxOutcome};
use swap_quote_core::session::{QuoteView, SwapSession};
use swap_quote_core::{LedgerValue, PoolReserves, SwapDirection, U256};

fn user() -> Address {
    "0x00000000000000000000000000000000000000aa".parse().expect("endereço")
}

fn eth(n: u64) -> U256 {
    U256::from(n) * U256::exp10(18)
}

fn usdc(n: u64) -> U256 {
    U256::from(n) * U256::exp10(6)
}

fn setup(reserve_eth: U256, reserve_usdc: U256) -> (SwapSession, InMemoryLedger, SwapConfig) {
    let cfg = SwapConfig::default();
    let mut ledger = InMemoryLedger::new(&cfg).with_reserves(reserve_eth, reserve_usdc);
    ledger.mint(&cfg.token_a.address, &user(), eth(5));
    let mut session = SwapSession::new(cfg.clone()).expect("config válida");
    session.connect(user());
    session.refresh(&ledger);
    (session, ledger, cfg)
}

#[test]
fn swap_there_and_back() {
    let (mut s, mut ledger, cfg) = setup(eth(1_000), usdc(2_500_000));

    s.set_input("1");
    let tx = s.submit(&mut ledger).expect("submissão");
    let outcome = ledger.settle_next().expect("tx pendente");
    assert_eq!(
        outcome,
        TxOutcome::Confirmed { tx, amount_out: U256::from(2_497_502_498u64) }
    );
    assert!(s.on_tx_outcome(outcome, &ledger));

    s.flip_direction();
    assert_eq!(s.direction(), SwapDirection::BtoA);
    assert_eq!(s.view().balance_in, "2497.5024");
    s.set_input("2497.502498");
    s.submit(&mut ledger).expect("submissão de volta");
    let outcome = ledger.settle_next().expect("tx pendente");
    assert!(s.on_tx_outcome(outcome, &ledger));

    let v = s.view();
    assert_eq!(v.token_in, "USDC");
    assert_eq!(v.balance_in, "0.0");
    // truncagem das reservas devolve um resto ínfimo, invisível com 4 casas
    assert_eq!(v.balance_out, "5.0");
    assert_eq!(
        ledger.balance_of(&cfg.token_a.address, &user()),
        LedgerValue::Ready(U256::from_dec_str("5000000000199200000").unwrap())
    );
}

#[test]
fn empty_pool_quotes_zero_and_blocks_submission() {
    let (mut s, _ledger, _cfg) = setup(U256::zero(), usdc(2_500_000));
    s.set_input("10");
    let v = s.view();
    assert_eq!(v.rate, "0.0");
    assert_eq!(v.amount_out, "0.0");
    assert!(!v.can_submit);
    assert!(matches!(s.quote(), QuoteView::Ready(q) if q.amount_out.is_zero()));
    assert_eq!(s.build_request().unwrap_err().code, AmmErrorCode::ZeroReserve);
}

#[test]
fn slippage_guard_fails_when_pool_moves_first() {
    let (mut s, mut ledger, _cfg) = setup(eth(1_000), usdc(2_500_000));
    s.set_input("1");
    s.submit(&mut ledger).expect("submissão");

    // outro trader esvazia metade do lado USDC antes da liquidação
    ledger.set_reserves(LedgerValue::Ready(PoolReserves::new(eth(2_000), usdc(1_250_000))));
    let outcome = ledger.settle_next().expect("tx pendente");
    assert!(matches!(&outcome, TxOutcome::Failed { reason, .. } if reason.contains("slippage")));
    assert!(s.on_tx_outcome(outcome, &ledger));
    assert_eq!(s.view().balance_in, "5.0");
    assert_eq!(s.input(), "1");
}

#[test]
fn session_honours_toml_config() {
    let cfg = parse_config(
        r#"
dex_address = "0x1111111111111111111111111111111111111111"
fee_ppm = 500
slippage_tolerance_ppm = 0

[token_a]
symbol = "WBTC"
address = "0x2222222222222222222222222222222222222222"
decimals = 8

[token_b]
symbol = "DAI"
address = "0x3333333333333333333333333333333333333333"
decimals = 18

[display]
rate = 2
"#,
    )
    .expect("toml válido");

    let mut ledger = InMemoryLedger::new(&cfg).with_reserves(
        U256::from(100u64) * U256::exp10(8),
        U256::from(6_000_000u64) * U256::exp10(18),
    );
    ledger.mint(&cfg.token_a.address, &user(), U256::exp10(8));
    let mut s = SwapSession::new(cfg).expect("config válida");
    s.connect(user());
    s.refresh(&ledger);
    s.set_input("0.5");

    let v = s.view();
    assert_eq!(v.token_in, "WBTC");
    assert_eq!(v.rate, "60000.0");
    assert_eq!(v.fee, "0.05%");
    match s.quote() {
        // tolerância zero: mínimo igual à cotação
        QuoteView::Ready(q) => assert_eq!(q.min_amount_out, q.amount_out),
        other => panic!("esperava cotação, veio {other:?}"),
    }
}
