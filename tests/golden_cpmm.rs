//! Golden set da cotação x·y=k (sem taxa): valores exatos conferidos contra a
//! referência BigUint e a folga de k medida em cada caso.
use swap_quote_core::amm::format::{format_amount, format_value};
use swap_quote_core::amm::quote::{exchange_rate, get_amount_out, quote};
use swap_quote_core::amm::ref_golden::{golden_quote, to_big};
use swap_quote_core::amm::types::{LedgerValue, U256};

#[inline]
fn w(n: &str) -> U256 {
    U256::from_dec_str(n).expect("decimal") * U256::exp10(18)
}

fn check(name: &str, rx: U256, ry: U256, dx: U256) -> U256 {
    let g = golden_quote(rx, ry, dx).unwrap_or_else(|e| panic!("{name}: {e}"));
    assert_eq!(to_big(g.out_core), g.out_ref, "{name}: core != ref");
    // a folga vem só da truncagem de y' = floor(k/x'), então fica abaixo de x'
    assert!(g.k_slack < to_big(rx + dx), "{name}: folga {} grande demais", g.k_slack);
    g.out_core
}

#[test]
fn golden_cpmm_all() {
    check("sym:small", w("1000000"), w("1000000"), w("1000"));
    check("sym:large", w("5000000000"), w("5000000000"), w("1000000"));

    check("asym:x>>y", w("1000000000"), w("1000000"), w("1000"));
    check("asym:y>>x", w("1000000"), w("1000000000"), w("1000"));

    check("lim:min_dx", w("1000000"), w("1000000"), U256::one());
    check("lim:tiny_vs_big", w("1000"), w("1000000000"), w("1"));
    check("lim:max_reserves", U256::MAX / 2, U256::MAX / 2, U256::MAX / 4);
}

#[test]
fn widget_scenario_one_to_two_and_a_half() {
    let (ra, rb) = (w("1000000"), w("2500000"));
    let dx = w("10");
    let out = check("scenario", ra, rb, dx);
    assert_eq!(out, U256::from_dec_str("24999750002499975001").unwrap());
    assert_eq!(format_amount(out, 18, 6), "24.99975");
    assert_eq!(exchange_rate(ra, rb), "2.5");
}

#[test]
fn symmetric_one_percent_input() {
    let r = w("1000000");
    let out = get_amount_out(r, r, w("10000")).unwrap();
    assert_eq!(out, U256::from_dec_str("9900990099009900990100").unwrap());
}

#[test]
fn empty_pool_and_missing_data() {
    let rb = w("2500000");
    assert_eq!(exchange_rate(U256::zero(), rb), "0.0");
    assert_eq!(quote(U256::zero(), rb, w("10")), U256::zero());
    assert_eq!(format_value(&LedgerValue::Unavailable, 18, 4), "0.0");
    assert_eq!(format_value(&LedgerValue::Loading, 18, 4), "0.0");
    assert_eq!(
        format_value(&LedgerValue::Ready(U256::from(123_456_789_012_345_678u64)), 18, 4),
        "0.1234"
    );
}
