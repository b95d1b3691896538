//! Conversão entre unidades mínimas (inteiro) e string decimal exibida/digitada.
//! Só aritmética de string/inteiro: nenhum ponto flutuante no caminho.
//!
//! Política:
//! - exibição: fração **truncada** em `display_digits`, zeros à direita removidos,
//!   sempre ao menos uma casa (`"1.0"`, `"0.1234"`)
//! - parse: `round_half_up(valor · 10^decimals)` direto sobre os dígitos

use super::error::AmmError;
use super::error_catalog::AmmErrorCode;
use super::guardrails::{checked_add, ensure_decimals};
use super::types::{LedgerValue, MAX_DECIMALS, U256, U512, UNAVAILABLE_DISPLAY};
use crate::amm_err;

/// Formata `amount` (unidades mínimas com `decimals` casas) para exibição.
/// `decimals` acima de [`MAX_DECIMALS`] não é relido pelo parse, então vira `"0.0"`.
pub fn format_amount(amount: U256, decimals: u8, display_digits: u8) -> String {
    format_digits(&amount.to_string(), decimals, display_digits)
}

/// Mesma política de [`format_amount`] para quocientes em 512 bits (taxas).
pub fn format_wide(amount: U512, decimals: u8, display_digits: u8) -> String {
    format_digits(&amount.to_string(), decimals, display_digits)
}

fn format_digits(digits: &str, decimals: u8, display_digits: u8) -> String {
    if decimals > MAX_DECIMALS {
        return UNAVAILABLE_DISPLAY.to_string();
    }
    let decimals = decimals as usize;

    let (whole, frac) = if digits.len() > decimals {
        digits.split_at(digits.len() - decimals)
    } else {
        ("", digits)
    };

    let whole = whole.trim_start_matches('0');
    let whole = if whole.is_empty() { "0" } else { whole };

    // fração alinhada à esquerda com `decimals` casas, depois truncada
    let mut frac_full = "0".repeat(decimals - frac.len());
    frac_full.push_str(frac);
    frac_full.truncate(display_digits as usize);
    let frac = frac_full.trim_end_matches('0');
    let frac = if frac.is_empty() { "0" } else { frac };

    format!("{whole}.{frac}")
}

/// Formata um valor do ledger; `Loading`/`Unavailable` viram `"0.0"`.
pub fn format_value(value: &LedgerValue<U256>, decimals: u8, display_digits: u8) -> String {
    match value {
        LedgerValue::Ready(amount) => format_amount(*amount, decimals, display_digits),
        LedgerValue::Loading | LedgerValue::Unavailable => UNAVAILABLE_DISPLAY.to_string(),
    }
}

/// Parse estrito de string decimal para unidades mínimas.
///
/// Aceita `"12"`, `"12."`, `".5"`, `"0.5"` (com espaços nas pontas). Rejeita sinal,
/// expoente, separador de milhar e mais de um ponto. Casas além de `decimals` são
/// arredondadas meio-para-cima pelo primeiro dígito descartado.
pub fn try_parse_amount(input: &str, decimals: u8) -> Result<U256, AmmError> {
    ensure_decimals(decimals)?;
    let unparseable = || amm_err!(AmmErrorCode::UnparseableInput, input => input);

    let trimmed = input.trim();
    let (whole, frac) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
        return Err(unparseable());
    }

    let decimals = decimals as usize;
    let (kept, dropped) = if frac.len() > decimals {
        frac.split_at(decimals)
    } else {
        (frac, "")
    };
    let round_up = dropped.as_bytes().first().is_some_and(|&d| d >= b'5');

    let mut scaled = String::with_capacity(whole.len() + decimals);
    scaled.push_str(whole);
    scaled.push_str(kept);
    scaled.push_str(&"0".repeat(decimals - kept.len()));
    let scaled = scaled.trim_start_matches('0');

    let value = if scaled.is_empty() {
        U256::zero()
    } else {
        U256::from_dec_str(scaled)
            .map_err(|_| amm_err!(AmmErrorCode::OverflowNumeric, input => input))?
    };
    if round_up {
        checked_add(value, U256::one())
    } else {
        Ok(value)
    }
}

/// Parse tolerante para o campo de texto: qualquer falha vira `None` ("sem montante").
pub fn parse_amount(input: &str, decimals: u8) -> Option<U256> {
    try_parse_amount(input, decimals).ok()
}
