//! Cotação CPMM (x·y=k) sem dedução de taxa.
//! - get_amount_out: saída para um `amount_in`, truncando a divisão k/x'
//! - get_amount_in: menor entrada que entrega ao menos `amount_out`
//! - quote / exchange_rate: versões tolerantes usadas pela UI (zero/sentinela, nunca erro)
//!
//! A taxa do pool é só texto informativo; não entra na conta.

use super::error::AmmError;
use super::error_catalog::AmmErrorCode;
use super::format::format_wide;
use super::guardrails::{
    ceil_div_u512, checked_add, checked_sub, ensure_nonzero, ensure_quote_inputs,
    ensure_reserves, mul_wide, narrow,
};
use super::types::{PoolReserves, SwapDirection, U256, U512, MAX_DECIMALS, RATE_DISPLAY_DIGITS, UNAVAILABLE_DISPLAY};
use crate::amm_err;

/// Calcula a saída ao enviar `amount_in` contra `(reserve_in, reserve_out)`.
///
/// ```text
/// x' = x + dx
/// y' = floor(x·y / x')
/// out = y - y'
/// ```
pub fn get_amount_out(reserve_in: U256, reserve_out: U256, amount_in: U256) -> Result<U256, AmmError> {
    ensure_quote_inputs(reserve_in, reserve_out, amount_in)?;

    let x1 = checked_add(reserve_in, amount_in)?;
    let k = mul_wide(reserve_in, reserve_out);
    // y' <= y porque x' >= x, então o downcast nunca falha na prática
    let y1 = narrow(k / U512::from(x1))?;
    checked_sub(reserve_out, y1)
}

/// Menor `amount_in` tal que `get_amount_out(.., amount_in) >= amount_out`.
/// Estratégia: a forma fechada `dx = ceil(x·dy / (y - dy))` já satisfaz o alvo e serve
/// de **upper bound**; a **busca binária** garante a minimalidade sob a divisão truncada.
pub fn get_amount_in(reserve_in: U256, reserve_out: U256, amount_out: U256) -> Result<U256, AmmError> {
    ensure_reserves(reserve_in, reserve_out)?;
    ensure_nonzero(amount_out)?;
    if amount_out >= reserve_out {
        return Err(amm_err!(AmmErrorCode::InsufficientLiquidity,
            amount_out => amount_out,
            reserve_out => reserve_out));
    }

    // -------- upper bound --------
    let num = mul_wide(reserve_in, amount_out);
    let den = U512::from(reserve_out - amount_out);
    let mut hi = narrow(ceil_div_u512(num, den))?;
    while get_amount_out(reserve_in, reserve_out, hi)? < amount_out {
        hi = checked_add(hi, U256::one())?;
    }

    // -------- busca binária: menor dx com out >= dy --------
    let mut lo = U256::one();
    while lo < hi {
        let mid = lo + (hi - lo) / U256::from(2u8);
        if quote(reserve_in, reserve_out, mid) >= amount_out {
            hi = mid;
        } else {
            lo = mid + U256::one();
        }
    }
    Ok(hi)
}

/// Cotação tolerante: reserva zerada ou montante zero → `0`.
pub fn quote(reserve_in: U256, reserve_out: U256, amount_in: U256) -> U256 {
    get_amount_out(reserve_in, reserve_out, amount_in).unwrap_or_default()
}

/// Cotação orientada pela direção do swap.
pub fn quote_directed(reserves: &PoolReserves, direction: SwapDirection, amount_in: U256) -> U256 {
    let (reserve_in, reserve_out) = reserves.oriented(direction);
    quote(reserve_in, reserve_out, amount_in)
}

/// Taxa `reserve_out / reserve_in` com 4 casas (truncada). `"0.0"` se `reserve_in == 0`.
///
/// As duas reservas são comparadas na mesma escala de unidades mínimas; tokens com
/// `decimals` diferentes devem usar [`exchange_rate_scaled`].
pub fn exchange_rate(reserve_in: U256, reserve_out: U256) -> String {
    exchange_rate_scaled(reserve_in, 0, reserve_out, 0, RATE_DISPLAY_DIGITS)
}

/// Taxa em unidades inteiras de cada token, ajustando `decimals` de cada lado.
///
/// rate = (reserve_out / 10^dec_out) / (reserve_in / 10^dec_in)
///
/// O quociente fica em 512 bits: taxas acima de `U256::MAX / 10^digits` continuam
/// exibíveis. `"0.0"` só para `reserve_in == 0` ou casas fora de [`MAX_DECIMALS`].
pub fn exchange_rate_scaled(
    reserve_in: U256,
    dec_in: u8,
    reserve_out: U256,
    dec_out: u8,
    digits: u8,
) -> String {
    match rate_minor(reserve_in, dec_in, reserve_out, dec_out, digits) {
        Some(scaled) => format_wide(scaled, digits, digits),
        None => UNAVAILABLE_DISPLAY.to_string(),
    }
}

/// Taxa escalada por 10^digits, truncada; `None` quando não há como dividir.
fn rate_minor(reserve_in: U256, dec_in: u8, reserve_out: U256, dec_out: u8, digits: u8) -> Option<U512> {
    if reserve_in.is_zero() || [dec_in, dec_out, digits].iter().any(|&d| d > MAX_DECIMALS) {
        return None;
    }
    // numerador: reserve_out · 10^(dec_in + digits) < 2^256 · 10^72 < 2^512
    let num = U512::from(reserve_out) * U512::exp10(dec_in as usize + digits as usize);
    let den = U512::from(reserve_in) * U512::exp10(dec_out as usize);
    Some(num / den)
}
