//! Utilitários para a UI: spot price, impacto de preço, saída mínima com tolerância
//! e texto da taxa informativa. Baseados nas funções puras de `quote.rs`.

use super::error::AmmError;
use super::guardrails::{ensure_nonzero, ensure_reserves, mul_wide, narrow};
use super::quote::get_amount_out;
use super::types::{wad, Ppm, U256, U512, PPM_SCALE};

// --------- Spot price ---------
/// Preço à vista de 1 unidade de entrada em unidades de saída: **p = y/x** (em WAD, floor).
pub fn spot_price_wad(reserve_in: U256, reserve_out: U256) -> Result<U256, AmmError> {
    ensure_reserves(reserve_in, reserve_out)?;
    narrow(mul_wide(reserve_out, wad()) / U512::from(reserve_in))
}

// --------- Impacto de preço ---------
/// Impacto relativo em **PPM** entre o preço marginal e o preço de execução:
/// impact_ppm = 1e6 · (1 - out·x / (dx·y))
///
/// Sem taxa no cálculo, o impacto vem só da curva. Resultado limitado a `1e6`.
pub fn price_impact_ppm(reserve_in: U256, reserve_out: U256, amount_in: U256) -> Result<Ppm, AmmError> {
    ensure_reserves(reserve_in, reserve_out)?;
    ensure_nonzero(amount_in)?;
    let out = get_amount_out(reserve_in, reserve_out, amount_in)?;

    // compara out·x contra dx·y sem dividir antes (tudo em 512 bits)
    let exec = mul_wide(out, reserve_in);
    let ideal = mul_wide(amount_in, reserve_out);
    if exec >= ideal {
        return Ok(0);
    }
    let gap = ideal - exec;
    let scale = U512::from(PPM_SCALE);
    let ppm = match gap.checked_mul(scale) {
        Some(scaled) => scaled / ideal,
        // produtos perto de 2^512: divide antes, perdendo só a última casa
        None => gap / (ideal / scale),
    };
    Ok(if ppm > U512::from(PPM_SCALE) { PPM_SCALE } else { ppm.low_u32() })
}

// --------- Cotas com tolerância de slippage ---------
/// **min_out** aceito na submissão: `floor(quote · (1 - tol))`, `tol` limitado a 1e6.
pub fn min_out_with_tolerance(quote: U256, slippage_tolerance_ppm: Ppm) -> U256 {
    let tol = slippage_tolerance_ppm.min(PPM_SCALE);
    let factor = PPM_SCALE - tol;
    let n = mul_wide(quote, U256::from(factor)) / U512::from(PPM_SCALE);
    // n <= quote, então o downcast é seguro
    narrow(n).unwrap_or(quote)
}

// --------- Taxa informativa ---------
/// Renderiza a taxa em ppm como porcentagem (`3000` → `"0.3%"`).
pub fn fee_display(fee_ppm: Ppm) -> String {
    // 1% = 10_000 ppm; quatro casas cobrem a resolução de 1 ppm
    let whole = fee_ppm / 10_000;
    let frac = format!("{:04}", fee_ppm % 10_000);
    let frac = frac.trim_end_matches('0');
    let frac = if frac.is_empty() { "0" } else { frac };
    format!("{whole}.{frac}%")
}
