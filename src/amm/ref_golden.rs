//! Referência de alta precisão ("goldens") baseada em **BigUint** para o núcleo
//! de cotação e formatação.
//!
//! Objetivos:
//! 1. Recalcular a cotação x·y=k com inteiros sem limite, independente do
//!    caminho U256/U512 do core.
//! 2. Reproduzir a formatação/parse por **divisão inteira** (e não por
//!    manipulação de string, como o core), servindo de oráculo de validação.
//! 3. Medir a folga do invariante `k1 <= k0` causada pela truncagem.
//!
//! Não entra no caminho de produção; é usado pelos testes e goldens.

use super::error::AmmError;
use super::error_catalog::AmmErrorCode;
use super::quote;
use super::types::U256;
use crate::amm_err;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

// -------------------------
// Conversões
// -------------------------
#[inline]
pub fn to_big(v: U256) -> BigUint {
    let mut bytes = [0u8; 32];
    v.to_big_endian(&mut bytes);
    BigUint::from_bytes_be(&bytes)
}

pub fn from_big(v: &BigUint) -> Result<U256, AmmError> {
    let bytes = v.to_bytes_be();
    if bytes.len() > 32 {
        return Err(amm_err!(AmmErrorCode::OverflowNumeric, value => v));
    }
    Ok(U256::from_big_endian(&bytes))
}

#[inline]
fn pow10(n: usize) -> BigUint {
    BigUint::from(10u8).pow(n as u32)
}

// -------------------------
// Cotação de referência
// -------------------------
/// `out = y - floor(x·y / (x + dx))`; zero nos casos degenerados.
pub fn ref_quote(x: &BigUint, y: &BigUint, dx: &BigUint) -> BigUint {
    if x.is_zero() || y.is_zero() || dx.is_zero() {
        return BigUint::zero();
    }
    let k = x * y;
    let y1 = k / (x + dx);
    y - y1
}

// -------------------------
// Formatação / parse de referência
// -------------------------
/// Formata via `div_rem` por 10^decimals (fração truncada em `digits`).
pub fn ref_format(amount: &BigUint, decimals: u8, digits: u8) -> String {
    let (d, n) = (decimals as usize, digits as usize);
    let (whole, rem) = amount.div_rem(&pow10(d));
    let kept = n.min(d);
    let frac = rem / pow10(d - kept);
    let frac = if kept == 0 {
        String::new()
    } else {
        format!("{:0>width$}", frac.to_str_radix(10), width = kept)
    };
    let frac = frac.trim_end_matches('0');
    format!("{}.{}", whole, if frac.is_empty() { "0" } else { frac })
}

/// Parse via racional `n / 10^len(frac)` escalado e arredondado meio-para-cima.
pub fn ref_parse(input: &str, decimals: u8) -> Option<BigUint> {
    let t = input.trim();
    let (whole, frac) = t.split_once('.').unwrap_or((t, ""));
    let digits_only = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && frac.is_empty()) || !digits_only(whole) || !digits_only(frac) {
        return None;
    }
    let joined = format!("{whole}{frac}");
    let n = BigUint::parse_bytes(if joined.is_empty() { b"0" } else { joined.as_bytes() }, 10)?;
    let num = n * pow10(decimals as usize);
    let den = pow10(frac.len());
    let (q, r) = num.div_rem(&den);
    if (&r << 1) >= den {
        Some(q + BigUint::one())
    } else {
        Some(q)
    }
}

// -------------------------
// Estruturas de comparação (goldens)
// -------------------------
#[derive(Debug, Clone)]
pub struct RefQuote {
    pub out_core: U256,
    pub out_ref: BigUint,
    /// `k0 - k1`, sempre >= 0 (truncagem favorece o pool).
    pub k_slack: BigUint,
}

/// Compara o **core** com a referência para uma cotação.
pub fn golden_quote(x: U256, y: U256, dx: U256) -> Result<RefQuote, AmmError> {
    let out_core = quote::get_amount_out(x, y, dx)?;
    let (bx, by, bdx) = (to_big(x), to_big(y), to_big(dx));
    let out_ref = ref_quote(&bx, &by, &bdx);

    let k0 = &bx * &by;
    let k1 = (&bx + &bdx) * (&by - to_big(out_core));
    if k1 > k0 {
        return Err(amm_err!(AmmErrorCode::OverflowNumeric, k0 => &k0, k1 => &k1));
    }
    Ok(RefQuote { out_core, out_ref, k_slack: k0 - k1 })
}
