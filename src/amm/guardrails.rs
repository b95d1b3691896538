//! Validações e helpers numéricos seguros para o núcleo.
//! Objetivo: entradas seguras e multiplicações sem estouro (produtos em 512 bits).

use super::error::AmmError;
use super::error_catalog::AmmErrorCode;
use super::error_map::{from_decimals, from_quote_inputs};
use super::types::{U256, U512};
use crate::amm_err;

#[inline]
pub fn ensure_nonzero(amount: U256) -> Result<(), AmmError> {
    if amount.is_zero() {
        Err(AmmErrorCode::ZeroAmount.into())
    } else {
        Ok(())
    }
}

#[inline]
pub fn ensure_reserves(reserve_in: U256, reserve_out: U256) -> Result<(), AmmError> {
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(amm_err!(AmmErrorCode::ZeroReserve,
            reserve_in => reserve_in,
            reserve_out => reserve_out));
    }
    Ok(())
}

/// Validação completa dos inputs de cotação (reservas, montante, overflow de x + dx).
#[inline]
pub fn ensure_quote_inputs(reserve_in: U256, reserve_out: U256, amount_in: U256) -> Result<(), AmmError> {
    match from_quote_inputs(reserve_in, reserve_out, amount_in) {
        None => Ok(()),
        Some(AmmErrorCode::ZeroReserve) => ensure_reserves(reserve_in, reserve_out),
        Some(code) => Err(amm_err!(code, amount_in => amount_in)),
    }
}

#[inline]
pub fn ensure_decimals(decimals: u8) -> Result<(), AmmError> {
    match from_decimals(decimals) {
        None => Ok(()),
        Some(code) => Err(amm_err!(code,
            decimals => decimals,
            max => super::types::MAX_DECIMALS)),
    }
}

#[inline]
pub fn checked_add(a: U256, b: U256) -> Result<U256, AmmError> {
    a.checked_add(b).ok_or_else(|| amm_err!(AmmErrorCode::OverflowNumeric))
}

#[inline]
pub fn checked_sub(a: U256, b: U256) -> Result<U256, AmmError> {
    a.checked_sub(b).ok_or_else(|| amm_err!(AmmErrorCode::OverflowNumeric))
}

/// Produto exato de dois U256 (cabe sempre em 512 bits).
#[inline]
pub fn mul_wide(a: U256, b: U256) -> U512 {
    U512::from(a) * U512::from(b)
}

/// Downcast U512 → U256 com checagem de overflow.
pub fn narrow(v: U512) -> Result<U256, AmmError> {
    let U512(ref w) = v;
    if w[4..].iter().any(|&limb| limb != 0) {
        return Err(AmmErrorCode::OverflowNumeric.into());
    }
    Ok(U256([w[0], w[1], w[2], w[3]]))
}

/// Divisão com teto em 512 bits, assumindo `d > 0`.
#[inline]
pub fn ceil_div_u512(n: U512, d: U512) -> U512 {
    let (q, r) = n.div_mod(d);
    if r.is_zero() {
        q
    } else {
        q + U512::one()
    }
}

// -------------------------
// TESTES
// -------------------------
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_ensure_nonzero() {
        assert!(ensure_nonzero(U256::one()).is_ok());
        assert_eq!(ensure_nonzero(U256::zero()).unwrap_err().code, AmmErrorCode::ZeroAmount);
    }

    #[test]
    fn t_ensure_reserves() {
        assert!(ensure_reserves(U256::one(), U256::one()).is_ok());
        let err = ensure_reserves(U256::zero(), U256::one()).unwrap_err();
        assert_eq!(err.code, AmmErrorCode::ZeroReserve);
        assert_eq!(err.context.get("reserve_in").unwrap(), "0");
        assert_eq!(
            ensure_reserves(U256::one(), U256::zero()).unwrap_err().code,
            AmmErrorCode::ZeroReserve
        );
    }

    #[test]
    fn t_checked_add_sub_over_under_flow() {
        assert_eq!(checked_add(U256::from(1u8), U256::from(2u8)).unwrap(), U256::from(3u8));
        assert_eq!(
            checked_add(U256::MAX, U256::one()).unwrap_err().code,
            AmmErrorCode::OverflowNumeric
        );
        assert_eq!(checked_sub(U256::from(5u8), U256::from(3u8)).unwrap(), U256::from(2u8));
        assert_eq!(
            checked_sub(U256::zero(), U256::one()).unwrap_err().code,
            AmmErrorCode::OverflowNumeric
        );
    }

    #[test]
    fn t_mul_wide_and_narrow() {
        let p = mul_wide(U256::MAX, U256::MAX);
        assert!(narrow(p).is_err());
        let small = mul_wide(U256::from(1_000u64), U256::from(3u8));
        assert_eq!(narrow(small).unwrap(), U256::from(3_000u64));
    }

    #[test]
    fn t_ceil_div() {
        assert_eq!(ceil_div_u512(U512::from(10u8), U512::from(5u8)), U512::from(2u8));
        assert_eq!(ceil_div_u512(U512::from(11u8), U512::from(5u8)), U512::from(3u8));
    }
}
