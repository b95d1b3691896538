//! Mapeamento entre condições de domínio e códigos de erro.
use crate::amm::error_catalog::AmmErrorCode;
use crate::amm::types::{U256, MAX_DECIMALS};

/// Determina o código de erro para uma cotação a partir dos inputs brutos.
///
/// A ordem importa: reserva zerada é reportada antes de montante zero, para que
/// a UI mostre "pool vazio" mesmo com o campo ainda em branco.
pub fn from_quote_inputs(
    reserve_in: U256,
    reserve_out: U256,
    amount_in: U256,
) -> Option<AmmErrorCode> {
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Some(AmmErrorCode::ZeroReserve);
    }
    if amount_in.is_zero() {
        return Some(AmmErrorCode::ZeroAmount);
    }
    if reserve_in.checked_add(amount_in).is_none() {
        return Some(AmmErrorCode::OverflowNumeric);
    }
    None
}

/// Valida `decimals` contra [`MAX_DECIMALS`].
pub fn from_decimals(decimals: u8) -> Option<AmmErrorCode> {
    (decimals > MAX_DECIMALS).then_some(AmmErrorCode::DecimalsOutOfRange)
}
