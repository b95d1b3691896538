//! Tipos básicos do núcleo de cotação: inteiros largos, direção e estado do ledger.

use serde::{Deserialize, Serialize};
use uint::construct_uint;

construct_uint! {
    /// Inteiro de 256 bits para montantes em unidades mínimas.
    pub struct U256(4);
}

construct_uint! {
    /// Inteiro de 512 bits para produtos intermediários (k = x·y).
    pub struct U512(8);
}

impl From<U256> for U512 {
    fn from(v: U256) -> Self {
        let U256(ref w) = v;
        U512([w[0], w[1], w[2], w[3], 0, 0, 0, 0])
    }
}

/// Montante em unidades mínimas (sem parte fracionária).
pub type AmountMinor = U256;
pub type Ppm = u32; // 0..=1_000_000

pub const PPM_SCALE: Ppm = 1_000_000;
/// Maior `decimals` aceito; 10^36 ainda deixa folga em 256 bits.
pub const MAX_DECIMALS: u8 = 36;

pub const BALANCE_DISPLAY_DIGITS: u8 = 4;
pub const QUOTE_DISPLAY_DIGITS: u8 = 6;
pub const RATE_DISPLAY_DIGITS: u8 = 4;

/// String exibida quando o valor não está disponível (ou é zero).
pub const UNAVAILABLE_DISPLAY: &str = "0.0";

/// 1e18, escala de preços à vista.
#[inline]
pub fn wad() -> U256 {
    U256::exp10(18)
}

/// Direção do swap: qual reserva entra e qual sai.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapDirection {
    #[default]
    AtoB,
    BtoA,
}

impl SwapDirection {
    pub fn flip(self) -> Self {
        match self {
            Self::AtoB => Self::BtoA,
            Self::BtoA => Self::AtoB,
        }
    }
}

/// Reservas do par, na ordem (token A, token B).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolReserves {
    pub a: U256,
    pub b: U256,
}

impl PoolReserves {
    pub fn new(a: U256, b: U256) -> Self {
        Self { a, b }
    }

    /// Retorna `(reserve_in, reserve_out)` para a direção dada.
    pub fn oriented(&self, direction: SwapDirection) -> (U256, U256) {
        match direction {
            SwapDirection::AtoB => (self.a, self.b),
            SwapDirection::BtoA => (self.b, self.a),
        }
    }
}

/// Valor vindo do colaborador de leitura do ledger.
///
/// `Loading` e `Unavailable` renderizam igual a zero (`"0.0"`), mas continuam
/// distinguíveis aqui para que a cotação nunca trate dado ausente como reserva zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LedgerValue<T> {
    #[default]
    Loading,
    Unavailable,
    Ready(T),
}

impl<T> LedgerValue<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> LedgerValue<U> {
        match self {
            Self::Loading => LedgerValue::Loading,
            Self::Unavailable => LedgerValue::Unavailable,
            Self::Ready(v) => LedgerValue::Ready(f(v)),
        }
    }
}

impl<T, E> From<Result<T, E>> for LedgerValue<T> {
    fn from(r: Result<T, E>) -> Self {
        match r {
            Ok(v) => Self::Ready(v),
            Err(_) => Self::Unavailable,
        }
    }
}
