//! Contratos dos colaboradores externos: leitura (reservas/saldos) e escrita
//! (submissão do swap com confirmação assíncrona).

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::amm::types::{LedgerValue, PoolReserves, SwapDirection, U256};
use crate::config::Address;

pub mod memory;

/// Identificador opaco de uma transação submetida.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxId(pub u64);

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tx#{}", self.0)
    }
}

/// Payload entregue ao colaborador de escrita.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapRequest {
    pub sender: Address,
    pub direction: SwapDirection,
    pub amount_in: U256,
    /// Limite de proteção contra slippage entre a cotação e a execução.
    pub min_amount_out: U256,
}

/// Desfecho de uma transação, notificado depois da submissão.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TxOutcome {
    Confirmed { tx: TxId, amount_out: U256 },
    Failed { tx: TxId, reason: String },
}

impl TxOutcome {
    pub fn tx(&self) -> TxId {
        match self {
            Self::Confirmed { tx, .. } | Self::Failed { tx, .. } => *tx,
        }
    }
}

/// Leitura do estado on-chain. Carregando/falha viram `Loading`/`Unavailable`.
pub trait LedgerReader {
    fn reserves(&self) -> LedgerValue<PoolReserves>;
    fn balance_of(&self, token: &Address, owner: &Address) -> LedgerValue<U256>;
}

/// Escrita: aceita o pedido e devolve um id; o desfecho chega depois como [`TxOutcome`].
pub trait LedgerWriter {
    fn submit(&mut self, request: SwapRequest) -> Result<TxId>;
}
