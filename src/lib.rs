//! Núcleo de cotação e formatação do widget de swap (par CPMM fixo).
//!
//! - [`amm::quote`]: cotação x·y=k sem taxa aplicada e taxa de câmbio exibida.
//! - [`amm::format`]: unidades mínimas ⇄ string decimal.
//! - [`session`]: controlador do widget (direção, input, reservas, confirmação).
//! - [`ledger`]: contratos dos colaboradores de leitura/escrita do ledger.

pub mod amm;
pub mod config;
pub mod ledger;
pub mod obs;
pub mod session;
pub mod telemetry;

pub use amm::types::{LedgerValue, PoolReserves, SwapDirection, U256, U512};
