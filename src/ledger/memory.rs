//! Ledger em memória: mantém reservas do par e saldos, enfileira submissões e
//! só as liquida quando `settle_next` é chamado (simula a confirmação do bloco).

use anyhow::{ensure, Result};
use std::collections::{HashMap, VecDeque};
use tracing::{debug, warn};

use super::{LedgerReader, LedgerWriter, SwapRequest, TxId, TxOutcome};
use crate::amm::quote::get_amount_out;
use crate::amm::types::{LedgerValue, PoolReserves, SwapDirection, U256};
use crate::config::{Address, SwapConfig};

#[derive(Debug, Clone)]
pub struct InMemoryLedger {
    token_a: Address,
    token_b: Address,
    reserves: LedgerValue<PoolReserves>,
    balances: HashMap<(Address, Address), U256>,
    balances_available: bool,
    pending: VecDeque<(TxId, SwapRequest)>,
    next_id: u64,
}

impl InMemoryLedger {
    pub fn new(config: &SwapConfig) -> Self {
        Self {
            token_a: config.token_a.address.clone(),
            token_b: config.token_b.address.clone(),
            reserves: LedgerValue::Loading,
            balances: HashMap::new(),
            balances_available: true,
            pending: VecDeque::new(),
            next_id: 1,
        }
    }

    pub fn with_reserves(mut self, a: U256, b: U256) -> Self {
        self.reserves = LedgerValue::Ready(PoolReserves::new(a, b));
        self
    }

    /// Força o estado das reservas (ex.: `Loading` ou `Unavailable` para simular RPC lento/falho).
    pub fn set_reserves(&mut self, value: LedgerValue<PoolReserves>) {
        self.reserves = value;
    }

    pub fn set_balances_available(&mut self, available: bool) {
        self.balances_available = available;
    }

    pub fn mint(&mut self, token: &Address, owner: &Address, amount: U256) {
        let slot = self
            .balances
            .entry((token.clone(), owner.clone()))
            .or_insert_with(U256::zero);
        *slot = slot.saturating_add(amount);
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn tokens(&self, direction: SwapDirection) -> (Address, Address) {
        match direction {
            SwapDirection::AtoB => (self.token_a.clone(), self.token_b.clone()),
            SwapDirection::BtoA => (self.token_b.clone(), self.token_a.clone()),
        }
    }

    fn balance(&self, token: &Address, owner: &Address) -> U256 {
        self.balances
            .get(&(token.clone(), owner.clone()))
            .copied()
            .unwrap_or_default()
    }

    /// Leitura que pode falhar, como uma chamada RPC de `balanceOf`.
    fn read_balance(&self, token: &Address, owner: &Address) -> Result<U256> {
        ensure!(self.balances_available, "saldos indisponíveis no nó");
        Ok(self.balance(token, owner))
    }

    /// Liquida a próxima transação pendente, aplicando o swap x·y=k.
    pub fn settle_next(&mut self) -> Option<TxOutcome> {
        let (tx, request) = self.pending.pop_front()?;
        let outcome = match self.execute(&request) {
            Ok(amount_out) => TxOutcome::Confirmed { tx, amount_out },
            Err(err) => {
                warn!(%tx, error = %err, "swap revertido");
                TxOutcome::Failed { tx, reason: err.to_string() }
            }
        };
        Some(outcome)
    }

    /// Descarta a próxima transação pendente como falha (ex.: usuário rejeitou na wallet).
    pub fn fail_next(&mut self, reason: &str) -> Option<TxOutcome> {
        let (tx, _) = self.pending.pop_front()?;
        Some(TxOutcome::Failed { tx, reason: reason.to_string() })
    }

    fn execute(&mut self, request: &SwapRequest) -> Result<U256> {
        let reserves = *self
            .reserves
            .ready()
            .ok_or_else(|| anyhow::anyhow!("reservas indisponíveis"))?;
        let (token_in, token_out) = self.tokens(request.direction);
        let have = self.balance(&token_in, &request.sender);
        ensure!(have >= request.amount_in, "saldo insuficiente: {} < {}", have, request.amount_in);

        let (reserve_in, reserve_out) = reserves.oriented(request.direction);
        let amount_out = get_amount_out(reserve_in, reserve_out, request.amount_in)?;
        ensure!(
            amount_out >= request.min_amount_out,
            "slippage: saída {} < mínimo {}",
            amount_out,
            request.min_amount_out
        );

        let new_in = reserve_in + request.amount_in;
        let new_out = reserve_out - amount_out;
        self.reserves = LedgerValue::Ready(match request.direction {
            SwapDirection::AtoB => PoolReserves::new(new_in, new_out),
            SwapDirection::BtoA => PoolReserves::new(new_out, new_in),
        });
        self.balances
            .insert((token_in, request.sender.clone()), have - request.amount_in);
        self.mint(&token_out, &request.sender, amount_out);
        debug!(amount_in = %request.amount_in, %amount_out, "swap liquidado");
        Ok(amount_out)
    }
}

impl LedgerReader for InMemoryLedger {
    fn reserves(&self) -> LedgerValue<PoolReserves> {
        self.reserves.clone()
    }

    fn balance_of(&self, token: &Address, owner: &Address) -> LedgerValue<U256> {
        self.read_balance(token, owner).into()
    }
}

impl LedgerWriter for InMemoryLedger {
    fn submit(&mut self, request: SwapRequest) -> Result<TxId> {
        ensure!(!request.amount_in.is_zero(), "amount_in zerado");
        let tx = TxId(self.next_id);
        self.next_id += 1;
        self.pending.push_back((tx, request));
        Ok(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(n: u64) -> U256 {
        U256::from(n) * U256::exp10(18)
    }

    fn setup() -> (InMemoryLedger, SwapConfig, Address) {
        let cfg = SwapConfig::default();
        let user: Address = "0x00000000000000000000000000000000000000aa".parse().unwrap();
        let mut ledger = InMemoryLedger::new(&cfg).with_reserves(w(1_000), w(1_000));
        ledger.mint(&cfg.token_a.address, &user, w(10));
        (ledger, cfg, user)
    }

    #[test]
    fn settle_applies_constant_product() {
        let (mut ledger, cfg, user) = setup();
        let tx = ledger
            .submit(SwapRequest {
                sender: user.clone(),
                direction: SwapDirection::AtoB,
                amount_in: w(10),
                min_amount_out: U256::zero(),
            })
            .unwrap();
        assert_eq!(ledger.pending_len(), 1);

        let outcome = ledger.settle_next().unwrap();
        let expected = get_amount_out(w(1_000), w(1_000), w(10)).unwrap();
        assert_eq!(outcome, TxOutcome::Confirmed { tx, amount_out: expected });
        assert_eq!(
            ledger.reserves(),
            LedgerValue::Ready(PoolReserves::new(w(1_010), w(1_000) - expected))
        );
        assert_eq!(ledger.balance_of(&cfg.token_a.address, &user), LedgerValue::Ready(U256::zero()));
        assert_eq!(ledger.balance_of(&cfg.token_b.address, &user), LedgerValue::Ready(expected));
    }

    #[test]
    fn settle_fails_on_insufficient_balance_and_slippage() {
        let (mut ledger, _cfg, user) = setup();
        ledger
            .submit(SwapRequest {
                sender: user.clone(),
                direction: SwapDirection::AtoB,
                amount_in: w(11),
                min_amount_out: U256::zero(),
            })
            .unwrap();
        assert!(matches!(ledger.settle_next(), Some(TxOutcome::Failed { .. })));

        ledger
            .submit(SwapRequest {
                sender: user,
                direction: SwapDirection::AtoB,
                amount_in: w(1),
                min_amount_out: w(1),
            })
            .unwrap();
        match ledger.settle_next() {
            Some(TxOutcome::Failed { reason, .. }) => assert!(reason.contains("slippage")),
            other => panic!("esperava falha, veio {other:?}"),
        }
        assert_eq!(ledger.reserves(), LedgerValue::Ready(PoolReserves::new(w(1_000), w(1_000))));
    }

    #[test]
    fn unavailable_balances_and_empty_queue() {
        let (mut ledger, cfg, user) = setup();
        ledger.set_balances_available(false);
        assert_eq!(ledger.balance_of(&cfg.token_a.address, &user), LedgerValue::Unavailable);
        assert_eq!(ledger.settle_next(), None);
        assert_eq!(ledger.fail_next("rejeitado"), None);
    }
}
