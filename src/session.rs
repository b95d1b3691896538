//! Controlador do widget de swap.
//!
//! Guarda o estado que a camada de apresentação manipula (direção, texto digitado,
//! conta conectada) e os últimos valores lidos do ledger. Cada evento (tecla,
//! troca de direção, refresh, desfecho de tx) recompõe a visão a partir das
//! funções puras de `amm`; nada é cacheado além da última leitura.
//!
//! O refresh de saldos após um swap é disparado pela confirmação
//! ([`TxOutcome::Confirmed`]), nunca por um timer.

use anyhow::Result;
use tracing::{debug, info, info_span, warn};

use crate::amm::error::AmmError;
use crate::amm::error_catalog::AmmErrorCode;
use crate::amm::format::{format_amount, format_value, parse_amount};
use crate::amm::pricing::{fee_display, min_out_with_tolerance, price_impact_ppm};
use crate::amm::quote::{exchange_rate_scaled, get_amount_out, quote_directed};
use crate::amm::types::{LedgerValue, Ppm, PoolReserves, SwapDirection, U256, UNAVAILABLE_DISPLAY};
use crate::amm_err;
use crate::config::{Address, SwapConfig, TokenConfig};
use crate::ledger::{LedgerReader, LedgerWriter, SwapRequest, TxId, TxOutcome};
use crate::obs::wrap;
use crate::telemetry;

/// Cotação pronta para exibição e submissão.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quote {
    pub amount_in: U256,
    pub amount_out: U256,
    pub min_amount_out: U256,
    pub price_impact_ppm: Ppm,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuoteView {
    /// Campo vazio/inválido ou montante zero.
    NoAmount,
    /// Reservas ainda não chegaram (ou falharam): a cotação fica bloqueada.
    Unavailable,
    Ready(Quote),
}

/// Tudo que a UI renderiza, já formatado.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapView {
    pub token_in: String,
    pub token_out: String,
    pub balance_in: String,
    pub balance_out: String,
    pub amount_out: String,
    pub rate: String,
    pub fee: String,
    pub pending: Option<TxId>,
    pub can_submit: bool,
}

pub struct SwapSession {
    config: SwapConfig,
    account: Option<Address>,
    direction: SwapDirection,
    input: String,
    reserves: LedgerValue<PoolReserves>,
    balance_a: LedgerValue<U256>,
    balance_b: LedgerValue<U256>,
    pending: Option<TxId>,
    last_outcome: Option<TxOutcome>,
}

impl SwapSession {
    pub fn new(config: SwapConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            account: None,
            direction: SwapDirection::default(),
            input: String::new(),
            reserves: LedgerValue::Loading,
            balance_a: LedgerValue::Loading,
            balance_b: LedgerValue::Loading,
            pending: None,
            last_outcome: None,
        })
    }

    pub fn config(&self) -> &SwapConfig {
        &self.config
    }

    pub fn connect(&mut self, account: Address) {
        info!(%account, "wallet conectada");
        self.account = Some(account);
        self.balance_a = LedgerValue::Loading;
        self.balance_b = LedgerValue::Loading;
    }

    pub fn disconnect(&mut self) {
        self.account = None;
        self.balance_a = LedgerValue::Unavailable;
        self.balance_b = LedgerValue::Unavailable;
    }

    pub fn account(&self) -> Option<&Address> {
        self.account.as_ref()
    }

    pub fn direction(&self) -> SwapDirection {
        self.direction
    }

    pub fn flip_direction(&mut self) {
        self.direction = self.direction.flip();
    }

    pub fn set_input(&mut self, input: &str) {
        self.input.clear();
        self.input.push_str(input);
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn pending(&self) -> Option<TxId> {
        self.pending
    }

    pub fn last_outcome(&self) -> Option<&TxOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn reserves(&self) -> &LedgerValue<PoolReserves> {
        &self.reserves
    }

    /// Lê reservas e saldos de novo; chamado antes de cotar e após confirmação.
    pub fn refresh(&mut self, reader: &impl LedgerReader) {
        wrap::time("refresh", || {
            self.reserves = reader.reserves();
            match &self.account {
                Some(owner) => {
                    self.balance_a = reader.balance_of(&self.config.token_a.address, owner);
                    self.balance_b = reader.balance_of(&self.config.token_b.address, owner);
                }
                None => {
                    self.balance_a = LedgerValue::Unavailable;
                    self.balance_b = LedgerValue::Unavailable;
                }
            }
        });
        debug!(
            reserves_ready = self.reserves.is_ready(),
            balances_ready = self.balance_a.is_ready() && self.balance_b.is_ready(),
            "ledger relido"
        );
    }

    fn tokens(&self) -> (&TokenConfig, &TokenConfig) {
        self.config.tokens(self.direction)
    }

    fn balances(&self) -> (&LedgerValue<U256>, &LedgerValue<U256>) {
        match self.direction {
            SwapDirection::AtoB => (&self.balance_a, &self.balance_b),
            SwapDirection::BtoA => (&self.balance_b, &self.balance_a),
        }
    }

    /// Montante digitado em unidades mínimas do token de entrada.
    pub fn amount_in(&self) -> Option<U256> {
        let (token_in, _) = self.tokens();
        wrap::time("parse", || parse_amount(&self.input, token_in.decimals))
    }

    pub fn quote(&self) -> QuoteView {
        let Some(reserves) = self.reserves.ready() else {
            return QuoteView::Unavailable;
        };
        let amount_in = match self.amount_in() {
            Some(v) if !v.is_zero() => v,
            _ => return QuoteView::NoAmount,
        };
        let (reserve_in, reserve_out) = reserves.oriented(self.direction);
        let quote = wrap::time("quote", || {
            let amount_out = quote_directed(reserves, self.direction, amount_in);
            Quote {
                amount_in,
                amount_out,
                min_amount_out: min_out_with_tolerance(amount_out, self.config.slippage_tolerance_ppm),
                price_impact_ppm: price_impact_ppm(reserve_in, reserve_out, amount_in).unwrap_or(0),
            }
        });
        debug!(
            direction = ?self.direction,
            amount_in = %quote.amount_in,
            amount_out = %quote.amount_out,
            impact_ppm = quote.price_impact_ppm,
            "cotação recalculada"
        );
        QuoteView::Ready(quote)
    }

    pub fn view(&self) -> SwapView {
        let (token_in, token_out) = self.tokens();
        let (balance_in, balance_out) = self.balances();
        let digits = self.config.display;

        let quote = self.quote();
        let amount_out = match &quote {
            QuoteView::Ready(q) => format_amount(q.amount_out, token_out.decimals, digits.quote),
            QuoteView::NoAmount | QuoteView::Unavailable => UNAVAILABLE_DISPLAY.to_string(),
        };
        let rate = match self.reserves.clone().map(|r| r.oriented(self.direction)) {
            LedgerValue::Ready((reserve_in, reserve_out)) => exchange_rate_scaled(
                reserve_in,
                token_in.decimals,
                reserve_out,
                token_out.decimals,
                digits.rate,
            ),
            LedgerValue::Loading | LedgerValue::Unavailable => UNAVAILABLE_DISPLAY.to_string(),
        };

        SwapView {
            token_in: token_in.symbol.clone(),
            token_out: token_out.symbol.clone(),
            balance_in: format_value(balance_in, token_in.decimals, digits.balance),
            balance_out: format_value(balance_out, token_out.decimals, digits.balance),
            amount_out,
            rate,
            fee: fee_display(self.config.fee_ppm),
            pending: self.pending,
            can_submit: self.request_from(&quote).is_ok(),
        }
    }

    /// Monta o payload de submissão. Falha sem conta, sem reservas, sem montante
    /// ou com tx pendente; nunca trata dado indisponível como zero.
    pub fn build_request(&self) -> Result<SwapRequest, AmmError> {
        self.request_from(&self.quote())
    }

    fn request_from(&self, quote: &QuoteView) -> Result<SwapRequest, AmmError> {
        let Some(sender) = self.account.clone() else {
            return Err(amm_err!(AmmErrorCode::DataUnavailable, motivo => "wallet desconectada"));
        };
        if let Some(tx) = self.pending {
            return Err(amm_err!(AmmErrorCode::DataUnavailable, motivo => "tx pendente", tx => tx));
        }
        let (quote, reserves) = match (quote, self.reserves.ready()) {
            (QuoteView::Ready(q), Some(r)) => (q, r),
            (QuoteView::NoAmount, Some(_)) => {
                return Err(amm_err!(AmmErrorCode::UnparseableInput, input => &self.input))
            }
            _ => return Err(amm_err!(AmmErrorCode::DataUnavailable, motivo => "reservas indisponíveis")),
        };
        // valida de novo pelo caminho estrito: reserva zerada não vira pedido
        let (reserve_in, reserve_out) = reserves.oriented(self.direction);
        get_amount_out(reserve_in, reserve_out, quote.amount_in)?;

        Ok(SwapRequest {
            sender,
            direction: self.direction,
            amount_in: quote.amount_in,
            min_amount_out: quote.min_amount_out,
        })
    }

    pub fn submit(&mut self, writer: &mut impl LedgerWriter) -> Result<TxId> {
        let request = match self.build_request() {
            Ok(r) => r,
            Err(err) => {
                warn!(error = %err.to_log_json(), "submissão bloqueada");
                return Err(err.into());
            }
        };
        let span = info_span!("submit", direction = ?request.direction, amount_in = %request.amount_in);
        let _guard = span.enter();

        let tx = writer.submit(request)?;
        info!(%tx, "swap submetido");
        self.pending = Some(tx);
        Ok(tx)
    }

    /// Recebe o desfecho de uma tx. Em `Confirmed` limpa o campo e relê o ledger;
    /// em `Failed` mantém os saldos. Retorna `false` para desfechos de outra tx.
    pub fn on_tx_outcome(&mut self, outcome: TxOutcome, reader: &impl LedgerReader) -> bool {
        if self.pending != Some(outcome.tx()) {
            debug!(tx = %outcome.tx(), "desfecho ignorado (tx desconhecida)");
            return false;
        }
        self.pending = None;
        match &outcome {
            TxOutcome::Confirmed { tx, amount_out } => {
                info!(%tx, %amount_out, "swap confirmado");
                telemetry::record_tx_outcome("confirmed");
                self.input.clear();
                self.refresh(reader);
            }
            TxOutcome::Failed { tx, reason } => {
                warn!(%tx, %reason, "swap falhou");
                telemetry::record_tx_outcome("failed");
            }
        }
        self.last_outcome = Some(outcome);
        true
    }
}
