//! Catálogo imutável de erros do núcleo de cotação.
use core::fmt;

/// Código de erro do núcleo.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum AmmErrorCode {
    /// Montante de entrada zero.
    ZeroAmount,
    /// Reserva zerada em um dos lados do par.
    ZeroReserve,
    /// Overflow ou underflow em cálculos numéricos.
    OverflowNumeric,
    /// Texto digitado não é um decimal válido.
    UnparseableInput,
    /// Dados do ledger ainda carregando ou com falha.
    DataUnavailable,
    /// `decimals` fora do intervalo suportado.
    DecimalsOutOfRange,
    /// Saída pedida esgota a reserva do pool.
    InsufficientLiquidity,
}

impl AmmErrorCode {
    /// Código textual estável do erro.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ZeroAmount => "AMM-0001",
            Self::ZeroReserve => "AMM-0002",
            Self::OverflowNumeric => "AMM-0003",
            Self::UnparseableInput => "AMM-0004",
            Self::DataUnavailable => "AMM-0005",
            Self::DecimalsOutOfRange => "AMM-0006",
            Self::InsufficientLiquidity => "AMM-0007",
        }
    }

    /// Título curto em português.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::ZeroAmount => "Quantidade zerada",
            Self::ZeroReserve => "Reserva zerada",
            Self::OverflowNumeric => "Overflow numérico",
            Self::UnparseableInput => "Entrada inválida",
            Self::DataUnavailable => "Dados indisponíveis",
            Self::DecimalsOutOfRange => "Decimais fora do intervalo",
            Self::InsufficientLiquidity => "Liquidez insuficiente",
        }
    }

    /// Mensagem base em português. Aceita placeholders `{chave}` do contexto.
    pub const fn message_pt(&self) -> &'static str {
        match self {
            Self::ZeroAmount => "amount deve ser > 0",
            Self::ZeroReserve => "reserve deve ser > 0",
            Self::OverflowNumeric => "overflow/underflow numérico",
            Self::UnparseableInput => "valor digitado não é um decimal válido: {input}",
            Self::DataUnavailable => "reservas ou saldos ainda não disponíveis",
            Self::DecimalsOutOfRange => "decimals deve ser <= {max}",
            Self::InsufficientLiquidity => "saída pedida excede a reserva do pool",
        }
    }

    /// Retorna todas as variantes em ordem estável.
    pub fn all() -> &'static [AmmErrorCode] {
        const ALL: &[AmmErrorCode] = &[
            AmmErrorCode::ZeroAmount,
            AmmErrorCode::ZeroReserve,
            AmmErrorCode::OverflowNumeric,
            AmmErrorCode::UnparseableInput,
            AmmErrorCode::DataUnavailable,
            AmmErrorCode::DecimalsOutOfRange,
            AmmErrorCode::InsufficientLiquidity,
        ];
        ALL
    }
}

impl fmt::Display for AmmErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Mensagem padrão na localidade ativa (pt-BR).
pub fn default_locale_message(code: AmmErrorCode) -> &'static str {
    code.message_pt()
}
