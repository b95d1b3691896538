//! Configuração de implantação do widget: endereços do par, decimais por token e
//! casas exibidas. Lida de TOML e validada antes de construir a sessão.

use anyhow::{bail, ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::amm::types::{
    Ppm, SwapDirection, BALANCE_DISPLAY_DIGITS, MAX_DECIMALS, PPM_SCALE, QUOTE_DISPLAY_DIGITS,
    RATE_DISPLAY_DIGITS,
};

/// Endereço de conta/contrato no formato `0x` + 40 hex.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Address {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s
            .strip_prefix("0x")
            .with_context(|| format!("endereço sem prefixo 0x: {s}"))?;
        ensure!(hex.len() == 40, "endereço deve ter 40 dígitos hex: {s}");
        ensure!(
            hex.bytes().all(|b| b.is_ascii_hexdigit()),
            "endereço com caractere não-hex: {s}"
        );
        Ok(Self(s.to_ascii_lowercase()))
    }
}

impl TryFrom<String> for Address {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Address> for String {
    fn from(a: Address) -> Self {
        a.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    pub symbol: String,
    pub address: Address,
    pub decimals: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayDigits {
    pub balance: u8,
    pub quote: u8,
    pub rate: u8,
}

impl Default for DisplayDigits {
    fn default() -> Self {
        Self {
            balance: BALANCE_DISPLAY_DIGITS,
            quote: QUOTE_DISPLAY_DIGITS,
            rate: RATE_DISPLAY_DIGITS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapConfig {
    pub dex_address: Address,
    /// Taxa do pool em ppm; só exibida, nunca aplicada à cotação.
    #[serde(default = "default_fee_ppm")]
    pub fee_ppm: Ppm,
    #[serde(default = "default_slippage_ppm")]
    pub slippage_tolerance_ppm: Ppm,
    pub token_a: TokenConfig,
    pub token_b: TokenConfig,
    #[serde(default)]
    pub display: DisplayDigits,
}

fn default_fee_ppm() -> Ppm {
    3_000
}

fn default_slippage_ppm() -> Ppm {
    5_000
}

impl SwapConfig {
    /// Tokens `(entrada, saída)` para a direção dada.
    pub fn tokens(&self, direction: SwapDirection) -> (&TokenConfig, &TokenConfig) {
        match direction {
            SwapDirection::AtoB => (&self.token_a, &self.token_b),
            SwapDirection::BtoA => (&self.token_b, &self.token_a),
        }
    }

    pub fn validate(&self) -> Result<()> {
        for token in [&self.token_a, &self.token_b] {
            ensure!(!token.symbol.trim().is_empty(), "token sem símbolo: {}", token.address);
            ensure!(
                token.decimals <= MAX_DECIMALS,
                "{}: decimals {} > {}",
                token.symbol,
                token.decimals,
                MAX_DECIMALS
            );
        }
        if self.token_a.address == self.token_b.address {
            bail!("token_a e token_b apontam para o mesmo contrato {}", self.token_a.address);
        }
        let d = self.display;
        ensure!(
            [d.balance, d.quote, d.rate].iter().all(|&n| n <= MAX_DECIMALS),
            "casas de exibição devem ser <= {}",
            MAX_DECIMALS
        );
        ensure!(self.fee_ppm <= PPM_SCALE, "fee_ppm {} > {}", self.fee_ppm, PPM_SCALE);
        ensure!(
            self.slippage_tolerance_ppm <= PPM_SCALE,
            "slippage_tolerance_ppm {} > {}",
            self.slippage_tolerance_ppm,
            PPM_SCALE
        );
        Ok(())
    }
}

impl Default for SwapConfig {
    /// Par ETH/USDC com endereços de placeholder (implantação local).
    fn default() -> Self {
        let addr = |last: u8| Address(format!("0x{:040x}", last));
        Self {
            dex_address: addr(1),
            fee_ppm: default_fee_ppm(),
            slippage_tolerance_ppm: default_slippage_ppm(),
            token_a: TokenConfig {
                symbol: "ETH".into(),
                address: addr(2),
                decimals: 18,
            },
            token_b: TokenConfig {
                symbol: "USDC".into(),
                address: addr(3),
                decimals: 6,
            },
            display: DisplayDigits::default(),
        }
    }
}

pub fn parse_config(content: &str) -> Result<SwapConfig> {
    let config: SwapConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

pub fn read_config(path: impl AsRef<Path>) -> Result<SwapConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("lendo configuração {}", path.display()))?;
    parse_config(&content).with_context(|| format!("configuração inválida em {}", path.display()))
}
