//! Runtime defaults for new calculator sessions.

use std::{fs, path::Path};

use anyhow::Context;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

pub const DEFAULT_STORAGE_KEY: &str = "loanCalculatorData";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub default_principal: Money,
    /// Annual percentage.
    pub default_interest_rate: Rate,
    pub default_term_months: i32,
    /// Key under which the stored-loans document is kept.
    pub storage_key: String,
    /// ISO code used by the export report when formatting amounts.
    pub currency: String,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            default_principal: dec!(100000),
            default_interest_rate: dec!(5.5),
            default_term_months: 360,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency: "USD".to_string(),
        }
    }
}

impl CalculatorConfig {
    pub fn from_json_str(raw: &str) -> anyhow::Result<Self> {
        let cfg: Self = serde_json::from_str(raw).context("invalid calculator config")?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json_str(&raw)
    }
}
