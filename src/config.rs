use crate::domain::money::Currency;
use crate::error::{CheckoutError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_PAYMENT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub payment: PaymentSettings,
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaymentSettings {
    /// Upper bound for a single gateway call, in milliseconds.
    pub timeout_ms: u64,
    pub currency: Currency,
}

impl Default for PaymentSettings {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_PAYMENT_TIMEOUT_MS,
            currency: Currency::default(),
        }
    }
}

impl PaymentSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageSettings {
    /// CSV file used to seed the in-memory user store.
    pub users_csv: Option<PathBuf>,
    /// RocksDB directory, used when built with `storage-rocksdb`.
    pub db_path: Option<PathBuf>,
}

impl Settings {
    /// Loads settings from `path`, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CheckoutError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.payment.timeout_ms == 0 {
            return Err(CheckoutError::Config(
                "payment.timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
