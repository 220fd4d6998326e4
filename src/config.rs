//! Ledger configuration

use serde::{Deserialize, Serialize};

use crate::types::{LedgerError, LedgerResult};

/// Tunable ledger behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Whether a transfer of zero is accepted (and notified) or rejected
    pub allow_zero_amount_transfers: bool,

    /// Buffer size of the transfer notification channel
    pub event_channel_capacity: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            allow_zero_amount_transfers: true,
            event_channel_capacity: 1024,
        }
    }
}

impl LedgerConfig {
    /// Parse a configuration from JSON, filling missing fields with defaults
    pub fn from_json_str(json: &str) -> LedgerResult<Self> {
        let config: LedgerConfig =
            serde_json::from_str(json).map_err(|e| LedgerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> LedgerResult<()> {
        if self.event_channel_capacity == 0 {
            return Err(LedgerError::Config(
                "event_channel_capacity must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
