//! Validation utilities

use crate::config::LedgerConfig;
use crate::types::*;

/// Longest accepted participant identifier
pub const MAX_PARTICIPANT_ID_LEN: usize = 64;

/// Validate the textual form of a participant identifier
pub fn validate_participant_id(id: &str) -> LedgerResult<()> {
    if id.trim().is_empty() {
        return Err(LedgerError::Validation(
            "Participant ID cannot be empty".to_string(),
        ));
    }

    if id.len() > MAX_PARTICIPANT_ID_LEN {
        return Err(LedgerError::Validation(format!(
            "Participant ID cannot exceed {} characters",
            MAX_PARTICIPANT_ID_LEN
        )));
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
    {
        return Err(LedgerError::Validation(
            "Participant ID can only contain ASCII alphanumerics, dashes, underscores, colons and dots"
                .to_string(),
        ));
    }

    Ok(())
}

/// Validate a transfer amount against the configured zero-amount policy
pub fn validate_transfer_amount(amount: &Amount, config: &LedgerConfig) -> LedgerResult<()> {
    if amount.is_zero() && !config.allow_zero_amount_transfers {
        return Err(LedgerError::Validation(
            "Transfer amount must be positive".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_id_rules() {
        assert!(validate_participant_id("alice").is_ok());
        assert!(validate_participant_id("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266").is_ok());
        assert!(validate_participant_id("user:42.main_wallet-1").is_ok());

        assert!(validate_participant_id("   ").is_err());
        assert!(validate_participant_id("alice/bob").is_err());
        assert!(validate_participant_id(&"a".repeat(MAX_PARTICIPANT_ID_LEN + 1)).is_err());
        assert!(validate_participant_id(&"a".repeat(MAX_PARTICIPANT_ID_LEN)).is_ok());
    }

    #[test]
    fn test_zero_amount_policy() {
        let permissive = LedgerConfig::default();
        let strict = LedgerConfig {
            allow_zero_amount_transfers: false,
            ..LedgerConfig::default()
        };

        assert!(validate_transfer_amount(&Amount::zero(), &permissive).is_ok());
        assert!(validate_transfer_amount(&Amount::zero(), &strict).is_err());
        assert!(validate_transfer_amount(&Amount::from(1), &strict).is_ok());
    }
}
