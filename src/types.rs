//! Core types and data structures for the ledger

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use uuid::Uuid;

use crate::utils::validation::validate_participant_id;

/// Largest balance representable by the ledger: `2^256 - 1`
static MAX_AMOUNT: LazyLock<BigDecimal> = LazyLock::new(|| {
    let two_pow_64 = BigDecimal::from(u64::MAX) + BigDecimal::from(1u8);
    let two_pow_128 = &two_pow_64 * &two_pow_64;
    &two_pow_128 * &two_pow_128 - BigDecimal::from(1u8)
});

/// Opaque identifier of an account holder
///
/// Two identifiers are equal only when their underlying strings are identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Create an identifier without format validation
    pub fn new(id: impl Into<String>) -> Self {
        ParticipantId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ParticipantId {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_participant_id(s)?;
        Ok(ParticipantId(s.to_string()))
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        ParticipantId(s.to_string())
    }
}

impl From<String> for ParticipantId {
    fn from(s: String) -> Self {
        ParticipantId(s)
    }
}

/// Identity of whoever invokes a mutating operation
///
/// The invocation layer resolves this from its own authentication and hands it
/// to the ledger. The ledger never infers identity and trusts what it is given,
/// so there is no way to name a different sender for a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallerIdentity(ParticipantId);

impl CallerIdentity {
    /// Bind an already authenticated participant as the caller
    pub fn authenticated(participant: ParticipantId) -> Self {
        CallerIdentity(participant)
    }

    pub fn participant(&self) -> &ParticipantId {
        &self.0
    }
}

impl fmt::Display for CallerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-negative integer amount bounded by `2^256 - 1`
///
/// Values are kept at scale 0, so `1000` and `1000.0` never produce two
/// different amounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "BigDecimal", into = "BigDecimal")]
pub struct Amount(BigDecimal);

impl Amount {
    pub fn zero() -> Self {
        Amount(BigDecimal::from(0))
    }

    /// The largest amount a single balance can hold
    pub fn max_value() -> Self {
        Amount(MAX_AMOUNT.clone())
    }

    pub fn is_zero(&self) -> bool {
        self.0 == BigDecimal::from(0)
    }

    /// Add two amounts, returning `None` if the result exceeds the maximum
    pub fn checked_add(&self, other: &Amount) -> Option<Amount> {
        let sum = &self.0 + &other.0;
        if sum > *MAX_AMOUNT {
            None
        } else {
            Some(Amount(sum))
        }
    }

    /// Subtract `other`, returning `None` if the result would be negative
    pub fn checked_sub(&self, other: &Amount) -> Option<Amount> {
        if other.0 > self.0 {
            None
        } else {
            Some(Amount(&self.0 - &other.0))
        }
    }

    pub fn as_big_decimal(&self) -> &BigDecimal {
        &self.0
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount(BigDecimal::from(value))
    }
}

impl TryFrom<BigDecimal> for Amount {
    type Error = LedgerError;

    fn try_from(value: BigDecimal) -> Result<Self, Self::Error> {
        if value < BigDecimal::from(0) {
            return Err(LedgerError::InvalidAmount(format!(
                "{} is negative",
                value
            )));
        }

        if !value.is_integer() {
            return Err(LedgerError::InvalidAmount(format!(
                "{} is not a whole number",
                value
            )));
        }

        if value > *MAX_AMOUNT {
            return Err(LedgerError::InvalidAmount(format!(
                "{} exceeds the maximum balance",
                value
            )));
        }

        Ok(Amount(value.with_scale(0)))
    }
}

impl From<Amount> for BigDecimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl FromStr for Amount {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = BigDecimal::from_str(s.trim())
            .map_err(|e| LedgerError::InvalidAmount(format!("'{}': {}", s, e)))?;
        Amount::try_from(value)
    }
}

/// Notification emitted once for every successful transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferEvent {
    /// Unique identifier of this notification
    pub id: Uuid,
    /// Participant whose balance was debited
    pub from: ParticipantId,
    /// Participant whose balance was credited
    pub to: ParticipantId,
    /// Amount moved
    pub amount: Amount,
    /// When the transfer was applied
    pub occurred_at: DateTime<Utc>,
}

impl TransferEvent {
    pub fn new(from: ParticipantId, to: ParticipantId, amount: Amount) -> Self {
        Self {
            id: Uuid::new_v4(),
            from,
            to,
            amount,
            occurred_at: Utc::now(),
        }
    }
}

/// Balances of both sides right after a transfer was applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOutcome {
    pub sender_balance: Amount,
    pub recipient_balance: Amount,
}

/// Point-in-time copy of every materialized balance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub balances: BTreeMap<ParticipantId, Amount>,
}

impl LedgerSnapshot {
    /// Sum of every balance in the snapshot
    pub fn total(&self) -> BigDecimal {
        self.balances.values().map(|a| a.as_big_decimal()).sum()
    }
}

/// Errors that can occur in the ledger
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Insufficient balance")]
    InsufficientBalance {
        participant: ParticipantId,
        available: Amount,
        requested: Amount,
    },
    #[error("Arithmetic overflow: crediting {amount} to {participant} (balance {balance}) exceeds the maximum balance")]
    ArithmeticOverflow {
        participant: ParticipantId,
        balance: Amount,
        amount: Amount,
    },
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
