//! In-memory storage implementation

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::traits::*;
use crate::types::*;

/// In-memory balance store guarded by a single lock
///
/// Clones share the same underlying map. Every write path computes all new
/// balances before inserting any of them, so a poisoned lock never hides a
/// half-applied mutation and is simply recovered.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    balances: Arc<RwLock<HashMap<ParticipantId, Amount>>>,
}

impl MemoryStorage {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            balances: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seed a store from a previously taken snapshot
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Self {
        Self {
            balances: Arc::new(RwLock::new(snapshot.balances.into_iter().collect())),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<ParticipantId, Amount>> {
        self.balances.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<ParticipantId, Amount>> {
        self.balances.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerStorage for MemoryStorage {
    async fn balance(&self, participant: &ParticipantId) -> LedgerResult<Amount> {
        Ok(self.read().get(participant).cloned().unwrap_or_default())
    }

    async fn credit(&self, participant: &ParticipantId, amount: &Amount) -> LedgerResult<Amount> {
        let mut balances = self.write();
        let current = balances.get(participant).cloned().unwrap_or_default();

        let updated =
            current
                .checked_add(amount)
                .ok_or_else(|| LedgerError::ArithmeticOverflow {
                    participant: participant.clone(),
                    balance: current.clone(),
                    amount: amount.clone(),
                })?;

        balances.insert(participant.clone(), updated.clone());
        Ok(updated)
    }

    async fn transfer(
        &self,
        from: &ParticipantId,
        to: &ParticipantId,
        amount: &Amount,
    ) -> LedgerResult<TransferOutcome> {
        let mut balances = self.write();
        let sender_current = balances.get(from).cloned().unwrap_or_default();

        let sender_balance =
            sender_current
                .checked_sub(amount)
                .ok_or_else(|| LedgerError::InsufficientBalance {
                    participant: from.clone(),
                    available: sender_current.clone(),
                    requested: amount.clone(),
                })?;

        if from == to {
            // Debit and credit cancel out
            return Ok(TransferOutcome {
                sender_balance: sender_current.clone(),
                recipient_balance: sender_current,
            });
        }

        let recipient_current = balances.get(to).cloned().unwrap_or_default();

        if amount.is_zero() {
            // Nothing moves, so no entry is materialized
            return Ok(TransferOutcome {
                sender_balance: sender_current,
                recipient_balance: recipient_current,
            });
        }

        let recipient_balance = recipient_current.checked_add(amount).ok_or_else(|| {
            LedgerError::ArithmeticOverflow {
                participant: to.clone(),
                balance: recipient_current.clone(),
                amount: amount.clone(),
            }
        })?;

        balances.insert(from.clone(), sender_balance.clone());
        balances.insert(to.clone(), recipient_balance.clone());

        Ok(TransferOutcome {
            sender_balance,
            recipient_balance,
        })
    }

    async fn total_balance(&self) -> LedgerResult<BigDecimal> {
        Ok(self.read().values().map(|a| a.as_big_decimal()).sum())
    }

    async fn list_participants(&self) -> LedgerResult<Vec<ParticipantId>> {
        let mut participants: Vec<ParticipantId> = self.read().keys().cloned().collect();
        participants.sort();
        Ok(participants)
    }

    async fn snapshot(&self) -> LedgerResult<LedgerSnapshot> {
        Ok(LedgerSnapshot {
            balances: self
                .read()
                .iter()
                .map(|(id, amount)| (id.clone(), amount.clone()))
                .collect(),
        })
    }
}
