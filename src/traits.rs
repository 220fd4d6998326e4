//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use bigdecimal::BigDecimal;

use crate::types::*;

/// Storage abstraction for the ledger
///
/// Implementations own the atomicity guarantees: `credit` and `transfer` must
/// each run as a single critical section, computing every new balance before
/// writing any of them. A failed call must leave no partial mutation visible to
/// other callers.
#[async_trait]
pub trait LedgerStorage: Send + Sync {
    /// Current balance of a participant, zero if no entry exists
    async fn balance(&self, participant: &ParticipantId) -> LedgerResult<Amount>;

    /// Add `amount` to a participant's balance and return the new balance
    async fn credit(&self, participant: &ParticipantId, amount: &Amount) -> LedgerResult<Amount>;

    /// Move `amount` from `from` to `to` if `from` holds at least `amount`
    async fn transfer(
        &self,
        from: &ParticipantId,
        to: &ParticipantId,
        amount: &Amount,
    ) -> LedgerResult<TransferOutcome>;

    /// Sum of all balances
    async fn total_balance(&self) -> LedgerResult<BigDecimal>;

    /// Every participant with a materialized entry, in ascending order
    async fn list_participants(&self) -> LedgerResult<Vec<ParticipantId>>;

    /// Copy of all materialized balances
    async fn snapshot(&self) -> LedgerResult<LedgerSnapshot>;
}

/// Synchronous hook called for every successful transfer
///
/// Observers run on the caller's task before the transfer returns, after the
/// storage lock has been released and after channel subscribers were served.
/// Implementations must not panic: the transfer is already applied when they
/// run, and a panic would unwind into the caller instead of returning the
/// committed event.
pub trait TransferObserver: Send + Sync {
    fn on_transfer(&self, event: &TransferEvent);
}
