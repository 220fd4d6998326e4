//! Main ledger that enforces balance invariants and emits transfer notifications

use bigdecimal::BigDecimal;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::config::LedgerConfig;
use crate::ledger::EventBus;
use crate::traits::*;
use crate::types::*;
use crate::utils::validation::validate_transfer_amount;

/// Value ledger over an injected storage backend
///
/// All operations take `&self`; share a ledger between tasks with `Arc`.
pub struct Ledger<S: LedgerStorage> {
    storage: S,
    config: LedgerConfig,
    events: EventBus,
}

impl<S: LedgerStorage> Ledger<S> {
    /// Create a new ledger with the default configuration
    pub fn new(storage: S) -> Self {
        let config = LedgerConfig::default();
        Self {
            events: EventBus::new(config.event_channel_capacity),
            storage,
            config,
        }
    }

    /// Create a new ledger with a custom configuration
    pub fn with_config(storage: S, config: LedgerConfig) -> LedgerResult<Self> {
        config.validate()?;
        Ok(Self {
            events: EventBus::new(config.event_channel_capacity),
            storage,
            config,
        })
    }

    /// Register an observer called synchronously for every successful transfer
    pub fn with_observer(mut self, observer: Arc<dyn TransferObserver>) -> Self {
        self.events.add_observer(observer);
        self
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Add `amount` to the caller's balance and return the new balance
    pub async fn deposit(&self, caller: &CallerIdentity, amount: Amount) -> LedgerResult<Amount> {
        let participant = caller.participant();

        match self.storage.credit(participant, &amount).await {
            Ok(balance) => {
                tracing::debug!(%participant, %amount, %balance, "deposit applied");
                Ok(balance)
            }
            Err(err) => {
                tracing::warn!(%participant, %amount, error = %err, "deposit rejected");
                Err(err)
            }
        }
    }

    /// Balance of any participant, zero if they never received funds
    pub async fn balance_of(&self, who: &ParticipantId) -> LedgerResult<Amount> {
        self.storage.balance(who).await
    }

    /// Balance of the caller
    pub async fn balance(&self, caller: &CallerIdentity) -> LedgerResult<Amount> {
        self.balance_of(caller.participant()).await
    }

    /// Move `amount` from the caller to `recipient`
    ///
    /// On success exactly one [`TransferEvent`] is published before this
    /// returns, and the same event is handed back. On failure neither balance
    /// changes and nothing is published.
    pub async fn transfer(
        &self,
        caller: &CallerIdentity,
        recipient: &ParticipantId,
        amount: Amount,
    ) -> LedgerResult<TransferEvent> {
        let sender = caller.participant();
        validate_transfer_amount(&amount, &self.config)?;

        let outcome = match self.storage.transfer(sender, recipient, &amount).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(
                    from = %sender,
                    to = %recipient,
                    %amount,
                    error = %err,
                    "transfer rejected"
                );
                return Err(err);
            }
        };

        tracing::info!(
            from = %sender,
            to = %recipient,
            %amount,
            sender_balance = %outcome.sender_balance,
            recipient_balance = %outcome.recipient_balance,
            "transfer applied"
        );

        let event = TransferEvent::new(sender.clone(), recipient.clone(), amount);
        self.events.publish(&event);
        Ok(event)
    }

    /// Subscribe to transfer notifications published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<TransferEvent> {
        self.events.subscribe()
    }

    /// Sum of every balance held in the ledger
    pub async fn total_supply(&self) -> LedgerResult<BigDecimal> {
        self.storage.total_balance().await
    }

    /// All participants with a materialized balance, sorted
    pub async fn participants(&self) -> LedgerResult<Vec<ParticipantId>> {
        self.storage.list_participants().await
    }

    /// Copy of every materialized balance
    pub async fn snapshot(&self) -> LedgerResult<LedgerSnapshot> {
        self.storage.snapshot().await
    }
}
