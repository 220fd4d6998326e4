//! # Bank Ledger
//!
//! A minimal value ledger: every participant holds a non-negative balance,
//! can deposit into it and can transfer part of it to another participant.
//! Each successful transfer publishes exactly one notification.
//!
//! ## Guarantees
//!
//! - **Non-negativity**: balances are unsigned integers bounded by `2^256 - 1`
//! - **Conservation**: a transfer debits and credits exactly the same amount
//! - **Atomicity**: the balance check, debit and credit run as one critical section
//!
//! Transport, authentication and persistence live outside this crate. The
//! invocation layer resolves who is calling and passes a [`CallerIdentity`].
//!
//! ## Quick Start
//!
//! ```rust
//! use bank_ledger::utils::MemoryStorage;
//! use bank_ledger::{Amount, CallerIdentity, Ledger, ParticipantId};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), bank_ledger::LedgerError> {
//! let ledger = Ledger::new(MemoryStorage::new());
//! let alice = CallerIdentity::authenticated(ParticipantId::new("alice"));
//! let bob = ParticipantId::new("bob");
//!
//! ledger.deposit(&alice, Amount::from(1000)).await?;
//! let event = ledger.transfer(&alice, &bob, Amount::from(500)).await?;
//!
//! assert_eq!(event.amount, Amount::from(500));
//! assert_eq!(ledger.balance_of(&bob).await?, Amount::from(500));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod ledger;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::*;
pub use ledger::*;
pub use traits::*;
pub use types::*;
