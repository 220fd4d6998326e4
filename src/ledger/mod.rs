//! Ledger module containing the balance operations and transfer notifications

pub mod core;
pub mod events;

pub use core::*;
pub use events::*;
