//! Transfer notification fan-out

use std::sync::Arc;
use tokio::sync::broadcast;

use crate::traits::TransferObserver;
use crate::types::TransferEvent;

/// Publishes transfer notifications to registered observers and channel subscribers
pub struct EventBus {
    sender: broadcast::Sender<TransferEvent>,
    observers: Vec<Arc<dyn TransferObserver>>,
}

impl EventBus {
    /// Create an event bus buffering up to `capacity` events per subscriber
    ///
    /// `capacity` must be non-zero; `LedgerConfig::validate` guarantees this.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: Arc<dyn TransferObserver>) {
        self.observers.push(observer);
    }

    /// Deliver an event to channel subscribers, then to every observer
    ///
    /// Subscribers are served first so a misbehaving observer cannot keep the
    /// event off the channel.
    pub fn publish(&self, event: &TransferEvent) {
        // No subscribers is fine
        let _ = self.sender.send(event.clone());

        for observer in &self.observers {
            observer.on_transfer(event);
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TransferEvent> {
        self.sender.subscribe()
    }
}
