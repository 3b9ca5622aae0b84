// SPDX-License-Identifier: AGPL-3.0
// Photo Share Core - State change notifications
//
// Each view model owns a notifier and bumps it after every mutation.
// Subscribers receive the latest revision number; redraw requests coalesce
// when a subscriber falls behind.

use async_channel::{Receiver, Sender, TrySendError};

#[derive(Debug, Default)]
pub struct StateNotifier {
    revision: u64,
    subscribers: Vec<Sender<u64>>,
}

impl StateNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register for change notifications
    pub fn subscribe(&mut self) -> Receiver<u64> {
        let (tx, rx) = async_channel::bounded(1);
        self.subscribers.push(tx);
        rx
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Signal that state changed. Dropped subscribers are pruned.
    pub fn notify(&mut self) {
        self.revision += 1;
        let revision = self.revision;
        self.subscribers.retain(|tx| match tx.try_send(revision) {
            Ok(()) | Err(TrySendError::Full(_)) => true,
            Err(TrySendError::Closed(_)) => false,
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notifications_coalesce() {
        let mut notifier = StateNotifier::new();
        let rx = notifier.subscribe();

        notifier.notify();
        notifier.notify();
        notifier.notify();

        assert_eq!(rx.try_recv().unwrap(), 1);
        assert!(rx.try_recv().is_err());
        assert_eq!(notifier.revision(), 3);
    }

    #[test]
    fn test_closed_subscribers_are_pruned() {
        let mut notifier = StateNotifier::new();
        let rx = notifier.subscribe();
        let _kept = notifier.subscribe();
        drop(rx);

        notifier.notify();
        assert_eq!(notifier.subscriber_count(), 1);
    }
}
