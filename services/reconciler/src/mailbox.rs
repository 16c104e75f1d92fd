//! Single-slot hand-off with drop-on-full delivery
//!
//! The sender never waits. If the slot still holds a value the consumer has
//! not taken, the new value is handed back as dropped; nothing is queued
//! behind it and nothing is merged into it.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::{TryRecvError, TrySendError};

/// Outcome of a non-blocking delivery attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The slot was empty and now holds the value
    Delivered,
    /// The slot was occupied; the value was discarded
    Dropped,
    /// The receiver is gone
    Closed,
}

/// Create a single-slot mailbox
pub fn mailbox<T>() -> (MailboxSender<T>, MailboxReceiver<T>) {
    let (tx, rx) = mpsc::channel(1);
    (MailboxSender { tx }, MailboxReceiver { rx })
}

/// Producing half. Not `Clone`: the slot closes when this is dropped.
#[derive(Debug)]
pub struct MailboxSender<T> {
    tx: mpsc::Sender<T>,
}

impl<T> MailboxSender<T> {
    pub fn try_deliver(&self, value: T) -> Delivery {
        match self.tx.try_send(value) {
            Ok(()) => Delivery::Delivered,
            Err(TrySendError::Full(_)) => Delivery::Dropped,
            Err(TrySendError::Closed(_)) => Delivery::Closed,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consuming half
#[derive(Debug)]
pub struct MailboxReceiver<T> {
    rx: mpsc::Receiver<T>,
}

impl<T> MailboxReceiver<T> {
    /// Wait for the next value; `None` once the sender is gone and the slot is empty
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Result<T, TryRecvError> {
        self.rx.try_recv()
    }
}
