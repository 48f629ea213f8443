//! Observable application state with a single-writer contract.
//!
//! `StateCell` replaces ad hoc global mutables: one holder owns the value,
//! every write goes through `set`/`update` on that holder, and readers
//! either take a snapshot (`get`) or subscribe to change notifications.
//! Built on `tokio::sync::watch`, so subscribers only ever observe the
//! latest value, never an intermediate one.

use tokio::sync::watch;

/// A single-writer state holder with subscriber notification.
///
/// Cloning the cell clones the writer handle; by convention exactly one
/// component performs writes (for the retention policy, the maintenance
/// endpoint) while everything else reads or subscribes.
#[derive(Debug, Clone)]
pub struct StateCell<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> StateCell<T> {
    /// Creates a cell holding `initial`.
    #[must_use]
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Returns a snapshot of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Replaces the value and notifies all subscribers, returning the
    /// previous value.
    pub fn set(&self, value: T) -> T {
        self.tx.send_replace(value)
    }

    /// Mutates the value in place and notifies all subscribers.
    pub fn update(&self, mutate: impl FnOnce(&mut T)) {
        self.tx.send_modify(mutate);
    }

    /// Returns a receiver that resolves whenever the value changes.
    /// The receiver starts out already holding the current value.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}
