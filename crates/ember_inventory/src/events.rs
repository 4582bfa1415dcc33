//! Batch notification channels for containers
//!
//! Containers report mutations through explicit observer lists rather than a
//! queued event bus: delivery is synchronous and in subscription order, and
//! every notification carries the full batch of items affected by the
//! triggering call.

use core::fmt;

/// Handler invoked with the batch of items affected by one container call
pub type BatchHandler<T> = Box<dyn FnMut(&[T])>;

/// Subscriber ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub u64);

/// An ordered list of batch handlers for a single notification channel
pub struct ObserverList<T> {
    /// Registered handlers, in subscription order
    handlers: Vec<(SubscriberId, BatchHandler<T>)>,
    /// Next subscriber ID
    next_id: u64,
}

impl<T> ObserverList<T> {
    /// Create an empty observer list
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 1,
        }
    }

    /// Register a handler; returns an ID usable with [`unsubscribe`](Self::unsubscribe)
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriberId
    where
        F: FnMut(&[T]) + 'static,
    {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove a previously registered handler
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(sub_id, _)| *sub_id != id);
        self.handlers.len() != before
    }

    /// Deliver a batch to every handler, in subscription order
    pub fn emit(&mut self, batch: &[T]) {
        for (_, handler) in &mut self.handlers {
            handler(batch);
        }
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if no handlers are registered
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<T> Default for ObserverList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ObserverList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverList")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
