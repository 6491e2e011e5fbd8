//! Typed fire-and-forget publish/subscribe channel for style indices.

use std::sync::Arc;

use parking_lot::RwLock;

/// Subscriber callback. Receives the published style index.
pub type SelectionHandler = Arc<dyn Fn(usize) + Send + Sync>;

/// Single-channel bus carrying the currently chosen style index.
///
/// `publish` never fails and never validates: range checks belong to the
/// receivers.
#[derive(Default)]
pub struct SelectionBus {
    handlers: RwLock<Vec<SelectionHandler>>,
}

impl SelectionBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for the lifetime of the bus.
    pub fn subscribe<F>(&self, handler: F)
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.handlers.write().push(Arc::new(handler));
    }

    /// Notify every registered handler, in registration order.
    ///
    /// Handlers run on the caller's thread before this returns. The handler
    /// list is snapshotted first, so a handler registered while a publish is
    /// running does not receive that publish.
    pub fn publish(&self, index: usize) {
        let snapshot: Vec<SelectionHandler> = self.handlers.read().clone();
        tracing::debug!(
            index,
            subscribers = snapshot.len(),
            "Style selection published"
        );
        for handler in snapshot {
            handler(index);
        }
    }

    /// Number of registered handlers.
    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }
}

impl std::fmt::Debug for SelectionBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
