//! Last-selected style tracker.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::bus::SelectionBus;

/// Shared view of the most recent valid style selection.
///
/// Starts at style 0. Out-of-range indices are ignored, so the value is
/// always a valid index into a catalog of `style_count` entries.
#[derive(Debug, Clone)]
pub struct CurrentSelection {
    index: Arc<AtomicUsize>,
    style_count: usize,
}

impl CurrentSelection {
    pub fn new(style_count: usize) -> Self {
        Self {
            index: Arc::new(AtomicUsize::new(0)),
            style_count,
        }
    }

    /// Create a tracker and subscribe it to `bus`.
    pub fn attach(bus: &SelectionBus, style_count: usize) -> Self {
        let current = Self::new(style_count);
        let tracker = current.clone();
        bus.subscribe(move |index| {
            tracker.record(index);
        });
        current
    }

    /// Record a selection. Returns false if `index` was out of range.
    pub fn record(&self, index: usize) -> bool {
        if index >= self.style_count {
            tracing::warn!(
                index,
                style_count = self.style_count,
                "Ignoring out-of-range style selection"
            );
            return false;
        }
        self.index.store(index, Ordering::SeqCst);
        true
    }

    /// The currently selected style index.
    pub fn get(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_style() {
        assert_eq!(CurrentSelection::new(5).get(), 0);
    }

    #[test]
    fn follows_bus_last_write_wins() {
        let bus = SelectionBus::new();
        let current = CurrentSelection::attach(&bus, 5);

        bus.publish(2);
        bus.publish(4);
        bus.publish(1);

        assert_eq!(current.get(), 1);
    }

    #[test]
    fn ignores_out_of_range() {
        let bus = SelectionBus::new();
        let current = CurrentSelection::attach(&bus, 5);

        bus.publish(3);
        bus.publish(5);

        assert_eq!(current.get(), 3);
        assert!(!current.record(99));
    }
}
