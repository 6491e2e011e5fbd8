//! Style selection notification.
//!
//! The style picker publishes the chosen style index on a [`SelectionBus`];
//! the overlay side and the publish pipeline each observe it.
//!
//! # Architecture
//!
//! ```text
//!   style picker ── publish(i) ──► SelectionBus
//!                                     │ (registration order, synchronous)
//!                   ┌─────────────────┴─────────────────┐
//!                   ▼                                   ▼
//!          CurrentSelection                     SessionHandle
//!       (read at publish time)          (re-enters main context →
//!                                         OverlayAttachmentManager)
//! ```
//!
//! Delivery is at-most-once with no replay: a subscriber registered after a
//! publish never sees that event.

mod bus;
mod current;

pub use bus::{SelectionBus, SelectionHandler};
pub use current::CurrentSelection;
