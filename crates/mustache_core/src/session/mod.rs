//! Main-context event loop.
//!
//! Platform callbacks (face anchors, style picker, record button) and
//! background completions (recorder calls, publish runs) all arrive as
//! [`SessionEvent`]s on one channel. The [`Session`] owns every piece of
//! mutable state and handles events one at a time, so the overlay manager
//! and capture controller never need locks.
//!
//! ```text
//!  SelectionBus ──┐
//!  face tracker ──┼── SessionHandle ──► mpsc ──► Session::run
//!  record button ─┘                       ▲         │
//!                                         │         ├─► OverlayAttachmentManager
//!        recorder task / publish task ────┘         ├─► CaptureController
//!                                                   └─► PublishPipeline (spawned)
//! ```

mod builder;
mod events;
mod prompt;
mod runtime;

pub use builder::Platform;
pub use events::{SessionEvent, SessionHandle};
pub use prompt::{Prompter, RemediationPrompt};
pub use runtime::Session;
