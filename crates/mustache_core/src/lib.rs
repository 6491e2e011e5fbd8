//! Mustache Core - backend logic for Virtual Mustache
//!
//! This crate contains the overlay attachment state machine, the capture
//! state machine and the capture-to-publish pipeline, with zero UI
//! dependencies. Platform pieces (face tracking, screen recorder, media
//! library, alerts) plug in through traits.

pub mod assets;
pub mod capture;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod media;
pub mod models;
pub mod overlay;
pub mod publish;
pub mod selection;
pub mod session;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
