//! Logging infrastructure for Virtual Mustache.
//!
//! This module provides:
//! - Global `tracing` subscriber setup honouring `RUST_LOG`
//! - Per-publish loggers with optional file + observer output
//! - Tail buffer for failure diagnosis
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use mustache_core::logging::{LogConfig, PublishLogger};
//!
//! let logger = PublishLogger::new(
//!     "publish_20240101_120000",
//!     Some(Path::new("/path/to/logs")),
//!     LogConfig::default(),
//!     None,
//! ).unwrap();
//!
//! logger.stage("Permission");
//! logger.info("Authorized");
//! logger.success("Upload accepted");
//! ```

mod publish_logger;
mod types;

pub use publish_logger::PublishLogger;
pub use types::{LogConfig, LogLevel, LogObserver, MessagePrefix};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `default_level`. Output goes to stderr
/// with timestamps. Call once at startup.
pub fn init_tracing(default_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_str(default_level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();
}

/// Initialize tracing for tests (warnings and above).
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

fn level_to_filter_str(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    }
}
