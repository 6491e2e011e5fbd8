//! Transient publish payload.

use bytes::Bytes;
use chrono::{DateTime, Local};

/// Format of the `createdAt` multipart field.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything sent to the catalog for one recording.
///
/// Built once per publish attempt and dropped afterwards; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishJob {
    pub video: Bytes,
    /// JPEG-encoded cover image.
    pub cover: Bytes,
    pub title: String,
    pub tag: String,
    pub created_at: DateTime<Local>,
}

impl PublishJob {
    /// `created_at` as sent on the wire (local time, no zone).
    pub fn created_at_field(&self) -> String {
        self.created_at.format(CREATED_AT_FORMAT).to_string()
    }
}
