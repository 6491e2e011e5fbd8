//! Published catalog entries.

use chrono::{DateTime, FixedOffset, NaiveDateTime};

/// A server-owned record describing one published video.
///
/// Fetched from the catalog and never mutated locally; the only local
/// operation on an entry is deleting it.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub id: i64,
    /// Creation time as reported by the server (no zone information).
    pub created_at: NaiveDateTime,
    pub updated_at: DateTime<FixedOffset>,
    pub title: String,
    pub cover_path: String,
    pub video_path: String,
    pub tag: String,
    pub video_duration_seconds: f64,
    pub video_size_bytes: i64,
}

impl CatalogEntry {
    /// Duration formatted as `m:ss` for list rows.
    pub fn duration_label(&self) -> String {
        let total = self.video_duration_seconds.max(0.0).round() as u64;
        format!("{}:{:02}", total / 60, total % 60)
    }
}
