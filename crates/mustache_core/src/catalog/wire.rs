//! Catalog wire format.
//!
//! ```json
//! {
//!   "code": 0,
//!   "msg": "ok",
//!   "data": [{
//!     "id": 1,
//!     "createdAt": "2024-11-14 10:00:00",
//!     "updatedAt": "2024-11-14T10:00:00.123Z",
//!     "title": "Mustache_1",
//!     "coverPath": "...",
//!     "videoPath": "...",
//!     "tag": "Mustache_1",
//!     "videoDuration": "12.5",
//!     "videoSize": 123456
//!   }]
//! }
//! ```
//!
//! `videoDuration` arrives as either a string or a number; anything
//! unparsable decodes as `0.0`.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{de, Deserialize, Deserializer};

use super::errors::DecodeError;
use crate::models::{CatalogEntry, CREATED_AT_FORMAT};

/// Response envelope shared by catalog endpoints.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i64,
    pub msg: String,
    pub data: T,
}

/// One video record as sent by the server.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub id: i64,
    #[serde(deserialize_with = "created_at")]
    pub created_at: NaiveDateTime,
    #[serde(deserialize_with = "updated_at")]
    pub updated_at: DateTime<FixedOffset>,
    pub title: String,
    pub cover_path: String,
    pub video_path: String,
    pub tag: String,
    #[serde(default, deserialize_with = "lenient_duration")]
    pub video_duration: f64,
    pub video_size: i64,
}

impl From<VideoRecord> for CatalogEntry {
    fn from(record: VideoRecord) -> Self {
        Self {
            id: record.id,
            created_at: record.created_at,
            updated_at: record.updated_at,
            title: record.title,
            cover_path: record.cover_path,
            video_path: record.video_path,
            tag: record.tag,
            video_duration_seconds: record.video_duration,
            video_size_bytes: record.video_size,
        }
    }
}

/// Decode a list response body into catalog entries, preserving order.
pub fn decode_video_list(body: &str) -> Result<Vec<CatalogEntry>, DecodeError> {
    let response: ApiResponse<Vec<VideoRecord>> =
        serde_json::from_str(body).map_err(|e| DecodeError::from_json(&e, body))?;

    if response.code != 0 {
        tracing::debug!(
            code = response.code,
            msg = %response.msg,
            "Catalog list returned non-zero code"
        );
    }

    Ok(response.data.into_iter().map(CatalogEntry::from).collect())
}

fn created_at<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, CREATED_AT_FORMAT)
        .map_err(|_| de::Error::custom(format!("cannot decode createdAt: {raw}")))
}

fn updated_at<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
        .map_err(|_| de::Error::custom(format!("cannot decode updatedAt: {raw}")))
}

fn lenient_duration<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let seconds = match &value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.parse::<f64>().ok(),
        _ => None,
    };
    Ok(seconds.unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(duration: &str) -> String {
        format!(
            r#"{{"code":0,"msg":"ok","data":[{{
                "id":7,
                "createdAt":"2024-11-14 10:00:00",
                "updatedAt":"2024-11-14T10:00:00.123Z",
                "title":"Mustache_3",
                "coverPath":"covers/7.jpg",
                "videoPath":"videos/7.mp4",
                "tag":"Mustache_3",
                "videoDuration":{duration},
                "videoSize":2048
            }}]}}"#
        )
    }

    #[test]
    fn decodes_string_duration() {
        let entries = decode_video_list(&body("\"12.5\"")).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, 7);
        assert_eq!(entries[0].video_duration_seconds, 12.5);
        assert_eq!(entries[0].video_size_bytes, 2048);
        assert_eq!(
            entries[0].created_at.format(CREATED_AT_FORMAT).to_string(),
            "2024-11-14 10:00:00"
        );
    }

    #[test]
    fn decodes_numeric_duration() {
        let entries = decode_video_list(&body("30")).unwrap();
        assert_eq!(entries[0].video_duration_seconds, 30.0);
    }

    #[test]
    fn unparsable_duration_is_zero() {
        let entries = decode_video_list(&body("\"abc\"")).unwrap();
        assert_eq!(entries[0].video_duration_seconds, 0.0);

        let entries = decode_video_list(&body("null")).unwrap();
        assert_eq!(entries[0].video_duration_seconds, 0.0);
    }

    #[test]
    fn padded_duration_string_is_zero() {
        for padded in ["\" 12.5\"", "\"12.5 \""] {
            let entries = decode_video_list(&body(padded)).unwrap();
            assert_eq!(entries[0].video_duration_seconds, 0.0, "{padded}");
        }
    }

    #[test]
    fn preserves_server_order() {
        let body = r#"{"code":0,"msg":"ok","data":[
            {"id":3,"createdAt":"2024-01-01 00:00:00","updatedAt":"2024-01-01T00:00:00.000Z","title":"a","coverPath":"","videoPath":"","tag":"a","videoDuration":1,"videoSize":1},
            {"id":1,"createdAt":"2024-01-02 00:00:00","updatedAt":"2024-01-02T00:00:00.000Z","title":"b","coverPath":"","videoPath":"","tag":"b","videoDuration":2,"videoSize":2}
        ]}"#;
        let ids: Vec<i64> = decode_video_list(body)
            .unwrap()
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn bad_created_at_is_a_decode_error_with_context() {
        let body = body("1").replace("2024-11-14 10:00:00", "14/11/2024");
        let err = decode_video_list(&body).unwrap_err();

        assert!(err.message.contains("createdAt"), "{}", err.message);
        assert!(err.line > 0);
        assert!(err.excerpt.starts_with("{\"code\":0"));
    }

    #[test]
    fn missing_field_is_a_decode_error() {
        let err = decode_video_list(r#"{"code":0,"msg":"ok","data":[{"id":1}]}"#).unwrap_err();
        assert!(err.message.contains("missing field"), "{}", err.message);
    }
}
