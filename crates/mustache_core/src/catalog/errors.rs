//! Catalog client errors.

use thiserror::Error;

/// Longest body excerpt kept in error messages.
const EXCERPT_CHARS: usize = 200;

/// Malformed catalog response, with enough context to diagnose it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} (line {line}, column {column}); body starts with: {excerpt}")]
pub struct DecodeError {
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub excerpt: String,
}

impl DecodeError {
    pub(crate) fn from_json(err: &serde_json::Error, body: &str) -> Self {
        Self {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
            excerpt: excerpt(body),
        }
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}: {body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Failed to decode catalog response: {0}")]
    Decode(#[from] DecodeError),

    #[error("Failed to build multipart form: {0}")]
    Multipart(#[source] reqwest::Error),
}

impl CatalogError {
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            source,
        }
    }

    pub fn status(status: reqwest::StatusCode, url: impl Into<String>, body: &str) -> Self {
        Self::Status {
            status: status.as_u16(),
            url: url.into(),
            body: excerpt(body),
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

pub(crate) fn excerpt(body: &str) -> String {
    let mut out: String = body.chars().take(EXCERPT_CHARS).collect();
    if body.chars().count() > EXCERPT_CHARS {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_truncates_long_bodies() {
        let body = "x".repeat(500);
        let short = excerpt(&body);
        assert_eq!(short.chars().count(), EXCERPT_CHARS + 1);
        assert!(short.ends_with('…'));
        assert_eq!(excerpt("short"), "short");
    }

    #[test]
    fn status_error_message_includes_code() {
        let err = CatalogError::status(
            reqwest::StatusCode::NOT_FOUND,
            "http://host/video/9",
            "missing",
        );
        assert_eq!(
            err.to_string(),
            "HTTP 404 from http://host/video/9: missing"
        );
    }
}
