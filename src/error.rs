//! Error types shared by every part of the crate.
//!
//! All failures surface through [`NewsError`]. Errors are returned to the
//! caller at the point of first access and are never retried or logged by
//! the library itself.

use std::fmt;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NewsError>;

/// Errors raised while configuring, fetching or extracting articles.
#[derive(Debug, Error)]
pub enum NewsError {
    /// Ambiguous or missing constructor arguments, or invalid request parameters.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Network failure, non-success status, or an undecodable listing body.
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// Malformed date, missing required key, or missing required document region.
    #[error("failed to parse {field}: {reason}")]
    Parse { field: String, reason: String },

    /// `latest_article()` was called on a listing with no entries.
    #[error("collection is empty: the listing returned no articles")]
    EmptyCollection,
}

impl NewsError {
    /// Creates a Configuration error with a custom message.
    pub fn configuration(msg: impl Into<String>) -> Self {
        NewsError::Configuration(msg.into())
    }

    /// Creates a Fetch error for `url` from any displayable cause.
    pub fn fetch(url: impl Into<String>, reason: impl fmt::Display) -> Self {
        NewsError::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a Parse error for `field` from any displayable cause.
    pub fn parse(field: impl Into<String>, reason: impl fmt::Display) -> Self {
        NewsError::Parse {
            field: field.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, NewsError::Configuration(_))
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self, NewsError::Fetch { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, NewsError::Parse { .. })
    }

    pub fn is_empty_collection(&self) -> bool {
        matches!(self, NewsError::EmptyCollection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let err = NewsError::fetch("https://www.gov.il/x", "HTTP status 503");
        assert_eq!(
            err.to_string(),
            "failed to fetch https://www.gov.il/x: HTTP status 503"
        );
        assert!(err.is_fetch());
        assert!(!err.is_parse());
    }

    #[test]
    fn test_parse_error_display() {
        let err = NewsError::parse("PublishDate", "input is out of range");
        assert_eq!(
            err.to_string(),
            "failed to parse PublishDate: input is out of range"
        );
        assert!(err.is_parse());
    }

    #[test]
    fn test_kind_helpers() {
        assert!(NewsError::configuration("both given").is_configuration());
        assert!(NewsError::EmptyCollection.is_empty_collection());
    }
}
