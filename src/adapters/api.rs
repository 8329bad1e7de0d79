//! Articles backed by a listing API payload.

use crate::error::{NewsError, Result};
use crate::models::{topic_titles, NewsPayload};
use crate::utils::{markup_to_text, split_sentences};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// An article decoded from one entry of the listing API.
///
/// The payload is validated when the article is built, so every scalar
/// accessor is a plain projection. Only the date accessors can fail.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiArticle {
    payload: NewsPayload,
}

impl ApiArticle {
    /// Build an article from a decoded JSON entry.
    ///
    /// # Errors
    ///
    /// [`NewsError::Parse`] when a required key is missing or has the wrong type.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map(Self::from_payload)
            .map_err(|e| NewsError::parse("article payload", e))
    }

    /// Build an article from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map(Self::from_payload)
            .map_err(|e| NewsError::parse("article payload", e))
    }

    pub fn from_payload(payload: NewsPayload) -> Self {
        Self { payload }
    }

    pub fn payload(&self) -> &NewsPayload {
        &self.payload
    }

    pub fn title(&self) -> Option<&str> {
        self.payload.title.as_deref()
    }

    /// The `Description` field.
    pub fn subtitle(&self) -> Option<&str> {
        self.payload.description.as_deref()
    }

    pub fn subjects(&self) -> Vec<String> {
        topic_titles(self.payload.connected_topics.as_deref())
    }

    pub fn subsubjects(&self) -> Vec<String> {
        topic_titles(self.payload.connected_sub_topics.as_deref())
    }

    pub fn publish_timestamp(&self) -> Result<NaiveDateTime> {
        parse_iso_timestamp("PublishDate", self.payload.publish_date.as_deref())
    }

    /// `UpdateDate`, or `None` when the API sent `null`.
    pub fn update_timestamp(&self) -> Result<Option<NaiveDateTime>> {
        self.payload
            .update_date
            .as_deref()
            .map(|raw| parse_iso_timestamp("UpdateDate", Some(raw)))
            .transpose()
    }

    pub fn publish_date(&self) -> Result<NaiveDate> {
        self.publish_timestamp().map(|ts| ts.date())
    }

    pub fn update_date(&self) -> Result<Option<NaiveDate>> {
        Ok(self.update_timestamp()?.map(|ts| ts.date()))
    }

    /// Raw body markup.
    pub fn content_html(&self) -> Option<&str> {
        self.payload.content.as_deref()
    }

    /// Body with markup stripped.
    pub fn content_text(&self) -> String {
        self.content_html().map(markup_to_text).unwrap_or_default()
    }

    pub fn content_sentences(&self) -> Vec<String> {
        split_sentences(&self.content_text())
    }

    /// `NewsTypeDesc`, lower-cased.
    pub fn article_type(&self) -> Option<String> {
        self.payload.news_type_desc.as_deref().map(str::to_lowercase)
    }

    /// Page slug, usable with [`crate::NewsClient::article`].
    pub fn slug(&self) -> Option<&str> {
        self.payload
            .url_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }
}

/// Parse an ISO-8601 date-time.
///
/// Accepts `YYYY-MM-DDTHH:MM:SS` with optional fractional seconds, or a full
/// RFC 3339 value with an offset, whose local wall-clock time is kept.
pub(crate) fn parse_iso_timestamp(field: &str, raw: Option<&str>) -> Result<NaiveDateTime> {
    let raw = raw
        .map(str::trim)
        .ok_or_else(|| NewsError::parse(field, "value is null"))?;

    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(ts);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_local())
        .map_err(|e| NewsError::parse(field, format!("{raw:?} is not an ISO-8601 date-time: {e}")))
}
