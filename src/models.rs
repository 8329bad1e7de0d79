//! Data models for raw listing payloads and normalized article records.
//!
//! This module defines:
//! - [`NewsPayload`]: one entry of the listing API's `results` array
//! - [`TopicRef`]: a `{ "Title": ... }` reference to a topic or sub-topic
//! - [`ArticleRecord`]: a serializable snapshot of every normalized field
//!
//! The payload keeps the API's PascalCase keys through `serde(rename)`.
//! Every documented key must be present; a `null` value is accepted and
//! read as absent.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// A raw article payload as returned by the listing API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewsPayload {
    #[serde(rename = "Title", deserialize_with = "nullable")]
    pub title: Option<String>,
    #[serde(rename = "Description", deserialize_with = "nullable")]
    pub description: Option<String>,
    #[serde(rename = "ConnectedTopics", deserialize_with = "nullable")]
    pub connected_topics: Option<Vec<TopicRef>>,
    #[serde(rename = "ConnectedSubTopics", deserialize_with = "nullable")]
    pub connected_sub_topics: Option<Vec<TopicRef>>,
    /// ISO-8601 date-time, parsed on access.
    #[serde(rename = "PublishDate", deserialize_with = "nullable")]
    pub publish_date: Option<String>,
    #[serde(rename = "UpdateDate", deserialize_with = "nullable")]
    pub update_date: Option<String>,
    /// Article body as HTML markup.
    #[serde(rename = "Content", deserialize_with = "nullable")]
    pub content: Option<String>,
    #[serde(rename = "NewsTypeDesc", deserialize_with = "nullable")]
    pub news_type_desc: Option<String>,
    /// Page slug; not every listing includes it.
    #[serde(rename = "UrlName", default)]
    pub url_name: Option<String>,
}

/// A topic or sub-topic attached to an article.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TopicRef {
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
}

/// Required key whose value may be `null`.
///
/// Routing the field through `deserialize_with` makes serde report a
/// missing key as an error instead of defaulting it to `None`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

/// Trimmed titles of a topic list, in order, skipping `null` and blank titles.
pub(crate) fn topic_titles(topics: Option<&[TopicRef]>) -> Vec<String> {
    topics
        .unwrap_or_default()
        .iter()
        .filter_map(|topic| topic.title.as_deref())
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_string)
        .collect()
}

/// Where an [`ArticleRecord`] was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Api,
    Document,
}

/// Every normalized article field, ready for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub source: SourceKind,
    /// Page URL when known.
    pub url: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub subjects: Vec<String>,
    pub subsubjects: Vec<String>,
    pub publish_date: NaiveDate,
    pub update_date: Option<NaiveDate>,
    pub article_type: Option<String>,
    pub content_text: String,
    pub content_sentences: Vec<String>,
    pub attached_file_urls: Vec<String>,
}
