//! One page of the listing endpoint.
//!
//! A [`Collection`] is fetched exactly once, when it is constructed, and
//! keeps the decoded entries for its lifetime. Specialized feeds (one topic,
//! one office) are plain [`ListingQuery`] presets rather than separate types.

use crate::adapters::ApiArticle;
use crate::article::Article;
use crate::error::{NewsError, Result};
use crate::fetch::Fetcher;
use crate::utils::{looks_truncated, truncate_for_log};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, instrument};
use url::Url;

/// Default page size of the listing endpoint.
pub const DEFAULT_LIMIT: usize = 10;

/// Query parameters of one listing request.
///
/// `skip` is a 0-based offset and `limit` the page size. `office_id` and
/// `topic` become the `OfficeId` and `topic` parameters; `extra` entries are
/// appended verbatim, in key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingQuery {
    pub skip: usize,
    pub limit: usize,
    pub office_id: Option<String>,
    pub topic: Option<String>,
    pub extra: BTreeMap<String, String>,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
            office_id: None,
            topic: None,
            extra: BTreeMap::new(),
        }
    }
}

impl ListingQuery {
    /// Preset: the newest articles of one topic.
    pub fn for_topic(topic: impl Into<String>) -> Self {
        Self {
            topic: Some(topic.into()),
            ..Self::default()
        }
    }

    /// Preset: the newest articles of one government office.
    pub fn for_office(office_id: impl Into<String>) -> Self {
        Self {
            office_id: Some(office_id.into()),
            ..Self::default()
        }
    }

    pub fn with_skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Rejects a zero page size.
    pub fn validate(&self) -> Result<()> {
        if self.limit == 0 {
            return Err(NewsError::configuration("listing limit must be at least 1"));
        }
        Ok(())
    }

    /// Parameters in the order they are sent.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("skip".to_string(), self.skip.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if let Some(office_id) = &self.office_id {
            pairs.push(("OfficeId".to_string(), office_id.clone()));
        }
        if let Some(topic) = &self.topic {
            pairs.push(("topic".to_string(), topic.clone()));
        }
        pairs.extend(self.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        pairs
    }

    /// `endpoint` with this query appended; parameters already on it are kept.
    pub fn apply_to(&self, endpoint: &Url) -> Url {
        let mut url = endpoint.clone();
        url.query_pairs_mut().extend_pairs(self.query_pairs());
        url
    }
}

#[derive(Deserialize)]
struct ListingResponse {
    results: Vec<Value>,
}

/// Articles of one fetched listing page, in the order the API returned them.
#[derive(Debug, Clone)]
pub struct Collection {
    entries: Vec<ApiArticle>,
}

impl Collection {
    /// Fetch one listing page.
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Transport used for the single `GET`
    /// * `endpoint` - Listing endpoint; its own query parameters are kept
    /// * `query` - Pagination and filters appended to `endpoint`
    ///
    /// # Returns
    ///
    /// The decoded page, with every entry validated.
    ///
    /// # Errors
    ///
    /// - [`NewsError::Configuration`] for an invalid query
    /// - [`NewsError::Fetch`] when the request fails or the body is not a
    ///   JSON object with a `results` array
    /// - [`NewsError::Parse`] when an entry lacks a required key
    #[instrument(level = "debug", skip_all, fields(%endpoint))]
    pub fn fetch<F>(fetcher: &F, endpoint: &Url, query: &ListingQuery) -> Result<Self>
    where
        F: Fetcher + ?Sized,
    {
        query.validate()?;
        let url = query.apply_to(endpoint);
        let body = fetcher.get(&url)?;
        let collection = Self::decode(url.as_str(), &body)?;
        debug!(url = %url, count = collection.count(), "Fetched listing");
        Ok(collection)
    }

    /// Fetch the newest articles of one topic.
    pub fn for_topic<F>(fetcher: &F, endpoint: &Url, topic: &str) -> Result<Self>
    where
        F: Fetcher + ?Sized,
    {
        Self::fetch(fetcher, endpoint, &ListingQuery::for_topic(topic))
    }

    /// Build a collection from an already fetched listing body.
    pub fn from_json(body: &str) -> Result<Self> {
        Self::decode("listing body", body)
    }

    fn decode(origin: &str, body: &str) -> Result<Self> {
        let listing: ListingResponse = serde_json::from_str(body).map_err(|e| {
            let reason = if looks_truncated(&e) {
                format!("truncated listing body: {e}")
            } else {
                format!("undecodable listing body: {e} (body: {})", truncate_for_log(body, 120))
            };
            NewsError::fetch(origin, reason)
        })?;

        let entries = listing
            .results
            .into_iter()
            .map(ApiArticle::from_value)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    /// Every article of the listing, newest first as served by the API.
    pub fn articles(&self) -> Vec<Article> {
        self.entries.iter().cloned().map(Article::Api).collect()
    }

    pub fn api_articles(&self) -> &[ApiArticle] {
        &self.entries
    }

    /// The first article of the listing.
    pub fn latest_article(&self) -> Result<Article> {
        self.entries
            .first()
            .cloned()
            .map(Article::Api)
            .ok_or(NewsError::EmptyCollection)
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keep at most `limit` entries.
    pub(crate) fn truncate(&mut self, limit: usize) {
        self.entries.truncate(limit);
    }
}
