//! Entry point tying configuration, transport and adapters together.
//!
//! # Pagination
//!
//! [`NewsClient::search`] maps directly onto the listing endpoint: `skip` is
//! the 0-based offset of the first article, `limit` the page size, and every
//! filter is sent verbatim as a query parameter (`OfficeId`, `topic`, ...).
//! At most `limit` articles are returned, newest first.
//!
//! # Article Names
//!
//! [`NewsClient::article`] appends the article name (for example
//! `03012021-03`) as one percent-encoded path segment to
//! [`ClientConfig::article_base`].

use crate::adapters::DocumentArticle;
use crate::article::Article;
use crate::collection::{Collection, ListingQuery};
use crate::config::ClientConfig;
use crate::error::{NewsError, Result};
use crate::fetch::{Fetcher, HttpFetcher};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, instrument};
use url::Url;

/// Client for the gov.il news listing and article pages.
#[derive(Clone)]
pub struct NewsClient {
    config: ClientConfig,
    fetcher: Rc<dyn Fetcher>,
}

impl fmt::Debug for NewsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl NewsClient {
    /// Client using the blocking HTTP fetcher built from `config`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::with_fetcher(config, Rc::new(fetcher)))
    }

    /// Client using a caller-supplied fetcher.
    pub fn with_fetcher(config: ClientConfig, fetcher: Rc<dyn Fetcher>) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// A named preset from the configuration.
    pub fn preset(&self, name: &str) -> Result<ListingQuery> {
        self.config.preset(name).cloned()
    }

    /// Fetch one listing page.
    pub fn collection(&self, query: &ListingQuery) -> Result<Collection> {
        Collection::fetch(self.fetcher.as_ref(), &self.config.listing_endpoint, query)
    }

    /// Fetch the listing page of a named preset.
    pub fn preset_collection(&self, name: &str) -> Result<Collection> {
        self.collection(self.config.preset(name)?)
    }

    /// The newest article on the site.
    pub fn latest(&self) -> Result<Article> {
        self.collection(&ListingQuery::default().with_limit(1))?
            .latest_article()
    }

    /// One page of articles, newest first.
    ///
    /// # Arguments
    ///
    /// * `skip` - 0-based offset of the first article
    /// * `limit` - Page size; must be at least 1
    /// * `filters` - Query parameters sent verbatim (`OfficeId`, `topic`, ...)
    ///
    /// # Returns
    ///
    /// At most `limit` articles in listing order.
    ///
    /// # Errors
    ///
    /// [`NewsError::Configuration`] when `limit` is 0, plus every error of
    /// [`Collection::fetch`].
    pub fn search(
        &self,
        skip: usize,
        limit: usize,
        filters: &BTreeMap<String, String>,
    ) -> Result<Vec<Article>> {
        let query = ListingQuery {
            skip,
            limit,
            extra: filters.clone(),
            ..ListingQuery::default()
        };
        self.search_query(&query)
    }

    /// [`Self::search`] over a prepared query, such as a preset with extra filters.
    #[instrument(level = "debug", skip_all, fields(skip = query.skip, limit = query.limit))]
    pub fn search_query(&self, query: &ListingQuery) -> Result<Vec<Article>> {
        let mut collection = self.collection(query)?;
        if collection.count() > query.limit {
            debug!(
                returned = collection.count(),
                limit = query.limit,
                "Listing exceeded the page size"
            );
            collection.truncate(query.limit);
        }
        Ok(collection.articles())
    }

    /// Page URL of an article name.
    ///
    /// # Arguments
    ///
    /// * `name` - Article name such as `03012021-03`
    ///
    /// # Returns
    ///
    /// `article_base` with `name` appended as one percent-encoded segment.
    /// Empty names, `.`, `..` and names containing `/` are rejected with
    /// [`NewsError::Configuration`].
    pub fn article_url(&self, name: &str) -> Result<Url> {
        let name = name.trim();
        if name.is_empty() || name == "." || name == ".." || name.contains('/') {
            return Err(NewsError::configuration(format!(
                "invalid article name {name:?}: expected a single non-empty path segment"
            )));
        }

        let mut url = self.config.article_base.clone();
        url.path_segments_mut()
            .map_err(|()| {
                NewsError::configuration(format!(
                    "article base {} cannot take path segments",
                    self.config.article_base
                ))
            })?
            .pop_if_empty()
            .push(name);
        Ok(url)
    }

    /// The article page called `name`.
    ///
    /// Nothing is fetched until one of its fields is read.
    pub fn article(&self, name: &str) -> Result<DocumentArticle> {
        let url = self.article_url(name)?;
        DocumentArticle::builder()
            .url(url.as_str())
            .fetcher(Rc::clone(&self.fetcher))
            .layout(self.config.layout.clone())
            .build()
    }
}
