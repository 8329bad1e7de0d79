//! Client configuration.
//!
//! Every field has a default pointing at the live gov.il site, so an empty
//! YAML file (or none at all) yields a working configuration. A file only
//! needs to mention what it overrides:
//!
//! ```yaml
//! timeout_secs: 10
//! presets:
//!   health:
//!     topic: "health"
//!     limit: 5
//! ```

use crate::adapters::document::DocumentLayout;
use crate::collection::ListingQuery;
use crate::error::{NewsError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// JSON listing endpoint of the news collector.
pub const DEFAULT_LISTING_ENDPOINT: &str =
    "https://www.gov.il/CollectorsWebApi/api/DataCollector/GetResults?CollectorType=news&culture=he";

/// Base under which article pages live; the article name is appended as a path segment.
pub const DEFAULT_ARTICLE_BASE: &str = "https://www.gov.il/he/departments/news/";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_USER_AGENT: &str = concat!("govil_news/", env!("CARGO_PKG_VERSION"));

/// Settings shared by the HTTP fetcher, collections and document articles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Listing endpoint; query parameters already present are kept.
    pub listing_endpoint: Url,
    /// Article page base URL.
    pub article_base: Url,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Region selectors used to scrape article pages.
    pub layout: DocumentLayout,
    /// Named listing queries, selectable by name.
    pub presets: BTreeMap<String, ListingQuery>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            listing_endpoint: Url::parse(DEFAULT_LISTING_ENDPOINT)
                .expect("default listing endpoint is a valid URL"),
            article_base: Url::parse(DEFAULT_ARTICLE_BASE)
                .expect("default article base is a valid URL"),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            layout: DocumentLayout::default(),
            presets: BTreeMap::new(),
        }
    }
}

impl ClientConfig {
    /// Parse a configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
            .map_err(|e| NewsError::configuration(format!("invalid config: {e}")))
    }

    /// Load a configuration from a YAML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a YAML file; keys it omits keep their defaults
    ///
    /// # Returns
    ///
    /// The parsed configuration, or [`NewsError::Configuration`] when the file
    /// cannot be read or is not valid YAML for this shape.
    #[instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            NewsError::configuration(format!("cannot read config {}: {e}", path.display()))
        })?;
        let config = Self::from_yaml_str(&yaml)?;
        debug!(presets = config.presets.len(), "Loaded configuration");
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Look up a named preset.
    pub fn preset(&self, name: &str) -> Result<&ListingQuery> {
        self.presets
            .get(name)
            .ok_or_else(|| NewsError::configuration(format!("unknown preset `{name}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.listing_endpoint.host_str(), Some("www.gov.il"));
        assert_eq!(config.article_base.as_str(), DEFAULT_ARTICLE_BASE);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.user_agent.starts_with("govil_news/"));
        assert!(config.presets.is_empty());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(ClientConfig::from_yaml_str("").unwrap(), ClientConfig::default());
    }

    #[test]
    fn test_partial_yaml_overrides() {
        let yaml = r#"
timeout_secs: 5
layout:
  title: "h1.headline"
presets:
  health:
    topic: "health"
    limit: 3
"#;
        let config = ClientConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.layout.title, "h1.headline");
        assert_eq!(config.layout.description, DocumentLayout::default().description);

        let preset = config.preset("health").unwrap();
        assert_eq!(preset.topic.as_deref(), Some("health"));
        assert_eq!(preset.limit, 3);
        assert_eq!(preset.skip, 0);
    }

    #[test]
    fn test_unknown_preset() {
        let err = ClientConfig::default().preset("nope").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_invalid_yaml() {
        let err = ClientConfig::from_yaml_str("timeout_secs: [").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "user_agent: test-agent\n").unwrap();

        let config = ClientConfig::from_yaml_file(&path).unwrap();
        assert_eq!(config.user_agent, "test-agent");

        let missing = ClientConfig::from_yaml_file(dir.path().join("missing.yaml"));
        assert!(missing.unwrap_err().is_configuration());
    }
}
