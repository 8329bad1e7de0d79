//! # govil_news
//!
//! Fetch news articles from gov.il and read them through one article model,
//! whether they come from the JSON listing API or from a rendered article
//! page.
//!
//! ## Features
//!
//! - Listing pages with offset/limit pagination and topic/office filters
//! - Named listing presets from a YAML configuration file
//! - Article pages scraped by region, fetched lazily and at most once
//! - Plain-text rendering and sentence segmentation of article bodies
//!
//! ## Usage
//!
//! ```no_run
//! use govil_news::{ClientConfig, NewsClient, NewsError};
//!
//! fn main() -> Result<(), NewsError> {
//!     let client = NewsClient::new(ClientConfig::default())?;
//!     let latest = client.latest()?;
//!     println!("{:?}", latest.title()?);
//!
//!     let page = client.article("03012021-03")?;
//!     for sentence in page.content_sentences()? {
//!         println!("{sentence}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! 1. **Transport**: [`Fetcher`] performs one `GET` per call
//! 2. **Adapters**: [`ApiArticle`] and [`DocumentArticle`] extract raw fields
//! 3. **Article**: [`Article`] exposes the union of both adapters' fields
//! 4. **Listing**: [`Collection`] and [`NewsClient`] fetch and page listings

pub mod adapters;
pub mod article;
pub mod client;
pub mod collection;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod utils;

pub use adapters::{ApiArticle, DocumentArticle, DocumentArticleBuilder, DocumentLayout};
pub use article::Article;
pub use client::NewsClient;
pub use collection::{Collection, ListingQuery};
pub use config::ClientConfig;
pub use error::{NewsError, Result};
pub use fetch::{Fetcher, HttpFetcher};
pub use models::{ArticleRecord, NewsPayload, SourceKind};
