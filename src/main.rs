//! # govil_news
//!
//! Command-line front end for the gov.il news client: fetch the newest
//! article, page through listings, or extract an article page, and print
//! the normalized records as JSON.
//!
//! ## Usage
//!
//! ```sh
//! govil_news latest --topic health
//! govil_news search --skip 10 --limit 10 --filter culture=he
//! govil_news -o ./out/article.json article 03012021-03
//! govil_news page ./saved/article.html
//! ```
//!
//! Logs go to stderr and are controlled with `RUST_LOG`.

use clap::Parser;
use govil_news::{
    Article, ArticleRecord, ClientConfig, DocumentArticle, ListingQuery, NewsClient, NewsError,
};
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod outputs;

use cli::{Cli, Command, FilterArgs};
use outputs::json;

fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args.config, ?args.output, "Parsed CLI arguments");

    let mut config = match &args.config {
        Some(path) => ClientConfig::from_yaml_file(path)?,
        None => ClientConfig::default(),
    };
    if let Some(timeout_secs) = args.timeout_secs {
        config.timeout_secs = timeout_secs;
    }
    let client = NewsClient::new(config)?;

    let records = match run(&client, &args.command) {
        Ok(records) => records,
        Err(e) => {
            error!(error = %e, "Command failed");
            return Err(e.into());
        }
    };

    json::write_records(&records, args.output.as_deref())?;
    info!(
        count = records.len(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Done"
    );
    Ok(())
}

#[instrument(level = "info", skip(client))]
fn run(client: &NewsClient, command: &Command) -> Result<Vec<ArticleRecord>, NewsError> {
    let articles: Vec<Article> = match command {
        Command::Latest { filters } => {
            let query = listing_query(client, filters)?.with_limit(1);
            vec![client.collection(&query)?.latest_article()?]
        }
        Command::Search {
            skip,
            limit,
            filters,
        } => {
            let query = listing_query(client, filters)?
                .with_skip(*skip)
                .with_limit(*limit);
            client.search_query(&query)?
        }
        Command::Article { name } => vec![client.article(name)?.into()],
        Command::Page { file } => {
            let html = std::fs::read_to_string(file)
                .map_err(|e| NewsError::configuration(format!("cannot read {file}: {e}")))?;
            let article = DocumentArticle::builder()
                .html(&html)
                .layout(client.config().layout.clone())
                .build()?;
            vec![article.into()]
        }
    };

    info!(count = articles.len(), "Collected articles");
    articles.iter().map(Article::to_record).collect()
}

/// Start from the named preset (or the default query) and layer the flags on top.
fn listing_query(client: &NewsClient, filters: &FilterArgs) -> Result<ListingQuery, NewsError> {
    let mut query = match &filters.preset {
        Some(name) => client.preset(name)?,
        None => ListingQuery::default(),
    };
    if let Some(topic) = &filters.topic {
        query.topic = Some(topic.clone());
    }
    if let Some(office_id) = &filters.office_id {
        query.office_id = Some(office_id.clone());
    }
    query.extra.extend(filters.filters.iter().cloned());
    Ok(query)
}
