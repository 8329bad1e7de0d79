//! Command-line interface definitions for govil_news.
//!
//! Options can be provided via command-line flags or environment variables.

use clap::{Args, Parser, Subcommand};

/// Command-line arguments for the govil_news binary.
///
/// # Examples
///
/// ```sh
/// # Newest article
/// govil_news latest
///
/// # Second page of a topic, ten per page
/// govil_news search --skip 10 --limit 10 --topic health
///
/// # One article page, written to a file
/// govil_news -o ./out/article.json article 03012021-03
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to config.yaml file
    #[arg(short, long, env = "GOVIL_NEWS_CONFIG")]
    pub config: Option<String>,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long, env = "GOVIL_NEWS_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Write the JSON output to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the newest article of a listing
    Latest {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Print one page of articles, newest first
    Search {
        /// Number of articles to skip
        #[arg(long, default_value_t = 0)]
        skip: usize,
        /// Page size
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Fetch and extract one article page by name (e.g. 03012021-03)
    Article { name: String },
    /// Extract an article from a saved HTML page
    Page { file: String },
}

/// Listing filters shared by `latest` and `search`.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Named preset from the config file
    #[arg(long)]
    pub preset: Option<String>,

    /// Topic filter
    #[arg(long)]
    pub topic: Option<String>,

    /// Office filter (sent as OfficeId)
    #[arg(long)]
    pub office_id: Option<String>,

    /// Extra query parameter as KEY=VALUE; may be repeated
    #[arg(long = "filter", value_parser = parse_key_value)]
    pub filters: Vec<(String, String)>,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got {s:?}")),
    }
}
