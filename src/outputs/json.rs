//! JSON output of article records.
//!
//! Records are written as one pretty-printed JSON array, either to stdout or
//! to a file whose parent directories are created on demand.

use govil_news::ArticleRecord;
use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::{error, info, instrument};

/// Write `records` as a JSON array to `path`, or to stdout when `path` is `None`.
///
/// # Arguments
///
/// * `records` - Records to serialize, in output order
/// * `path` - Destination file; missing parent directories are created
///
/// # Returns
///
/// `Ok(())` on success, or an error if serialization, directory creation or
/// the write fails.
#[instrument(level = "info", skip(records), fields(count = records.len()))]
pub fn write_records(records: &[ArticleRecord], path: Option<&str>) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(records)?;

    let Some(path) = path else {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{json}")?;
        return Ok(());
    };

    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        info!(dir = %parent.display(), "Ensuring output directory exists");
        if let Err(e) = fs::create_dir_all(parent) {
            error!(dir = %parent.display(), error = %e, "Failed to create output dir");
            return Err(e.into());
        }
    }

    fs::write(path, format!("{json}\n"))?;
    info!(%path, "Wrote JSON output");
    Ok(())
}
