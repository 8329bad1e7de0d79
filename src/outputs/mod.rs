//! Output generation for the command-line binary.
//!
//! # Submodules
//!
//! - [`json`]: Writes [`govil_news::ArticleRecord`]s as a JSON array to stdout or a file

pub mod json;
