//! Source adapters turning raw fetched data into article fields.
//!
//! | Adapter | Module | Input | Field lookup |
//! |---------|--------|-------|--------------|
//! | API payload | [`api`] | one entry of the listing API | key projection |
//! | Article page | [`document`] | rendered HTML page | named regions |
//!
//! Both adapters render body markup with [`crate::utils::markup_to_text`]
//! and segment it with [`crate::utils::split_sentences`], so the derived
//! text fields follow the same rules whichever source produced them.

pub mod api;
pub mod document;

pub use api::ApiArticle;
pub use document::{DocumentArticle, DocumentArticleBuilder, DocumentLayout};
