//! The normalized article exposed to callers.
//!
//! [`Article`] hides which adapter produced an instance. Fields that one
//! source cannot provide come back as a fixed sentinel instead of an error:
//!
//! | Field | Api | Document |
//! |-------|-----|----------|
//! | `subjects` | every connected topic | the subject region, as 0 or 1 entries |
//! | `update_date` | `UpdateDate`, `None` when null | always `None` |
//! | `article_type` | `NewsTypeDesc`, lower-cased | always `None` |
//! | `attached_file_urls` | always empty | links in the files region |
//!
//! Every accessor returns a `Result` because a document article may fetch
//! its page on first access.

use crate::adapters::{ApiArticle, DocumentArticle};
use crate::error::Result;
use crate::models::{ArticleRecord, SourceKind};
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub enum Article {
    Api(ApiArticle),
    Document(DocumentArticle),
}

impl From<ApiArticle> for Article {
    fn from(article: ApiArticle) -> Self {
        Article::Api(article)
    }
}

impl From<DocumentArticle> for Article {
    fn from(article: DocumentArticle) -> Self {
        Article::Document(article)
    }
}

impl Article {
    pub fn source(&self) -> SourceKind {
        match self {
            Article::Api(_) => SourceKind::Api,
            Article::Document(_) => SourceKind::Document,
        }
    }

    /// Page URL: the document's own URL, or none for API entries.
    pub fn url(&self) -> Option<String> {
        match self {
            Article::Api(_) => None,
            Article::Document(doc) => doc.url().map(|url| url.to_string()),
        }
    }

    pub fn title(&self) -> Result<Option<String>> {
        match self {
            Article::Api(api) => Ok(api.title().map(str::to_string)),
            Article::Document(doc) => doc.title(),
        }
    }

    pub fn subtitle(&self) -> Result<Option<String>> {
        match self {
            Article::Api(api) => Ok(api.subtitle().map(str::to_string)),
            Article::Document(doc) => doc.subtitle(),
        }
    }

    pub fn subjects(&self) -> Result<Vec<String>> {
        match self {
            Article::Api(api) => Ok(api.subjects()),
            Article::Document(doc) => doc.subjects(),
        }
    }

    pub fn subsubjects(&self) -> Result<Vec<String>> {
        match self {
            Article::Api(api) => Ok(api.subsubjects()),
            Article::Document(doc) => doc.subsubjects(),
        }
    }

    pub fn publish_date(&self) -> Result<NaiveDate> {
        match self {
            Article::Api(api) => api.publish_date(),
            Article::Document(doc) => doc.posted_date(),
        }
    }

    pub fn update_date(&self) -> Result<Option<NaiveDate>> {
        match self {
            Article::Api(api) => api.update_date(),
            Article::Document(_) => Ok(None),
        }
    }

    pub fn content_html(&self) -> Result<Option<String>> {
        match self {
            Article::Api(api) => Ok(api.content_html().map(str::to_string)),
            Article::Document(doc) => doc.content_html(),
        }
    }

    pub fn content_text(&self) -> Result<String> {
        match self {
            Article::Api(api) => Ok(api.content_text()),
            Article::Document(doc) => doc.content_text(),
        }
    }

    pub fn content_sentences(&self) -> Result<Vec<String>> {
        match self {
            Article::Api(api) => Ok(api.content_sentences()),
            Article::Document(doc) => doc.content_sentences(),
        }
    }

    pub fn article_type(&self) -> Result<Option<String>> {
        match self {
            Article::Api(api) => Ok(api.article_type()),
            Article::Document(_) => Ok(None),
        }
    }

    pub fn attached_file_urls(&self) -> Result<Vec<String>> {
        match self {
            Article::Api(_) => Ok(Vec::new()),
            Article::Document(doc) => doc.attached_file_urls(),
        }
    }

    /// Read every field into a serializable record.
    pub fn to_record(&self) -> Result<ArticleRecord> {
        let content_text = self.content_text()?;
        Ok(ArticleRecord {
            source: self.source(),
            url: self.url(),
            title: self.title()?,
            subtitle: self.subtitle()?,
            subjects: self.subjects()?,
            subsubjects: self.subsubjects()?,
            publish_date: self.publish_date()?,
            update_date: self.update_date()?,
            article_type: self.article_type()?,
            content_sentences: crate::utils::split_sentences(&content_text),
            content_text,
            attached_file_urls: self.attached_file_urls()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api_article() -> Article {
        ApiArticle::from_value(json!({
            "Title": "T",
            "Description": "D",
            "ConnectedTopics": [{"Title": "A"}, {"Title": "B"}],
            "ConnectedSubTopics": [],
            "PublishDate": "2021-01-03T00:00:00",
            "UpdateDate": "2021-01-04T00:00:00",
            "Content": "<p>One. Two.</p>",
            "NewsTypeDesc": "NEWS"
        }))
        .unwrap()
        .into()
    }

    fn document_article() -> Article {
        DocumentArticle::from_html(
            r#"<h1 id="title">כותרת</h1>
               <span id="subject">חינוך</span>
               <span id="publishDate">7.2.2021</span>
               <div id="content"><p>Alpha. Beta.</p></div>"#,
        )
        .unwrap()
        .into()
    }

    #[test]
    fn test_api_variant() {
        let article = api_article();
        assert_eq!(article.source(), SourceKind::Api);
        assert_eq!(article.title().unwrap().as_deref(), Some("T"));
        assert_eq!(article.subjects().unwrap(), vec!["A", "B"]);
        assert_eq!(
            article.update_date().unwrap(),
            NaiveDate::from_ymd_opt(2021, 1, 4)
        );
        assert_eq!(article.article_type().unwrap().as_deref(), Some("news"));
        assert!(article.attached_file_urls().unwrap().is_empty());
        assert_eq!(article.url(), None);
    }

    #[test]
    fn test_document_variant_sentinels() {
        let article = document_article();
        assert_eq!(article.source(), SourceKind::Document);
        assert_eq!(article.subjects().unwrap(), vec!["חינוך"]);
        assert!(article.subsubjects().unwrap().is_empty());
        assert_eq!(article.update_date().unwrap(), None);
        assert_eq!(article.article_type().unwrap(), None);
        assert_eq!(
            article.publish_date().unwrap(),
            NaiveDate::from_ymd_opt(2021, 2, 7).unwrap()
        );
    }

    #[test]
    fn test_content_sentences_idempotent_for_both_variants() {
        for article in [api_article(), document_article()] {
            let first = article.content_sentences().unwrap();
            assert_eq!(first, article.content_sentences().unwrap());
            assert_eq!(first.len(), 2);
        }
    }

    #[test]
    fn test_to_record() {
        let record = api_article().to_record().unwrap();
        assert_eq!(record.source, SourceKind::Api);
        assert_eq!(record.subtitle.as_deref(), Some("D"));
        assert_eq!(record.content_text, "One. Two.");
        assert_eq!(record.content_sentences, vec!["One.", "Two."]);
        assert_eq!(record.publish_date, NaiveDate::from_ymd_opt(2021, 1, 3).unwrap());

        let record = document_article().to_record().unwrap();
        assert_eq!(record.title.as_deref(), Some("כותרת"));
        assert_eq!(record.content_sentences, vec!["Alpha.", "Beta."]);
        assert!(record.attached_file_urls.is_empty());
    }

    #[test]
    fn test_null_update_date_reads_as_none() {
        let article: Article = ApiArticle::from_value(json!({
            "Title": "T",
            "Description": null,
            "ConnectedTopics": [],
            "ConnectedSubTopics": [],
            "PublishDate": "2021-01-03T00:00:00",
            "UpdateDate": null,
            "Content": "<p>One.</p>",
            "NewsTypeDesc": "NEWS"
        }))
        .unwrap()
        .into();

        assert_eq!(article.update_date().unwrap(), None);
        let record = article.to_record().unwrap();
        assert_eq!(record.update_date, None);
        assert_eq!(record.publish_date, NaiveDate::from_ymd_opt(2021, 1, 3).unwrap());
    }

    #[test]
    fn test_to_record_fails_without_publish_date() {
        let article: Article = DocumentArticle::from_html("<h1 id=\"title\">x</h1>")
            .unwrap()
            .into();
        assert!(article.to_record().unwrap_err().is_parse());
    }
}
