//! Articles scraped from a rendered gov.il article page.
//!
//! Each field lives in one region of the page, addressed by a CSS selector
//! from [`DocumentLayout`] (element ids by default). Only the first match of
//! a selector is used. Missing optional regions read as `None` or an empty
//! list; the publish-date region is required.
//!
//! # Lazy Fetching
//!
//! An article built from a URL does not touch the network until a field is
//! read (or [`DocumentArticle::request`] is called). The parsed page is then
//! kept for the lifetime of the article and never fetched again.

use crate::config::ClientConfig;
use crate::error::{NewsError, Result};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::utils::{element_text, non_blank, split_sentences};
use chrono::NaiveDate;
use once_cell::unsync::OnceCell;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use tracing::{debug, instrument};
use url::Url;

/// CSS selectors locating each field's region in an article page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentLayout {
    pub title: String,
    /// Subtitle region.
    pub description: String,
    pub subject: String,
    /// Container whose child elements are the sub-subjects.
    pub sub_subjects: String,
    pub publish_date: String,
    pub content: String,
    /// Container of attachment links.
    pub files: String,
    /// Links inside `files` that count as attachments.
    pub attachment_link: String,
}

impl Default for DocumentLayout {
    fn default() -> Self {
        Self {
            title: "#title".to_string(),
            description: "#description".to_string(),
            subject: "#subject".to_string(),
            sub_subjects: "#subSubject".to_string(),
            publish_date: "#publishDate".to_string(),
            content: "#content".to_string(),
            files: "#files".to_string(),
            attachment_link: "a[href][title]".to_string(),
        }
    }
}

impl DocumentLayout {
    fn compile(&self) -> Result<Regions> {
        Ok(Regions {
            title: compile_selector("title", &self.title)?,
            description: compile_selector("description", &self.description)?,
            subject: compile_selector("subject", &self.subject)?,
            sub_subjects: compile_selector("sub_subjects", &self.sub_subjects)?,
            publish_date: compile_selector("publish_date", &self.publish_date)?,
            content: compile_selector("content", &self.content)?,
            files: compile_selector("files", &self.files)?,
            attachment_link: compile_selector("attachment_link", &self.attachment_link)?,
            layout: self.clone(),
        })
    }
}

fn compile_selector(field: &str, css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| {
        NewsError::configuration(format!("invalid selector for {field} ({css:?}): {e}"))
    })
}

#[derive(Debug, Clone)]
struct Regions {
    title: Selector,
    description: Selector,
    subject: Selector,
    sub_subjects: Selector,
    publish_date: Selector,
    content: Selector,
    files: Selector,
    attachment_link: Selector,
    layout: DocumentLayout,
}

/// An article whose fields are read from an HTML page.
///
/// Build one with [`DocumentArticle::builder`], or the shorthands
/// [`DocumentArticle::from_html`] and [`DocumentArticle::from_url`].
#[derive(Clone)]
pub struct DocumentArticle {
    url: Option<Url>,
    fetcher: Option<Rc<dyn Fetcher>>,
    regions: Regions,
    document: OnceCell<Html>,
}

impl fmt::Debug for DocumentArticle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentArticle")
            .field("url", &self.url.as_ref().map(Url::as_str))
            .field("loaded", &self.is_loaded())
            .field("layout", &self.regions.layout)
            .finish()
    }
}

impl DocumentArticle {
    pub fn builder() -> DocumentArticleBuilder {
        DocumentArticleBuilder::default()
    }

    /// Article over an already fetched page, using the default layout.
    pub fn from_html(html: &str) -> Result<Self> {
        Self::builder().html(html).build()
    }

    /// Article fetched lazily from `url` through `fetcher`.
    pub fn from_url(url: &str, fetcher: Rc<dyn Fetcher>) -> Result<Self> {
        Self::builder().url(url).fetcher(fetcher).build()
    }

    /// Page URL, when the article was built from one.
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// Whether the page has been fetched (or was supplied up front).
    pub fn is_loaded(&self) -> bool {
        self.document.get().is_some()
    }

    /// Fetch and parse the page unless that already happened.
    pub fn request(&self) -> Result<()> {
        self.document().map(|_| ())
    }

    fn document(&self) -> Result<&Html> {
        self.document.get_or_try_init(|| self.retrieve())
    }

    #[instrument(level = "debug", skip_all, fields(url = ?self.url.as_ref().map(Url::as_str)))]
    fn retrieve(&self) -> Result<Html> {
        let (Some(url), Some(fetcher)) = (&self.url, &self.fetcher) else {
            return Err(NewsError::configuration(
                "document article has neither a document nor a url to fetch",
            ));
        };
        let body = fetcher.get(url)?;
        debug!(bytes = body.len(), "Fetched article page");
        Ok(Html::parse_document(&body))
    }

    fn region(&self, selector: &Selector) -> Result<Option<ElementRef<'_>>> {
        Ok(self.document()?.select(selector).next())
    }

    fn region_text(&self, selector: &Selector) -> Result<Option<String>> {
        Ok(self
            .region(selector)?
            .and_then(|region| non_blank(&element_text(&region))))
    }

    pub fn title(&self) -> Result<Option<String>> {
        self.region_text(&self.regions.title)
    }

    /// Text of the description region.
    pub fn subtitle(&self) -> Result<Option<String>> {
        self.region_text(&self.regions.description)
    }

    pub fn subject(&self) -> Result<Option<String>> {
        self.region_text(&self.regions.subject)
    }

    /// The subject as a zero- or one-element list, matching the API form.
    pub fn subjects(&self) -> Result<Vec<String>> {
        Ok(self.subject()?.into_iter().collect())
    }

    /// One entry per child element of the sub-subject region.
    pub fn subsubjects(&self) -> Result<Vec<String>> {
        let Some(region) = self.region(&self.regions.sub_subjects)? else {
            return Ok(Vec::new());
        };
        Ok(region
            .children()
            .filter_map(ElementRef::wrap)
            .filter_map(|item| non_blank(&element_text(&item)))
            .collect())
    }

    /// Publish date exactly as shown on the page.
    ///
    /// # Errors
    ///
    /// [`NewsError::Parse`] when the publish-date region is absent or blank.
    pub fn posted_string(&self) -> Result<String> {
        self.region_text(&self.regions.publish_date)?.ok_or_else(|| {
            NewsError::parse(
                "publish date",
                format!(
                    "required region `{}` is missing or empty",
                    self.regions.layout.publish_date
                ),
            )
        })
    }

    /// [`Self::posted_string`] parsed as `day.month.year`.
    pub fn posted_date(&self) -> Result<NaiveDate> {
        parse_day_month_year(&self.posted_string()?)
    }

    /// Inner HTML of the content region.
    pub fn content_html(&self) -> Result<Option<String>> {
        Ok(self
            .region(&self.regions.content)?
            .map(|region| region.inner_html().trim().to_string())
            .filter(|html| !html.is_empty()))
    }

    pub fn content_text(&self) -> Result<String> {
        Ok(self
            .region(&self.regions.content)?
            .map(|region| element_text(&region))
            .unwrap_or_default())
    }

    pub fn content_sentences(&self) -> Result<Vec<String>> {
        Ok(split_sentences(&self.content_text()?))
    }

    /// `href` of every attachment link in the files region.
    ///
    /// Relative links are resolved against the page URL when there is one.
    pub fn attached_file_urls(&self) -> Result<Vec<String>> {
        let Some(region) = self.region(&self.regions.files)? else {
            return Ok(Vec::new());
        };
        Ok(region
            .select(&self.regions.attachment_link)
            .filter_map(|link| link.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .map(|href| self.resolve(href))
            .collect())
    }

    fn resolve(&self, href: &str) -> String {
        self.url
            .as_ref()
            .and_then(|base| base.join(href).ok())
            .map(String::from)
            .unwrap_or_else(|| href.to_string())
    }
}

/// Builder for [`DocumentArticle`].
///
/// Exactly one of [`url`](Self::url) and [`document`](Self::document) /
/// [`html`](Self::html) must be given.
#[derive(Default)]
pub struct DocumentArticleBuilder {
    url: Option<String>,
    document: Option<Html>,
    fetcher: Option<Rc<dyn Fetcher>>,
    layout: Option<DocumentLayout>,
}

impl DocumentArticleBuilder {
    /// Fetch the page from this URL on first access.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Use an already parsed page.
    pub fn document(mut self, document: Html) -> Self {
        self.document = Some(document);
        self
    }

    /// Parse `html` and use it as the page.
    pub fn html(self, html: &str) -> Self {
        self.document(Html::parse_document(html))
    }

    /// Fetcher for URL-backed articles; defaults to [`HttpFetcher`].
    pub fn fetcher(mut self, fetcher: Rc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn layout(mut self, layout: DocumentLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// # Errors
    ///
    /// [`NewsError::Configuration`] when both or neither of a URL and a
    /// document were supplied, the URL is invalid, or a layout selector does
    /// not parse.
    pub fn build(self) -> Result<DocumentArticle> {
        let regions = self.layout.unwrap_or_default().compile()?;

        match (self.url, self.document) {
            (Some(_), Some(_)) => Err(NewsError::configuration(
                "exactly one of `url` or `document` must be supplied, got both",
            )),
            (None, None) => Err(NewsError::configuration(
                "exactly one of `url` or `document` must be supplied, got neither",
            )),
            (Some(url), None) => {
                let url = Url::parse(&url)
                    .map_err(|e| NewsError::configuration(format!("invalid url {url:?}: {e}")))?;
                let fetcher = match self.fetcher {
                    Some(fetcher) => fetcher,
                    None => Rc::new(HttpFetcher::new(&ClientConfig::default())?),
                };
                Ok(DocumentArticle {
                    url: Some(url),
                    fetcher: Some(fetcher),
                    regions,
                    document: OnceCell::new(),
                })
            }
            (None, Some(document)) => Ok(DocumentArticle {
                url: None,
                fetcher: None,
                regions,
                document: OnceCell::with_value(document),
            }),
        }
    }
}

/// Parse a `day.month.year` date such as `03.01.2021` or `3.1.2021`.
pub(crate) fn parse_day_month_year(raw: &str) -> Result<NaiveDate> {
    let invalid = || NewsError::parse("publish date", format!("{raw:?} is not a day.month.year date"));
    let is_number = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

    let mut parts = raw.trim().split('.');
    let (Some(day), Some(month), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };
    if !(is_number(day) && is_number(month) && is_number(year)) {
        return Err(invalid());
    }

    let day: u32 = day.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const PAGE: &str = r#"<!DOCTYPE html>
<html lang="he" dir="rtl">
<head><title>gov.il</title></head>
<body>
  <h1 id="title"> הודעה   לעיתונות </h1>
  <p id="description">Subtitle text</p>
  <span id="subject">בריאות</span>
  <ul id="subSubject"><li>חיסונים</li><li> </li><li>קורונה</li></ul>
  <span id="publishDate">03.01.2021</span>
  <div id="content"><p>First sentence. Second sentence.</p><p>Third</p></div>
  <div id="files">
    <a href="/BlobFolder/news/agra_2021/he/report.pdf" title="report.pdf">Report</a>
    <a href="https://www.gov.il/other">Not an attachment</a>
    <a href="files/annex.docx" title="annex">Annex</a>
  </div>
</body>
</html>"#;

    const BARE_PAGE: &str = "<html><body><h1>No regions here</h1></body></html>";

    fn counting_fetcher(body: &'static str) -> (Rc<dyn Fetcher>, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let fetcher: Rc<dyn Fetcher> = Rc::new(move |_url: &Url| -> Result<String> {
            counter.set(counter.get() + 1);
            Ok(body.to_string())
        });
        (fetcher, calls)
    }

    #[test]
    fn test_fields_from_html() {
        let article = DocumentArticle::from_html(PAGE).unwrap();

        assert_eq!(article.title().unwrap().as_deref(), Some("הודעה לעיתונות"));
        assert_eq!(article.subtitle().unwrap().as_deref(), Some("Subtitle text"));
        assert_eq!(article.subject().unwrap().as_deref(), Some("בריאות"));
        assert_eq!(article.subjects().unwrap(), vec!["בריאות"]);
        assert_eq!(article.subsubjects().unwrap(), vec!["חיסונים", "קורונה"]);
        assert_eq!(article.posted_string().unwrap(), "03.01.2021");
        assert_eq!(
            article.posted_date().unwrap(),
            NaiveDate::from_ymd_opt(2021, 1, 3).unwrap()
        );
    }

    #[test]
    fn test_content_region() {
        let article = DocumentArticle::from_html(PAGE).unwrap();

        assert!(article
            .content_html()
            .unwrap()
            .unwrap()
            .starts_with("<p>First sentence."));
        assert_eq!(
            article.content_text().unwrap(),
            "First sentence. Second sentence. Third"
        );
        assert_eq!(
            article.content_sentences().unwrap(),
            vec!["First sentence.", "Second sentence.", "Third."]
        );
        assert_eq!(article.content_sentences().unwrap(), article.content_sentences().unwrap());
    }

    #[test]
    fn test_attached_files_verbatim_without_url() {
        let article = DocumentArticle::from_html(PAGE).unwrap();
        assert_eq!(
            article.attached_file_urls().unwrap(),
            vec!["/BlobFolder/news/agra_2021/he/report.pdf", "files/annex.docx"]
        );
    }

    #[test]
    fn test_missing_regions() {
        let article = DocumentArticle::from_html(BARE_PAGE).unwrap();

        assert_eq!(article.title().unwrap(), None);
        assert_eq!(article.subtitle().unwrap(), None);
        assert!(article.subjects().unwrap().is_empty());
        assert!(article.subsubjects().unwrap().is_empty());
        assert!(article.attached_file_urls().unwrap().is_empty());
        assert_eq!(article.content_html().unwrap(), None);
        assert_eq!(article.content_text().unwrap(), "");
        assert!(article.content_sentences().unwrap().is_empty());
    }

    #[test]
    fn test_missing_publish_date_is_parse_error() {
        let article = DocumentArticle::from_html(BARE_PAGE).unwrap();

        let err = article.posted_string().unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("#publishDate"));
        assert!(article.posted_date().unwrap_err().is_parse());
    }

    #[test]
    fn test_blank_publish_date_is_parse_error() {
        let article =
            DocumentArticle::from_html(r#"<span id="publishDate">  </span>"#).unwrap();
        assert!(article.posted_string().unwrap_err().is_parse());
    }

    #[test]
    fn test_builder_requires_exactly_one_source() {
        let (fetcher, _) = counting_fetcher(PAGE);
        let both = DocumentArticle::builder()
            .url("https://www.gov.il/he/departments/news/03012021-03")
            .html(PAGE)
            .fetcher(fetcher)
            .build();
        assert!(both.unwrap_err().is_configuration());

        let neither = DocumentArticle::builder().build();
        assert!(neither.unwrap_err().is_configuration());
    }

    #[test]
    fn test_builder_rejects_invalid_url() {
        let (fetcher, calls) = counting_fetcher(PAGE);
        let err = DocumentArticle::from_url("not a url", fetcher).unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_fetches_lazily_and_once() {
        let (fetcher, calls) = counting_fetcher(PAGE);
        let article =
            DocumentArticle::from_url("https://www.gov.il/he/departments/news/agra_2021", fetcher)
                .unwrap();

        assert!(!article.is_loaded());
        assert_eq!(calls.get(), 0);

        assert_eq!(article.title().unwrap().as_deref(), Some("הודעה לעיתונות"));
        assert_eq!(calls.get(), 1);
        assert!(article.is_loaded());

        article.request().unwrap();
        article.posted_date().unwrap();
        article.attached_file_urls().unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_attached_files_resolved_against_page_url() {
        let (fetcher, _) = counting_fetcher(PAGE);
        let article =
            DocumentArticle::from_url("https://www.gov.il/he/departments/news/agra_2021", fetcher)
                .unwrap();

        assert_eq!(
            article.attached_file_urls().unwrap(),
            vec![
                "https://www.gov.il/BlobFolder/news/agra_2021/he/report.pdf",
                "https://www.gov.il/he/departments/news/files/annex.docx",
            ]
        );
    }

    #[test]
    fn test_fetch_error_surfaces_on_access() {
        let fetcher: Rc<dyn Fetcher> = Rc::new(|url: &Url| -> Result<String> {
            Err(NewsError::fetch(url.as_str(), "HTTP status 500"))
        });
        let article =
            DocumentArticle::from_url("https://www.gov.il/he/departments/news/x", fetcher).unwrap();

        assert!(article.title().unwrap_err().is_fetch());
        assert!(!article.is_loaded());
    }

    #[test]
    fn test_custom_layout() {
        let layout = DocumentLayout {
            title: "h1.headline".to_string(),
            publish_date: ".date".to_string(),
            ..DocumentLayout::default()
        };
        let html = r#"<h1 class="headline">Custom</h1><div class="date">5.11.2020</div>"#;
        let article = DocumentArticle::builder().html(html).layout(layout).build().unwrap();

        assert_eq!(article.title().unwrap().as_deref(), Some("Custom"));
        assert_eq!(
            article.posted_date().unwrap(),
            NaiveDate::from_ymd_opt(2020, 11, 5).unwrap()
        );
    }

    #[test]
    fn test_invalid_layout_selector() {
        let layout = DocumentLayout {
            files: "##".to_string(),
            ..DocumentLayout::default()
        };
        let err = DocumentArticle::builder().html(PAGE).layout(layout).build().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("files"));
    }

    #[test]
    fn test_parse_day_month_year() {
        let jan_3 = NaiveDate::from_ymd_opt(2021, 1, 3).unwrap();
        assert_eq!(parse_day_month_year("03.01.2021").unwrap(), jan_3);
        assert_eq!(parse_day_month_year("3.1.2021").unwrap(), jan_3);
        assert_eq!(parse_day_month_year(" 03.01.2021 ").unwrap(), jan_3);

        for bad in ["2021-01-03", "31.02.2021", "03.01", "a.b.c", "03.01.2021.5", "03..2021", ""] {
            assert!(parse_day_month_year(bad).unwrap_err().is_parse(), "{bad:?}");
        }
    }
}
