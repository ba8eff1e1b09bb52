//! Source scrapers for the energy and climate outlets covered by the digest.
//!
//! Every source is a variant of [`SourceExtractor`] and is driven through the
//! same contract: `extract(fetcher, range) -> Vec<Article>`. Scrapers never
//! fail the run; a failed fetch or a page with no containers just ends that
//! source's pagination.
//!
//! # Supported Sources
//!
//! | Source | Module | Paging | Date format | Stops when |
//! |--------|--------|--------|-------------|------------|
//! | Jerusalem Post | [`jpost`] | single page | none | after one page |
//! | The Conversation (x2 feeds) | [`conversation`] | `&page=N` from 1 | `5 March 2024` | a page matched nothing |
//! | NREL | [`nrel`] | `?page=N` from 1 | `Mar. 5, 2024` | an item predates the window |
//! | Canary Media | [`canary`] | `/page/N/`, first omitted | `Mar 05, 2024` | either rule |
//! | Utility Dive | [`utilitydive`] | `?page=N`, first omitted | `March 5, 2024` | an item predates the window |
//! | Department of Energy | [`doe`] | `&page=N` from 0 | none | a page is empty |
//!
//! # Date-windowed listings
//!
//! The four dated scrapers implement [`DatedListing`] and share one [`Pager`].
//! Pages are fetched strictly in order within a source so the early-exit rule
//! holds; independent sources may run concurrently.

use crate::dates::DateParseError;
use crate::fetch::Fetcher;
use crate::models::{Article, DateRange};
use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

pub mod canary;
pub mod conversation;
pub mod doe;
pub mod jpost;
pub mod nrel;
pub mod utilitydive;

pub use conversation::Feed;

/// When a date-windowed listing stops requesting further pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopPolicy {
    /// Stop as soon as an item older than the window start is seen.
    BeforeWindow,
    /// Finish the page, then stop if none of its items fell in the window.
    NoMatchOnPage,
    /// Both of the above.
    Either,
}

impl StopPolicy {
    fn stops_on_before(self) -> bool {
        matches!(self, StopPolicy::BeforeWindow | StopPolicy::Either)
    }

    fn stops_on_no_match(self) -> bool {
        matches!(self, StopPolicy::NoMatchOnPage | StopPolicy::Either)
    }
}

/// One source's view of a paginated, date-ordered listing.
pub trait DatedListing {
    /// Label used in logs.
    fn name(&self) -> &str;

    /// URL of the given page number.
    fn page_url(&self, page: u32) -> String;

    /// Selector matching one container per listed article.
    fn containers(&self) -> &Selector;

    /// Raw date text of a container, if it has one.
    fn date_text(&self, container: ElementRef<'_>) -> Option<String>;

    fn parse_date(&self, text: &str) -> Result<NaiveDate, DateParseError>;

    /// Build the article for an in-window container. `None` when the markup
    /// lacks a title or link.
    fn article(&self, container: ElementRef<'_>, date: NaiveDate) -> Option<Article>;
}

/// Pagination strategy shared by the dated listings.
#[derive(Debug, Clone, Copy)]
pub struct Pager {
    pub first_page: u32,
    pub stop: StopPolicy,
}

/// Outcome of scanning a single page.
#[derive(Debug, Default)]
struct PageScan {
    containers: usize,
    articles: Vec<Article>,
    saw_before_window: bool,
}

impl Pager {
    pub fn new(first_page: u32, stop: StopPolicy) -> Self {
        Self { first_page, stop }
    }

    /// Walk the listing page by page until the stop policy, an empty page or
    /// a failed fetch ends it.
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Source of page markup
    /// * `listing` - Per-source URLs, selectors and date format
    /// * `range` - Inclusive reporting window
    ///
    /// # Returns
    ///
    /// In-window articles in listing order. Items with unreadable dates are
    /// logged and skipped.
    #[instrument(level = "info", skip_all, fields(source = listing.name()))]
    pub async fn run<F, L>(&self, fetcher: &F, listing: &L, range: &DateRange) -> Vec<Article>
    where
        F: Fetcher,
        L: DatedListing,
    {
        let mut articles = Vec::new();
        let mut page = self.first_page;

        loop {
            let url = listing.page_url(page);
            let Some(html) = fetcher.fetch(&url).await else {
                break;
            };

            let scan = self.scan_page(listing, &html, range);
            debug!(
                page,
                containers = scan.containers,
                matched = scan.articles.len(),
                saw_before_window = scan.saw_before_window,
                "Scanned page"
            );
            if scan.containers == 0 {
                break;
            }

            let matched = scan.articles.len();
            articles.extend(scan.articles);

            if self.stop.stops_on_before() && scan.saw_before_window {
                break;
            }
            if self.stop.stops_on_no_match() && matched == 0 {
                break;
            }
            page += 1;
        }

        info!(count = articles.len(), pages = page - self.first_page + 1, "Scraped listing");
        articles
    }

    fn scan_page<L: DatedListing>(&self, listing: &L, html: &str, range: &DateRange) -> PageScan {
        let document = Html::parse_document(html);
        let mut scan = PageScan::default();

        for container in document.select(listing.containers()) {
            scan.containers += 1;

            let Some(text) = listing.date_text(container) else {
                continue;
            };
            let date = match listing.parse_date(&text) {
                Ok(date) => date,
                Err(e) => {
                    warn!(source = listing.name(), error = %e, "Error parsing date; skipping item");
                    continue;
                }
            };

            if range.contains(date) {
                if let Some(article) = listing.article(container, date) {
                    scan.articles.push(article);
                }
            } else if range.is_before(date) {
                scan.saw_before_window = true;
                if self.stop.stops_on_before() {
                    break;
                }
            }
        }

        scan
    }
}

/// Every source scraped for the digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceExtractor {
    JerusalemPost,
    Conversation(Feed),
    Nrel,
    CanaryMedia,
    UtilityDive,
    EnergyDepartment,
}

impl SourceExtractor {
    /// All sources, in digest order.
    pub fn all() -> Vec<Self> {
        vec![
            SourceExtractor::JerusalemPost,
            SourceExtractor::Conversation(Feed::Energy),
            SourceExtractor::Conversation(Feed::ClimateTech),
            SourceExtractor::Nrel,
            SourceExtractor::CanaryMedia,
            SourceExtractor::UtilityDive,
            SourceExtractor::EnergyDepartment,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            SourceExtractor::JerusalemPost => jpost::SOURCE,
            SourceExtractor::Conversation(Feed::Energy) => "The Conversation (energy)",
            SourceExtractor::Conversation(Feed::ClimateTech) => "The Conversation (climate tech)",
            SourceExtractor::Nrel => nrel::SOURCE,
            SourceExtractor::CanaryMedia => canary::SOURCE,
            SourceExtractor::UtilityDive => utilitydive::SOURCE,
            SourceExtractor::EnergyDepartment => doe::SOURCE,
        }
    }

    /// Only the search-driven feeds return off-topic results and need the
    /// keyword filter.
    pub fn needs_keyword_filter(&self) -> bool {
        matches!(self, SourceExtractor::Conversation(_))
    }

    /// Scrape this source for articles relevant to `range`.
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Source of page markup
    /// * `range` - Inclusive reporting window
    ///
    /// # Returns
    ///
    /// The source's articles, never an error: fetch failures only shorten
    /// the list.
    #[instrument(level = "info", skip_all, fields(source = self.name()))]
    pub async fn extract<F: Fetcher>(&self, fetcher: &F, range: &DateRange) -> Vec<Article> {
        info!("Scraping {} articles...", self.name());
        match self {
            SourceExtractor::JerusalemPost => jpost::scrape(fetcher).await,
            SourceExtractor::Conversation(feed) => {
                let listing = conversation::Conversation::new(*feed, range);
                Pager::new(conversation::FIRST_PAGE, conversation::STOP)
                    .run(fetcher, &listing, range)
                    .await
            }
            SourceExtractor::Nrel => {
                Pager::new(nrel::FIRST_PAGE, nrel::STOP)
                    .run(fetcher, &nrel::Nrel, range)
                    .await
            }
            SourceExtractor::CanaryMedia => {
                Pager::new(canary::FIRST_PAGE, canary::STOP)
                    .run(fetcher, &canary::CanaryMedia, range)
                    .await
            }
            SourceExtractor::UtilityDive => {
                Pager::new(utilitydive::FIRST_PAGE, utilitydive::STOP)
                    .run(fetcher, &utilitydive::UtilityDive, range)
                    .await
            }
            SourceExtractor::EnergyDepartment => doe::scrape(fetcher, range).await,
        }
    }
}

/// Trimmed text content of an element.
pub(crate) fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// First descendant of `element` matching `selector`.
pub(crate) fn first<'a>(element: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    element.select(selector).next()
}

/// Trimmed text of the first descendant matching `selector`, if non-empty.
pub(crate) fn first_text(element: ElementRef<'_>, selector: &Selector) -> Option<String> {
    first(element, selector)
        .map(text_of)
        .filter(|text| !text.is_empty())
}

/// `href` of the first descendant matching `selector`, if non-empty.
pub(crate) fn first_href(element: ElementRef<'_>, selector: &Selector) -> Option<String> {
    first(element, selector)
        .and_then(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string)
}

/// Resolve `href` against `base`, leaving absolute hrefs as they are.
pub(crate) fn resolve_href(base: &str, href: &str) -> Option<String> {
    let base = Url::parse(base).ok()?;
    base.join(href).ok().map(String::from)
}
