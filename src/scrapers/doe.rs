//! Department of Energy newsroom.
//!
//! The newsroom search takes the window as query parameters, so every result
//! is kept without looking at dates. Pages are numbered from 0 and scraping
//! continues until a page comes back empty or fails.

use super::{first_href, first_text, resolve_href};
use crate::fetch::Fetcher;
use crate::models::{Article, DateRange};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{info, instrument};

pub const SOURCE: &str = "Department of Energy";
pub const FIRST_PAGE: u32 = 0;

const NEWSROOM_URL: &str = "https://www.energy.gov/newsroom";
const DOMAIN: &str = "https://www.energy.gov";

static CONTAINER: Lazy<Selector> = Lazy::new(|| Selector::parse("div.search-result").unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("a.search-result-title").unwrap());

/// URL of a newsroom results page for `range`.
pub fn page_url(range: &DateRange, page: u32) -> String {
    format!(
        "{NEWSROOM_URL}?field_display_date_from={}&field_display_date_to={}&page={page}",
        range.start, range.end
    )
}

/// Scrape every newsroom page for the window.
///
/// Pages are numbered from 0 and each one is logged as it is requested.
/// Items are not dated, so nothing is filtered against the window beyond
/// the query itself.
///
/// # Arguments
///
/// * `fetcher` - Source of page markup
/// * `range` - Reporting window passed through as the newsroom date filter
///
/// # Returns
///
/// Every titled result in page order. A failed fetch or a page without
/// results ends the walk.
#[instrument(level = "info", skip_all)]
pub async fn scrape<F: Fetcher>(fetcher: &F, range: &DateRange) -> Vec<Article> {
    let mut articles = Vec::new();
    let mut page = FIRST_PAGE;

    loop {
        info!("Scraping DOE page {}...", page + 1);
        let Some(html) = fetcher.fetch(&page_url(range, page)).await else {
            break;
        };
        let Some(found) = scan_page(&html) else {
            break;
        };
        articles.extend(found);
        page += 1;
    }

    info!(count = articles.len(), "Scraped DOE newsroom");
    articles
}

/// Articles on one page, or `None` when the page has no result containers.
fn scan_page(html: &str) -> Option<Vec<Article>> {
    let document = Html::parse_document(html);
    let containers: Vec<ElementRef<'_>> = document.select(&CONTAINER).collect();
    if containers.is_empty() {
        return None;
    }
    Some(containers.into_iter().filter_map(result_article).collect())
}

fn result_article(container: ElementRef<'_>) -> Option<Article> {
    let title = first_text(container, &TITLE)?;
    let link = resolve_href(DOMAIN, &first_href(container, &TITLE)?)?;
    Some(Article::new(title, link, SOURCE))
}
