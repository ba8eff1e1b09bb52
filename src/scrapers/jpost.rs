//! Jerusalem Post energy & infrastructure section.
//!
//! Only the section front page is scraped. It has one featured story in a
//! large card and a grid of secondary stories in small cards; both carry a
//! byline, but in different elements. Articles without a byline get
//! [`UNKNOWN_AUTHOR`].
//!
//! Some cards link through Google's AMP cache instead of jpost.com. Those are
//! re-rooted later by [`crate::postprocess::links::reroot_link`].

use super::{first, first_text, resolve_href};
use crate::fetch::Fetcher;
use crate::models::{Article, UNKNOWN_AUTHOR};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{info, instrument, warn};

pub const SOURCE: &str = "Jerusalem Post";
pub const DOMAIN: &str = "https://www.jpost.com";
/// Leading path segments of an AMP cache link (`/c/s/www.jpost.com/...`).
pub const AMP_PREFIX_SEGMENTS: usize = 3;

const SECTION_URL: &str = "https://www.jpost.com/business-and-innovation/energy-and-infrastructure";

static FEATURED: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.category-five-articles-large-item-wrap").unwrap());
static SECONDARY: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.category-five-articles-small-item-wrap").unwrap());
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static FEATURED_AUTHOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.category-five-articles-large-item-reporter").unwrap());
static SECONDARY_AUTHOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.category-five-articles-small-item-author").unwrap());

/// Scrape the section front page.
///
/// # Arguments
///
/// * `fetcher` - Source of page markup
///
/// # Returns
///
/// The featured story followed by the secondary stories, or an empty vector
/// if the page could not be fetched.
#[instrument(level = "info", skip_all)]
pub async fn scrape<F: Fetcher>(fetcher: &F) -> Vec<Article> {
    let Some(html) = fetcher.fetch(SECTION_URL).await else {
        warn!("Jerusalem Post section unavailable");
        return Vec::new();
    };
    let articles = parse_section(&html);
    info!(count = articles.len(), "Scraped Jerusalem Post section");
    articles
}

fn parse_section(html: &str) -> Vec<Article> {
    let document = Html::parse_document(html);
    let featured = document
        .select(&FEATURED)
        .next()
        .and_then(|card| card_article(card, &FEATURED_AUTHOR));
    let secondary = document
        .select(&SECONDARY)
        .filter_map(|card| card_article(card, &SECONDARY_AUTHOR));

    featured.into_iter().chain(secondary).collect()
}

fn card_article(card: ElementRef<'_>, author: &Selector) -> Option<Article> {
    let anchor = first(card, &LINK)?;
    let href = anchor.value().attr("href")?.trim();
    if href.is_empty() {
        return None;
    }

    let title = anchor
        .value()
        .attr("title")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .or_else(|| first_text(card, &LINK))?;

    let link = resolve_href(DOMAIN, href)?;
    let author = first_text(card, author).unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

    Some(Article::new(title, link, SOURCE).with_author(author))
}
