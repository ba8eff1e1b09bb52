//! Canary Media articles.
//!
//! WordPress-style pagination: the first page is the bare archive URL and
//! later pages live under `/page/N/`. Each card carries a topic badge that is
//! appended to the source label, e.g. `Canary Media - Grid Edge`.

use super::{DatedListing, StopPolicy, first_href, first_text, resolve_href};
use crate::dates::{DateParseError, parse_short_month};
use crate::models::Article;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

pub const SOURCE: &str = "Canary Media";
pub const FIRST_PAGE: u32 = 1;
pub const STOP: StopPolicy = StopPolicy::Either;

const BASE_URL: &str = "https://www.canarymedia.com/articles";
const DOMAIN: &str = "https://www.canarymedia.com";

static CONTAINER: Lazy<Selector> = Lazy::new(|| Selector::parse("div.article-card").unwrap());
static DATE: Lazy<Selector> = Lazy::new(|| Selector::parse("time.article-card__date").unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h3.article-card__title a[href]").unwrap());
static BADGE: Lazy<Selector> = Lazy::new(|| Selector::parse("span.article-card__badge").unwrap());

#[derive(Debug, Clone, Copy)]
pub struct CanaryMedia;

impl DatedListing for CanaryMedia {
    fn name(&self) -> &str {
        SOURCE
    }

    fn page_url(&self, page: u32) -> String {
        if page <= FIRST_PAGE {
            BASE_URL.to_string()
        } else {
            format!("{BASE_URL}/page/{page}/")
        }
    }

    fn containers(&self) -> &Selector {
        &CONTAINER
    }

    fn date_text(&self, container: ElementRef<'_>) -> Option<String> {
        first_text(container, &DATE)
    }

    fn parse_date(&self, text: &str) -> Result<NaiveDate, DateParseError> {
        parse_short_month(text)
    }

    fn article(&self, container: ElementRef<'_>, date: NaiveDate) -> Option<Article> {
        let title = first_text(container, &TITLE)?;
        let link = resolve_href(DOMAIN, &first_href(container, &TITLE)?)?;
        let source = match first_text(container, &BADGE) {
            Some(badge) => format!("{SOURCE} - {badge}"),
            None => SOURCE.to_string(),
        };
        Some(Article::new(title, link, source).with_date(date))
    }
}
