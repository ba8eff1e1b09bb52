//! The Conversation search feeds.
//!
//! Two searches (`energy` and `climate tech`) share this scraper. Results are
//! sorted by relevance, not date, so an old result mid-page says nothing
//! about later pages; pagination only stops once a whole page yields no
//! in-window article. The search itself is already constrained to the
//! window through `date_from`/`date_to`.

use super::{DatedListing, StopPolicy, first, first_href, first_text, resolve_href};
use crate::dates::{DateParseError, parse_day_month_year};
use crate::models::{Article, DateRange};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

pub const SOURCE: &str = "The Conversation";
pub const FIRST_PAGE: u32 = 1;
pub const STOP: StopPolicy = StopPolicy::NoMatchOnPage;

const SEARCH_URL: &str = "https://theconversation.com/global/search";
const DOMAIN: &str = "https://theconversation.com";

static CONTAINER: Lazy<Selector> = Lazy::new(|| Selector::parse("article.result").unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h1.legacy").unwrap());
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static DATE: Lazy<Selector> = Lazy::new(|| Selector::parse("time").unwrap());

/// Which search the feed runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    Energy,
    ClimateTech,
}

impl Feed {
    fn query(self) -> &'static str {
        match self {
            Feed::Energy => "energy",
            Feed::ClimateTech => "climate+tech",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Conversation {
    feed: Feed,
    search_url: String,
}

impl Conversation {
    pub fn new(feed: Feed, range: &DateRange) -> Self {
        let search_url = format!(
            "{SEARCH_URL}?q={}&sort=relevancy&language=en&date=custom&date_from={}&date_to={}",
            feed.query(),
            range.start,
            range.end
        );
        Self { feed, search_url }
    }
}

impl DatedListing for Conversation {
    fn name(&self) -> &str {
        match self.feed {
            Feed::Energy => "The Conversation (energy)",
            Feed::ClimateTech => "The Conversation (climate tech)",
        }
    }

    fn page_url(&self, page: u32) -> String {
        format!("{}&page={page}", self.search_url)
    }

    fn containers(&self) -> &Selector {
        &CONTAINER
    }

    fn date_text(&self, container: ElementRef<'_>) -> Option<String> {
        first_text(container, &DATE)
    }

    fn parse_date(&self, text: &str) -> Result<NaiveDate, DateParseError> {
        parse_day_month_year(text)
    }

    fn article(&self, container: ElementRef<'_>, date: NaiveDate) -> Option<Article> {
        let heading = first(container, &TITLE)?;
        let title = first_text(container, &TITLE)?;
        let link = resolve_href(DOMAIN, &first_href(heading, &LINK)?)?;
        Some(Article::new(title, link, SOURCE).with_date(date))
    }
}
