//! Data models shared by every stage of the pipeline.
//!
//! - [`Article`]: one listing item scraped from a source, enriched in place by
//!   the post-processors
//! - [`DateRange`]: the inclusive reporting window for the current run

use chrono::{Datelike, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Author placeholder used when a source that normally names authors omits one.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// A single article discovered on a source's listing page.
///
/// `title` and `link` are always non-empty: extractors drop items missing
/// either one before they are emitted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Article {
    /// Headline as shown on the listing. Used as the deduplication key.
    pub title: String,
    /// Absolute URL of the article.
    pub link: String,
    /// Human-readable origin, optionally suffixed with a sub-tag.
    pub source: String,
    /// Byline, only collected for the Jerusalem Post.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Publication date, only for date-windowed sources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Topical category assigned by the categorizer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Article {
    /// Create an article with only the required fields set.
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            source: source.into(),
            author: None,
            date: None,
            category: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Inclusive `[start, end]` reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// First day of the month containing `today` through `today`.
    pub fn month_to_date(today: NaiveDate) -> Self {
        Self::new(first_of_month(today), today)
    }

    /// First through last day of the month containing `today`.
    pub fn whole_month(today: NaiveDate) -> Self {
        let start = first_of_month(today);
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(today);
        Self::new(start, end)
    }

    /// Window for a run started now, in local time.
    pub fn current(full_month: bool) -> Self {
        let today = Local::now().date_naive();
        if full_month {
            Self::whole_month(today)
        } else {
            Self::month_to_date(today)
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// True when `date` falls strictly before the window start.
    pub fn is_before(&self, date: NaiveDate) -> bool {
        date < self.start
    }

    /// Month label used in digest headings, e.g. `March 2024`.
    pub fn month_label(&self) -> String {
        self.start.format("%B %Y").to_string()
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
