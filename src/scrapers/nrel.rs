//! National Renewable Energy Laboratory news releases.
//!
//! The listing at `https://www.nrel.gov/news/news.html` is newest-first, so
//! scraping stops at the first release dated before the window. NREL dates
//! use its own month abbreviations (`Sept. 30, 2024`, `June 3, 2024`).
//! Every release is filed under the `Research` category.

use super::{DatedListing, StopPolicy, first, first_href, first_text, resolve_href};
use crate::dates::{DateParseError, parse_abbreviated_month};
use crate::models::Article;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

pub const SOURCE: &str = "NREL";
pub const CATEGORY: &str = "Research";
pub const FIRST_PAGE: u32 = 1;
pub const STOP: StopPolicy = StopPolicy::BeforeWindow;

const BASE_URL: &str = "https://www.nrel.gov/news/news.html";
const DOMAIN: &str = "https://www.nrel.gov";

static CONTAINER: Lazy<Selector> = Lazy::new(|| Selector::parse("div.media-block").unwrap());
static DATE: Lazy<Selector> = Lazy::new(|| Selector::parse("p.date").unwrap());
static HEADER: Lazy<Selector> = Lazy::new(|| Selector::parse("h3.header").unwrap());
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

#[derive(Debug, Clone, Copy)]
pub struct Nrel;

impl DatedListing for Nrel {
    fn name(&self) -> &str {
        SOURCE
    }

    fn page_url(&self, page: u32) -> String {
        format!("{BASE_URL}?page={page}")
    }

    fn containers(&self) -> &Selector {
        &CONTAINER
    }

    fn date_text(&self, container: ElementRef<'_>) -> Option<String> {
        first_text(container, &DATE)
    }

    fn parse_date(&self, text: &str) -> Result<NaiveDate, DateParseError> {
        parse_abbreviated_month(text)
    }

    fn article(&self, container: ElementRef<'_>, date: NaiveDate) -> Option<Article> {
        let header = first(container, &HEADER)?;
        let title = first_text(container, &HEADER)?;
        let link = resolve_href(DOMAIN, &first_href(header, &LINK)?)?;
        Some(
            Article::new(title, link, SOURCE)
                .with_date(date)
                .with_category(CATEGORY),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::StaticFetcher;
    use crate::models::DateRange;
    use crate::scrapers::SourceExtractor;

    fn release(title: &str, slug: &str, date: &str) -> String {
        format!(
            r#"<div class="media-block">
                 <p class="date">{date}</p>
                 <h3 class="header"><a href="/news/program/2024/{slug}.html">{title}</a></h3>
               </div>"#
        )
    }

    fn page(releases: &[String]) -> String {
        format!("<html><body><div class=\"views\">{}</div></body></html>", releases.concat())
    }

    fn march() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_three_articles_over_two_pages() {
        let fetcher = StaticFetcher::new()
            .page(
                &Nrel.page_url(1),
                page(&[
                    release("Solar Cell Efficiency Record", "solar-record", "Mar. 20, 2024"),
                    release("Wind Forecasting Tool Released", "wind-tool", "Mar. 14, 2024"),
                ]),
            )
            .page(
                &Nrel.page_url(2),
                page(&[
                    release("Grid Modernization Study", "grid-study", "Mar. 4, 2024"),
                    release("Hydrogen Storage Milestone", "h2-storage", "Feb. 27, 2024"),
                ]),
            )
            .page(
                &Nrel.page_url(3),
                page(&[release("Never Fetched", "never", "Mar. 2, 2024")]),
            );

        let articles = SourceExtractor::Nrel.extract(&fetcher, &march()).await;

        assert_eq!(articles.len(), 3);
        assert_eq!(fetcher.calls().len(), 2);
        assert_eq!(articles[0].title, "Solar Cell Efficiency Record");
        assert_eq!(
            articles[0].link,
            "https://www.nrel.gov/news/program/2024/solar-record.html"
        );
        assert_eq!(articles[0].source, "NREL");
        assert_eq!(articles[0].category.as_deref(), Some("Research"));
        assert_eq!(articles[2].date, NaiveDate::from_ymd_opt(2024, 3, 4));
    }

    #[tokio::test]
    async fn test_absolute_and_relative_hrefs_resolve_once() {
        let absolute = r#"<div class="media-block">
                 <p class="date">Mar. 6, 2024</p>
                 <h3 class="header"><a href="https://www.nrel.gov/news/program/2024/abs.html">Absolute</a></h3>
               </div>"#;
        let fetcher = StaticFetcher::new().page(
            &Nrel.page_url(1),
            page(&[absolute.to_string(), release("Relative", "rel", "Mar. 5, 2024")]),
        );

        let articles = SourceExtractor::Nrel.extract(&fetcher, &march()).await;

        let links: Vec<_> = articles.iter().map(|a| a.link.as_str()).collect();
        assert_eq!(
            links,
            vec![
                "https://www.nrel.gov/news/program/2024/abs.html",
                "https://www.nrel.gov/news/program/2024/rel.html",
            ]
        );
    }

    #[tokio::test]
    async fn test_release_without_header_is_skipped() {
        let fetcher = StaticFetcher::new()
            .page(
                &Nrel.page_url(1),
                page(&[
                    r#"<div class="media-block"><p class="date">Mar. 9, 2024</p></div>"#.to_string(),
                    release("Kept", "kept", "Mar. 8, 2024"),
                    release("Too Old", "old", "Jan. 8, 2024"),
                ]),
            );

        let articles = SourceExtractor::Nrel.extract(&fetcher, &march()).await;
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Kept");
    }
}
