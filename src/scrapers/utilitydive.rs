//! Utility Dive renewable-energy topic feed.
//!
//! Feed items carry a topic label appended to the source name
//! (`Utility Dive - Storage`). Dates are written AP-style with March and
//! April spelled out (`March 5, 2024`, `Sept. 9, 2024`).
//!
//! Most hrefs are site-relative, but sponsored and cross-posted items come
//! through absolute. The domain is prepended unconditionally either way; the
//! resulting `https://www.utilitydive.comhttps://...` links, including those
//! pointing at sister sites, are stripped back to the absolute href by
//! [`crate::postprocess::links::fix_doubled_domain`].

use super::{DatedListing, StopPolicy, first_href, first_text};
use crate::dates::{DateParseError, parse_spaced_month};
use crate::models::Article;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

pub const SOURCE: &str = "Utility Dive";
pub const DOMAIN: &str = "https://www.utilitydive.com";
pub const FIRST_PAGE: u32 = 1;
pub const STOP: StopPolicy = StopPolicy::BeforeWindow;

const BASE_URL: &str = "https://www.utilitydive.com/topic/renewable-energy/";

static CONTAINER: Lazy<Selector> = Lazy::new(|| Selector::parse("li.feed__item").unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h3.feed__title a[href]").unwrap());
static DATE: Lazy<Selector> = Lazy::new(|| Selector::parse("span.feed__date").unwrap());
static TOPIC: Lazy<Selector> = Lazy::new(|| Selector::parse("span.topic-label").unwrap());

#[derive(Debug, Clone, Copy)]
pub struct UtilityDive;

impl DatedListing for UtilityDive {
    fn name(&self) -> &str {
        SOURCE
    }

    fn page_url(&self, page: u32) -> String {
        if page <= FIRST_PAGE {
            BASE_URL.to_string()
        } else {
            format!("{BASE_URL}?page={page}")
        }
    }

    fn containers(&self) -> &Selector {
        &CONTAINER
    }

    fn date_text(&self, container: ElementRef<'_>) -> Option<String> {
        first_text(container, &DATE)
    }

    fn parse_date(&self, text: &str) -> Result<NaiveDate, DateParseError> {
        parse_spaced_month(text)
    }

    fn article(&self, container: ElementRef<'_>, date: NaiveDate) -> Option<Article> {
        let title = first_text(container, &TITLE)?;
        let href = first_href(container, &TITLE)?;
        let source = match first_text(container, &TOPIC) {
            Some(topic) => format!("{SOURCE} - {topic}"),
            None => SOURCE.to_string(),
        };
        Some(Article::new(title, format!("{DOMAIN}{href}"), source).with_date(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::StaticFetcher;
    use crate::models::DateRange;
    use crate::postprocess::PostProcessor;
    use crate::scrapers::SourceExtractor;

    fn item(title: &str, href: &str, topic: &str, date: &str) -> String {
        format!(
            r#"<li class="row feed__item">
                 <span class="topic-label">{topic}</span>
                 <h3 class="feed__title"><a href="{href}">{title}</a></h3>
                 <span class="feed__date">{date}</span>
               </li>"#
        )
    }

    fn page(items: &[String]) -> String {
        format!("<html><body><ul>{}</ul></body></html>", items.concat())
    }

    fn march() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        )
    }

    #[test]
    fn test_page_urls() {
        assert_eq!(UtilityDive.page_url(1), "https://www.utilitydive.com/topic/renewable-energy/");
        assert_eq!(
            UtilityDive.page_url(2),
            "https://www.utilitydive.com/topic/renewable-energy/?page=2"
        );
    }

    #[tokio::test]
    async fn test_topic_label_and_raw_links() {
        let fetcher = StaticFetcher::new().page(
            &UtilityDive.page_url(1),
            page(&[
                item("Battery Fleet Doubles", "/news/battery-fleet-doubles/710000/", "Storage", "March 12, 2024"),
                item(
                    "Sponsored Wind Outlook",
                    "https://www.utilitydive.com/spons/wind-outlook/710001/",
                    "Wind",
                    "March 11, 2024",
                ),
                item("Old News", "/news/old/700000/", "Solar", "Feb. 29, 2024"),
            ]),
        );

        let articles = SourceExtractor::UtilityDive.extract(&fetcher, &march()).await;

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].source, "Utility Dive - Storage");
        assert_eq!(
            articles[0].link,
            "https://www.utilitydive.com/news/battery-fleet-doubles/710000/"
        );
        assert_eq!(
            articles[1].link,
            "https://www.utilitydive.comhttps://www.utilitydive.com/spons/wind-outlook/710001/"
        );
        assert_eq!(fetcher.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_cross_posted_link_repaired_after_merge() {
        let fetcher = StaticFetcher::new().page(
            &UtilityDive.page_url(1),
            page(&[item(
                "City Microgrids Expand",
                "https://www.smartcitiesdive.com/news/microgrids/710002/",
                "Distributed Energy",
                "March 8, 2024",
            )]),
        );

        let articles = SourceExtractor::UtilityDive.extract(&fetcher, &march()).await;
        let merged = PostProcessor::default().run(vec![(SourceExtractor::UtilityDive, articles)]);

        assert_eq!(merged[0].link, "https://www.smartcitiesdive.com/news/microgrids/710002/");
    }
}
