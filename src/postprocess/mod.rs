//! Merging and cleaning of the per-source article lists.
//!
//! 1. Per source: keyword filter for the search feeds, link repair for the
//!    sources known to emit malformed links
//! 2. [`aggregate`]: concatenate in source order, keep the first article per
//!    exact title
//! 3. Categorize every surviving article
//!
//! # Submodules
//!
//! - [`keywords`]: title relevance filter
//! - [`links`]: link repair rules
//! - [`categories`]: categories and the ordered classifier

pub mod categories;
pub mod keywords;
pub mod links;

use crate::models::Article;
use crate::scrapers::{SourceExtractor, jpost, utilitydive};
use categories::Categorizer;
use itertools::Itertools;
use keywords::KeywordFilter;
use tracing::{debug, info, instrument};

/// Concatenate per-source lists and drop repeated titles, keeping the first.
///
/// Titles are compared exactly: no case folding, no whitespace trimming.
pub fn aggregate<I>(batches: I) -> Vec<Article>
where
    I: IntoIterator<Item = Vec<Article>>,
{
    batches
        .into_iter()
        .flatten()
        .unique_by(|article| article.title.clone())
        .collect()
}

/// Post-processing stages, configured once per run.
#[derive(Debug, Clone, Default)]
pub struct PostProcessor {
    filter: KeywordFilter,
    categorizer: Categorizer,
}

impl PostProcessor {
    pub fn new(filter: KeywordFilter, categorizer: Categorizer) -> Self {
        Self {
            filter,
            categorizer,
        }
    }

    /// Source-specific cleanup applied before merging.
    pub fn clean(&self, source: SourceExtractor, articles: Vec<Article>) -> Vec<Article> {
        let before = articles.len();
        let cleaned: Vec<Article> = articles
            .into_iter()
            .filter(|a| !source.needs_keyword_filter() || self.filter.matches(a))
            .map(|mut a| {
                repair_link(source, &mut a);
                a
            })
            .collect();
        debug!(source = source.name(), before, after = cleaned.len(), "Cleaned source batch");
        cleaned
    }

    /// Clean, merge and categorize everything the scrapers returned.
    #[instrument(level = "info", skip_all)]
    pub fn run(&self, batches: Vec<(SourceExtractor, Vec<Article>)>) -> Vec<Article> {
        let scraped: usize = batches.iter().map(|(_, a)| a.len()).sum();
        let cleaned = batches
            .into_iter()
            .map(|(source, articles)| self.clean(source, articles));

        let mut unique = aggregate(cleaned);
        for article in &mut unique {
            self.categorizer.assign(article);
        }

        info!(scraped, unique = unique.len(), "Post-processed articles");
        unique
    }
}

fn repair_link(source: SourceExtractor, article: &mut Article) {
    match source {
        SourceExtractor::UtilityDive => {
            article.link = links::fix_doubled_domain(&article.link, utilitydive::DOMAIN);
        }
        SourceExtractor::JerusalemPost => {
            article.link =
                links::reroot_link(&article.link, jpost::DOMAIN, jpost::AMP_PREFIX_SEGMENTS);
        }
        _ => {}
    }
}
