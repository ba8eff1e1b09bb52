//! Digest rendering.
//!
//! All renderers share [`group_by_category`], which orders category groups by
//! [`Category::PRIORITY`] and keeps article order inside each group.
//!
//! # Submodules
//!
//! - [`console`]: plain-text digest printed to stdout
//! - [`html`]: HTML email body
//! - [`json`]: JSON file for downstream tooling
//!
//! [`Category::PRIORITY`]: crate::postprocess::categories::Category::PRIORITY

pub mod console;
pub mod html;
pub mod json;

use crate::models::Article;
use crate::postprocess::categories::Category;
use itertools::Itertools;

/// A category label and its articles, in digest order.
pub type CategoryGroup<'a> = (String, Vec<&'a Article>);

/// Group articles by category label.
///
/// Known categories come first in priority order; unknown labels follow in
/// order of first appearance. Uncategorized articles are grouped as `Other`.
pub fn group_by_category(articles: &[Article]) -> Vec<CategoryGroup<'_>> {
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
    for article in articles {
        let label = article
            .category
            .clone()
            .unwrap_or_else(|| Category::Other.label().to_string());
        match groups.iter_mut().find(|(l, _)| *l == label) {
            Some((_, members)) => members.push(article),
            None => groups.push((label, vec![article])),
        }
    }
    groups.sort_by_key(|(label, _)| Category::rank(label).unwrap_or(usize::MAX));
    groups
}

/// Distinct source labels in order of first appearance.
pub fn distinct_sources(articles: &[Article]) -> Vec<&str> {
    articles.iter().map(|a| a.source.as_str()).unique().collect()
}
