//! Relevance filter for search-driven feeds.

use crate::models::Article;

/// Energy and climate terms that mark a title as on-topic.
pub const DEFAULT_KEYWORDS: [&str; 20] = [
    "energy",
    "climate",
    "solar",
    "wind",
    "renewable",
    "electricity",
    "power",
    "grid",
    "battery",
    "storage",
    "hydrogen",
    "gas",
    "oil",
    "nuclear",
    "carbon",
    "emission",
    "electric vehicle",
    "ev ",
    "fossil",
    "heat pump",
];

/// Keeps articles whose title contains at least one keyword, ignoring case.
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    keywords: Vec<String>,
}

impl KeywordFilter {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn matches(&self, article: &Article) -> bool {
        let title = article.title.to_lowercase();
        self.keywords.iter().any(|k| title.contains(k.as_str()))
    }
}

impl Default for KeywordFilter {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS)
    }
}
