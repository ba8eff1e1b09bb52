//! Topical categories and the rule-based classifier that assigns them.
//!
//! Rules are checked in order against the title and source; the first rule
//! with a matching keyword wins, so a title mentioning both the grid and the
//! climate lands in [`Category::Grid`]. Keywords match whole words, case
//! insensitively, with an optional plural `s` (`ev` matches `EVs:` but not
//! `every`).

use crate::models::Article;
use regex::{Regex, RegexBuilder};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Israel,
    Grid,
    HydrogenGas,
    Renewables,
    ElectricVehicles,
    Climate,
    AiData,
    Research,
    Other,
}

impl Category {
    /// Digest order. Categories not listed here sort after all of these.
    pub const PRIORITY: [Category; 9] = [
        Category::Israel,
        Category::Grid,
        Category::HydrogenGas,
        Category::Renewables,
        Category::ElectricVehicles,
        Category::Climate,
        Category::AiData,
        Category::Research,
        Category::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Israel => "Israel",
            Category::Grid => "Grid & Storage",
            Category::HydrogenGas => "Hydrogen & Gas",
            Category::Renewables => "Electricity & Renewables",
            Category::ElectricVehicles => "Electric Vehicles",
            Category::Climate => "Climate",
            Category::AiData => "AI & Data Centers",
            Category::Research => "Research",
            Category::Other => "Other",
        }
    }

    /// Position of `label` in [`Category::PRIORITY`], if it is one of ours.
    pub fn rank(label: &str) -> Option<usize> {
        Self::PRIORITY.iter().position(|c| c.label() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone)]
struct Rule {
    category: Category,
    pattern: Regex,
}

impl Rule {
    fn new(category: Category, keywords: &[&str]) -> Self {
        let alternatives = keywords.iter().map(|k| regex::escape(k)).collect::<Vec<_>>().join("|");
        let pattern = RegexBuilder::new(&format!(r"\b(?:{alternatives})s?\b"))
            .case_insensitive(true)
            .build()
            .expect("escaped keywords form a valid pattern");
        Self { category, pattern }
    }
}

/// Ordered keyword rules mapping an article to exactly one [`Category`].
#[derive(Debug, Clone)]
pub struct Categorizer {
    rules: Vec<Rule>,
}

impl Categorizer {
    pub fn new(rules: Vec<(Category, Vec<&str>)>) -> Self {
        Self {
            rules: rules
                .into_iter()
                .filter(|(_, keywords)| !keywords.is_empty())
                .map(|(category, keywords)| Rule::new(category, &keywords))
                .collect(),
        }
    }

    /// Category for `article`, falling back to [`Category::Other`].
    pub fn classify(&self, article: &Article) -> Category {
        let haystack = format!("{} {}", article.title, article.source);
        self.rules
            .iter()
            .find(|rule| rule.pattern.is_match(&haystack))
            .map(|rule| rule.category)
            .unwrap_or(Category::Other)
    }

    /// Fill in `article.category` unless the source already reported one.
    pub fn assign(&self, article: &mut Article) {
        if article.category.is_none() {
            article.category = Some(self.classify(article).label().to_string());
        }
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new(vec![
            (Category::Israel, vec!["jerusalem post", "israel"]),
            (
                Category::Grid,
                vec![
                    "grid",
                    "transmission",
                    "battery",
                    "batteries",
                    "storage",
                    "interconnect",
                    "interconnection",
                ],
            ),
            (
                Category::HydrogenGas,
                vec!["hydrogen", "natural gas", "lng", "gas", "pipeline"],
            ),
            (
                Category::Renewables,
                vec!["solar", "wind", "renewable", "electricity", "power", "nuclear", "geothermal"],
            ),
            (
                Category::ElectricVehicles,
                vec!["electric vehicle", "ev", "charging", "charger", "e-bike"],
            ),
            (
                Category::Climate,
                vec![
                    "climate",
                    "carbon",
                    "decarbonization",
                    "decarbonisation",
                    "emission",
                    "warming",
                    "net zero",
                    "net-zero",
                ],
            ),
            (
                Category::AiData,
                vec!["ai", "artificial intelligence", "data center", "data centre", "machine learning"],
            ),
        ])
    }
}
