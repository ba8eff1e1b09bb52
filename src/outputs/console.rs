//! Plain-text digest for the terminal.

use super::group_by_category;
use crate::models::Article;
use std::fmt::Write;

/// Render the digest as plain text.
pub fn render(articles: &[Article], month: &str) -> String {
    if articles.is_empty() {
        return format!(
            "No articles were found for {month}. There might be an issue with accessing the websites.\n"
        );
    }

    let mut out = String::new();
    writeln!(out, "Found {} unique articles for {month}:", articles.len()).unwrap();

    for (category, members) in group_by_category(articles) {
        writeln!(out, "\n== {category} ({}) ==", members.len()).unwrap();
        for (i, article) in members.iter().enumerate() {
            writeln!(out, "\nArticle {}:", i + 1).unwrap();
            writeln!(out, "Source: {}", article.source).unwrap();
            writeln!(out, "Title: {}", article.title).unwrap();
            writeln!(out, "Link: {}", article.link).unwrap();
            if let Some(author) = &article.author {
                writeln!(out, "Author: {author}").unwrap();
            }
            if let Some(date) = article.date {
                writeln!(out, "Date: {}", date.format("%Y-%m-%d")).unwrap();
            }
            if let Some(category) = &article.category {
                writeln!(out, "Category: {category}").unwrap();
            }
        }
    }
    out
}
