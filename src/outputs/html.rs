//! HTML email body.

use super::{distinct_sources, group_by_category};
use crate::models::Article;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

/// Subject line for the digest email.
pub fn subject(month: &str) -> String {
    format!("Energy & Climate News Digest: {month}")
}

/// Join labels as `A`, `A and B`, or `A, B and C`.
fn human_list(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

/// Render the digest as a standalone HTML document.
pub fn render(articles: &[Article], month: &str) -> String {
    let mut body = String::new();
    let month_text = encode_text(month);

    if articles.is_empty() {
        writeln!(body, "<p>No articles were found for {month_text}.</p>").unwrap();
    } else {
        let sources = distinct_sources(articles);
        writeln!(
            body,
            "<p>This digest collects {} articles published in {month_text} from {}.</p>",
            articles.len(),
            encode_text(&human_list(&sources))
        )
        .unwrap();

        for (category, members) in group_by_category(articles) {
            writeln!(body, "<h2>{}</h2>", encode_text(&category)).unwrap();
            writeln!(body, "<ol>").unwrap();
            for article in members {
                write!(
                    body,
                    "<li><a href=\"{}\">{}</a><br><small>{}",
                    encode_double_quoted_attribute(&article.link),
                    encode_text(&article.title),
                    encode_text(&article.source)
                )
                .unwrap();
                if let Some(author) = &article.author {
                    write!(body, " | {}", encode_text(author)).unwrap();
                }
                if let Some(date) = article.date {
                    write!(body, " | {}", date.format("%B %-d, %Y")).unwrap();
                }
                writeln!(body, "</small></li>").unwrap();
            }
            writeln!(body, "</ol>").unwrap();
        }
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n<body>\n<h1>{title}</h1>\n{body}</body>\n</html>\n",
        title = encode_text(&subject(month)),
    )
}
