//! JSON digest output.
//!
//! One file per reporting month, overwritten on every run:
//! ```text
//! json_output_dir/
//! └── 2024-03.json
//! ```

use crate::models::{Article, DateRange};
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write the categorized digest as a JSON array of articles.
///
/// Creates `json_output_dir` if needed and overwrites any digest already
/// written for the same month.
///
/// # Arguments
///
/// * `articles` - The deduplicated, categorized articles
/// * `range` - Reporting window; its start month names the file
/// * `json_output_dir` - Base directory for JSON output
///
/// # Returns
///
/// The path that was written, or an error if directory creation,
/// serialization or the write fails.
///
/// # Output Path
///
/// The file is written to: `{json_output_dir}/{YYYY-MM}.json`
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_digest(
    articles: &[Article],
    range: &DateRange,
    json_output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(articles)?;

    info!(%json_output_dir, "Ensuring JSON directory exists");
    if let Err(e) = fs::create_dir_all(json_output_dir).await {
        error!(%json_output_dir, error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = PathBuf::from(json_output_dir).join(format!("{}.json", range.start.format("%Y-%m")));
    fs::write(&path, json).await?;
    info!(path = %path.display(), count = articles.len(), "Wrote JSON digest");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_write_digest_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");
        let range = DateRange::month_to_date(NaiveDate::from_ymd_opt(2024, 3, 18).unwrap());
        let articles = vec![
            Article::new("Solar record", "https://www.nrel.gov/a", "NREL")
                .with_date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
                .with_category("Research"),
        ];

        let path = write_digest(&articles, &range, out.to_str().unwrap()).await.unwrap();

        assert!(path.ends_with("2024-03.json"));
        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<Article> = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, articles);
    }
}
