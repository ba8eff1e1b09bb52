//! Parsers for the human-readable dates shown on source listing pages.
//!
//! Every source family prints its dates differently, so each gets its own
//! parser. All of them are pure and fail with [`DateParseError`] carrying the
//! offending text; callers skip the listing item and keep paginating.
//!
//! | Parser | Example | Used by |
//! |--------|---------|---------|
//! | [`parse_abbreviated_month`] | `Mar. 5, 2024`, `June 12, 2024` | NREL |
//! | [`parse_short_month`] | `Mar 05, 2024` | Canary Media |
//! | [`parse_day_month_year`] | `5 March 2024` | The Conversation |
//! | [`parse_spaced_month`] | `March 5, 2024`, `Sept. 9. 2024` | Utility Dive |

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// A listing date that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unable to parse date: {text:?}")]
pub struct DateParseError {
    pub text: String,
}

impl DateParseError {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

static ABBREVIATED_MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+\.?)\s+(\d{1,2}),\s+(\d{4})").unwrap());

/// NREL month tokens. May, June and July have no period.
const ABBREVIATED_MONTHS: [(&str, u32); 12] = [
    ("Jan.", 1),
    ("Feb.", 2),
    ("Mar.", 3),
    ("Apr.", 4),
    ("May", 5),
    ("June", 6),
    ("July", 7),
    ("Aug.", 8),
    ("Sept.", 9),
    ("Oct.", 10),
    ("Nov.", 11),
    ("Dec.", 12),
];

/// Utility Dive month names, compared without their trailing period.
const SPACED_MONTHS: [(&str, u32); 12] = [
    ("Jan", 1),
    ("Feb", 2),
    ("March", 3),
    ("April", 4),
    ("May", 5),
    ("June", 6),
    ("July", 7),
    ("Aug", 8),
    ("Sept", 9),
    ("Oct", 10),
    ("Nov", 11),
    ("Dec", 12),
];

fn lookup(table: &[(&str, u32)], token: &str) -> Option<u32> {
    table
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, month)| *month)
}

/// Parse `Mon[.] D, YYYY` using the NREL month table.
pub fn parse_abbreviated_month(text: &str) -> Result<NaiveDate, DateParseError> {
    let caps = ABBREVIATED_MONTH_RE
        .captures(text)
        .ok_or_else(|| DateParseError::new(text))?;

    let month = lookup(&ABBREVIATED_MONTHS, &caps[1]).ok_or_else(|| DateParseError::new(text))?;
    let day: u32 = caps[2].parse().map_err(|_| DateParseError::new(text))?;
    let year: i32 = caps[3].parse().map_err(|_| DateParseError::new(text))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| DateParseError::new(text))
}

/// Parse the fixed `%b %d, %Y` form, e.g. `Mar 05, 2024`.
pub fn parse_short_month(text: &str) -> Result<NaiveDate, DateParseError> {
    NaiveDate::parse_from_str(text.trim(), "%b %d, %Y").map_err(|_| DateParseError::new(text))
}

/// Parse the fixed `%d %B %Y` form, e.g. `5 March 2024`.
pub fn parse_day_month_year(text: &str) -> Result<NaiveDate, DateParseError> {
    NaiveDate::parse_from_str(text.trim(), "%d %B %Y").map_err(|_| DateParseError::new(text))
}

/// Parse exactly three whitespace-separated tokens: `Month Day[.,] Year`.
pub fn parse_spaced_month(text: &str) -> Result<NaiveDate, DateParseError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let [month, day, year] = tokens.as_slice() else {
        return Err(DateParseError::new(text));
    };

    let month = lookup(&SPACED_MONTHS, month.trim_end_matches('.'))
        .ok_or_else(|| DateParseError::new(text))?;
    let day: u32 = day
        .trim_end_matches(['.', ','])
        .parse()
        .map_err(|_| DateParseError::new(text))?;
    let year: i32 = year.parse().map_err(|_| DateParseError::new(text))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| DateParseError::new(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_abbreviated_month_table() {
        assert_eq!(parse_abbreviated_month("Mar. 5, 2024"), Ok(d(2024, 3, 5)));
        assert_eq!(parse_abbreviated_month("May 14, 2024"), Ok(d(2024, 5, 14)));
        assert_eq!(parse_abbreviated_month("June 3, 2024"), Ok(d(2024, 6, 3)));
        assert_eq!(parse_abbreviated_month("Sept. 30, 2023"), Ok(d(2023, 9, 30)));
        assert_eq!(parse_abbreviated_month("Dec. 1, 2023"), Ok(d(2023, 12, 1)));
    }

    #[test]
    fn test_abbreviated_month_rejects_unknown_tokens() {
        // "Sep." and "March" are not in NREL's table
        let err = parse_abbreviated_month("Sep. 3, 2024").unwrap_err();
        assert_eq!(err.text, "Sep. 3, 2024");
        assert!(parse_abbreviated_month("March 3, 2024").is_err());
        assert!(parse_abbreviated_month("3 March 2024").is_err());
        assert!(parse_abbreviated_month("").is_err());
    }

    #[test]
    fn test_abbreviated_month_rejects_impossible_day() {
        assert!(parse_abbreviated_month("Feb. 30, 2024").is_err());
    }

    #[test]
    fn test_short_month_round_trip() {
        for date in [d(2024, 3, 5), d(2023, 12, 31), d(2024, 2, 29)] {
            let text = date.format("%b %d, %Y").to_string();
            assert_eq!(parse_short_month(&text), Ok(date));
        }
        assert_eq!(parse_short_month("Mar 5, 2024"), Ok(d(2024, 3, 5)));
    }

    #[test]
    fn test_short_month_rejects_malformed() {
        assert!(parse_short_month("5 Mar 2024").is_err());
        assert!(parse_short_month("Mar 5 2024").is_err());
        assert!(parse_short_month("yesterday").is_err());
    }

    #[test]
    fn test_day_month_year_round_trip() {
        for date in [d(2024, 3, 5), d(2024, 11, 30), d(2025, 1, 1)] {
            let text = date.format("%d %B %Y").to_string();
            assert_eq!(parse_day_month_year(&text), Ok(date));
        }
        assert_eq!(parse_day_month_year("5 March 2024"), Ok(d(2024, 3, 5)));
    }

    #[test]
    fn test_day_month_year_rejects_malformed() {
        let err = parse_day_month_year("March 5, 2024").unwrap_err();
        assert_eq!(err.text, "March 5, 2024");
        assert!(parse_day_month_year("31 April 2024").is_err());
    }

    #[test]
    fn test_spaced_month_variants() {
        assert_eq!(parse_spaced_month("March 5, 2024"), Ok(d(2024, 3, 5)));
        assert_eq!(parse_spaced_month("April 12, 2024"), Ok(d(2024, 4, 12)));
        assert_eq!(parse_spaced_month("Sept. 9. 2024"), Ok(d(2024, 9, 9)));
        assert_eq!(parse_spaced_month("Jan. 15, 2025"), Ok(d(2025, 1, 15)));
        assert_eq!(parse_spaced_month("  Oct. 2, 2024 "), Ok(d(2024, 10, 2)));
    }

    #[test]
    fn test_spaced_month_rejects_wrong_token_count() {
        assert!(parse_spaced_month("March 5 , 2024").is_err());
        assert!(parse_spaced_month("March 2024").is_err());
        assert!(parse_spaced_month("").is_err());
    }

    #[test]
    fn test_spaced_month_rejects_unknown_month() {
        // NREL spells "Mar." abbreviated; Utility Dive never does
        assert!(parse_spaced_month("Mar. 5, 2024").is_err());
        assert!(parse_spaced_month("Apr. 5, 2024").is_err());
    }

    #[test]
    fn test_error_message_names_text() {
        let err = parse_short_month("garbage").unwrap_err();
        assert_eq!(err.to_string(), "unable to parse date: \"garbage\"");
    }
}
