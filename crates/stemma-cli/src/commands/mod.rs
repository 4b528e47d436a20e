//! CLI command implementations

use chrono::NaiveDate;

pub mod completions;
pub mod kin;
pub mod link;
pub mod person;
pub mod union;

/// Parse a YYYY-MM-DD argument with a friendly error
pub(crate) fn parse_date_arg(text: &str, what: &str) -> anyhow::Result<NaiveDate> {
    text.trim()
        .parse::<NaiveDate>()
        .map_err(|_| anyhow::anyhow!("{} must be a date in YYYY-MM-DD format, got '{}'", what, text))
}
