//! Shared field normalization primitives.

use chrono::NaiveDate;

/// Remove leading `'0'` characters. This is a textual operation, not a numeric
/// parse, so design numbers like `D0468073` pass through untouched.
pub fn strip_leading_zeros(s: &str) -> String {
    s.trim_start_matches('0').to_string()
}

/// Strictly reparse a date and render it in another layout.
pub fn reformat_date(s: &str, from: &str, to: &str) -> Result<String, chrono::ParseError> {
    let date = NaiveDate::parse_from_str(s.trim(), from)?;
    Ok(date.format(to).to_string())
}

/// Drop one trailing `.` if present.
pub fn trim_trailing_dot(s: &str) -> &str {
    s.strip_suffix('.').unwrap_or(s)
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
