//! String helpers for generated test input

use chrono::{Datelike, NaiveDate};
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Default local-part length for generated emails
pub const DEFAULT_RANDOM_LENGTH: usize = 10;

/// Default domain for generated emails
pub const DEFAULT_EMAIL_DOMAIN: &str = "example.com";

/// Generate a random string of exactly `length` characters drawn uniformly
/// from the 62-character alphanumeric alphabet. `length == 0` yields `""`.
pub fn generate_random_string(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Generate a random email address of the form `test_<random10>@<domain>`.
pub fn generate_random_email(domain: &str) -> String {
    format!(
        "test_{}@{}",
        generate_random_string(DEFAULT_RANDOM_LENGTH),
        domain
    )
}

/// Generate a uniform random integer in `[min, max]` inclusive.
///
/// `min <= max` is a precondition; violating it panics rather than being
/// reported as a recoverable error.
pub fn generate_random_number(min: i64, max: i64) -> i64 {
    rand::thread_rng().gen_range(min..=max)
}

/// Format a date by token substitution.
///
/// Recognizes exactly three tokens: `YYYY`, `MM` and `DD` (month and day
/// zero-padded). Any other characters in `format` pass through literally,
/// and tokens absent from `format` are simply omitted from the output.
pub fn format_date(date: NaiveDate, format: &str) -> String {
    format
        .replacen("YYYY", &format!("{:04}", date.year()), 1)
        .replacen("MM", &format!("{:02}", date.month()), 1)
        .replacen("DD", &format!("{:02}", date.day()), 1)
}

/// Truncate a string to `max_length` characters, appending `...` when
/// anything was cut. Strings at or under the limit are returned unchanged.
pub fn truncate_string(s: &str, max_length: usize) -> String {
    if s.chars().count() <= max_length {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_length).collect();
    out.push_str("...");
    out
}

/// Uppercase the first character, leaving the rest unchanged. Empty input
/// yields the empty string.
pub fn capitalize_first_letter(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
