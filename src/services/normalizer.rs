//! Metric normalization.
//!
//! Converts free-form magnitude strings into numbers and rescales ratings so
//! that site and app records can share one chart axis.

use regex::Regex;
use std::sync::LazyLock;

/// Default upper bound of store ratings.
pub const DEFAULT_MAX_RATING: f64 = 5.0;

/// Everything that is not part of a magnitude: digits, `.`, `k` and `m` survive.
static NON_MAGNITUDE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.km]").unwrap_or_else(|_| unreachable!()));

/// Leading decimal number, the same prefix `parseFloat` would accept.
static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+\.?\d*|\.\d+)").unwrap_or_else(|_| unreachable!()));

/// Parses a magnitude string such as `10M+` or `500k` into a number.
///
/// The input is lowercased and stripped to digits, `.`, `k` and `m`. A `k`
/// sets the multiplier to 1,000; an `m` then overwrites it with 1,000,000,
/// so a string holding both letters is read as millions. The number is the
/// leading decimal prefix of the stripped string. Empty or non-numeric input
/// yields 0.
///
/// # Examples
///
/// ```rust
/// use cybercrawl::parse_magnitude;
///
/// assert_eq!(parse_magnitude("10M+"), 10_000_000.0);
/// assert_eq!(parse_magnitude("500k"), 500_000.0);
/// assert_eq!(parse_magnitude("abc"), 0.0);
/// ```
#[must_use]
pub fn parse_magnitude(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let lowered = s.to_lowercase();
    let clean = NON_MAGNITUDE_CHARS.replace_all(&lowered, "");

    let mut multiplier = 1.0;
    if clean.contains('k') {
        multiplier = 1_000.0;
    }
    if clean.contains('m') {
        multiplier = 1_000_000.0;
    }

    LEADING_NUMBER
        .find(&clean)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map_or(0.0, |n| n * multiplier)
}

/// Rescales a 0-5 rating onto 0-100.
///
/// A missing rating yields 0.
#[must_use]
pub fn normalize_rating(rating: Option<f64>) -> f64 {
    normalize_rating_with_max(rating, DEFAULT_MAX_RATING)
}

/// Rescales a rating onto 0-100 given its upper bound.
///
/// A missing rating, or a non-positive bound, yields 0.
#[must_use]
pub fn normalize_rating_with_max(rating: Option<f64>, max_rating: f64) -> f64 {
    match rating {
        Some(r) if max_rating > 0.0 && r.is_finite() => (r / max_rating) * 100.0,
        _ => 0.0,
    }
}
