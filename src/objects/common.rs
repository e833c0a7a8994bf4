//! Value coercions shared across feed records.
//!
//! Feed text arrives as free-form strings. The helpers here turn that text into
//! typed values:
//! - [`parse_timestamp`] - RFC 2822 feed dates (with an RFC 3339 fallback)
//! - [`parse_duration`] - `[[HH:]MM:]SS` or bare-second durations
//! - [`parse_integer`] - lenient leading-digit integers
//! - [`normalize_language`] - `xx-yy` lowercase locale codes
//! - [`parse_explicit`] - the iTunes explicit flag
//!
//! None of these fail loudly. A value that cannot be coerced comes back as
//! `None`, and the field it would have populated is left unset.

use chrono::{DateTime, FixedOffset};

// ============================================================================
// Timestamps
// ============================================================================

/// Parses a feed date into a timestamp.
///
/// RSS mandates RFC 2822 (`Mon, 15 Jun 2014 19:00:00 GMT`), but enough feeds
/// publish ISO 8601 that RFC 3339 is accepted as well.
pub fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    DateTime::parse_from_rfc2822(s)
        .or_else(|_| DateTime::parse_from_rfc3339(s))
        .ok()
}

// ============================================================================
// Numbers
// ============================================================================

/// Multipliers between adjacent duration units, least significant first
/// (seconds to minutes, minutes to hours, hours to days).
const DURATION_STEPS: [u64; 3] = [60, 60, 24];

/// Parses the leading decimal digits of a string.
///
/// Leading whitespace and a `+` sign are skipped and anything after the
/// digits is ignored, so `"8727310 bytes"` yields `8727310`. Returns `None`
/// when no digits lead the string or the value overflows.
pub fn parse_integer(s: &str) -> Option<u64> {
    let s = s.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);

    let digit_end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(s.len());

    if digit_end == 0 {
        return None;
    }

    s[..digit_end].parse().ok()
}

/// Parses an episode duration into seconds.
///
/// Accepts a bare number of seconds (`"638"`) or colon-separated components,
/// most significant first (`"1:03:13"`, `"03:13"`). Components are summed by
/// position only; `"90:00"` is 5400 seconds even though 90 is not a valid
/// minute count.
pub fn parse_duration(s: &str) -> Option<u64> {
    s.trim()
        .split(':')
        .rev()
        .enumerate()
        .try_fold(0u64, |total, (index, component)| {
            if index > DURATION_STEPS.len() {
                return None;
            }
            let multiplier: u64 = DURATION_STEPS[..index].iter().product();
            let value = parse_integer(component)?;
            total.checked_add(value.checked_mul(multiplier)?)
        })
}

// ============================================================================
// Text flags
// ============================================================================

/// Normalizes a language code to a lowercase `xx-yy` locale.
///
/// Codes already carrying a region (`en-US`) are only lowercased. A bare
/// `en` becomes `en-us`; any other bare code is doubled, so `de` becomes
/// `de-de`.
pub fn normalize_language(s: &str) -> String {
    let language = if has_region(s) {
        s.to_string()
    } else if s == "en" {
        "en-us".to_string()
    } else {
        format!("{}-{}", s, s)
    };
    language.to_lowercase()
}

/// Returns true if the string contains a `ww-ww` run of word characters.
fn has_region(s: &str) -> bool {
    fn is_word(b: u8) -> bool {
        b.is_ascii_alphanumeric() || b == b'_'
    }

    s.as_bytes().windows(5).any(|w| {
        is_word(w[0]) && is_word(w[1]) && w[2] == b'-' && is_word(w[3]) && is_word(w[4])
    })
}

/// Parses the iTunes explicit flag. Only the exact text `yes` is explicit.
pub fn parse_explicit(s: &str) -> bool {
    s == "yes"
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_timestamp_rfc2822() {
        let ts = parse_timestamp("Sun, 15 Jun 2014 19:00:00 GMT").unwrap();
        assert_eq!(ts.year(), 2014);
        assert_eq!(ts.month(), 6);
        assert_eq!(ts.day(), 15);
        assert_eq!(ts.hour(), 19);
    }

    #[test]
    fn test_parse_timestamp_offset() {
        let ts = parse_timestamp("Wed, 02 Dec 2015 14:00:00 -0500").unwrap();
        assert_eq!(ts.offset().local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn test_parse_timestamp_rfc3339_fallback() {
        let ts = parse_timestamp("2024-01-15T10:30:00Z").unwrap();
        assert_eq!(ts.year(), 2024);
        assert_eq!(ts.minute(), 30);
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("last tuesday").is_none());
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("638"), Some(638));
        assert_eq!(parse_integer(" 60"), Some(60));
        assert_eq!(parse_integer("+5"), Some(5));
        assert_eq!(parse_integer("8727310 bytes"), Some(8727310));
        assert_eq!(parse_integer("13.7"), Some(13));
        assert_eq!(parse_integer(""), None);
        assert_eq!(parse_integer("abc"), None);
        assert_eq!(parse_integer("-5"), None);
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("1:03:13"), Some(3793));
        assert_eq!(parse_duration("638"), Some(638));
        assert_eq!(parse_duration("03:13"), Some(193));
        assert_eq!(parse_duration("00:00:07"), Some(7));
    }

    #[test]
    fn test_parse_duration_is_positional() {
        assert_eq!(parse_duration("90:00"), Some(5400));
        assert_eq!(parse_duration("0:75"), Some(75));
    }

    #[test]
    fn test_parse_duration_days() {
        assert_eq!(parse_duration("1:00:00:00"), Some(86_400));
        assert_eq!(parse_duration("1:1:00:00:00"), None);
    }

    #[test]
    fn test_parse_duration_invalid() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("1::3"), None);
        assert_eq!(parse_duration("about an hour"), None);
    }

    #[test]
    fn test_normalize_language() {
        assert_eq!(normalize_language("en"), "en-us");
        assert_eq!(normalize_language("de"), "de-de");
        assert_eq!(normalize_language("en-US"), "en-us");
        assert_eq!(normalize_language("FR"), "fr-fr");
        assert_eq!(normalize_language("pt-BR"), "pt-br");
    }

    #[test]
    fn test_parse_explicit() {
        assert!(parse_explicit("yes"));
        assert!(!parse_explicit("Yes"));
        assert!(!parse_explicit("no"));
        assert!(!parse_explicit("clean"));
    }
}
