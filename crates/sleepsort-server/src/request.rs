//! Query string parsing.
//!
//! Turns `?format=html&numbers=3,1,2` into a [`SortRequest`]. Parsing never
//! fails: unknown keys are ignored, repeated keys keep the last value, and
//! tokens that are not integers are coerced rather than rejected.

use url::form_urlencoded;

/// Response format selected by the `format` parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `application/json` (default)
    #[default]
    Json,
    /// Bootstrap-styled HTML table
    Html,
}

impl OutputFormat {
    /// Interpret a `format` value. Only `html` (any case) selects HTML.
    pub fn from_selector(selector: &str) -> Self {
        if selector.eq_ignore_ascii_case("html") { Self::Html } else { Self::Json }
    }
}

/// A parsed sort request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortRequest {
    /// How to render the response
    pub format: OutputFormat,
    /// Values to sort. `None` when the `numbers` parameter is absent.
    pub numbers: Option<Vec<i64>>,
}

impl SortRequest {
    /// Parse a raw (still percent-encoded) query string.
    pub fn from_query(query: Option<&str>) -> Self {
        let mut request = Self::default();

        for (key, value) in form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
            match key.as_ref() {
                "format" => request.format = OutputFormat::from_selector(&value),
                "numbers" => request.numbers = Some(parse_numbers(&value)),
                _ => {},
            }
        }

        request
    }
}

/// Split a comma-separated list and coerce every token to an integer.
///
/// An empty string is a single empty token, so it yields `[0]`.
pub fn parse_numbers(raw: &str) -> Vec<i64> {
    raw.split(',').map(coerce_int).collect()
}

/// Lenient integer conversion.
///
/// Skips leading whitespace, accepts one optional sign, then reads decimal
/// digits up to the first non-digit. A token without leading digits is `0`.
/// Out-of-range values saturate at `i64::MIN` / `i64::MAX`.
pub fn coerce_int(token: &str) -> i64 {
    let token = token.trim_start();
    let (negative, digits) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };

    digits.bytes().take_while(u8::is_ascii_digit).fold(0i64, |acc, b| {
        let digit = i64::from(b - b'0');
        if negative {
            acc.saturating_mul(10).saturating_sub(digit)
        } else {
            acc.saturating_mul(10).saturating_add(digit)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_plain_integers() {
        assert_eq!(coerce_int("42"), 42);
        assert_eq!(coerce_int("-17"), -17);
        assert_eq!(coerce_int("+8"), 8);
        assert_eq!(coerce_int("0"), 0);
    }

    #[test]
    fn coerce_lenient_tokens() {
        assert_eq!(coerce_int("  12"), 12);
        assert_eq!(coerce_int("12  "), 12);
        assert_eq!(coerce_int("3.9"), 3);
        assert_eq!(coerce_int("7abc"), 7);
        assert_eq!(coerce_int("abc"), 0);
        assert_eq!(coerce_int(""), 0);
        assert_eq!(coerce_int("-"), 0);
        assert_eq!(coerce_int("--4"), 0);
    }

    #[test]
    fn coerce_saturates() {
        assert_eq!(coerce_int("99999999999999999999999"), i64::MAX);
        assert_eq!(coerce_int("-99999999999999999999999"), i64::MIN);
    }

    #[test]
    fn parse_comma_separated() {
        assert_eq!(parse_numbers("3,1,2"), vec![3, 1, 2]);
        assert_eq!(parse_numbers("5, 4 ,x"), vec![5, 4, 0]);
        assert_eq!(parse_numbers(""), vec![0]);
        assert_eq!(parse_numbers("1,,2"), vec![1, 0, 2]);
    }

    #[test]
    fn query_defaults_to_json_without_numbers() {
        assert_eq!(SortRequest::from_query(None), SortRequest::default());
        assert_eq!(SortRequest::from_query(Some("other=1")).numbers, None);
    }

    #[test]
    fn query_with_format_and_numbers() {
        let request = SortRequest::from_query(Some("format=HTML&numbers=3%2C1%2C2"));
        assert_eq!(request.format, OutputFormat::Html);
        assert_eq!(request.numbers, Some(vec![3, 1, 2]));
    }

    #[test]
    fn unknown_format_falls_back_to_json() {
        let request = SortRequest::from_query(Some("format=xml&numbers=1"));
        assert_eq!(request.format, OutputFormat::Json);
    }

    #[test]
    fn repeated_key_keeps_last_value() {
        let request = SortRequest::from_query(Some("numbers=1&numbers=9,8"));
        assert_eq!(request.numbers, Some(vec![9, 8]));
    }

    #[test]
    fn empty_numbers_is_present() {
        let request = SortRequest::from_query(Some("numbers="));
        assert_eq!(request.numbers, Some(vec![0]));
    }
}
