// Value normalization for OCR label/value fragments
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Anything that is not an ASCII letter, digit, whitespace, period or hyphen
    static ref DISALLOWED_CHARS: Regex = Regex::new(r"[^a-zA-Z0-9\s.\-]").unwrap();
}

/// Strips OCR noise from a captured value
///
/// Removes every character outside `[a-zA-Z0-9\s.-]` and trims surrounding
/// whitespace. Never fails; an empty result is possible.
pub fn clean_value(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    DISALLOWED_CHARS.replace_all(raw, "").trim().to_string()
}

/// Result of lenient numeric parsing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParsedAmount {
    /// Parsed value, 0.0 when nothing usable was found
    pub value: f64,
    /// Whether the input contained at least one ASCII digit
    pub found_digits: bool,
}

/// Parses currency or area text into a number without ever failing
///
/// Only ASCII digits and `.` are kept, in their original order, and the
/// result is parsed as `f64`. Signs and separators are dropped, so
/// `"1,234.56"` becomes `1234.56`. Input such as `"1.2.3"` that still does not
/// form a valid number yields `0.0`.
pub fn parse_numeric_amount(raw: &str) -> ParsedAmount {
    let filtered: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let found_digits = filtered.chars().any(|c| c.is_ascii_digit());
    let value = filtered.parse::<f64>().unwrap_or(0.0);

    ParsedAmount {
        value,
        found_digits,
    }
}

/// Shorthand for `parse_numeric_amount(raw).value`
pub fn numeric_value(raw: &str) -> f64 {
    parse_numeric_amount(raw).value
}
