//! Coercion of raw form input into typed, clamped values.
//!
//! Every field of the editor arrives as a string. Nothing here fails: invalid
//! input resolves to the supplied fallback, which callers set to the last
//! valid value or the documented default.

/// Parse a leading integer the way form inputs are usually read.
///
/// Leading whitespace and an optional sign are accepted, parsing stops at the
/// first non-digit. `"12px"` yields 12, `"px12"` yields `None`.
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return None;
    }

    // Saturate on overflow so huge inputs still clamp to the range maximum.
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Parse a leading integer and clamp it to `[min, max]`.
pub fn clamp_int(input: &str, min: i64, max: i64, fallback: i64) -> i64 {
    match parse_leading_int(input) {
        Some(value) => value.clamp(min, max),
        None => fallback,
    }
}

/// Parse a whole-string finite number.
///
/// Empty or whitespace-only input, trailing garbage, NaN and infinities all
/// resolve to `fallback`.
pub fn parse_number(input: &str, fallback: f64) -> f64 {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return fallback;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => fallback,
    }
}

/// Parse a finite, non-negative number.
pub fn parse_non_negative(input: &str, fallback: f64) -> f64 {
    let value = parse_number(input, fallback);
    if value < 0.0 {
        fallback
    } else {
        value
    }
}

/// Parse a non-negative integer pixel count (slice insets).
pub fn parse_pixels(input: &str, fallback: u32) -> u32 {
    clamp_int(input, 0, u32::MAX as i64, fallback as i64) as u32
}

/// Build a download-safe PNG file name for one interaction state.
///
/// The base is trimmed and lowercased, whitespace runs become `-`, anything
/// outside `[a-z0-9-_.]` is dropped and an empty result falls back to
/// `button`.
pub fn sanitize_file_name(base: &str, state: &str) -> String {
    let lowered = base.trim().to_lowercase();

    let mut dashed = String::with_capacity(lowered.len());
    let mut in_space = false;
    for c in lowered.chars() {
        if c.is_whitespace() {
            if !in_space {
                dashed.push('-');
            }
            in_space = true;
        } else {
            dashed.push(c);
            in_space = false;
        }
    }

    let safe: String = dashed
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.'))
        .collect();

    let base = if safe.is_empty() { "button" } else { safe.as_str() };
    format!("{}-{}.png", base, state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int("  12px"), Some(12));
        assert_eq!(parse_leading_int("-7"), Some(-7));
        assert_eq!(parse_leading_int("+3"), Some(3));
        assert_eq!(parse_leading_int("3.9"), Some(3));
        assert_eq!(parse_leading_int("px12"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
    }

    #[test]
    fn test_clamp_int() {
        assert_eq!(clamp_int("200", 8, 120, 16), 120);
        assert_eq!(clamp_int("2", 8, 120, 16), 8);
        assert_eq!(clamp_int("abc", 8, 120, 16), 16);
        assert_eq!(clamp_int("99999999999999999999999", 0, 16, 1), 16);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 176 ", 0.0), 176.0);
        assert_eq!(parse_number("1e2", 0.0), 100.0);
        assert_eq!(parse_number(".5", 0.0), 0.5);
        assert_eq!(parse_number("", 48.0), 48.0);
        assert_eq!(parse_number("12px", 48.0), 48.0);
        assert_eq!(parse_number("inf", 48.0), 48.0);
        assert_eq!(parse_number("NaN", 48.0), 48.0);
    }

    #[test]
    fn test_parse_non_negative_and_pixels() {
        assert_eq!(parse_non_negative("-3", 4.0), 4.0);
        assert_eq!(parse_non_negative("2.5", 4.0), 2.5);
        assert_eq!(parse_pixels("-3", 9), 0);
        assert_eq!(parse_pixels("17", 9), 17);
        assert_eq!(parse_pixels("", 9), 9);
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("  Buy Now  ", "hover"), "buy-now-hover.png");
        assert_eq!(sanitize_file_name("Кнопка", "normal"), "button-normal.png");
        assert_eq!(sanitize_file_name("a   b\tc", "active"), "a-b-c-active.png");
        assert_eq!(sanitize_file_name("ok_v1.2!", "normal"), "ok_v1.2-normal.png");
        assert_eq!(sanitize_file_name("", "normal"), "button-normal.png");
    }
}
