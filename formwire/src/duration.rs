//! Duration text: a signed sequence of decimal numbers with unit suffixes.
//!
//! Accepted input looks like `90s`, `1h30m`, `-1.5h`, `300ms` or `2us`; valid units
//! are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`. A bare `0` is the only number
//! accepted without a unit. Output is canonical: `1h30m0s`, `1.5s`, `300ms`, `0s`.
use crate::error::{duration_overflow, invalid_duration, Result};

const NANOS_PER_SEC: u128 = 1_000_000_000;
/// Largest magnitude a parsed duration may have (that of `i64::MIN` nanoseconds).
const MAX_MAGNITUDE: u64 = 1 << 63;

fn unit_nanos(unit: &str) -> Option<u64> {
    Some(match unit {
        "ns" => 1,
        "us" | "\u{b5}s" | "\u{3bc}s" => 1_000,
        "ms" => 1_000_000,
        "s" => 1_000_000_000,
        "m" => 60 * 1_000_000_000,
        "h" => 60 * 60 * 1_000_000_000,
        _ => return None,
    })
}

/// Consume leading decimal digits. `None` on overflow.
fn leading_int(s: &str) -> Option<(u64, &str)> {
    let end = s.bytes().position(|b| !b.is_ascii_digit()).unwrap_or(s.len());
    let mut value = 0u64;
    for b in s[..end].bytes() {
        value = value.checked_mul(10)?.checked_add(u64::from(b - b'0'))?;
    }
    Some((value, &s[end..]))
}

/// Consume leading fraction digits as `(numerator, scale)`; digits past `u64`
/// precision are consumed and dropped.
fn leading_fraction(s: &str) -> (u64, f64, &str) {
    let end = s.bytes().position(|b| !b.is_ascii_digit()).unwrap_or(s.len());
    let mut value = 0u64;
    let mut scale = 1f64;
    let mut overflow = false;
    for b in s[..end].bytes() {
        if overflow {
            continue;
        }
        match value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(b - b'0')))
        {
            Some(v) => {
                value = v;
                scale *= 10.0;
            }
            None => overflow = true,
        }
    }
    (value, scale, &s[end..])
}

/// Parse duration text into signed nanoseconds.
pub fn parse_nanos(text: &str) -> Result<i64> {
    let mut s = text;
    let mut negative = false;
    if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }
    if s == "0" {
        return Ok(0);
    }
    if s.is_empty() {
        return Err(invalid_duration(text));
    }

    let mut total = 0u64;
    while !s.is_empty() {
        if !(s.starts_with('.') || s.as_bytes()[0].is_ascii_digit()) {
            return Err(invalid_duration(text));
        }

        let before = s.len();
        let (int, rest) = leading_int(s).ok_or_else(|| duration_overflow(text))?;
        s = rest;
        let has_int = before != s.len();

        let mut frac = 0u64;
        let mut scale = 1f64;
        let mut has_frac = false;
        if let Some(rest) = s.strip_prefix('.') {
            let before = rest.len();
            (frac, scale, s) = leading_fraction(rest);
            has_frac = before != s.len();
        }
        if !has_int && !has_frac {
            return Err(invalid_duration(text));
        }

        let unit_len = s
            .bytes()
            .position(|b| b == b'.' || b.is_ascii_digit())
            .unwrap_or(s.len());
        if unit_len == 0 {
            return Err(invalid_duration(text));
        }
        let unit = unit_nanos(&s[..unit_len]).ok_or_else(|| invalid_duration(text))?;
        s = &s[unit_len..];

        if int > MAX_MAGNITUDE / unit {
            return Err(duration_overflow(text));
        }
        let mut value = int * unit;
        if frac > 0 {
            value += (frac as f64 * (unit as f64 / scale)) as u64;
            if value > MAX_MAGNITUDE {
                return Err(duration_overflow(text));
            }
        }
        total = total
            .checked_add(value)
            .filter(|&total| total <= MAX_MAGNITUDE)
            .ok_or_else(|| duration_overflow(text))?;
    }

    if negative {
        Ok((total as i64).wrapping_neg())
    } else if total > i64::MAX as u64 {
        Err(duration_overflow(text))
    } else {
        Ok(total as i64)
    }
}

/// `.5`, `.000001`, or nothing when the fraction is zero.
fn fraction(magnitude: u128, precision: u32) -> String {
    let rem = magnitude % 10u128.pow(precision);
    if rem == 0 {
        return String::new();
    }
    let digits = format!("{rem:0width$}", width = precision as usize);
    format!(".{}", digits.trim_end_matches('0'))
}

/// Format signed nanoseconds canonically.
pub fn format_nanos(nanos: i128) -> String {
    let sign = if nanos < 0 { "-" } else { "" };
    let magnitude = nanos.unsigned_abs();
    if magnitude == 0 {
        return "0s".to_owned();
    }

    if magnitude < NANOS_PER_SEC {
        let (precision, unit) = match magnitude {
            m if m < 1_000 => (0, "ns"),
            m if m < 1_000_000 => (3, "\u{b5}s"),
            _ => (6, "ms"),
        };
        let whole = magnitude / 10u128.pow(precision);
        return format!("{sign}{whole}{}{unit}", fraction(magnitude, precision));
    }

    let frac = fraction(magnitude, 9);
    let secs = magnitude / NANOS_PER_SEC;
    let (hours, minutes, seconds) = (secs / 3600, secs / 60 % 60, secs % 60);
    if hours > 0 {
        format!("{sign}{hours}h{minutes}m{seconds}{frac}s")
    } else if minutes > 0 {
        format!("{sign}{minutes}m{seconds}{frac}s")
    } else {
        format!("{sign}{seconds}{frac}s")
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::error::Error, proptest::prelude::*};

    const SEC: i64 = 1_000_000_000;

    #[test]
    fn parse_units_and_fractions() {
        let cases = [
            ("0", 0),
            ("-0", 0),
            ("5s", 5 * SEC),
            ("90s", 90 * SEC),
            ("+5s", 5 * SEC),
            ("1h30m", 90 * 60 * SEC),
            ("-1.5h", -90 * 60 * SEC),
            (".5s", SEC / 2),
            ("1.s", SEC),
            ("300ms", 300_000_000),
            ("2us", 2_000),
            ("2\u{b5}s", 2_000),
            ("2\u{3bc}s", 2_000),
            ("7ns", 7),
            ("1h1m1s1ms1us1ns", 3_661_001_001_001),
            ("9223372036854775807ns", i64::MAX),
            ("-9223372036854775808ns", i64::MIN),
        ];
        for (text, nanos) in cases {
            assert_eq!(parse_nanos(text).unwrap(), nanos, "{text}");
        }
    }

    #[test]
    fn parse_rejects_bad_input() {
        for text in ["", "-", "5", "s", ".s", "1.5", "3x", "1h-5m", "2006-01-02", "1e3s"] {
            assert!(
                matches!(parse_nanos(text), Err(Error::InvalidDuration(_))),
                "{text}"
            );
        }
        for text in ["9223372036854775808ns", "3000000h", "99999999999999999999s"] {
            assert!(
                matches!(parse_nanos(text), Err(Error::DurationOverflow(_))),
                "{text}"
            );
        }
    }

    #[test]
    fn format_is_canonical() {
        let cases = [
            (0, "0s"),
            (1, "1ns"),
            (1_100, "1.1\u{b5}s"),
            (2_200_000, "2.2ms"),
            (3 * SEC, "3s"),
            (4 * SEC + 500_000_000, "4.5s"),
            (90 * SEC, "1m30s"),
            (90 * 60 * SEC, "1h30m0s"),
            (-90 * SEC, "-1m30s"),
            (i64::MAX, "2562047h47m16.854775807s"),
            (i64::MIN, "-2562047h47m16.854775808s"),
        ];
        for (nanos, text) in cases {
            assert_eq!(format_nanos(i128::from(nanos)), text);
        }
    }

    proptest! {
        #[test]
        fn format_then_parse(nanos in any::<i64>()) {
            prop_assert_eq!(parse_nanos(&format_nanos(i128::from(nanos))).unwrap(), nanos);
        }
    }
}
