use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDateTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Two decimal places, rounded the way a browser rounds the JSON number.
///
/// Amounts arrive as IEEE doubles, so `1.005` is really `1.00499...` and
/// prints as `1.00`. Exact ties (`0.125`) go away from zero.
pub fn fmt_money(d: &Decimal) -> String {
    let binary = d.to_f64().and_then(Decimal::from_f64_retain).unwrap_or(*d);
    let rounded = binary.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Parse the leading number of an amount field.
///
/// Leading whitespace is skipped and the longest prefix of the form
/// `[+-]digits[.digits][(e|E)[+-]digits]` is taken; trailing garbage is
/// ignored (`"12abc"` is 12). Returns `None` when no digits lead the input
/// or the value does not fit a `Decimal`.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let s = s.trim_start();
    let b = s.as_bytes();
    let mut i = 0;

    let negative = match b.first() {
        Some(b'-') => {
            i += 1;
            true
        }
        Some(b'+') => {
            i += 1;
            false
        }
        _ => false,
    };

    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    let int_part = &s[int_start..i];

    let mut frac_part = "";
    if i < b.len() && b[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        frac_part = &s[frac_start..j];
        if !int_part.is_empty() || !frac_part.is_empty() {
            i = j;
        }
    }
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut exponent: i64 = 0;
    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut j = i + 1;
        let exp_negative = match b.get(j) {
            Some(b'-') => {
                j += 1;
                true
            }
            Some(b'+') => {
                j += 1;
                false
            }
            _ => false,
        };
        let digits_start = j;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        if j > digits_start {
            let value: i64 = s[digits_start..j].parse().ok()?;
            exponent = if exp_negative { -value } else { value };
        }
    }

    let mut text = String::with_capacity(int_part.len() + frac_part.len() + 3);
    if negative {
        text.push('-');
    }
    text.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        text.push('.');
        text.push_str(frac_part);
    }

    let mut value = Decimal::from_str(&text).ok()?;
    if exponent.unsigned_abs() > 28 {
        return None;
    }
    for _ in 0..exponent.unsigned_abs() {
        value = if exponent > 0 {
            value.checked_mul(Decimal::TEN)?
        } else {
            value.checked_div(Decimal::TEN)?
        };
    }
    Some(value.normalize())
}

/// Render a server timestamp as `M/D/YYYY, h:mm:ss AM`.
///
/// Accepts SQLite's `YYYY-MM-DD HH:MM:SS` (optionally fractional, or with a
/// `T` separator) and RFC 3339; anything else is returned as-is.
pub fn fmt_timestamp(raw: &str) -> String {
    let parsed = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|d| d.with_timezone(&Local).naive_local())
        });

    match parsed {
        Some(dt) => dt.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        None => raw.to_string(),
    }
}
