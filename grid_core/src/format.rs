//! Digit grouping for displayed figures.

const MAX_FRACTION_DIGITS: usize = 3;

/// Format with `,` thousands separators and at most three fraction digits,
/// trailing zeros trimmed: `1234567.5` → `"1,234,567.5"`.
pub fn group_digits(value: f64) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_string()
        } else if value > 0.0 {
            "∞".to_string()
        } else {
            "-∞".to_string()
        };
    }

    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    let negative = value < 0.0 && (int_part != "0" || !frac_part.is_empty());
    if negative {
        out.push('-');
    }
    let digits = int_part.len();
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (digits - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Round half away from zero to an integer, then group.
pub fn group_rounded(value: f64) -> String {
    group_digits(value.round())
}

/// Value-axis tick label in thousands: `50000` → `"50k"`, `2500` → `"2.5k"`.
pub fn thousands_label(value: f64) -> String {
    let scaled = value / 1000.0;
    let rounded = (scaled * 1e6).round() / 1e6;
    format!("{}k", rounded)
}
