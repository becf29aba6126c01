//! Display formatting for estimates.
//!
//! Precision follows the magnitude of the value:
//!
//! | `|v|`        | Rendering                     | Example     |
//! |--------------|-------------------------------|-------------|
//! | `>= 100`     | integer                       | `150`       |
//! | `>= 10`      | 2 decimal places              | `12.35`     |
//! | `>= 1`       | 3 decimal places              | `1.235`     |
//! | otherwise    | scientific, 2 decimal digits  | `1.20e-4`   |
//!
//! Missing or non-finite values render as [`PLACEHOLDER`]. Ties round half
//! away from zero (`12.125` renders as `12.13`), unlike the round-half-even
//! of `{:.N}`.

/// Fraction digits needed to print any `f64` with `|v| >= 1` exactly.
const EXACT_FRACTION_DIGITS: usize = 64;
/// Significant digits needed to print any `f64` exactly.
const EXACT_SIGNIFICANT_DIGITS: usize = 768;

/// Rendering of a missing or undefined value.
pub const PLACEHOLDER: &str = "—";

/// p-values below this are rendered as [`P_VALUE_FLOOR_LABEL`].
pub const P_VALUE_FLOOR: f64 = 0.001;
/// Rendering of a p-value below [`P_VALUE_FLOOR`].
pub const P_VALUE_FLOOR_LABEL: &str = "< 0.001";

/// Formats an estimate with magnitude-tiered precision.
///
/// # Examples
///
/// ```
/// # use edustat_stats::format::format_estimate;
/// assert_eq!(format_estimate(Some(150.4)), "150");
/// assert_eq!(format_estimate(Some(12.345_6)), "12.35");
/// assert_eq!(format_estimate(Some(-1.5)), "-1.500");
/// assert_eq!(format_estimate(Some(0.000_12)), "1.20e-4");
/// assert_eq!(format_estimate(Some(f64::NAN)), "—");
/// assert_eq!(format_estimate(None), "—");
/// ```
#[must_use]
pub fn format_estimate(value: Option<f64>) -> String {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return PLACEHOLDER.to_owned();
    };

    let magnitude = v.abs();
    if magnitude >= 100.0 {
        format_fixed(v, 0)
    } else if magnitude >= 10.0 {
        format_fixed(v, 2)
    } else if magnitude >= 1.0 {
        format_fixed(v, 3)
    } else {
        format_scientific(v)
    }
}

/// Formats a p-value, collapsing very small values to `"< 0.001"`.
///
/// # Examples
///
/// ```
/// # use edustat_stats::format::format_p_value;
/// assert_eq!(format_p_value(Some(0.000_2)), "< 0.001");
/// assert_eq!(format_p_value(Some(0.042)), "4.20e-2");
/// assert_eq!(format_p_value(Some(1.0)), "1.000");
/// assert_eq!(format_p_value(None), "—");
/// ```
#[must_use]
pub fn format_p_value(p: Option<f64>) -> String {
    match p {
        Some(p) if p.is_finite() && p < P_VALUE_FLOOR => P_VALUE_FLOOR_LABEL.to_owned(),
        _ => format_estimate(p),
    }
}

fn sign(v: f64) -> &'static str {
    if v < 0.0 { "-" } else { "" }
}

/// Keeps the first `keep` of `digits`, rounding half up on the dropped tail.
///
/// `digits` is an exact decimal expansion, so a dropped tail starting with
/// `5` is at least half a unit. The second value reports a carry out of the
/// leading digit, in which case the result is one digit longer.
fn round_digits(digits: &str, keep: usize) -> (Vec<u8>, bool) {
    let bytes = digits.as_bytes();
    let mut kept = bytes[..keep.min(bytes.len())].to_vec();
    if bytes.get(keep).is_none_or(|&d| d < b'5') {
        return (kept, false);
    }
    for d in kept.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return (kept, false);
        }
    }
    kept.insert(0, b'1');
    (kept, true)
}

fn digits_to_string(digits: &[u8]) -> String {
    digits.iter().copied().map(char::from).collect()
}

/// Fixed notation with `decimals` fraction digits, for `|v| >= 1`.
fn format_fixed(v: f64, decimals: usize) -> String {
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, v.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let (rounded, _) = round_digits(&format!("{int_part}{frac_part}"), int_part.len() + decimals);
    let (int_part, frac_part) = rounded.split_at(rounded.len() - decimals);
    if decimals == 0 {
        format!("{}{}", sign(v), digits_to_string(int_part))
    } else {
        format!(
            "{}{}.{}",
            sign(v),
            digits_to_string(int_part),
            digits_to_string(frac_part)
        )
    }
}

/// Scientific notation with two decimal digits and an explicitly signed
/// exponent (`1.20e-4`, `0.00e+0`).
fn format_scientific(v: f64) -> String {
    let exact = format!("{:.*e}", EXACT_SIGNIFICANT_DIGITS, v.abs());
    let (mantissa, exponent) = exact.split_once('e').unwrap_or((exact.as_str(), "0"));
    let mut exponent = exponent.parse::<i32>().unwrap_or(0);
    let (mut rounded, carried) = round_digits(&mantissa.replace('.', ""), 3);
    if carried {
        rounded.truncate(3);
        exponent += 1;
    }
    let (lead, rest) = rounded.split_at(1);
    format!(
        "{}{}.{}e{exponent:+}",
        sign(v),
        digits_to_string(lead),
        digits_to_string(rest)
    )
}
