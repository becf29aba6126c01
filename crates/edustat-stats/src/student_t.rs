//! Student's t-distribution.
//!
//! Built on the regularized incomplete beta function:
//! for `t >= 0`, `P(T <= t) = 1 - ½ I_{df/(df+t²)}(df/2, ½)`.

use crate::special::regularized_incomplete_beta;

/// Cumulative distribution function `P(T <= t)` with `df` degrees of freedom.
///
/// `df` may be fractional (Welch-Satterthwaite). Negative `t` is handled by
/// symmetry of the distribution.
///
/// # Examples
///
/// ```
/// # use edustat_stats::student_t::cdf;
/// assert!((cdf(0.0, 7.0) - 0.5).abs() < 1e-12);
/// // one degree of freedom is the standard Cauchy distribution
/// assert!((cdf(1.0, 1.0) - 0.75).abs() < 1e-6);
/// ```
#[must_use]
pub fn cdf(t: f64, df: f64) -> f64 {
    let tail = 0.5 * regularized_incomplete_beta(df / 2.0, 0.5, df / (df + t * t));
    if t >= 0.0 { 1.0 - tail } else { tail }
}

/// Two-sided p-value `P(|T| >= |t|)`.
///
/// Returns `NaN` when `t` or `df` is not finite, or when `df <= 0`.
///
/// # Examples
///
/// ```
/// # use edustat_stats::student_t::two_sided_p_value;
/// assert_eq!(two_sided_p_value(0.0, 12.0), 1.0);
/// assert_eq!(two_sided_p_value(2.5, 9.0), two_sided_p_value(-2.5, 9.0));
/// assert!(two_sided_p_value(1.0, 0.0).is_nan());
/// ```
#[must_use]
pub fn two_sided_p_value(t: f64, df: f64) -> f64 {
    if !t.is_finite() || !df.is_finite() || df <= 0.0 {
        return f64::NAN;
    }
    2.0 * (1.0 - cdf(t.abs(), df))
}
