//! Descriptive statistics over finite samples.
//!
//! The free functions in this module never panic and never divide by zero:
//! when a quantity is undefined for the given input (an empty sample, a
//! variance with fewer than two observations) they return `NaN` so that the
//! estimators built on top of them can propagate the undefined state into
//! their result records.

use serde::Serialize;

/// Arithmetic mean of `xs`.
///
/// Returns `NaN` for an empty slice.
///
/// # Examples
///
/// ```
/// # use edustat_stats::descriptive::mean;
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
/// assert!(mean(&[]).is_nan());
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return f64::NAN;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Whether every value of `xs` is identical.
///
/// Decided on the data itself: the mean of a constant sample such as
/// `[0.1; 3]` does not round back to `0.1`, so the deviations around it are
/// tiny but nonzero.
///
/// ```
/// # use edustat_stats::descriptive::is_constant;
/// assert!(is_constant(&[0.1, 0.1, 0.1]));
/// assert!(!is_constant(&[0.1, 0.2]));
/// assert!(is_constant(&[]));
/// ```
#[must_use]
pub fn is_constant(xs: &[f64]) -> bool {
    xs.windows(2).all(|w| w[0] == w[1])
}

/// Unbiased sample variance of `xs` (divisor `n - 1`).
///
/// `mean` may carry a precomputed mean of `xs` to avoid a second pass.
/// Returns `NaN` when `xs` has fewer than two values and exactly `0.0` when
/// they are all identical.
///
/// # Examples
///
/// ```
/// # use edustat_stats::descriptive::sample_variance;
/// assert_eq!(sample_variance(&[2.0, 4.0, 6.0], None), 4.0);
/// assert_eq!(sample_variance(&[2.0, 4.0, 6.0], Some(4.0)), 4.0);
/// assert!(sample_variance(&[1.0], None).is_nan());
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn sample_variance(xs: &[f64], mean: Option<f64>) -> f64 {
    if xs.len() < 2 {
        return f64::NAN;
    }
    if is_constant(xs) {
        return 0.0;
    }
    let m = mean.unwrap_or_else(|| self::mean(xs));
    let sum_sq = xs.iter().map(|x| (x - m).powi(2)).sum::<f64>();
    sum_sq / (xs.len() - 1) as f64
}

/// Sum of squared deviations from the mean, `Σ(x - x̄)²`.
///
/// Returns `NaN` for an empty slice and `0.0` when every value is identical.
/// Callers dividing by this quantity must handle the zero case.
#[must_use]
pub fn centered_sum_of_squares(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return f64::NAN;
    }
    if is_constant(xs) {
        return 0.0;
    }
    let m = mean(xs);
    xs.iter().map(|x| (x - m).powi(2)).sum()
}

/// Sample covariance of paired observations (divisor `n - 1`).
///
/// Only the first `min(x.len(), y.len())` elements of each slice take part,
/// including in the means. Returns `NaN` when fewer than two pairs remain.
///
/// # Examples
///
/// ```
/// # use edustat_stats::descriptive::covariance;
/// let cov = covariance(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]);
/// assert!((cov - 2.0).abs() < 1e-12);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn covariance(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return f64::NAN;
    }
    let (x, y) = (&x[..n], &y[..n]);
    let (mx, my) = (mean(x), mean(y));
    let sum = x
        .iter()
        .zip(y)
        .map(|(xi, yi)| (xi - mx) * (yi - my))
        .sum::<f64>();
    sum / (n - 1) as f64
}

/// Summary of a single group of observations.
///
/// Used for the per-group bar chart: one instance per category, carrying the
/// mean that is plotted together with its spread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DescriptiveStats {
    /// Number of observations.
    pub count: usize,
    /// The minimum value in the group.
    pub min: f64,
    /// The maximum value in the group.
    pub max: f64,
    /// The arithmetic mean of the group.
    pub mean: f64,
    /// The upper median (`sorted[n / 2]`).
    pub median: f64,
    /// Unbiased sample variance; `NaN` for a single observation.
    pub variance: f64,
    /// Square root of [`variance`](Self::variance).
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// Non-finite values are skipped. Returns `None` if no finite value
    /// remains.
    ///
    /// # Examples
    ///
    /// ```
    /// # use edustat_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([5.0, 2.0, 4.0, 1.0, 3.0]).unwrap();
    /// assert_eq!(stats.count, 5);
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.median, 3.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values
            .into_iter()
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from values sorted in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order, which
    /// includes any slice holding `NaN`.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let mean = mean(sorted_values);
        let median = sorted_values[sorted_values.len() / 2];
        let variance = sample_variance(sorted_values, Some(mean));

        Some(Self {
            count: sorted_values.len(),
            min,
            max,
            mean,
            median,
            variance,
            std_dev: variance.sqrt(),
        })
    }
}
