//! Simple linear regression by ordinary least squares.
//!
//! Fits `y = intercept + slope · x` for a single predictor and tests the
//! slope against zero with a Student-t statistic on `n - 2` degrees of
//! freedom.
//!
//! Undefined fits never panic. Fewer than [`MIN_OBSERVATIONS`] pairs, or a
//! predictor without variance, produce a [`RegressionResult`] whose estimates
//! are `NaN`. A flat response keeps a zero slope but has no `r2`, `t` or `p`.

use serde::Serialize;

use crate::{
    descriptive::{centered_sum_of_squares, mean},
    student_t::two_sided_p_value,
};

/// Smallest number of pairs for which a slope can be tested.
pub const MIN_OBSERVATIONS: usize = 3;

/// Result of a simple OLS fit.
///
/// `NaN` fields serialize as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegressionResult {
    /// Estimated slope `β`.
    pub slope: f64,
    /// Estimated intercept `α`.
    pub intercept: f64,
    /// Coefficient of determination, in `[0, 1]`.
    pub r2: f64,
    /// t-statistic for `β = 0`.
    pub t: f64,
    /// Two-sided p-value for `t` with `n - 2` degrees of freedom.
    pub p: f64,
    /// Number of pairs used.
    pub n: usize,
}

impl RegressionResult {
    fn undefined(n: usize) -> Self {
        Self {
            slope: f64::NAN,
            intercept: f64::NAN,
            r2: f64::NAN,
            t: f64::NAN,
            p: f64::NAN,
            n,
        }
    }

    /// Fits `y` on `x` by ordinary least squares.
    ///
    /// Pairs are taken position by position over `min(x.len(), y.len())`
    /// elements; callers are expected to have dropped non-finite pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use edustat_stats::regression::RegressionResult;
    ///
    /// let fit = RegressionResult::fit(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 5.0, 4.0, 5.0]);
    /// assert!((fit.slope - 0.6).abs() < 1e-12);
    /// assert!((fit.intercept - 2.2).abs() < 1e-12);
    /// assert_eq!(fit.n, 5);
    ///
    /// let underdetermined = RegressionResult::fit(&[1.0, 2.0], &[3.0, 4.0]);
    /// assert!(underdetermined.slope.is_nan());
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn fit(x: &[f64], y: &[f64]) -> Self {
        let n = x.len().min(y.len());
        if n < MIN_OBSERVATIONS {
            return Self::undefined(n);
        }
        let (x, y) = (&x[..n], &y[..n]);

        let ssx = centered_sum_of_squares(x);
        if !ssx.is_finite() || ssx <= 0.0 {
            tracing::debug!(n, "predictor has no variance; slope is undefined");
            return Self::undefined(n);
        }

        let sst = centered_sum_of_squares(y);
        if sst == 0.0 {
            // flat response: zero slope with no residual spread to test against
            return Self {
                slope: 0.0,
                intercept: y[0],
                r2: f64::NAN,
                t: f64::NAN,
                p: f64::NAN,
                n,
            };
        }

        let (mx, my) = (mean(x), mean(y));
        let sxy = x
            .iter()
            .zip(y)
            .map(|(xi, yi)| (xi - mx) * (yi - my))
            .sum::<f64>();
        let slope = sxy / ssx;
        let intercept = my - slope * mx;

        let sse = x
            .iter()
            .zip(y)
            .map(|(xi, yi)| (yi - (intercept + slope * xi)).powi(2))
            .sum::<f64>();
        // SSE <= SST holds exactly; clamp away rounding noise.
        let r2 = (1.0 - sse / sst).clamp(0.0, 1.0);

        let df = (n - 2) as f64;
        let se_slope = (sse / df / ssx).sqrt();
        let t = slope / se_slope;
        let p = two_sided_p_value(t, df);

        Self {
            slope,
            intercept,
            r2,
            t,
            p,
            n,
        }
    }

    /// Whether the fit produced a slope estimate.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        self.slope.is_finite()
    }

    /// Fitted value `α + β·x`.
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}
