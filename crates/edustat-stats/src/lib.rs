//! Statistical estimation engine for the edustat project.
//!
//! This crate provides the estimators behind the dashboard's stat cards:
//!
//! - **Descriptive statistics**: mean, sample variance, covariance, centered sums of squares
//! - **Special functions**: log-gamma and the regularized incomplete beta function
//! - **Student-t distribution**: CDF and two-sided p-values for fractional degrees of freedom
//! - **Simple linear regression**: OLS slope, intercept, R² and slope significance
//! - **Welch's t-test**: two-group mean comparison without equal-variance assumption
//! - **Formatting**: magnitude-aware rendering of estimates for display
//!
//! Every estimator is a pure function of its input samples. Undefined results
//! (too few observations, zero variance) are reported as `NaN` fields instead
//! of errors or panics.
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing samples
//! - [`special`]: Log-gamma and regularized incomplete beta function
//! - [`student_t`]: Student's t-distribution
//! - [`regression`]: Ordinary least squares with one predictor
//! - [`ttest`]: Welch's two-sample t-test
//! - [`format`]: Display formatting of estimates and p-values
//!
//! # Examples
//!
//! ## Fitting a regression line
//!
//! ```
//! use edustat_stats::regression::RegressionResult;
//!
//! let motivation = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let grade = [2.0, 4.0, 5.0, 4.0, 5.0];
//! let fit = RegressionResult::fit(&motivation, &grade);
//! assert!((fit.r2 - 0.6).abs() < 1e-9);
//! ```
//!
//! ## Comparing two groups
//!
//! ```
//! use edustat_stats::ttest::TTestResult;
//!
//! let male = [71.0, 68.5, 80.0, 74.5];
//! let female = [77.0, 82.5, 79.0, 85.0];
//! let res = TTestResult::welch(&male, &female);
//! assert!(res.mean_diff < 0.0);
//! ```
//!
//! ## Rendering estimates
//!
//! ```
//! use edustat_stats::format::{format_estimate, format_p_value};
//!
//! assert_eq!(format_estimate(Some(150.4)), "150");
//! assert_eq!(format_p_value(Some(1e-5)), "< 0.001");
//! ```

pub mod descriptive;
pub mod format;
pub mod regression;
pub mod special;
pub mod student_t;
pub mod ttest;
