//! Welch's unequal-variance two-sample t-test.

use serde::Serialize;

use crate::{
    descriptive::{mean, sample_variance},
    student_t::two_sided_p_value,
};

/// Smallest group size for which a sample variance exists.
pub const MIN_GROUP_SIZE: usize = 2;

/// Result of a two-sample comparison of means.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TTestResult {
    /// Welch t-statistic.
    pub t: f64,
    /// Welch-Satterthwaite degrees of freedom (fractional).
    pub df: f64,
    /// Two-sided p-value.
    pub p: f64,
    /// `mean(a) - mean(b)`.
    pub mean_diff: f64,
}

impl TTestResult {
    fn undefined(mean_diff: f64) -> Self {
        Self {
            t: f64::NAN,
            df: f64::NAN,
            p: f64::NAN,
            mean_diff,
        }
    }

    /// Compares the means of two independent groups without assuming equal
    /// variances.
    ///
    /// Either group having fewer than [`MIN_GROUP_SIZE`] values yields an
    /// all-`NaN` result. Two groups without any spread keep `mean_diff` but
    /// leave `t`, `df` and `p` as `NaN`.
    ///
    /// # Examples
    ///
    /// ```
    /// use edustat_stats::ttest::TTestResult;
    ///
    /// let res = TTestResult::welch(&[10.0, 12.0, 9.0, 11.0, 13.0], &[5.0, 7.0, 6.0, 8.0, 9.0]);
    /// assert!((res.mean_diff - 4.0).abs() < 1e-12);
    /// assert!(res.t > 0.0);
    /// assert!(res.p < 0.01);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn welch(a: &[f64], b: &[f64]) -> Self {
        if a.len() < MIN_GROUP_SIZE || b.len() < MIN_GROUP_SIZE {
            return Self::undefined(f64::NAN);
        }

        let (na, nb) = (a.len() as f64, b.len() as f64);
        let (ma, mb) = (mean(a), mean(b));
        let (va, vb) = (sample_variance(a, Some(ma)), sample_variance(b, Some(mb)));
        let mean_diff = ma - mb;

        let (ea, eb) = (va / na, vb / nb);
        let se2 = ea + eb;
        if !se2.is_finite() || se2 <= 0.0 {
            tracing::debug!("both groups have zero variance; t-statistic is undefined");
            return Self::undefined(mean_diff);
        }

        let t = mean_diff / se2.sqrt();
        let df = se2.powi(2) / (va * va / (na * na * (na - 1.0)) + vb * vb / (nb * nb * (nb - 1.0)));
        let p = two_sided_p_value(t, df);

        Self {
            t,
            df,
            p,
            mean_diff,
        }
    }

    /// Whether a test statistic could be computed.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        self.t.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::{Rng as _, SeedableRng as _};
    use rand_distr::Normal;
    use rand_pcg::Pcg32;

    use super::*;

    const A: [f64; 5] = [10.0, 12.0, 9.0, 11.0, 13.0];
    const B: [f64; 5] = [5.0, 7.0, 6.0, 8.0, 9.0];

    fn normal_samples(rng: &mut Pcg32, mean: f64, sd: f64, n: usize) -> Vec<f64> {
        let dist = Normal::new(mean, sd).unwrap();
        (0..n).map(|_| rng.sample(dist)).collect()
    }

    #[test]
    fn separated_groups() {
        let res = TTestResult::welch(&A, &B);
        // equal variances 2.5, so SE = 1, t = 4, df = 8
        assert!((res.mean_diff - 4.0).abs() < 1e-12);
        assert!((res.t - 4.0).abs() < 1e-12);
        assert!((res.df - 8.0).abs() < 1e-9);
        assert!(res.p < 0.01, "p={}", res.p);
        assert!(res.p > 0.001, "p={}", res.p);
        assert!(res.is_defined());
    }

    #[test]
    fn unequal_variances_give_fractional_df() {
        let a = [20.1, 22.4, 19.8, 25.0, 18.2, 23.3, 21.7];
        let b = [20.5, 20.9, 21.1];
        let res = TTestResult::welch(&a, &b);
        assert!(res.df.fract() != 0.0);
        // Welch df lies between min(na, nb) - 1 and na + nb - 2
        assert!(res.df > 2.0 && res.df < 8.0, "df={}", res.df);
    }

    #[test]
    fn identical_groups_have_p_of_one() {
        let res = TTestResult::welch(&A, &A);
        assert_eq!(res.t, 0.0);
        assert_eq!(res.p, 1.0);
    }

    #[test]
    fn single_observation_group_is_undefined() {
        let res = TTestResult::welch(&A, &[3.0]);
        assert!(res.t.is_nan());
        assert!(res.df.is_nan());
        assert!(res.p.is_nan());
        assert!(res.mean_diff.is_nan());
        assert!(!res.is_defined());
    }

    #[test]
    fn constant_groups_keep_mean_difference() {
        let res = TTestResult::welch(&[2.0; 4], &[1.0; 3]);
        assert_eq!(res.mean_diff, 1.0);
        assert!(res.t.is_nan());
        assert!(res.p.is_nan());
    }

    #[test]
    fn constant_groups_with_inexact_means_are_undefined() {
        for (a, b) in [(vec![0.1; 3], vec![1.1; 3]), (vec![3.3; 6], vec![0.7; 4])] {
            let res = TTestResult::welch(&a, &b);
            assert!(res.t.is_nan(), "t={} for {a:?} vs {b:?}", res.t);
            assert!(res.df.is_nan());
            assert!(res.p.is_nan());
            assert!((res.mean_diff - (a[0] - b[0])).abs() < 1e-12);
        }
    }

    #[test]
    fn one_constant_group_is_still_testable() {
        let res = TTestResult::welch(&[2.0; 4], &[1.0, 1.5, 0.5]);
        assert!(res.is_defined());
        // only group b contributes: df = nb - 1
        assert!((res.df - 2.0).abs() < 1e-9);
    }

    #[test]
    fn shifted_normal_samples_are_detected() {
        let mut rng = Pcg32::seed_from_u64(12345);
        let a = normal_samples(&mut rng, 110.0, 1.0, 30);
        let b = normal_samples(&mut rng, 100.0, 5.0, 40);
        let res = TTestResult::welch(&a, &b);
        assert!(res.p < 0.001, "p={}", res.p);
        assert!(res.mean_diff > 0.0);
    }

    #[test]
    fn p_value_is_always_a_probability() {
        let mut rng = Pcg32::seed_from_u64(99);
        for &(mean_a, mean_b, sd) in &[
            (100.0, 100.0, 1.0),
            (100.0, 200.0, 5.0),
            (100.0, 101.0, 100.0),
            (1000.0, 1050.0, 10.0),
        ] {
            let a = normal_samples(&mut rng, mean_a, sd, 25);
            let b = normal_samples(&mut rng, mean_b, sd, 35);
            let p = TTestResult::welch(&a, &b).p;
            assert!((0.0..=1.0).contains(&p), "p={p} for ({mean_a}, {mean_b}, {sd})");
        }
    }

    proptest! {
        #[test]
        fn swapping_groups_negates_statistic(
            a in prop::collection::vec(-1e3..1e3_f64, 2..30),
            b in prop::collection::vec(-1e3..1e3_f64, 2..30),
        ) {
            let ab = TTestResult::welch(&a, &b);
            let ba = TTestResult::welch(&b, &a);
            prop_assert_eq!(ab.mean_diff, -ba.mean_diff);
            prop_assert_eq!(ab.t, -ba.t);
            prop_assert_eq!(ab.df, ba.df);
        }
    }
}
