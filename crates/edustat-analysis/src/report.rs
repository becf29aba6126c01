//! End-to-end analysis of a filtered dataset
//!
//! [`AnalysisReport::compute`] runs the whole recompute step for one state
//! of the filter controls:
//!
//! 1. Select records ([`FilterSpec::apply`])
//! 2. Regress grade on the chosen predictor ([`RegressionResult::fit`])
//! 3. Compare male and female grades ([`TTestResult::welch`])
//! 4. Summarize each gender group (bar chart means)
//!
//! Each call is independent; nothing is cached between filter changes.
//!
//! # Serialization
//!
//! Reports serialize to JSON with undefined estimates as `null`:
//!
//! ```json
//! {
//!   "filter": { "subject": "Math", "gender": "All", ... },
//!   "predictor": "motivation",
//!   "n": 5,
//!   "regression": { "slope": 0.6, "intercept": 2.2, "r2": 0.6, "t": 2.12, "p": 0.12, "n": 5 },
//!   "gender_test": { "t": null, "df": null, "p": null, "mean_diff": null },
//!   "group_means": [ { "label": "Male", "mean": 71.5, "stats": { ... } } ]
//! }
//! ```

use edustat_stats::{
    descriptive::{DescriptiveStats, mean},
    format::{format_estimate, format_p_value},
    regression::RegressionResult,
    ttest::TTestResult,
};
use serde::Serialize;

use crate::{
    filter::FilterSpec,
    record::Dataset,
    sample::{GENDER_GROUPS, GroupedSample, PairedSample, Predictor},
};

/// Mean grade of one group, as plotted in the bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub label: String,
    /// `NaN` (serialized as `null`) for an empty group
    pub mean: f64,
    pub stats: Option<DescriptiveStats>,
}

/// All estimates for one filter state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub filter: FilterSpec,
    pub predictor: Predictor,
    /// Number of selected records
    pub n: usize,
    pub regression: RegressionResult,
    /// Welch test of male minus female grades
    pub gender_test: TTestResult,
    pub group_means: Vec<GroupSummary>,
}

impl AnalysisReport {
    /// Computes every estimate for the records selected by `filter`.
    #[must_use]
    pub fn compute(dataset: &Dataset, filter: &FilterSpec, predictor: Predictor) -> Self {
        let selected = filter.apply(dataset.records(), predictor);
        tracing::debug!(
            total = dataset.len(),
            selected = selected.len(),
            %predictor,
            "applied filters"
        );

        let paired = PairedSample::from_records(&selected, predictor);
        let regression = RegressionResult::fit(&paired.x, &paired.y);

        let grouped = GroupedSample::by_gender(&selected);
        let [male, female] = GENDER_GROUPS.map(|label| grouped.get(label));
        let gender_test = TTestResult::welch(male, female);

        let group_means = grouped
            .groups
            .iter()
            .map(|(label, grades)| GroupSummary {
                label: label.clone(),
                mean: mean(grades),
                stats: DescriptiveStats::new(grades.iter().copied()),
            })
            .collect();

        Self {
            filter: filter.clone(),
            predictor,
            n: selected.len(),
            regression,
            gender_test,
            group_means,
        }
    }

    /// Display strings for the summary cards.
    #[must_use]
    pub fn stat_cards(&self) -> StatCards {
        StatCards::new(&self.regression)
    }
}

/// Rendered values of the four summary cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCards {
    /// Regression slope `β`
    pub slope: String,
    pub p_value: String,
    pub r2: String,
    pub n: String,
}

impl StatCards {
    #[must_use]
    pub fn new(regression: &RegressionResult) -> Self {
        Self {
            slope: format_estimate(Some(regression.slope)),
            p_value: format_p_value(Some(regression.p)),
            r2: format_estimate(Some(regression.r2)),
            n: regression.n.to_string(),
        }
    }
}
