//! Record selection by categorical filters
//!
//! A [`FilterSpec`] mirrors the dashboard's filter controls: one
//! [`Selection`] per categorical column plus the "equalize motivation"
//! toggle. Applying it is a three-stage pipeline:
//!
//! ```text
//! records
//!     ↓  categorical match (subject, gender, school type, SES)
//!     ↓  optional motivation band around the median
//!     ↓  drop rows without a finite grade or predictor
//! selected records
//! ```

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Serialize, Serializer};

use crate::{
    record::{Attribute, StudentRecord},
    sample::Predictor,
};

/// Motivation median used when no record has a finite motivation.
pub const DEFAULT_MOTIVATION_MEDIAN: f64 = 5.0;
/// Records are kept when `|motivation - median| < MOTIVATION_BAND`.
pub const MOTIVATION_BAND: f64 = 1.0;

/// Choice of a single filter control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Selection {
    /// No filtering on this column
    #[default]
    All,
    /// Only records whose value equals this string
    Only(String),
}

impl Selection {
    const ALL_LABEL: &'static str = "All";

    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }
}

impl FromStr for Selection {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == Self::ALL_LABEL {
            Self::All
        } else {
            Self::Only(s.to_owned())
        })
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(Self::ALL_LABEL),
            Self::Only(value) => f.write_str(value),
        }
    }
}

impl Serialize for Selection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// State of all filter controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    pub subject: Selection,
    pub gender: Selection,
    pub school_type: Selection,
    pub ses: Selection,
    /// Keep only records whose motivation lies within [`MOTIVATION_BAND`]
    /// of the selection's median motivation
    pub equalize_motivation: bool,
}

impl FilterSpec {
    fn selection(&self, attribute: Attribute) -> &Selection {
        match attribute {
            Attribute::Subject => &self.subject,
            Attribute::Gender => &self.gender,
            Attribute::SchoolType => &self.school_type,
            Attribute::Ses => &self.ses,
        }
    }

    fn matches(&self, record: &StudentRecord) -> bool {
        Attribute::ALL
            .into_iter()
            .all(|attr| self.selection(attr).matches(record.attribute(attr)))
    }

    /// Selects the records that feed the estimators.
    ///
    /// Every returned record has a finite grade and a finite value for
    /// `predictor`, so paired samples built from the result are aligned.
    ///
    /// # Examples
    ///
    /// ```
    /// use edustat_analysis::{
    ///     filter::{FilterSpec, Selection},
    ///     record::Dataset,
    ///     sample::Predictor,
    /// };
    ///
    /// let csv = "\
    /// subject,gender,motivation,interest,study_time,grade,SES,school_type
    /// Math,Male,7,6,10,82,High,Public
    /// Math,Female,5,4,8,,Low,Public
    /// Art,Female,6,9,3,75,Low,Private
    /// ";
    /// let dataset = Dataset::from_reader(csv.as_bytes())?;
    /// let filter = FilterSpec {
    ///     subject: Selection::Only("Math".to_owned()),
    ///     ..FilterSpec::default()
    /// };
    /// let selected = filter.apply(dataset.records(), Predictor::Motivation);
    /// assert_eq!(selected.len(), 1); // the second Math row has no grade
    /// # Ok::<(), edustat_analysis::record::LoadDatasetError>(())
    /// ```
    #[must_use]
    pub fn apply<'a>(
        &self,
        records: &'a [StudentRecord],
        predictor: Predictor,
    ) -> Vec<&'a StudentRecord> {
        let mut selected = records
            .iter()
            .filter(|r| self.matches(r))
            .collect::<Vec<_>>();

        if self.equalize_motivation && !selected.is_empty() {
            let median = motivation_median(&selected);
            selected.retain(|r| {
                r.motivation
                    .is_some_and(|m| (m - median).abs() < MOTIVATION_BAND)
            });
            tracing::debug!(median, remaining = selected.len(), "equalized motivation");
        }

        selected.retain(|r| r.grade.is_some() && predictor.value(r).is_some());
        selected
    }
}

/// Upper median of the finite motivations, or [`DEFAULT_MOTIVATION_MEDIAN`].
#[must_use]
pub fn motivation_median(records: &[&StudentRecord]) -> f64 {
    let mut values = records
        .iter()
        .filter_map(|r| r.motivation)
        .collect::<Vec<_>>();
    values.sort_by(f64::total_cmp);
    values
        .get(values.len() / 2)
        .copied()
        .unwrap_or(DEFAULT_MOTIVATION_MEDIAN)
}
