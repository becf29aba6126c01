//! Numeric samples extracted from selected records
//!
//! The estimators work on plain `f64` slices. This module turns filtered
//! records into:
//!
//! - [`PairedSample`]: aligned predictor/grade pairs for the regression
//! - [`GroupedSample`]: grades partitioned by a categorical label for the
//!   group comparison and the per-group means

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::record::{Attribute, StudentRecord};

/// Group labels compared by the gender t-test, in display order.
pub const GENDER_GROUPS: [&str; 2] = ["Male", "Female"];

/// Numeric column used as the regression predictor. Grade is always the
/// response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predictor {
    #[default]
    Motivation,
    Interest,
    StudyTime,
}

impl Predictor {
    pub const ALL: [Self; 3] = [Self::Motivation, Self::Interest, Self::StudyTime];

    /// CSV column name.
    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            Self::Motivation => "motivation",
            Self::Interest => "interest",
            Self::StudyTime => "study_time",
        }
    }

    #[must_use]
    pub fn value(self, record: &StudentRecord) -> Option<f64> {
        match self {
            Self::Motivation => record.motivation,
            Self::Interest => record.interest,
            Self::StudyTime => record.study_time,
        }
    }
}

impl fmt::Display for Predictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown predictor '{name}' (expected motivation, interest or study_time)")]
pub struct ParsePredictorError {
    #[error(not(source))]
    name: String,
}

impl FromStr for Predictor {
    type Err = ParsePredictorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|p| p.column() == normalized)
            .ok_or_else(|| ParsePredictorError { name: s.to_owned() })
    }
}

/// Aligned predictor and grade observations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairedSample {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl PairedSample {
    /// Collects pairs from records where both values are present.
    ///
    /// Records missing either value are skipped, so `x` and `y` always have
    /// the same length.
    #[must_use]
    pub fn from_records(records: &[&StudentRecord], predictor: Predictor) -> Self {
        let (x, y) = records
            .iter()
            .filter_map(|r| Some((predictor.value(r)?, r.grade?)))
            .unzip();
        Self { x, y }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Grades partitioned by the value of a categorical attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedSample {
    pub groups: Vec<(String, Vec<f64>)>,
}

impl GroupedSample {
    /// Collects grades for each label in `labels`, preserving label order.
    ///
    /// Records whose attribute matches none of the labels are ignored.
    #[must_use]
    pub fn by_attribute(records: &[&StudentRecord], attribute: Attribute, labels: &[&str]) -> Self {
        let groups = labels
            .iter()
            .map(|&label| {
                let grades = records
                    .iter()
                    .filter(|r| r.attribute(attribute) == label)
                    .filter_map(|r| r.grade)
                    .collect();
                (label.to_owned(), grades)
            })
            .collect();
        Self { groups }
    }

    /// Male and female grades, in that order.
    #[must_use]
    pub fn by_gender(records: &[&StudentRecord]) -> Self {
        Self::by_attribute(records, Attribute::Gender, &GENDER_GROUPS)
    }

    /// Grades of the group with the given label; empty if unknown.
    #[must_use]
    pub fn get(&self, label: &str) -> &[f64] {
        self.groups
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, grades)| grades.as_slice())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(gender: &str, motivation: Option<f64>, interest: Option<f64>, grade: Option<f64>) -> StudentRecord {
        StudentRecord {
            subject: "Math".to_owned(),
            gender: gender.to_owned(),
            motivation,
            interest,
            study_time: None,
            grade,
            ses: "Mid".to_owned(),
            school_type: "Public".to_owned(),
        }
    }

    #[test]
    fn predictor_parses_column_names() {
        assert_eq!("motivation".parse::<Predictor>(), Ok(Predictor::Motivation));
        assert_eq!("Interest".parse::<Predictor>(), Ok(Predictor::Interest));
        assert_eq!("study_time".parse::<Predictor>(), Ok(Predictor::StudyTime));
        assert_eq!("study-time".parse::<Predictor>(), Ok(Predictor::StudyTime));
        assert!("grade".parse::<Predictor>().is_err());
    }

    #[test]
    fn paired_sample_skips_incomplete_records() {
        let records = [
            record("Male", Some(1.0), None, Some(50.0)),
            record("Male", None, Some(2.0), Some(60.0)),
            record("Female", Some(3.0), Some(4.0), None),
            record("Female", Some(5.0), Some(6.0), Some(80.0)),
        ];
        let refs = records.iter().collect::<Vec<_>>();

        let by_motivation = PairedSample::from_records(&refs, Predictor::Motivation);
        assert_eq!(by_motivation.x, [1.0, 5.0]);
        assert_eq!(by_motivation.y, [50.0, 80.0]);

        let by_interest = PairedSample::from_records(&refs, Predictor::Interest);
        assert_eq!(by_interest.x, [2.0, 6.0]);
        assert_eq!(by_interest.y, [60.0, 80.0]);
        assert_eq!(by_interest.len(), 2);
    }

    #[test]
    fn groups_follow_label_order() {
        let records = [
            record("Female", None, None, Some(90.0)),
            record("Male", None, None, Some(70.0)),
            record("Other", None, None, Some(10.0)),
            record("Female", None, None, Some(80.0)),
        ];
        let refs = records.iter().collect::<Vec<_>>();
        let grouped = GroupedSample::by_gender(&refs);

        assert_eq!(grouped.groups.len(), 2);
        assert_eq!(grouped.groups[0].0, "Male");
        assert_eq!(grouped.get("Male"), [70.0]);
        assert_eq!(grouped.get("Female"), [90.0, 80.0]);
        assert!(grouped.get("Other").is_empty());
    }
}
