//! Student records and CSV dataset loading
//!
//! A dataset is a CSV file with one row per student and the header
//!
//! ```text
//! subject,gender,motivation,interest,study_time,grade,SES,school_type
//! ```
//!
//! # Coercion Rules
//!
//! - Numeric columns are parsed leniently: empty, unparsable or non-finite
//!   cells become `None` instead of failing the whole load.
//! - Missing trailing columns are treated as empty.
//! - Rows without a `subject` or `gender` are dropped.
//!
//! # Examples
//!
//! ```
//! use edustat_analysis::record::{Attribute, Dataset};
//!
//! let csv = "\
//! subject,gender,motivation,interest,study_time,grade,SES,school_type
//! Math,Male,7,6,10,82,High,Public
//! Science,Female,5,,4,n/a,Low,Private
//! ";
//! let dataset = Dataset::from_reader(csv.as_bytes())?;
//! assert_eq!(dataset.len(), 2);
//! assert_eq!(dataset.records()[1].grade, None);
//! assert_eq!(dataset.distinct_levels(Attribute::Subject), ["Math", "Science"]);
//! # Ok::<(), edustat_analysis::record::LoadDatasetError>(())
//! ```

use std::{
    collections::BTreeSet,
    fs::File,
    io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Deserializer, Serialize};

/// One student's row in the dataset.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StudentRecord {
    /// School subject the grade belongs to
    #[serde(default)]
    pub subject: String,
    /// Gender label (`"Male"` / `"Female"` in the reference data)
    #[serde(default)]
    pub gender: String,
    /// Self-reported motivation score
    #[serde(default, deserialize_with = "lenient_number")]
    pub motivation: Option<f64>,
    /// Self-reported interest score
    #[serde(default, deserialize_with = "lenient_number")]
    pub interest: Option<f64>,
    /// Weekly study time
    #[serde(default, deserialize_with = "lenient_number")]
    pub study_time: Option<f64>,
    /// Achievement (the response variable)
    #[serde(default, deserialize_with = "lenient_number")]
    pub grade: Option<f64>,
    /// Socio-economic status band
    #[serde(default, rename = "SES")]
    pub ses: String,
    /// School type (e.g. public/private)
    #[serde(default)]
    pub school_type: String,
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite()))
}

impl StudentRecord {
    fn is_complete(&self) -> bool {
        !self.subject.is_empty() && !self.gender.is_empty()
    }

    /// Value of a categorical attribute.
    #[must_use]
    pub fn attribute(&self, attribute: Attribute) -> &str {
        match attribute {
            Attribute::Subject => &self.subject,
            Attribute::Gender => &self.gender,
            Attribute::SchoolType => &self.school_type,
            Attribute::Ses => &self.ses,
        }
    }
}

/// Categorical columns that can be used to filter records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Attribute {
    #[display("subject")]
    Subject,
    #[display("gender")]
    Gender,
    #[display("school_type")]
    SchoolType,
    #[display("SES")]
    Ses,
}

impl Attribute {
    pub const ALL: [Self; 4] = [Self::Subject, Self::Gender, Self::SchoolType, Self::Ses];
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadDatasetError {
    #[display("failed to open dataset {}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("failed to parse student records")]
    Parse(csv::Error),
}

/// In-memory collection of student records.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<StudentRecord>,
}

impl Dataset {
    /// Builds a dataset, dropping records without subject or gender.
    #[must_use]
    pub fn new(records: Vec<StudentRecord>) -> Self {
        let total = records.len();
        let records = records
            .into_iter()
            .filter(StudentRecord::is_complete)
            .collect::<Vec<_>>();
        if records.len() < total {
            tracing::debug!(
                dropped = total - records.len(),
                "dropped records without subject or gender"
            );
        }
        Self { records }
    }

    /// Reads CSV with a header row from `reader`.
    pub fn from_reader<R>(reader: R) -> Result<Self, LoadDatasetError>
    where
        R: io::Read,
    {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = reader.headers().map_err(LoadDatasetError::Parse)?.clone();
        let records = reader
            .records()
            .map(|row| {
                let mut row = row?;
                while row.len() < headers.len() {
                    row.push_field("");
                }
                row.deserialize::<StudentRecord>(Some(&headers))
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(LoadDatasetError::Parse)?;
        Ok(Self::new(records))
    }

    /// Opens and reads a CSV file.
    pub fn open<P>(path: P) -> Result<Self, LoadDatasetError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadDatasetError::Open {
            path: path.to_owned(),
            source,
        })?;
        Self::from_reader(io::BufReader::new(file))
    }

    #[must_use]
    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted distinct non-empty values of `attribute`.
    #[must_use]
    pub fn distinct_levels(&self, attribute: Attribute) -> Vec<&str> {
        self.records
            .iter()
            .map(|r| r.attribute(attribute))
            .filter(|v| !v.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "subject,gender,motivation,interest,study_time,grade,SES,school_type\n";

    fn load(body: &str) -> Dataset {
        Dataset::from_reader(format!("{HEADER}{body}").as_bytes()).unwrap()
    }

    #[test]
    fn parses_all_columns() {
        let dataset = load("Math,Male,7.5,6,10,82,High,Public\n");
        let record = &dataset.records()[0];
        assert_eq!(record.subject, "Math");
        assert_eq!(record.gender, "Male");
        assert_eq!(record.motivation, Some(7.5));
        assert_eq!(record.interest, Some(6.0));
        assert_eq!(record.study_time, Some(10.0));
        assert_eq!(record.grade, Some(82.0));
        assert_eq!(record.ses, "High");
        assert_eq!(record.school_type, "Public");
    }

    #[test]
    fn unparsable_numbers_become_none() {
        let dataset = load("Math,Male,,abc,NaN,inf,High,Public\n");
        let record = &dataset.records()[0];
        assert_eq!(record.motivation, None);
        assert_eq!(record.interest, None);
        assert_eq!(record.study_time, None);
        assert_eq!(record.grade, None);
    }

    #[test]
    fn drops_rows_without_subject_or_gender() {
        let dataset = load("Math,Male,7,6,10,82,High,Public\n,Female,5,5,5,70,Low,Public\nArt,,5,5,5,70,Low,Public\n");
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn short_rows_are_padded() {
        let dataset = load("Math,Female,4\n");
        let record = &dataset.records()[0];
        assert_eq!(record.motivation, Some(4.0));
        assert_eq!(record.grade, None);
        assert_eq!(record.school_type, "");
    }

    #[test]
    fn short_rows_do_not_fail_the_load() {
        let dataset = load(
            "Math,Male,7,6,10,82,High,Public\nScience,Female,5,5\nArt\nMath,Female,6,5,8,75,Low,Private\n",
        );
        assert_eq!(dataset.len(), 3);
        let short = &dataset.records()[1];
        assert_eq!(short.subject, "Science");
        assert_eq!(short.interest, Some(5.0));
        assert_eq!(short.study_time, None);
        assert_eq!(short.ses, "");
        assert_eq!(dataset.records()[2].grade, Some(75.0));
    }

    #[test]
    fn trims_whitespace() {
        let dataset = load(" Math , Male , 7 ,6,10, 82 ,High,Public\n");
        let record = &dataset.records()[0];
        assert_eq!(record.subject, "Math");
        assert_eq!(record.grade, Some(82.0));
    }

    #[test]
    fn distinct_levels_are_sorted_and_unique() {
        let dataset = load(
            "Science,Male,1,1,1,1,Low,Public\nMath,Female,1,1,1,1,High,Private\nMath,Male,1,1,1,1,Mid,Public\n",
        );
        assert_eq!(dataset.distinct_levels(Attribute::Subject), ["Math", "Science"]);
        assert_eq!(dataset.distinct_levels(Attribute::Ses), ["High", "Low", "Mid"]);
        assert_eq!(
            dataset.distinct_levels(Attribute::SchoolType),
            ["Private", "Public"]
        );
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Dataset::open("/nonexistent/students.csv").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/students.csv"));
    }
}
