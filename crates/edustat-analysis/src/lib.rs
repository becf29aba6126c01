//! Student-record analysis for the edustat dashboard
//!
//! This crate connects a CSV dataset of student records to the estimators in
//! `edustat-stats`. It owns everything between the raw file and the numeric
//! samples: parsing, filter controls, sample extraction and the combined
//! report.
//!
//! # Overview
//!
//! 1. **Load Records** ([`record::Dataset`]): Parse the CSV with lenient numeric coercion
//! 2. **Select Records** ([`filter::FilterSpec`]): Apply the categorical filters and the
//!    optional motivation equalization
//! 3. **Extract Samples** ([`sample::PairedSample`], [`sample::GroupedSample`]): Build
//!    aligned predictor/grade pairs and per-gender grade groups
//! 4. **Compute Report** ([`report::AnalysisReport`]): OLS regression, Welch t-test and
//!    group means in one pure call
//!
//! # Examples
//!
//! ```
//! use edustat_analysis::{
//!     filter::FilterSpec, record::Dataset, report::AnalysisReport, sample::Predictor,
//! };
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let csv = "\
//! subject,gender,motivation,interest,study_time,grade,SES,school_type
//! Math,Male,1,3,2,2,High,Public
//! Math,Female,2,4,5,4,Low,Public
//! Math,Male,3,2,4,5,Mid,Private
//! Math,Female,4,5,6,4,High,Public
//! Math,Male,5,6,3,5,Low,Private
//! ";
//! let dataset = Dataset::from_reader(csv.as_bytes())?;
//! let report = AnalysisReport::compute(&dataset, &FilterSpec::default(), Predictor::Motivation);
//!
//! assert_eq!(report.n, 5);
//! assert!((report.regression.slope - 0.6).abs() < 1e-9);
//! assert_eq!(report.stat_cards().r2, "6.00e-1");
//! # Ok(())
//! # }
//! ```

pub mod filter;
pub mod record;
pub mod report;
pub mod sample;
