//! Analysis command
//!
//! Loads the dataset, applies the filter controls and prints the stat cards
//! together with the regression detail, the gender comparison and the group
//! means.

use std::{io::Write as _, path::PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use edustat_analysis::{
    filter::{FilterSpec, Selection},
    report::{AnalysisReport, StatCards},
    sample::Predictor,
};
use edustat_stats::format::{format_estimate, format_p_value};
use serde::Serialize;

use crate::util::{self, Output};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// Full report as JSON
    Json,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct AnalyzeArg {
    /// Path to the student records CSV file
    pub data: PathBuf,

    /// Subject to keep ("All" for every subject)
    #[arg(long, default_value = "All")]
    pub subject: Selection,

    /// Gender to keep ("All" for every gender)
    #[arg(long, default_value = "All")]
    pub gender: Selection,

    /// School type to keep ("All" for every school type)
    #[arg(long, default_value = "All")]
    pub school: Selection,

    /// Socio-economic status to keep ("All" for every band)
    #[arg(long, default_value = "All")]
    pub ses: Selection,

    /// Keep only students whose motivation is within 1 of the median
    #[arg(long)]
    pub equalize_motivation: bool,

    /// Predictor column: motivation, interest or study_time
    #[arg(long, default_value = "motivation")]
    pub predictor: Predictor,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl AnalyzeArg {
    fn filter_spec(&self) -> FilterSpec {
        FilterSpec {
            subject: self.subject.clone(),
            gender: self.gender.clone(),
            school_type: self.school.clone(),
            ses: self.ses.clone(),
            equalize_motivation: self.equalize_motivation,
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    data: &'a PathBuf,
    stat_cards: StatCards,
    #[serde(flatten)]
    report: &'a AnalysisReport,
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let dataset = util::read_dataset_file(&arg.data)?;
    let report = AnalysisReport::compute(&dataset, &arg.filter_spec(), arg.predictor);
    if report.n == 0 {
        tracing::warn!("no records match the selected filters");
    }

    let mut output = Output::from_output_path(arg.output.clone())?;
    match arg.format {
        OutputFormat::Json => output.write_json(&JsonReport {
            generated_at: Utc::now(),
            data: &arg.data,
            stat_cards: report.stat_cards(),
            report: &report,
        })?,
        OutputFormat::Text => {
            let text = render_text(arg, &report).context("Failed to render report")?;
            output.write_text(&text)?;
        }
    }

    if let Output::File { .. } = &output {
        tracing::info!("Report saved to {output}");
    }
    Ok(())
}

fn render_text(arg: &AnalyzeArg, report: &AnalysisReport) -> std::io::Result<String> {
    let mut out = Vec::new();
    let filter = &report.filter;
    let cards = report.stat_cards();
    let fmt = |v: f64| format_estimate(Some(v));

    writeln!(out, "Analysis of {}", arg.data.display())?;
    writeln!(out, "==========================================\n")?;
    writeln!(
        out,
        "Filters: subject={} gender={} school_type={} SES={} equalize_motivation={}",
        filter.subject, filter.gender, filter.school_type, filter.ses, filter.equalize_motivation
    )?;
    writeln!(out, "Model:   grade ~ {}\n", report.predictor)?;

    writeln!(out, "  {:>10} {:>10} {:>10} {:>8}", "Beta", "p-value", "R²", "n")?;
    writeln!(out, "  {}", "-".repeat(41))?;
    writeln!(
        out,
        "  {:>10} {:>10} {:>10} {:>8}\n",
        cards.slope, cards.p_value, cards.r2, cards.n
    )?;

    let ols = &report.regression;
    writeln!(out, "Regression")?;
    writeln!(out, "  {:<12} {:>10}", "slope", fmt(ols.slope))?;
    writeln!(out, "  {:<12} {:>10}", "intercept", fmt(ols.intercept))?;
    writeln!(out, "  {:<12} {:>10}", "t", fmt(ols.t))?;
    writeln!(out, "  {:<12} {:>10}\n", "p", format_p_value(Some(ols.p)))?;

    let welch = &report.gender_test;
    writeln!(out, "Gender comparison (Welch, Male - Female)")?;
    writeln!(out, "  {:<12} {:>10}", "mean diff", fmt(welch.mean_diff))?;
    writeln!(out, "  {:<12} {:>10}", "t", fmt(welch.t))?;
    writeln!(out, "  {:<12} {:>10}", "df", fmt(welch.df))?;
    writeln!(out, "  {:<12} {:>10}\n", "p", format_p_value(Some(welch.p)))?;

    writeln!(out, "Group means")?;
    writeln!(out, "  {:<12} {:>8} {:>10} {:>10}", "Group", "n", "Mean", "Std dev")?;
    writeln!(out, "  {}", "-".repeat(43))?;
    for group in &report.group_means {
        let (count, std_dev) = group
            .stats
            .map_or((0, f64::NAN), |s| (s.count, s.std_dev));
        writeln!(
            out,
            "  {:<12} {:>8} {:>10} {:>10}",
            group.label,
            count,
            fmt(group.mean),
            fmt(std_dev)
        )?;
    }

    Ok(String::from_utf8_lossy(&out).into_owned())
}
