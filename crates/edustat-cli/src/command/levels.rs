use std::path::PathBuf;

use clap::Args;
use edustat_analysis::record::Attribute;

use crate::util;

#[derive(Debug, Clone, Args)]
pub(crate) struct LevelsArg {
    /// Path to the student records CSV file
    pub data: PathBuf,
}

pub(crate) fn run(arg: &LevelsArg) -> anyhow::Result<()> {
    let dataset = util::read_dataset_file(&arg.data)?;

    println!("Filter values in {} ({} records)", arg.data.display(), dataset.len());
    for attribute in Attribute::ALL {
        let levels = dataset.distinct_levels(attribute);
        println!("  {:<12} All, {}", attribute.to_string(), levels.join(", "));
    }
    Ok(())
}
