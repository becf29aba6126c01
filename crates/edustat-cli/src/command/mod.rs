use clap::{Parser, Subcommand};

use self::{analyze::AnalyzeArg, levels::LevelsArg};

mod analyze;
mod levels;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Regress grade on a predictor and compare genders for a filtered selection
    Analyze(#[clap(flatten)] AnalyzeArg),
    /// List the values available for each filter
    Levels(#[clap(flatten)] LevelsArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    crate::util::init_tracing(args.verbose);
    match args.mode {
        Mode::Analyze(arg) => analyze::run(&arg)?,
        Mode::Levels(arg) => levels::run(&arg)?,
    }
    Ok(())
}
