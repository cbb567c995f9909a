use clap::{Parser, Subcommand};

use self::{chart::ChartArg, compute::ComputeArg, normalize::NormalizeArg};

mod chart;
mod compute;
mod normalize;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What to do with the data
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Compute descriptive statistics
    Compute(#[clap(flatten)] ComputeArg),
    /// Print raw values as a grouped value/frequency table
    Normalize(#[clap(flatten)] NormalizeArg),
    /// View or export a frequency chart
    Chart(#[clap(flatten)] ChartArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Compute(arg) => compute::run(&arg)?,
        Mode::Normalize(arg) => normalize::run(&arg)?,
        Mode::Chart(arg) => chart::run(&arg)?,
    }
    Ok(())
}
