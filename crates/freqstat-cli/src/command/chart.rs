use std::path::PathBuf;

use crate::{
    chart::{self, ChartKind, ChartOutputArg},
    input::InputArg,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ChartArg {
    #[clap(flatten)]
    input: InputArg,
    /// Chart kind (bar, histogram or pie)
    #[arg(long, default_value = "bar")]
    kind: ChartKind,
    /// Save the chart as text instead of opening the viewer
    #[arg(long)]
    output: Option<PathBuf>,
    #[clap(flatten)]
    options: ChartOutputArg,
}

pub(crate) fn run(arg: &ChartArg) -> anyhow::Result<()> {
    let ChartArg {
        input,
        kind,
        output,
        options,
    } = arg;

    let dataset = input.load()?;
    chart::present(*kind, dataset.chart_series(), output.clone(), options)
}
