use std::{io, path::PathBuf};

use anyhow::Context as _;
use freqstat_stats::dataset::{self, Dataset};

use crate::{input, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct NormalizeArg {
    /// Comma-separated raw values
    #[arg(long, allow_hyphen_values = true)]
    values: String,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &NormalizeArg) -> anyhow::Result<()> {
    let NormalizeArg { values, output } = arg;

    let values = input::parse_values(values)?;
    let dataset = dataset::normalize(values);
    log::info!("{} distinct values", dataset.len());

    let mut output = Output::from_output_path(output.clone())?;
    write_grouped_csv(&mut output, &dataset)
        .with_context(|| format!("Failed to write CSV to {}", output.display_path()))?;
    output.finish()
}

/// Writes `value,frequency` rows sorted by value, with a header.
fn write_grouped_csv<W>(writer: W, dataset: &Dataset) -> csv::Result<()>
where
    W: io::Write,
{
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(["value", "frequency"])?;
    for datum in dataset.sorted() {
        writer.write_record([datum.value.to_string(), datum.frequency.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}
