//! Input acquisition: raw value lists and grouped CSV files.
//!
//! Everything here validates user input before the statistics core sees it.

use std::{
    io,
    path::{Path, PathBuf},
};

use freqstat_stats::{
    dataset::{Dataset, GroupedDatum},
    statistic::SelectionError,
};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub(crate) enum InputError {
    #[display("please enter data values")]
    NoValues,
    #[display("please enter valid numeric data; invalid entries: {}", entries.join(", "))]
    InvalidValues { entries: Vec<String> },
    #[display("please provide a valid CSV file (expected a .csv extension): {}", path.display())]
    NotCsv { path: PathBuf },
    #[display("failed to read CSV file {}", path.display())]
    ReadCsv { path: PathBuf, source: csv::Error },
    #[display("file does not contain valid numeric data: {}", path.display())]
    NoValidRows { path: PathBuf },
    #[display("{_0}")]
    Selection(#[error(not(source))] SelectionError),
    #[display("invalid chart size '{input}', expected WIDTHxHEIGHT")]
    InvalidChartSize { input: String },
}

impl From<SelectionError> for InputError {
    fn from(e: SelectionError) -> Self {
        Self::Selection(e)
    }
}

/// Where the dataset comes from.
#[derive(Debug, Clone, clap::Args)]
#[group(required = true, multiple = false)]
pub(crate) struct InputArg {
    /// Comma-separated raw values, e.g. "1, 2, 2, 3"
    #[arg(long, allow_hyphen_values = true)]
    pub values: Option<String>,

    /// CSV file of `value,frequency` rows
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

impl InputArg {
    pub(crate) fn load(&self) -> Result<Dataset, InputError> {
        match (&self.values, &self.csv) {
            (Some(text), _) => {
                let values = parse_values(text)?;
                log::info!("Parsed {} values", values.len());
                Ok(Dataset::from_values(values))
            }
            (None, Some(path)) => read_grouped_csv(path),
            (None, None) => Err(InputError::NoValues),
        }
    }
}

/// Parses a comma-separated list of numbers.
///
/// Every entry must be a finite number; all offending entries are reported
/// together.
pub(crate) fn parse_values(text: &str) -> Result<Vec<f64>, InputError> {
    if text.trim().is_empty() {
        return Err(InputError::NoValues);
    }
    let mut values = vec![];
    let mut invalid = vec![];
    for entry in text.split(',').map(str::trim) {
        match entry.parse::<f64>() {
            Ok(value) if value.is_finite() => values.push(value),
            _ if entry.is_empty() => invalid.push("<empty>".to_owned()),
            _ => invalid.push(entry.to_owned()),
        }
    }
    if !invalid.is_empty() {
        return Err(InputError::InvalidValues { entries: invalid });
    }
    Ok(values)
}

/// Reads a grouped `value,frequency` CSV file.
pub(crate) fn read_grouped_csv(path: &Path) -> Result<Dataset, InputError> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(InputError::NotCsv {
            path: path.to_owned(),
        });
    }

    let reader = csv_reader_builder()
        .from_path(path)
        .map_err(|source| InputError::ReadCsv {
            path: path.to_owned(),
            source,
        })?;
    let data = parse_grouped_records(reader).map_err(|source| InputError::ReadCsv {
        path: path.to_owned(),
        source,
    })?;
    if data.is_empty() {
        return Err(InputError::NoValidRows {
            path: path.to_owned(),
        });
    }
    log::info!("Loaded {} rows from {}", data.len(), path.display());
    Ok(Dataset::from_grouped(data))
}

fn csv_reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All);
    builder
}

/// Collects the valid rows of a grouped CSV stream.
///
/// Rows whose value is not a finite number or whose frequency is not a
/// positive integer are skipped, which also skips a header row. Records are
/// decoded lossily, so a row with invalid UTF-8 is skipped the same way.
fn parse_grouped_records<R>(mut reader: csv::Reader<R>) -> Result<Vec<GroupedDatum>, csv::Error>
where
    R: io::Read,
{
    let mut data = vec![];
    for record in reader.byte_records() {
        let record = record?;
        let line = record.position().map_or(0, csv::Position::line);
        let record = csv::StringRecord::from_byte_record_lossy(record);
        match parse_row(&record) {
            Some(datum) => data.push(datum),
            None => log::warn!("Skipping invalid row at line {line}: {record:?}"),
        }
    }
    Ok(data)
}

fn parse_row(record: &csv::StringRecord) -> Option<GroupedDatum> {
    let value = record
        .get(0)?
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())?;
    let frequency = parse_frequency(record.get(1)?)?;
    Some(GroupedDatum::new(value, frequency))
}

/// Accepts positive integers, also written as integral decimals (`3.0`).
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn parse_frequency(field: &str) -> Option<u64> {
    if let Ok(n) = field.parse::<u64>() {
        return (n > 0).then_some(n);
    }
    let f = field.parse::<f64>().ok()?;
    (f >= 1.0 && f.fract() == 0.0 && f < u64::MAX as f64).then(|| f as u64)
}
