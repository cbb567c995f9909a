//! Central tendency, dispersion and shape of grouped data.
//!
//! Every function weights each row by its frequency and recomputes the
//! total frequency `N` on each call. Variance and skewness are population
//! moments (no sample-size correction).

use std::fmt;

use crate::{DomainError, dataset::Dataset, finite, percentiles::CumulativeTable};

/// Outcome of [`mode`].
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// Every value is equally frequent, so no value stands out.
    NoMode,
    /// The most frequent values, in ascending order.
    Values(Vec<f64>),
}

impl Mode {
    #[must_use]
    pub fn values(&self) -> &[f64] {
        match self {
            Mode::NoMode => &[],
            Mode::Values(values) => values,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::NoMode => write!(f, "No mode"),
            Mode::Values(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                Ok(())
            }
        }
    }
}

impl serde::Serialize for Mode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Mode::NoMode => serializer.serialize_none(),
            Mode::Values(values) => serializer.collect_seq(values),
        }
    }
}

#[expect(clippy::cast_precision_loss)]
fn observation_count(dataset: &Dataset) -> Result<f64, DomainError> {
    match dataset.total_frequency() {
        0 => Err(DomainError::EmptyDataset),
        n => Ok(n as f64),
    }
}

fn bounds(dataset: &Dataset) -> Result<(f64, f64), DomainError> {
    if dataset.total_frequency() == 0 {
        return Err(DomainError::EmptyDataset);
    }
    Ok(dataset
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), d| {
            (min.min(d.value), max.max(d.value))
        }))
}

/// Weighted arithmetic mean, `sum(value * frequency) / N`.
///
/// # Examples
///
/// ```
/// use freqstat_stats::{dataset::{Dataset, GroupedDatum}, descriptive::mean};
///
/// let dataset = Dataset::from_grouped([GroupedDatum::new(2.0, 3), GroupedDatum::new(6.0, 1)]);
/// assert_eq!(mean(&dataset).unwrap(), 3.0);
/// ```
pub fn mean(dataset: &Dataset) -> Result<f64, DomainError> {
    let n = observation_count(dataset)?;
    let total = dataset.iter().map(|d| d.value * d.weight()).sum::<f64>();
    finite(total / n)
}

/// Median of grouped data.
///
/// Walks the cumulative frequency of the sorted rows up to `N / 2`. When `N`
/// is even and the cumulative frequency lands exactly on `N / 2`, the median
/// is the average of that value and the next greater value. When duplicates
/// straddle the midpoint this differs from averaging the two middle
/// observations of the expanded list.
///
/// # Examples
///
/// ```
/// use freqstat_stats::{dataset::normalize, descriptive::median};
///
/// assert_eq!(median(&normalize([1.0, 2.0, 3.0, 4.0])).unwrap(), 2.5);
/// assert_eq!(median(&normalize([5.0, 1.0, 3.0])).unwrap(), 3.0);
/// ```
pub fn median(dataset: &Dataset) -> Result<f64, DomainError> {
    Ok(CumulativeTable::new(dataset)?.median())
}

/// The most frequent value(s).
///
/// Returns [`Mode::NoMode`] when the number of modal values equals the
/// number of rows, i.e. when every value is equally frequent. This includes
/// datasets of all-distinct values and datasets with a single row.
///
/// # Examples
///
/// ```
/// use freqstat_stats::{dataset::{Dataset, GroupedDatum}, descriptive::{Mode, mode}};
///
/// let dataset = Dataset::from_grouped([
///     GroupedDatum::new(1.0, 3),
///     GroupedDatum::new(2.0, 1),
///     GroupedDatum::new(3.0, 1),
/// ]);
/// assert_eq!(mode(&dataset).unwrap(), Mode::Values(vec![1.0]));
/// ```
pub fn mode(dataset: &Dataset) -> Result<Mode, DomainError> {
    if dataset.total_frequency() == 0 {
        return Err(DomainError::EmptyDataset);
    }
    let mut max_frequency = 0;
    let mut modes = vec![];
    for d in dataset {
        if d.frequency > max_frequency {
            max_frequency = d.frequency;
            modes.clear();
            modes.push(d.value);
        } else if d.frequency == max_frequency {
            modes.push(d.value);
        }
    }
    if modes.len() == dataset.len() {
        return Ok(Mode::NoMode);
    }
    modes.sort_by(f64::total_cmp);
    Ok(Mode::Values(modes))
}

/// Difference between the largest and smallest value, ignoring frequencies.
pub fn range(dataset: &Dataset) -> Result<f64, DomainError> {
    let (min, max) = bounds(dataset)?;
    finite(max - min)
}

/// Weighted population variance, `sum(frequency * (value - mean)^2) / N`.
///
/// A dataset whose values are all equal has a variance of exactly zero.
///
/// # Examples
///
/// ```
/// use freqstat_stats::{dataset::normalize, descriptive::variance};
///
/// let dataset = normalize([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
/// assert_eq!(variance(&dataset).unwrap(), 4.0);
/// ```
pub fn variance(dataset: &Dataset) -> Result<f64, DomainError> {
    let (min, max) = bounds(dataset)?;
    if min == max {
        return Ok(0.0);
    }
    let n = observation_count(dataset)?;
    let mean = mean(dataset)?;
    let sum_sq = dataset
        .iter()
        .map(|d| d.weight() * (d.value - mean).powi(2))
        .sum::<f64>();
    finite(sum_sq / n)
}

/// Population standard deviation, the square root of [`variance`].
pub fn std_dev(dataset: &Dataset) -> Result<f64, DomainError> {
    Ok(variance(dataset)?.sqrt())
}

/// Population skewness (Fisher-Pearson coefficient without correction).
///
/// `sum(frequency * ((value - mean) / std_dev)^3) / N`
///
/// Fails with [`DomainError::DegenerateDistribution`] when the standard
/// deviation is zero.
///
/// Like every moment here, fails with [`DomainError::NonFiniteResult`]
/// when an intermediate sum overflows.
pub fn skewness(dataset: &Dataset) -> Result<f64, DomainError> {
    let n = observation_count(dataset)?;
    let mean = mean(dataset)?;
    let std_dev = std_dev(dataset)?;
    if std_dev == 0.0 {
        return Err(DomainError::DegenerateDistribution);
    }
    let sum_cubed = dataset
        .iter()
        .map(|d| d.weight() * ((d.value - mean) / std_dev).powi(3))
        .sum::<f64>();
    finite(sum_cubed / n)
}
