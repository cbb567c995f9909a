//! Descriptive statistics over grouped value/frequency data.
//!
//! This crate is the computation core of `freqstat`. It provides:
//!
//! - **Dataset normalization**: group raw values into distinct `(value, frequency)` rows
//! - **Descriptive statistics**: weighted mean, median, mode, range, variance,
//!   standard deviation and skewness
//! - **Percentiles**: achieved-rank percentiles, quartiles and the interquartile range
//! - **Selection and reports**: pick statistics by identifier and compute them
//!   independently of each other
//!
//! Every statistic is a pure function of a [`Dataset`](dataset::Dataset). Statistics
//! that are mathematically undefined for a dataset fail with a [`DomainError`]
//! instead of producing `NaN` or infinities.
//!
//! # Modules
//!
//! - [`dataset`]: Grouped data model and the normalizer
//! - [`descriptive`]: Central tendency, dispersion and shape
//! - [`percentiles`]: Cumulative-frequency ranks, percentiles and quartiles
//! - [`statistic`]: Statistic identifiers and selections
//! - [`report`]: Per-statistic outcomes for one computation request
//!
//! # Examples
//!
//! ## Computing single statistics
//!
//! ```
//! use freqstat_stats::{dataset::normalize, descriptive, percentiles};
//!
//! let dataset = normalize([1.0, 2.0, 3.0, 4.0]);
//! assert_eq!(descriptive::mean(&dataset).unwrap(), 2.5);
//! assert_eq!(descriptive::median(&dataset).unwrap(), 2.5);
//! assert_eq!(percentiles::percentile(&dataset, 75.0).unwrap(), 4.0);
//! ```
//!
//! ## Computing a report
//!
//! ```
//! use freqstat_stats::{
//!     dataset::normalize,
//!     report::StatisticsReport,
//!     statistic::{Selection, StatisticId},
//! };
//!
//! let dataset = normalize([7.0, 7.0, 7.0]);
//! let selection = Selection::parse(["mean", "skewness"]).unwrap();
//! let report = StatisticsReport::compute(&dataset, &selection);
//!
//! assert!(report.get(StatisticId::Mean).unwrap().is_ok());
//! // A constant dataset has no defined skewness, but the mean is still reported.
//! assert!(report.get(StatisticId::Skewness).unwrap().is_err());
//! ```

pub mod dataset;
pub mod descriptive;
pub mod percentiles;
pub mod report;
pub mod statistic;

/// A statistic is mathematically undefined for the given dataset.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum DomainError {
    #[display("statistic is undefined for an empty dataset")]
    EmptyDataset,
    #[display("degenerate distribution: standard deviation is zero")]
    DegenerateDistribution,
    #[display("percentile {percentile} is outside the range 0 to 100")]
    PercentileOutOfRange { percentile: f64 },
    #[display("result overflows the range of finite numbers")]
    NonFiniteResult,
}

/// Passes `value` through if it is finite.
pub(crate) fn finite(value: f64) -> Result<f64, DomainError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::NonFiniteResult)
    }
}
