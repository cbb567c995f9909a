use std::collections::HashMap;

/// One distinct observed value and how many times it occurs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupedDatum {
    /// The observed value.
    pub value: f64,
    /// The number of occurrences. Must be at least 1.
    pub frequency: u64,
}

impl GroupedDatum {
    #[must_use]
    pub const fn new(value: f64, frequency: u64) -> Self {
        Self { value, frequency }
    }

    /// The frequency as a floating-point weight.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.frequency as f64
    }
}

/// A grouped value/frequency dataset.
///
/// Row order carries no meaning: every statistic that depends on order sorts
/// the rows internally. Rows are expected to hold distinct values (the output
/// of [`normalize`]), but duplicate rows are accepted and treated as
/// independent buckets.
///
/// # Examples
///
/// ```
/// use freqstat_stats::dataset::{Dataset, GroupedDatum};
///
/// let dataset = Dataset::from_grouped([GroupedDatum::new(1.0, 3), GroupedDatum::new(2.0, 1)]);
/// assert_eq!(dataset.total_frequency(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    data: Vec<GroupedDatum>,
}

impl Dataset {
    /// Wraps already grouped rows.
    ///
    /// Validation (finite values, positive frequencies) is the caller's job.
    #[must_use]
    pub fn from_grouped<I>(data: I) -> Self
    where
        I: IntoIterator<Item = GroupedDatum>,
    {
        let data = data.into_iter().collect::<Vec<_>>();
        debug_assert!(
            data.iter().all(|d| d.frequency > 0),
            "frequencies must be positive"
        );
        Self { data }
    }

    /// Groups raw ungrouped values by counting duplicates.
    ///
    /// See [`normalize`].
    #[must_use]
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut index = HashMap::<u64, usize>::new();
        let mut data = Vec::<GroupedDatum>::new();
        for value in values {
            // `-0.0` and `0.0` count as the same value
            let value = if value == 0.0 { 0.0 } else { value };
            match index.get(&value.to_bits()) {
                Some(&i) => data[i].frequency += 1,
                None => {
                    index.insert(value.to_bits(), data.len());
                    data.push(GroupedDatum::new(value, 1));
                }
            }
        }
        log::debug!("grouped values into {} distinct rows", data.len());
        Self { data }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[GroupedDatum] {
        &self.data
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroupedDatum> + '_ {
        self.data.iter()
    }

    /// Number of rows (distinct values for normalized data).
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Total number of observations, `N`.
    #[must_use]
    pub fn total_frequency(&self) -> u64 {
        self.data.iter().map(|d| d.frequency).sum()
    }

    /// Rows sorted by ascending value.
    #[must_use]
    pub fn sorted(&self) -> Vec<GroupedDatum> {
        let mut sorted = self.data.clone();
        sorted.sort_by(|a, b| a.value.total_cmp(&b.value));
        sorted
    }

    /// Labels and frequencies for plotting, ordered by ascending value.
    ///
    /// # Examples
    ///
    /// ```
    /// use freqstat_stats::dataset::Dataset;
    ///
    /// let series = Dataset::from_values([2.5, 1.0, 2.5]).chart_series();
    /// assert_eq!(series.labels, ["1", "2.5"]);
    /// assert_eq!(series.frequencies, [1, 2]);
    /// ```
    #[must_use]
    pub fn chart_series(&self) -> ChartSeries {
        let (labels, frequencies) = self
            .sorted()
            .into_iter()
            .map(|d| (d.value.to_string(), d.frequency))
            .unzip();
        ChartSeries {
            labels,
            frequencies,
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a GroupedDatum;
    type IntoIter = std::slice::Iter<'a, GroupedDatum>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// The `(labels, frequencies)` pair handed to a chart renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub frequencies: Vec<u64>,
}

impl ChartSeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.frequencies.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.frequencies.iter().copied())
    }
}

/// Converts raw values into a grouped dataset by counting duplicates.
///
/// One row is emitted per distinct value. The row order is unspecified and
/// must not be relied on. Empty input yields an empty dataset.
///
/// # Examples
///
/// ```
/// use freqstat_stats::dataset::{GroupedDatum, normalize};
///
/// let dataset = normalize([4.0, 4.0, 4.0, 7.0]);
/// assert!(dataset.iter().any(|d| *d == GroupedDatum::new(4.0, 3)));
/// assert!(dataset.iter().any(|d| *d == GroupedDatum::new(7.0, 1)));
/// ```
#[must_use]
pub fn normalize<I>(values: I) -> Dataset
where
    I: IntoIterator<Item = f64>,
{
    Dataset::from_values(values)
}
