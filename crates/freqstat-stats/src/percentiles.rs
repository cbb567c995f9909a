use crate::{DomainError, dataset::Dataset};

/// The percentile points reported by the percentiles bundle.
pub const DEFAULT_PERCENTILE_POINTS: [f64; 3] = [25.0, 50.0, 75.0];

/// Sorted rows of a dataset paired with their cumulative frequency.
///
/// Building the table sorts the dataset once; median, percentile and
/// quartile lookups can then share it.
///
/// # Examples
///
/// ```
/// use freqstat_stats::{dataset::normalize, percentiles::CumulativeTable};
///
/// let table = CumulativeTable::new(&normalize([3.0, 1.0, 2.0, 2.0])).unwrap();
/// assert_eq!(table.total(), 4);
/// assert_eq!(table.rows(), &[(1.0, 1), (2.0, 3), (3.0, 4)]);
/// ```
#[derive(Debug, Clone)]
pub struct CumulativeTable {
    /// `(value, cumulative frequency)` pairs in ascending value order.
    rows: Vec<(f64, u64)>,
    total: u64,
}

impl CumulativeTable {
    /// Sorts the dataset and accumulates its frequencies.
    ///
    /// Fails with [`DomainError::EmptyDataset`] when the total frequency is zero.
    pub fn new(dataset: &Dataset) -> Result<Self, DomainError> {
        let mut cumulative = 0;
        let rows = dataset
            .sorted()
            .into_iter()
            .map(|d| {
                cumulative += d.frequency;
                (d.value, cumulative)
            })
            .collect::<Vec<_>>();
        if cumulative == 0 {
            return Err(DomainError::EmptyDataset);
        }
        Ok(Self {
            rows,
            total: cumulative,
        })
    }

    /// Total frequency `N`.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub fn rows(&self) -> &[(f64, u64)] {
        &self.rows
    }

    /// Median following the grouped-data boundary convention.
    ///
    /// See [`descriptive::median`](crate::descriptive::median).
    #[must_use]
    pub fn median(&self) -> f64 {
        // `cumulative >= N / 2` compared in integers
        let n = self.total;
        let (idx, &(value, cumulative)) = self
            .rows
            .iter()
            .enumerate()
            .find(|(_, (_, cumulative))| cumulative * 2 >= n)
            .unwrap_or_else(|| (self.rows.len() - 1, self.last_row()));
        if n % 2 == 0 && cumulative * 2 == n {
            let next = self.rows[idx + 1..]
                .iter()
                .map(|(v, _)| *v)
                .find(|v| *v > value)
                .unwrap_or(value);
            return f64::midpoint(value, next);
        }
        value
    }

    /// Value at the given percentile (`0.0..=100.0`).
    ///
    /// The rank is `(p / 100) * (N - 1) + 1`, and the result is the first
    /// value whose cumulative frequency reaches it. The result is always an
    /// observed value; fractional ranks round up to the next observation
    /// instead of interpolating.
    ///
    /// # Examples
    ///
    /// ```
    /// use freqstat_stats::{dataset::normalize, percentiles::CumulativeTable};
    ///
    /// let table = CumulativeTable::new(&normalize((1..=8).map(f64::from))).unwrap();
    /// assert_eq!(table.percentile(25.0).unwrap(), 3.0);
    /// assert_eq!(table.percentile(75.0).unwrap(), 7.0);
    /// ```
    pub fn percentile(&self, percentile: f64) -> Result<f64, DomainError> {
        if !(0.0..=100.0).contains(&percentile) {
            return Err(DomainError::PercentileOutOfRange { percentile });
        }
        Ok(self.value_at_percentile(percentile))
    }

    /// Q1, Q2 and Q3 from the same table.
    #[must_use]
    pub fn quartiles(&self) -> Quartiles {
        Quartiles {
            q1: self.value_at_percentile(25.0),
            q2: self.value_at_percentile(50.0),
            q3: self.value_at_percentile(75.0),
        }
    }

    #[expect(clippy::cast_precision_loss)]
    fn value_at_percentile(&self, percentile: f64) -> f64 {
        let rank = (percentile / 100.0) * (self.total - 1) as f64 + 1.0;
        self.rows
            .iter()
            .find(|(_, cumulative)| *cumulative as f64 >= rank)
            .unwrap_or_else(|| self.last_row())
            .0
    }

    fn last_row(&self) -> &(f64, u64) {
        // `new` rejects tables without observations
        self.rows.last().expect("table is never empty")
    }
}

/// First, second and third quartile of a dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
}

impl Quartiles {
    /// Interquartile range, `Q3 - Q1`.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Precomputed percentile values for a dataset.
///
/// Stores percentile-value pairs for lookup of the requested percentile
/// points.
///
/// # Examples
///
/// ```
/// use freqstat_stats::{dataset::normalize, percentiles::Percentiles};
///
/// let dataset = normalize((1..=10).map(f64::from));
/// let percentiles = Percentiles::new(&dataset, &[25.0, 50.0, 75.0]).unwrap();
///
/// assert_eq!(percentiles.get(50.0), Some(6.0));
/// assert_eq!(percentiles.get(25.0), Some(4.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Percentiles {
    /// Percentile-value pairs in the order they were requested.
    values: Vec<(f64, f64)>,
}

impl Percentiles {
    /// Computes the given percentile points from a dataset.
    ///
    /// Fails if the dataset is empty or any point lies outside `0..=100`.
    pub fn new(dataset: &Dataset, percentile_points: &[f64]) -> Result<Self, DomainError> {
        let table = CumulativeTable::new(dataset)?;
        Self::from_table(&table, percentile_points)
    }

    /// Computes the given percentile points from an existing table.
    pub fn from_table(
        table: &CumulativeTable,
        percentile_points: &[f64],
    ) -> Result<Self, DomainError> {
        let values = percentile_points
            .iter()
            .map(|&p| Ok((p, table.percentile(p)?)))
            .collect::<Result<_, DomainError>>()?;
        Ok(Self { values })
    }

    /// Gets the value at a specific percentile.
    ///
    /// Points are matched exactly. Returns `None` if the percentile was not
    /// computed.
    #[must_use]
    pub fn get(&self, percentile: f64) -> Option<f64> {
        self.values
            .iter()
            .find_map(|(p, value)| p.total_cmp(&percentile).is_eq().then_some(*value))
    }

    /// Returns an iterator over all (percentile, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[(f64, f64)] {
        &self.values
    }
}

/// Value at percentile `p` of the dataset.
///
/// See [`CumulativeTable::percentile`] for the rank rule.
///
/// # Examples
///
/// ```
/// use freqstat_stats::{dataset::normalize, percentiles::percentile};
///
/// let dataset = normalize([1.0, 2.0, 3.0, 4.0, 5.0]);
/// assert_eq!(percentile(&dataset, 50.0).unwrap(), 3.0);
/// assert!(percentile(&dataset, 120.0).is_err());
/// ```
pub fn percentile(dataset: &Dataset, p: f64) -> Result<f64, DomainError> {
    CumulativeTable::new(dataset)?.percentile(p)
}

/// Q1, Q2 and Q3 (the 25th, 50th and 75th percentiles).
pub fn quartiles(dataset: &Dataset) -> Result<Quartiles, DomainError> {
    Ok(CumulativeTable::new(dataset)?.quartiles())
}

/// The 25th, 50th and 75th percentiles.
pub fn percentiles(dataset: &Dataset) -> Result<Percentiles, DomainError> {
    Percentiles::new(dataset, &DEFAULT_PERCENTILE_POINTS)
}

/// Interquartile range, `percentile(75) - percentile(25)`.
///
/// # Examples
///
/// ```
/// use freqstat_stats::{dataset::normalize, percentiles::iqr};
///
/// let dataset = normalize((1..=8).map(f64::from));
/// assert_eq!(iqr(&dataset).unwrap(), 4.0);
/// ```
pub fn iqr(dataset: &Dataset) -> Result<f64, DomainError> {
    crate::finite(quartiles(dataset)?.iqr())
}

/// Ordinal label for a percentile point, e.g. `25th Percentile`.
///
/// # Examples
///
/// ```
/// use freqstat_stats::percentiles::percentile_label;
///
/// assert_eq!(percentile_label(25.0), "25th Percentile");
/// assert_eq!(percentile_label(1.0), "1st Percentile");
/// assert_eq!(percentile_label(12.5), "12.5th Percentile");
/// ```
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn percentile_label(percentile: f64) -> String {
    let suffix = if percentile.fract() == 0.0 && percentile >= 0.0 {
        let n = percentile as u64;
        match (n % 10, n % 100) {
            (_, 11..=13) => "th",
            (1, _) => "st",
            (2, _) => "nd",
            (3, _) => "rd",
            _ => "th",
        }
    } else {
        "th"
    };
    format!("{percentile}{suffix} Percentile")
}
