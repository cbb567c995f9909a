use std::str::FromStr;

/// Identifier of a statistic that can be requested.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display,
)]
pub enum StatisticId {
    #[display("mean")]
    Mean,
    #[display("median")]
    Median,
    #[display("mode")]
    Mode,
    #[display("range")]
    Range,
    #[display("variance")]
    Variance,
    #[display("std_dev")]
    StdDev,
    #[display("iqr")]
    Iqr,
    #[display("percentiles")]
    Percentiles,
    #[display("quartiles")]
    Quartiles,
    #[display("skewness")]
    Skewness,
}

impl StatisticId {
    /// Every statistic, in report order. This is what `all` expands to.
    pub const ALL: [Self; 10] = [
        Self::Mean,
        Self::Median,
        Self::Mode,
        Self::Range,
        Self::Variance,
        Self::StdDev,
        Self::Iqr,
        Self::Percentiles,
        Self::Quartiles,
        Self::Skewness,
    ];

    /// Stable machine-readable key, used in JSON output.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Mode => "mode",
            Self::Range => "range",
            Self::Variance => "variance",
            Self::StdDev => "std_dev",
            Self::Iqr => "iqr",
            Self::Percentiles => "percentiles",
            Self::Quartiles => "quartiles",
            Self::Skewness => "skewness",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mean => "Mean",
            Self::Median => "Median",
            Self::Mode => "Mode",
            Self::Range => "Range",
            Self::Variance => "Variance",
            Self::StdDev => "Standard Deviation",
            Self::Iqr => "Interquartile Range",
            Self::Percentiles => "Percentiles",
            Self::Quartiles => "Quartiles",
            Self::Skewness => "Skewness",
        }
    }
}

impl FromStr for StatisticId {
    type Err = SelectionError;

    /// Parses an identifier, ignoring case and treating `-` like `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase().replace('-', "_");
        let id = match name.as_str() {
            "mean" => Self::Mean,
            "median" => Self::Median,
            "mode" => Self::Mode,
            "range" => Self::Range,
            "variance" => Self::Variance,
            "std_dev" | "stddev" | "standard_deviation" => Self::StdDev,
            "iqr" | "interquartile_range" => Self::Iqr,
            "percentiles" => Self::Percentiles,
            "quartiles" => Self::Quartiles,
            "skewness" => Self::Skewness,
            _ => {
                return Err(SelectionError::Unknown {
                    name: s.trim().to_owned(),
                });
            }
        };
        Ok(id)
    }
}

/// Invalid statistic selection.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SelectionError {
    #[display("no statistic selected")]
    Empty,
    #[display("unknown statistic '{name}'")]
    Unknown { name: String },
}

/// An ordered, duplicate-free set of statistics to compute.
///
/// # Examples
///
/// ```
/// use freqstat_stats::statistic::{Selection, StatisticId};
///
/// let selection = Selection::parse(["median", "Mean", "median"]).unwrap();
/// assert_eq!(selection.ids(), &[StatisticId::Median, StatisticId::Mean]);
///
/// let all = Selection::parse(["mean", "all"]).unwrap();
/// assert_eq!(all.ids(), &StatisticId::ALL);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<StatisticId>,
}

impl Selection {
    /// The identifier that expands to every statistic.
    pub const ALL_NAME: &'static str = "all";

    /// Selects every statistic.
    #[must_use]
    pub fn all() -> Self {
        Self {
            ids: StatisticId::ALL.to_vec(),
        }
    }

    /// Parses statistic names.
    ///
    /// Blank names are ignored. If any name is `all`, every statistic is
    /// selected. Otherwise the statistics are kept in first-mention order.
    pub fn parse<I, S>(names: I) -> Result<Self, SelectionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ids = Vec::new();
        let mut all = false;
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            if name.eq_ignore_ascii_case(Self::ALL_NAME) {
                all = true;
                continue;
            }
            let id = name.parse::<StatisticId>()?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        if all {
            return Ok(Self::all());
        }
        if ids.is_empty() {
            return Err(SelectionError::Empty);
        }
        Ok(Self { ids })
    }

    #[must_use]
    pub fn ids(&self) -> &[StatisticId] {
        &self.ids
    }

    #[must_use]
    pub fn contains(&self, id: StatisticId) -> bool {
        self.ids.contains(&id)
    }
}

impl From<StatisticId> for Selection {
    fn from(id: StatisticId) -> Self {
        Self { ids: vec![id] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keys_round_trip() {
        for id in StatisticId::ALL {
            assert_eq!(id.key().parse::<StatisticId>().unwrap(), id);
            assert_eq!(id.to_string(), id.key());
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("stdDev".parse::<StatisticId>(), Ok(StatisticId::StdDev));
        assert_eq!("std-dev".parse::<StatisticId>(), Ok(StatisticId::StdDev));
        assert_eq!(
            "Interquartile-Range".parse::<StatisticId>(),
            Ok(StatisticId::Iqr)
        );
        assert_eq!(" SKEWNESS ".parse::<StatisticId>(), Ok(StatisticId::Skewness));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "kurtosis".parse::<StatisticId>(),
            Err(SelectionError::Unknown {
                name: "kurtosis".to_owned()
            })
        );
    }

    #[test]
    fn test_selection_all_includes_mode() {
        let selection = Selection::parse(["all"]).unwrap();
        assert_eq!(selection.ids().len(), 10);
        assert!(selection.contains(StatisticId::Mode));
        assert_eq!(selection, Selection::all());
    }

    #[test]
    fn test_selection_keeps_order_without_duplicates() {
        let selection = Selection::parse(["skewness", "mean", "skewness", "iqr"]).unwrap();
        assert_eq!(
            selection.ids(),
            &[StatisticId::Skewness, StatisticId::Mean, StatisticId::Iqr]
        );
    }

    #[test]
    fn test_selection_empty() {
        assert_eq!(
            Selection::parse(Vec::<String>::new()),
            Err(SelectionError::Empty)
        );
        assert_eq!(Selection::parse(["", "  "]), Err(SelectionError::Empty));
    }

    #[test]
    fn test_selection_unknown_is_error_even_with_all() {
        assert!(Selection::parse(["all", "bogus"]).is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(StatisticId::StdDev.label(), "Standard Deviation");
        assert_eq!(StatisticId::Iqr.label(), "Interquartile Range");
        assert_eq!(
            SelectionError::Unknown {
                name: "foo".to_owned()
            }
            .to_string(),
            "unknown statistic 'foo'"
        );
    }
}
