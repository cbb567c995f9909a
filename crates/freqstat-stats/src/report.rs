//! Results of one computation request.
//!
//! A [`StatisticsReport`] holds one outcome per selected statistic. Each
//! statistic is computed on its own, so a statistic that is undefined for
//! the dataset is recorded as an error without affecting the others.

use serde::ser::{Serialize, SerializeMap as _, Serializer};

use crate::{
    DomainError,
    dataset::Dataset,
    descriptive::{self, Mode},
    percentiles::{self, CumulativeTable, DEFAULT_PERCENTILE_POINTS, Percentiles},
    statistic::{Selection, StatisticId},
};

/// Named sub-values, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedValues {
    values: Vec<(String, f64)>,
}

impl NamedValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<S>(&mut self, name: S, value: f64)
    where
        S: Into<String>,
    {
        self.values.push((name.into(), value));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find_map(|(n, value)| (n == name).then_some(*value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.values.iter().map(|(n, value)| (n.as_str(), *value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S> FromIterator<(S, f64)> for NamedValues
where
    S: Into<String>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
    {
        Self {
            values: iter.into_iter().map(|(n, v)| (n.into(), v)).collect(),
        }
    }
}

impl Serialize for NamedValues {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl From<&Percentiles> for NamedValues {
    fn from(percentiles: &Percentiles) -> Self {
        percentiles
            .iter()
            .map(|(p, value)| (percentiles::percentile_label(p), value))
            .collect()
    }
}

/// The value of one computed statistic.
#[derive(Debug, Clone, PartialEq, derive_more::IsVariant, serde::Serialize)]
#[serde(untagged)]
pub enum StatisticValue {
    Number(f64),
    Mode(Mode),
    Named(NamedValues),
}

impl StatisticValue {
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_named(&self) -> Option<&NamedValues> {
        match self {
            Self::Named(values) => Some(values),
            _ => None,
        }
    }
}

/// Outcome of a single statistic within a report.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticEntry {
    pub id: StatisticId,
    pub outcome: Result<StatisticValue, DomainError>,
}

/// Outcomes of every selected statistic, in selection order.
///
/// Serializes as a map from [`StatisticId::key`] to the value, or to
/// `{"error": "..."}` for statistics that are undefined for the dataset.
///
/// # Examples
///
/// ```
/// use freqstat_stats::{
///     dataset::normalize,
///     report::{StatisticValue, StatisticsReport},
///     statistic::{Selection, StatisticId},
/// };
///
/// let dataset = normalize([1.0, 2.0, 2.0, 3.0]);
/// let report = StatisticsReport::compute(&dataset, &Selection::all());
///
/// assert_eq!(report.entries().len(), StatisticId::ALL.len());
/// assert_eq!(
///     report.get(StatisticId::Mean),
///     Some(&Ok(StatisticValue::Number(2.0)))
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsReport {
    entries: Vec<StatisticEntry>,
}

impl StatisticsReport {
    /// Computes every selected statistic with the default percentile points.
    #[must_use]
    pub fn compute(dataset: &Dataset, selection: &Selection) -> Self {
        Self::compute_with_points(dataset, selection, &DEFAULT_PERCENTILE_POINTS)
    }

    /// Computes every selected statistic, using `percentile_points` for the
    /// percentiles bundle.
    #[must_use]
    pub fn compute_with_points(
        dataset: &Dataset,
        selection: &Selection,
        percentile_points: &[f64],
    ) -> Self {
        let entries = selection
            .ids()
            .iter()
            .map(|&id| {
                let outcome = evaluate(id, dataset, percentile_points);
                match &outcome {
                    Ok(value) => log::debug!("{id}: {value:?}"),
                    Err(e) => log::debug!("{id}: {e}"),
                }
                StatisticEntry { id, outcome }
            })
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[StatisticEntry] {
        &self.entries
    }

    /// The outcome of a statistic, or `None` if it was not selected.
    #[must_use]
    pub fn get(&self, id: StatisticId) -> Option<&Result<StatisticValue, DomainError>> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.outcome)
    }

    /// Number of statistics that could not be computed.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_err()).count()
    }
}

impl Serialize for StatisticsReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(serde::Serialize)]
        struct Failure {
            error: String,
        }

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            match &entry.outcome {
                Ok(value) => map.serialize_entry(entry.id.key(), value)?,
                Err(e) => map.serialize_entry(
                    entry.id.key(),
                    &Failure {
                        error: e.to_string(),
                    },
                )?,
            }
        }
        map.end()
    }
}

/// Computes one statistic.
pub fn evaluate(
    id: StatisticId,
    dataset: &Dataset,
    percentile_points: &[f64],
) -> Result<StatisticValue, DomainError> {
    let value = match id {
        StatisticId::Mean => StatisticValue::Number(descriptive::mean(dataset)?),
        StatisticId::Median => StatisticValue::Number(descriptive::median(dataset)?),
        StatisticId::Mode => StatisticValue::Mode(descriptive::mode(dataset)?),
        StatisticId::Range => StatisticValue::Number(descriptive::range(dataset)?),
        StatisticId::Variance => StatisticValue::Number(descriptive::variance(dataset)?),
        StatisticId::StdDev => StatisticValue::Number(descriptive::std_dev(dataset)?),
        StatisticId::Iqr => StatisticValue::Number(percentiles::iqr(dataset)?),
        StatisticId::Percentiles => {
            let table = CumulativeTable::new(dataset)?;
            let percentiles = Percentiles::from_table(&table, percentile_points)?;
            StatisticValue::Named(NamedValues::from(&percentiles))
        }
        StatisticId::Quartiles => {
            let quartiles = percentiles::quartiles(dataset)?;
            StatisticValue::Named(NamedValues::from_iter([
                ("Q1", quartiles.q1),
                ("Q2", quartiles.q2),
                ("Q3", quartiles.q3),
            ]))
        }
        StatisticId::Skewness => StatisticValue::Number(descriptive::skewness(dataset)?),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::dataset::{GroupedDatum, normalize};

    #[test]
    fn test_compute_selected_only() {
        let dataset = normalize([1.0, 2.0, 3.0]);
        let selection = Selection::parse(["range", "mean"]).unwrap();
        let report = StatisticsReport::compute(&dataset, &selection);

        let ids = report.entries().iter().map(|e| e.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![StatisticId::Range, StatisticId::Mean]);
        assert_eq!(report.get(StatisticId::Median), None);
    }

    #[test]
    fn test_failure_does_not_stop_other_statistics() {
        let dataset = normalize([4.0, 4.0, 4.0]);
        let report = StatisticsReport::compute(&dataset, &Selection::all());

        assert_eq!(report.failure_count(), 1);
        assert_eq!(
            report.get(StatisticId::Skewness),
            Some(&Err(DomainError::DegenerateDistribution))
        );
        assert_eq!(
            report.get(StatisticId::Variance),
            Some(&Ok(StatisticValue::Number(0.0)))
        );
        assert_eq!(
            report.get(StatisticId::Median),
            Some(&Ok(StatisticValue::Number(4.0)))
        );
    }

    #[test]
    fn test_empty_dataset_fails_every_statistic() {
        let report = StatisticsReport::compute(&Dataset::default(), &Selection::all());
        assert_eq!(report.failure_count(), StatisticId::ALL.len());
        assert!(
            report
                .entries()
                .iter()
                .all(|e| e.outcome == Err(DomainError::EmptyDataset))
        );
    }

    #[test]
    fn test_bundles_share_values_under_different_labels() {
        let dataset = normalize((1..=8).map(f64::from));
        let report = StatisticsReport::compute(&dataset, &Selection::all());

        let quartiles = report
            .get(StatisticId::Quartiles)
            .unwrap()
            .as_ref()
            .unwrap()
            .as_named()
            .unwrap()
            .clone();
        let percentiles = report
            .get(StatisticId::Percentiles)
            .unwrap()
            .as_ref()
            .unwrap()
            .as_named()
            .unwrap()
            .clone();

        assert_eq!(quartiles.get("Q1"), Some(3.0));
        assert_eq!(quartiles.get("Q3"), Some(7.0));
        assert_eq!(percentiles.get("25th Percentile"), quartiles.get("Q1"));
        assert_eq!(percentiles.get("50th Percentile"), quartiles.get("Q2"));
        assert_eq!(percentiles.get("75th Percentile"), quartiles.get("Q3"));
        assert_eq!(
            report.get(StatisticId::Iqr),
            Some(&Ok(StatisticValue::Number(4.0)))
        );
    }

    #[test]
    fn test_custom_percentile_points() {
        let dataset = normalize((1..=10).map(f64::from));
        let report = StatisticsReport::compute_with_points(
            &dataset,
            &StatisticId::Percentiles.into(),
            &[10.0, 90.0],
        );
        let named = report
            .get(StatisticId::Percentiles)
            .unwrap()
            .as_ref()
            .unwrap()
            .as_named()
            .unwrap()
            .clone();
        assert_eq!(
            named.iter().collect::<Vec<_>>(),
            vec![("10th Percentile", 2.0), ("90th Percentile", 10.0)]
        );
    }

    #[test]
    fn test_invalid_percentile_point_fails_only_percentiles() {
        let dataset = normalize([1.0, 2.0]);
        let selection = Selection::parse(["percentiles", "quartiles"]).unwrap();
        let report = StatisticsReport::compute_with_points(&dataset, &selection, &[150.0]);
        assert!(report.get(StatisticId::Percentiles).unwrap().is_err());
        assert!(report.get(StatisticId::Quartiles).unwrap().is_ok());
    }

    #[test]
    fn test_serialize_json_shape() {
        let dataset = Dataset::from_grouped([
            GroupedDatum::new(1.0, 3),
            GroupedDatum::new(2.0, 1),
            GroupedDatum::new(3.0, 1),
        ]);
        let selection = Selection::parse(["mean", "mode", "quartiles"]).unwrap();
        let report = StatisticsReport::compute(&dataset, &selection);

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            json!({
                "mean": 1.6,
                "mode": [1.0],
                "quartiles": { "Q1": 1.0, "Q2": 1.0, "Q3": 2.0 },
            })
        );
    }

    #[test]
    fn test_serialize_errors_and_no_mode() {
        let dataset = normalize([2.0, 2.0]);
        let selection = Selection::parse(["mode", "skewness"]).unwrap();
        let report = StatisticsReport::compute(&dataset, &selection);

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["mode"], serde_json::Value::Null);
        assert_eq!(
            value["skewness"]["error"],
            "degenerate distribution: standard deviation is zero"
        );
    }

    #[test]
    fn test_serialize_preserves_selection_order() {
        let dataset = normalize([1.0, 5.0]);
        let selection = Selection::parse(["variance", "mean", "range"]).unwrap();
        let report = StatisticsReport::compute(&dataset, &selection);
        let text = serde_json::to_string(&report).unwrap();
        assert_eq!(text, r#"{"variance":4.0,"mean":3.0,"range":4.0}"#);
    }
}
