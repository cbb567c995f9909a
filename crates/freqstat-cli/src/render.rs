use std::fmt;

use chrono::{DateTime, Utc};
use freqstat_stats::{
    descriptive::Mode,
    report::{StatisticValue, StatisticsReport},
};

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TextStyle {
    /// Decimal places; `None` prints the shortest exact form.
    pub precision: Option<usize>,
    /// Adds a `Generated:` header line.
    pub generated_at: Option<DateTime<Utc>>,
}

impl TextStyle {
    fn number(self, value: f64) -> String {
        match self.precision {
            Some(precision) => format!("{value:.precision$}"),
            None => value.to_string(),
        }
    }

    fn mode(self, mode: &Mode) -> String {
        match mode {
            Mode::NoMode => mode.to_string(),
            Mode::Values(values) => values
                .iter()
                .map(|&v| self.number(v))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Text form of a report: one `Label: value` line per statistic.
///
/// Bundles list their sub-values on indented lines below the label, and
/// failed statistics print their error in place of a value.
#[derive(Debug, Clone, Copy)]
struct ReportText<'a> {
    report: &'a StatisticsReport,
    style: TextStyle,
}

impl<'a> ReportText<'a> {
    fn new(report: &'a StatisticsReport, style: TextStyle) -> Self {
        Self { report, style }
    }
}

impl fmt::Display for ReportText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = self.style;
        if let Some(generated_at) = style.generated_at {
            writeln!(f, "Generated: {}", generated_at.to_rfc3339())?;
            writeln!(f)?;
        }

        for entry in self.report.entries() {
            let label = entry.id.label();
            match &entry.outcome {
                Ok(StatisticValue::Number(value)) => {
                    writeln!(f, "{label}: {}", style.number(*value))?;
                }
                Ok(StatisticValue::Mode(mode)) => writeln!(f, "{label}: {}", style.mode(mode))?,
                Ok(StatisticValue::Named(values)) => {
                    writeln!(f, "{label}:")?;
                    for (name, value) in values.iter() {
                        writeln!(f, "  - {name}: {}", style.number(value))?;
                    }
                }
                Err(e) => writeln!(f, "{label}: error: {e}")?,
            }
        }
        Ok(())
    }
}

pub(crate) fn render_report(report: &StatisticsReport, style: TextStyle) -> String {
    ReportText::new(report, style).to_string()
}
