use std::path::PathBuf;

use chrono::{DateTime, Utc};
use freqstat_stats::{
    percentiles::DEFAULT_PERCENTILE_POINTS, report::StatisticsReport, statistic::Selection,
};

use crate::{
    chart::{self, ChartKind, ChartOutputArg},
    input::{InputArg, InputError},
    render::{self, TextStyle},
    util::Output,
};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ComputeArg {
    #[clap(flatten)]
    input: InputArg,
    /// Statistics to compute, comma-separated, or `all`
    #[arg(long, value_delimiter = ',', default_value = Selection::ALL_NAME)]
    stats: Vec<String>,
    /// Percentiles reported by the `percentiles` statistic
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_PERCENTILE_POINTS)]
    percentile_points: Vec<f64>,
    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    format: OutputFormat,
    /// Decimal places in text output
    #[arg(long)]
    precision: Option<usize>,
    /// Also save the results to this file
    #[arg(long)]
    output: Option<PathBuf>,
    /// Open a chart of the data (bar, histogram or pie)
    #[arg(long)]
    chart: Option<ChartKind>,
    /// Save the chart as text to this file
    #[arg(long)]
    chart_output: Option<PathBuf>,
    #[clap(flatten)]
    chart_options: ChartOutputArg,
}

#[derive(Debug, serde::Serialize)]
struct ExportedReport<'a> {
    generated_at: DateTime<Utc>,
    statistics: &'a StatisticsReport,
}

pub(crate) fn run(arg: &ComputeArg) -> anyhow::Result<()> {
    let ComputeArg {
        input,
        stats,
        percentile_points,
        format,
        precision,
        output,
        chart: chart_kind,
        chart_output,
        chart_options,
    } = arg;

    let dataset = input.load()?;
    let selection = Selection::parse(stats).map_err(InputError::from)?;
    log::info!(
        "Computing {} statistics over {} observations",
        selection.ids().len(),
        dataset.total_frequency()
    );
    let report = StatisticsReport::compute_with_points(&dataset, &selection, percentile_points);
    let failures = report.failure_count();
    if failures > 0 {
        log::warn!(
            "{failures} of {} statistics could not be computed",
            report.entries().len()
        );
    }

    let style = TextStyle {
        precision: *precision,
        generated_at: None,
    };
    write_report(&mut Output::stdout(), &report, *format, style, None)?;

    if let Some(path) = output {
        let mut file = Output::create(path.clone())?;
        write_report(&mut file, &report, *format, style, Some(Utc::now()))?;
        log::info!("Saved results to {}", file.display_path());
    }

    if chart_output.is_some() || chart_kind.is_some() {
        let series = dataset.chart_series();
        if let Some(path) = chart_output {
            let kind = chart_kind.unwrap_or_default();
            chart::present(kind, series.clone(), Some(path.clone()), chart_options)?;
        }
        if let Some(kind) = chart_kind {
            chart::present(*kind, series, None, chart_options)?;
        }
    }
    Ok(())
}

fn write_report(
    output: &mut Output,
    report: &StatisticsReport,
    format: OutputFormat,
    style: TextStyle,
    generated_at: Option<DateTime<Utc>>,
) -> anyhow::Result<()> {
    match (format, generated_at) {
        (OutputFormat::Text, _) => {
            let style = TextStyle {
                generated_at,
                ..style
            };
            output.write_text(&render::render_report(report, style))
        }
        (OutputFormat::Json, Some(generated_at)) => output.write_json(&ExportedReport {
            generated_at,
            statistics: report,
        }),
        (OutputFormat::Json, None) => output.write_json(report),
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;
    use freqstat_stats::statistic::StatisticId;

    use super::*;
    use crate::command::CommandArgs;

    fn parse(args: &[&str]) -> ComputeArg {
        let args = CommandArgs::try_parse_from(
            ["freqstat", "compute"].iter().chain(args).copied(),
        )
        .unwrap();
        match args.mode {
            crate::command::Mode::Compute(arg) => arg,
            mode => panic!("unexpected mode {mode:?}"),
        }
    }

    #[test]
    fn test_defaults() {
        let arg = parse(&["--values", "1,2"]);
        assert_eq!(arg.stats, ["all"]);
        assert_eq!(arg.percentile_points, DEFAULT_PERCENTILE_POINTS);
        assert_eq!(arg.format, OutputFormat::Text);
        assert_eq!(arg.chart, None);
        assert_eq!(arg.chart_options.chart_size, chart::ChartSize::DEFAULT);
    }

    #[test]
    fn test_stats_and_points_lists() {
        let arg = parse(&[
            "--csv",
            "data.csv",
            "--stats",
            "mean,std-dev",
            "--percentile-points",
            "10,90",
            "--format",
            "json",
            "--chart",
            "pie",
        ]);
        assert_eq!(
            Selection::parse(&arg.stats).unwrap().ids(),
            &[StatisticId::Mean, StatisticId::StdDev]
        );
        assert_eq!(arg.percentile_points, [10.0, 90.0]);
        assert_eq!(arg.format, OutputFormat::Json);
        assert_eq!(arg.chart, Some(ChartKind::Pie));
    }

    #[test]
    fn test_exported_report_json() {
        let dataset = freqstat_stats::dataset::normalize([2.0, 4.0]);
        let report = StatisticsReport::compute(&dataset, &Selection::from(StatisticId::Mean));
        let exported = ExportedReport {
            generated_at: DateTime::from_timestamp(0, 0).unwrap(),
            statistics: &report,
        };
        assert_eq!(
            serde_json::to_string(&exported).unwrap(),
            r#"{"generated_at":"1970-01-01T00:00:00Z","statistics":{"mean":3.0}}"#
        );
    }
}
