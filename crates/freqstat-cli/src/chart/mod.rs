//! Frequency charts of a dataset: bar, histogram and pie.
//!
//! Charts are drawn with ratatui, either in an interactive terminal viewer
//! or into an off-screen buffer that is exported as text.

use std::{path::PathBuf, str::FromStr};

use freqstat_stats::dataset::ChartSeries;
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use ratatui::style::Color;

use crate::input::InputError;

pub(crate) use self::widget::FrequencyChart;

mod export;
mod viewer;
mod widget;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub(crate) enum ChartKind {
    #[default]
    Bar,
    Histogram,
    Pie,
}

impl ChartKind {
    pub(crate) const fn name(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Histogram => "histogram",
            Self::Pie => "pie",
        }
    }

    pub(crate) const fn title(self) -> &'static str {
        match self {
            Self::Bar => "Bar Chart",
            Self::Histogram => "Histogram",
            Self::Pie => "Pie Chart",
        }
    }

    /// The kind after this one, wrapping around.
    pub(crate) const fn next(self) -> Self {
        match self {
            Self::Bar => Self::Histogram,
            Self::Histogram => Self::Pie,
            Self::Pie => Self::Bar,
        }
    }
}

/// Size of an exported chart, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("{width}x{height}")]
pub(crate) struct ChartSize {
    pub width: u16,
    pub height: u16,
}

impl ChartSize {
    pub(crate) const DEFAULT: Self = Self {
        width: 80,
        height: 24,
    };
}

impl FromStr for ChartSize {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InputError::InvalidChartSize { input: s.to_owned() };
        let (width, height) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(invalid)?;
        let width = width.trim().parse::<u16>().map_err(|_| invalid())?;
        let height = height.trim().parse::<u16>().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(Self { width, height })
    }
}

/// Chart options shared by the `compute` and `chart` commands.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ChartOutputArg {
    /// Size of an exported chart, as WIDTHxHEIGHT cells
    #[arg(long, default_value_t = ChartSize::DEFAULT)]
    pub chart_size: ChartSize,
    /// Seed for the chart colours (random if omitted)
    #[arg(long)]
    pub color_seed: Option<u64>,
}

/// One random colour per chart entry.
///
/// Components stay in `64..=255` so every colour is readable on a dark
/// terminal.
pub(crate) fn random_palette(len: usize, seed: Option<u64>) -> Vec<Color> {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    log::debug!("Chart colour seed: {seed}");
    let mut rng = Pcg32::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            Color::Rgb(
                rng.random_range(64..=255),
                rng.random_range(64..=255),
                rng.random_range(64..=255),
            )
        })
        .collect()
}

/// Holder of the one chart that is currently shown.
///
/// Showing a new chart releases the previous one first, so at most one
/// chart is alive at any time.
#[derive(Debug, Default)]
pub(crate) struct ChartSlot {
    active: Option<FrequencyChart>,
}

impl ChartSlot {
    pub(crate) fn show(&mut self, chart: FrequencyChart) -> &FrequencyChart {
        self.release();
        log::debug!("Showing {} chart", chart.kind().name());
        self.active.insert(chart)
    }

    pub(crate) fn release(&mut self) {
        if let Some(chart) = self.active.take() {
            log::debug!("Released {} chart", chart.kind().name());
        }
    }

    pub(crate) fn active(&self) -> Option<&FrequencyChart> {
        self.active.as_ref()
    }
}

/// Writes the chart to `output` as text if given, otherwise opens the
/// interactive viewer.
pub(crate) fn present(
    kind: ChartKind,
    series: ChartSeries,
    output: Option<PathBuf>,
    options: &ChartOutputArg,
) -> anyhow::Result<()> {
    let colors = random_palette(series.len(), options.color_seed);
    let chart = FrequencyChart::new(kind, series, colors);
    match output {
        Some(path) => export::export_chart(&chart, options.chart_size, path),
        None => {
            let mut slot = ChartSlot::default();
            viewer::run(&mut slot, chart)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(kind: ChartKind) -> FrequencyChart {
        let series = ChartSeries {
            labels: vec!["1".to_owned()],
            frequencies: vec![2],
        };
        FrequencyChart::new(kind, series, vec![Color::White])
    }

    #[test]
    fn test_chart_kind_from_str() {
        assert_eq!("bar".parse::<ChartKind>().unwrap(), ChartKind::Bar);
        assert_eq!("Histogram".parse::<ChartKind>().unwrap(), ChartKind::Histogram);
        assert_eq!("pie".parse::<ChartKind>().unwrap(), ChartKind::Pie);
        assert!("line".parse::<ChartKind>().is_err());
    }

    #[test]
    fn test_chart_kind_next_cycles() {
        let mut kind = ChartKind::default();
        for expected in [ChartKind::Histogram, ChartKind::Pie, ChartKind::Bar] {
            kind = kind.next();
            assert_eq!(kind, expected);
        }
        assert_eq!(kind, ChartKind::Bar);
    }

    #[test]
    fn test_chart_size_from_str() {
        assert_eq!(
            "100x30".parse::<ChartSize>().unwrap(),
            ChartSize {
                width: 100,
                height: 30
            }
        );
        assert_eq!(ChartSize::DEFAULT.to_string(), "80x24");
        assert_eq!(
            " 40 X 12 ".parse::<ChartSize>().unwrap(),
            ChartSize {
                width: 40,
                height: 12
            }
        );
        for bad in ["", "80", "0x10", "10x0", "ax10", "80x24x2"] {
            assert!(
                matches!(
                    bad.parse::<ChartSize>(),
                    Err(InputError::InvalidChartSize { .. })
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_random_palette_is_seeded() {
        let a = random_palette(5, Some(42));
        let b = random_palette(5, Some(42));
        assert_eq!(a.len(), 5);
        assert_eq!(a, b);
        for color in a {
            let Color::Rgb(r, g, b) = color else {
                panic!("unexpected colour {color:?}");
            };
            assert!(r >= 64 && g >= 64 && b >= 64);
        }
    }

    #[test]
    fn test_chart_slot_keeps_one_chart() {
        let mut slot = ChartSlot::default();
        assert!(slot.active().is_none());

        slot.show(chart(ChartKind::Bar));
        assert_eq!(slot.active().map(FrequencyChart::kind), Some(ChartKind::Bar));

        let shown = slot.show(chart(ChartKind::Pie));
        assert_eq!(shown.kind(), ChartKind::Pie);
        assert_eq!(slot.active().map(FrequencyChart::kind), Some(ChartKind::Pie));

        slot.release();
        assert!(slot.active().is_none());
        slot.release();
    }
}
