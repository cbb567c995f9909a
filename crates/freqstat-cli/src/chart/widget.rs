use std::f64::consts::TAU;

use freqstat_stats::dataset::ChartSeries;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Bar, BarChart, Block, Paragraph, Widget,
        canvas::{Canvas, Points},
    },
};

use super::ChartKind;

const MAX_BAR_WIDTH: u16 = 12;
const LEGEND_WIDTH: u16 = 28;

/// A frequency chart of one series, drawn as the selected kind.
#[derive(Debug, Clone)]
pub(crate) struct FrequencyChart {
    kind: ChartKind,
    series: ChartSeries,
    colors: Vec<Color>,
}

impl FrequencyChart {
    pub(crate) fn new(kind: ChartKind, series: ChartSeries, colors: Vec<Color>) -> Self {
        Self {
            kind,
            series,
            colors,
        }
    }

    pub(crate) fn kind(&self) -> ChartKind {
        self.kind
    }

    /// The same data and colours drawn as another kind.
    pub(crate) fn with_kind(&self, kind: ChartKind) -> Self {
        Self {
            kind,
            ..self.clone()
        }
    }

    fn color(&self, index: usize) -> Color {
        if self.colors.is_empty() {
            return Color::Reset;
        }
        self.colors[index % self.colors.len()]
    }

    fn render_bars(&self, area: Rect, buf: &mut Buffer, gap: u16) {
        let bars = self
            .series
            .iter()
            .enumerate()
            .map(|(i, (label, frequency))| {
                Bar::with_label(label.to_owned(), frequency)
                    .text_value(frequency.to_string())
                    .style(Style::new().fg(self.color(i)))
            })
            .collect::<Vec<_>>();
        BarChart::new(bars)
            .bar_width(bar_width(area.width, self.series.len(), gap))
            .bar_gap(gap)
            .render(area, buf);
    }

    fn render_pie(&self, area: Rect, buf: &mut Buffer) {
        let [pie_area, legend_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(LEGEND_WIDTH)])
                .areas(area);

        let bounds = slice_bounds(&self.series.frequencies);
        let mut slices = vec![vec![]; bounds.len()];
        // Braille markers give 2x4 dots per cell
        let (x_bound, y_bound) = pie_bounds(pie_area);
        let dots_x = u32::from(pie_area.width) * 2;
        let dots_y = u32::from(pie_area.height) * 4;
        for ix in 0..dots_x {
            for iy in 0..dots_y {
                let x = (f64::from(ix) + 0.5) / f64::from(dots_x) * 2.0 * x_bound - x_bound;
                let y = (f64::from(iy) + 0.5) / f64::from(dots_y) * 2.0 * y_bound - y_bound;
                if x * x + y * y > 1.0 {
                    continue;
                }
                if let Some(index) = slice_at(&bounds, clockwise_fraction(x, y)) {
                    slices[index].push((x, y));
                }
            }
        }

        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([-x_bound, x_bound])
            .y_bounds([-y_bound, y_bound])
            .paint(|ctx| {
                for (i, coords) in slices.iter().enumerate() {
                    ctx.draw(&Points {
                        coords,
                        color: self.color(i),
                    });
                }
            });
        canvas.render(pie_area, buf);

        Paragraph::new(self.legend()).render(legend_area, buf);
    }

    #[expect(clippy::cast_precision_loss)]
    fn legend(&self) -> Vec<Line<'_>> {
        let total = self.series.total() as f64;
        self.series
            .iter()
            .enumerate()
            .map(|(i, (label, frequency))| {
                let percent = frequency as f64 / total * 100.0;
                Line::from(vec![
                    Span::styled("██ ", Style::new().fg(self.color(i))),
                    Span::raw(format!("{label}: {frequency} ({percent:.1}%)")),
                ])
            })
            .collect()
    }
}

impl Widget for &FrequencyChart {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = Block::bordered().title(self.kind.title());
        let inner = block.inner(area);
        block.render(area, buf);

        if self.series.total() == 0 {
            Paragraph::new("No data").centered().render(inner, buf);
            return;
        }
        match self.kind {
            ChartKind::Bar => self.render_bars(inner, buf, 1),
            ChartKind::Histogram => self.render_bars(inner, buf, 0),
            ChartKind::Pie => self.render_pie(inner, buf),
        }
    }
}

/// Widest bar that fits `count` bars separated by `gap` into `width`.
fn bar_width(width: u16, count: usize, gap: u16) -> u16 {
    let count = u16::try_from(count.max(1)).unwrap_or(u16::MAX);
    let gaps = gap.saturating_mul(count - 1);
    (width.saturating_sub(gaps) / count).clamp(1, MAX_BAR_WIDTH)
}

/// Half extents of the canvas so that the unit circle looks round.
///
/// Terminal cells are about twice as tall as they are wide.
fn pie_bounds(area: Rect) -> (f64, f64) {
    let ratio = f64::from(area.width) / (2.0 * f64::from(area.height.max(1)));
    if ratio >= 1.0 {
        (ratio, 1.0)
    } else {
        (1.0, 1.0 / ratio.max(f64::EPSILON))
    }
}

/// Position of `(x, y)` around the circle, clockwise from 12 o'clock, as a
/// fraction of a full turn in `0.0..1.0`.
fn clockwise_fraction(x: f64, y: f64) -> f64 {
    x.atan2(y).rem_euclid(TAU) / TAU
}

/// Cumulative end of each slice as a fraction of the whole.
#[expect(clippy::cast_precision_loss)]
pub(super) fn slice_bounds(frequencies: &[u64]) -> Vec<f64> {
    let total = frequencies.iter().sum::<u64>() as f64;
    frequencies
        .iter()
        .scan(0, |acc, &f| {
            *acc += f;
            Some(*acc as f64 / total)
        })
        .collect()
}

/// Index of the slice containing `fraction`.
pub(super) fn slice_at(bounds: &[f64], fraction: f64) -> Option<usize> {
    bounds
        .iter()
        .position(|&end| fraction < end)
        .or_else(|| bounds.len().checked_sub(1))
}
