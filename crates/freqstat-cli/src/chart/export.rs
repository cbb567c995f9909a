use std::path::PathBuf;

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget as _};

use super::{ChartSize, FrequencyChart};
use crate::util::Output;

/// Draws the chart off-screen and returns it as plain text.
pub(crate) fn render_to_text(chart: &FrequencyChart, size: ChartSize) -> String {
    let mut buf = Buffer::empty(Rect::new(0, 0, size.width, size.height));
    chart.render(buf.area, &mut buf);
    let mut text = buffer_lines(&buf).join("\n");
    text.push('\n');
    text
}

pub(crate) fn export_chart(
    chart: &FrequencyChart,
    size: ChartSize,
    path: PathBuf,
) -> anyhow::Result<()> {
    let text = render_to_text(chart, size);
    let mut output = Output::create(path)?;
    output.write_text(&text)?;
    log::info!(
        "Exported {} chart to {}",
        chart.kind().name(),
        output.display_path()
    );
    Ok(())
}

/// Rows of the buffer with trailing blanks removed.
pub(crate) fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            let line = (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>();
            line.trim_end().to_owned()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use freqstat_stats::dataset::Dataset;
    use ratatui::style::Color;

    use super::*;
    use crate::chart::ChartKind;

    fn chart(kind: ChartKind) -> FrequencyChart {
        let series = Dataset::from_values([3.0, 1.0, 3.0, 2.0, 3.0]).chart_series();
        FrequencyChart::new(kind, series, vec![Color::Yellow; 3])
    }

    #[test]
    fn test_render_to_text_has_requested_size() {
        let size = ChartSize {
            width: 40,
            height: 10,
        };
        let text = render_to_text(&chart(ChartKind::Bar), size);
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 10);
        assert!(lines.iter().all(|line| line.chars().count() <= 40));
        assert!(lines[0].starts_with('┌'));
        assert!(lines[9].starts_with('└'));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_buffer_lines_trim_trailing_blanks() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 2));
        buf.set_string(0, 0, "ab", ratatui::style::Style::new());
        assert_eq!(buffer_lines(&buf), vec!["ab".to_owned(), String::new()]);
    }

    #[test]
    fn test_export_chart_writes_file() {
        let dir = std::env::temp_dir().join(format!("freqstat-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("pie.txt");

        export_chart(&chart(ChartKind::Pie), ChartSize::DEFAULT, path.clone()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), usize::from(ChartSize::DEFAULT.height));
        assert!(text.contains("3: 3 (60.0%)"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
