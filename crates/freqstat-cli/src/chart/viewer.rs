use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    widgets::Paragraph,
};

use super::{ChartKind, ChartSlot, FrequencyChart};

const HELP: &str = " q: quit  Tab: next chart  b: bar  h: histogram  p: pie";

/// Shows the chart in the terminal until the user quits.
///
/// The chart lives in `slot`; switching kinds replaces it there, and the
/// slot is emptied again when the viewer closes.
pub(crate) fn run(slot: &mut ChartSlot, chart: FrequencyChart) -> anyhow::Result<()> {
    slot.show(chart);
    let mut viewer = Viewer {
        slot,
        exiting: false,
    };
    let res = ratatui::run(|terminal| viewer.run(terminal));
    viewer.slot.release();
    res
}

#[derive(Debug)]
struct Viewer<'a> {
    slot: &'a mut ChartSlot,
    exiting: bool,
}

impl Viewer<'_> {
    fn run(&mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        while !self.exiting {
            terminal.draw(|f| self.draw(f))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        let [chart_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        if let Some(chart) = self.slot.active() {
            frame.render_widget(chart, chart_area);
        }
        frame.render_widget(Paragraph::new(HELP), help_area);
    }

    fn handle_events(&mut self) -> anyhow::Result<()> {
        match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(key_event);
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        let Some(current) = self.slot.active() else {
            self.exiting = true;
            return;
        };
        let next = match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.exiting = true;
                return;
            }
            KeyCode::Tab | KeyCode::Right => current.kind().next(),
            KeyCode::Char('b') => ChartKind::Bar,
            KeyCode::Char('h') => ChartKind::Histogram,
            KeyCode::Char('p') => ChartKind::Pie,
            _ => return,
        };
        if next != current.kind() {
            let chart = current.with_kind(next);
            self.slot.show(chart);
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use freqstat_stats::dataset::ChartSeries;
    use ratatui::style::Color;

    use super::*;

    fn press(viewer: &mut Viewer<'_>, code: KeyCode) {
        viewer.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn slot_with_chart() -> ChartSlot {
        let series = ChartSeries {
            labels: vec!["4".to_owned(), "9".to_owned()],
            frequencies: vec![2, 2],
        };
        let mut slot = ChartSlot::default();
        slot.show(FrequencyChart::new(
            ChartKind::Bar,
            series,
            vec![Color::Cyan, Color::Magenta],
        ));
        slot
    }

    fn active_kind(viewer: &Viewer<'_>) -> Option<ChartKind> {
        viewer.slot.active().map(FrequencyChart::kind)
    }

    #[test]
    fn test_keys_switch_chart_kind() {
        let mut slot = slot_with_chart();
        let mut viewer = Viewer {
            slot: &mut slot,
            exiting: false,
        };

        press(&mut viewer, KeyCode::Tab);
        assert_eq!(active_kind(&viewer), Some(ChartKind::Histogram));
        press(&mut viewer, KeyCode::Right);
        assert_eq!(active_kind(&viewer), Some(ChartKind::Pie));
        press(&mut viewer, KeyCode::Char('b'));
        assert_eq!(active_kind(&viewer), Some(ChartKind::Bar));
        press(&mut viewer, KeyCode::Char('h'));
        assert_eq!(active_kind(&viewer), Some(ChartKind::Histogram));
        press(&mut viewer, KeyCode::Char('x'));
        assert_eq!(active_kind(&viewer), Some(ChartKind::Histogram));
        assert!(!viewer.exiting);
    }

    #[test]
    fn test_quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut slot = slot_with_chart();
            let mut viewer = Viewer {
                slot: &mut slot,
                exiting: false,
            };
            press(&mut viewer, code);
            assert!(viewer.exiting);
        }
    }

    #[test]
    fn test_empty_slot_exits() {
        let mut slot = ChartSlot::default();
        let mut viewer = Viewer {
            slot: &mut slot,
            exiting: false,
        };
        press(&mut viewer, KeyCode::Tab);
        assert!(viewer.exiting);
    }
}
