//! Bottom strip with details for the selected task and the key bindings.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::task::TaskRecord;
use crate::tui::colors::HELP_TEXT;
use crate::tui::row::{fit_to_width, single_line};

/// Static key-binding reminder shown on the last interior line.
pub const KEY_HELP: &str = "h/←: left   l/→: right   k/↑: up   j/↓: down   q: quit";

const PROJECT_FIELD: usize = 50;
const DUE_FIELD: usize = 20;

/// The control panel, positioned at a fixed screen rectangle.
#[derive(Debug, Clone)]
pub struct ControlPanel {
    area: Rect,
}

impl ControlPanel {
    pub fn new(area: Rect) -> Self {
        ControlPanel { area }
    }

    /// Draw the panel. Without a selected task only the frame, title and key
    /// help are drawn.
    pub fn render(&self, f: &mut Frame, selected: Option<&TaskRecord>, now: DateTime<Utc>) {
        let area = self.area.intersection(f.area());
        if area.is_empty() {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title(Line::from("Controls").centered())
            .title_style(Style::default().add_modifier(Modifier::BOLD));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let width = inner.width as usize;
        let mut lines = Vec::new();
        if let Some(task) = selected {
            lines.push(Line::from(fit_to_width(&single_line(&task.description), width)));
            lines.push(Line::from(format_details(task, now)));
        }
        f.render_widget(Paragraph::new(lines), inner);

        // Keep the help on the last line, unless it would overwrite the details.
        if inner.height >= 3 || (selected.is_none() && inner.height >= 1) {
            let help_area = Rect::new(inner.x, inner.bottom() - 1, inner.width, 1);
            f.render_widget(Paragraph::new(KEY_HELP).style(Style::default().fg(HELP_TEXT)), help_area);
        }
    }
}

/// One-line summary of project, due date and scheduled offset.
///
/// Each field keeps its slot even when absent so values line up between tasks.
pub fn format_details(task: &TaskRecord, now: DateTime<Utc>) -> String {
    let project = task
        .project
        .as_deref()
        .map(|p| format!("[{}]", single_line(p)))
        .unwrap_or_default();
    let due = task
        .due
        .map(|d| format!("due: {}", d.date_naive().format("%Y-%m-%d")))
        .unwrap_or_default();
    let scheduled = task
        .scheduled
        .map(|s| format!("scheduled: {}d", (s - now).num_days()))
        .unwrap_or_default();

    format!("{project:<PROJECT_FIELD$}{due:<DUE_FIELD$}{scheduled}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::parse_tw_date;
    use chrono::TimeZone;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2019, 8, 9, 12, 0, 0).unwrap()
    }

    fn screen(buffer: &Buffer) -> String {
        let area = buffer.area;
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buffer[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn draw(selected: Option<&TaskRecord>) -> Buffer {
        let panel = ControlPanel::new(Rect::new(0, 0, 100, 7));
        let mut terminal = Terminal::new(TestBackend::new(100, 7)).unwrap();
        terminal.draw(|f| panel.render(f, selected, now())).unwrap();
        terminal.backend().buffer().clone()
    }

    #[test]
    fn test_details_line_layout() {
        let mut task = TaskRecord::new("Testtask", Some("test"));
        task.due = parse_tw_date("20190815T220000Z");
        task.scheduled = parse_tw_date("20190812T220000Z");

        let details = format_details(&task, now());
        assert_eq!(&details[..50], format!("{:<50}", "[test]"));
        assert_eq!(&details[50..70], format!("{:<20}", "due: 2019-08-15"));
        assert_eq!(&details[70..], "scheduled: 3d");
    }

    #[test]
    fn test_details_keep_alignment_when_fields_absent() {
        let mut task = TaskRecord::new("No project", None);
        task.scheduled = parse_tw_date("20190810T120000Z");

        let details = format_details(&task, now());
        assert_eq!(details, format!("{}scheduled: 1d", " ".repeat(70)));

        let bare = TaskRecord::new("", None);
        assert_eq!(format_details(&bare, now()), " ".repeat(70));
    }

    #[test]
    fn test_panel_with_selection_shows_description_and_details() {
        let task = TaskRecord::new("Buy milk", Some("home"));
        let text = screen(&draw(Some(&task)));
        assert!(text.contains("Controls"));
        assert!(text.contains("Buy milk"));
        assert!(text.contains("[home]"));
        assert!(text.contains("q: quit"));
    }

    #[test]
    fn test_panel_without_selection_shows_no_detail() {
        let text = screen(&draw(None));
        assert!(text.contains("Controls"));
        assert!(text.contains("q: quit"));
        assert!(!text.contains('['));
        // Interior lines above the help are blank.
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].chars().skip(1).take(98).all(|c| c == ' '));
        assert!(lines[2].chars().skip(1).take(98).all(|c| c == ' '));
    }

    #[test]
    fn test_panel_replaces_line_breaks_in_description() {
        let task = TaskRecord::new("first\nsecond", None);
        let text = screen(&draw(Some(&task)));
        assert!(text.contains("first second"));
    }
}
