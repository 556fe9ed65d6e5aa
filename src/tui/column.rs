//! A titled lane that lists task rows.
//!
//! Lanes do not scroll: when a lane holds more tasks than fit, only the first
//! `capacity()` rows are drawn and the rest are left off screen. A selection
//! past the last visible row is still tracked and shown in the control panel,
//! it just has no visible highlight.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::task::TaskRecord;
use crate::tui::colors::{ACTIVE_BORDER, ALT_ROW_BG, ALT_ROW_FG};
use crate::tui::enums::Lane;
use crate::tui::row::{cell_width, fit_to_width, format_row, BORDER_CELLS};

/// Interior line carrying the lane title.
const TITLE_ROW: u16 = 1;
/// Interior line of the first task row (a blank line separates it from the title).
const FIRST_TASK_ROW: u16 = 3;

/// One lane of the board, positioned at a fixed screen rectangle.
#[derive(Debug, Clone)]
pub struct ColumnWindow {
    lane: Lane,
    area: Rect,
    border_cells: u16,
}

impl ColumnWindow {
    pub fn new(lane: Lane, area: Rect) -> Self {
        ColumnWindow {
            lane,
            area,
            border_cells: BORDER_CELLS as u16,
        }
    }

    /// Number of task rows that fit between the title and the bottom border.
    pub fn capacity(&self) -> usize {
        self.area.height.saturating_sub(FIRST_TASK_ROW + self.border_cells) as usize
    }

    /// Draw the lane. `selected` is the highlighted row when this lane holds
    /// the selection; an index with no matching row highlights nothing.
    pub fn render(&self, f: &mut Frame, tasks: &[TaskRecord], selected: Option<usize>) {
        let area = self.area.intersection(f.area());
        if area.is_empty() {
            return;
        }

        let border_style = if selected.is_some() {
            Style::default().fg(ACTIVE_BORDER).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        f.render_widget(Block::default().borders(Borders::ALL).border_style(border_style), area);

        let inner_x = area.x + self.border_cells.min(area.width);
        let inner_width = area.width.saturating_sub(2 * self.border_cells);

        if area.height > TITLE_ROW {
            let title = Paragraph::new(Line::from(Span::styled(
                fit_title(self.lane.title(), inner_width as usize),
                Style::default().add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center);
            f.render_widget(title, Rect::new(inner_x, area.y + TITLE_ROW, inner_width, 1));
        }

        let capacity = area.height.saturating_sub(FIRST_TASK_ROW + self.border_cells) as usize;
        for (i, task) in tasks.iter().take(capacity).enumerate() {
            let text = format_row(task, area.width as usize, self.border_cells as usize);

            let mut style = if i % 2 == 0 {
                Style::default()
            } else {
                Style::default().fg(ALT_ROW_FG).bg(ALT_ROW_BG)
            };
            if self.lane == Lane::Done {
                style = style.add_modifier(Modifier::ITALIC);
            }
            if selected == Some(i) {
                style = style.add_modifier(Modifier::REVERSED);
            }

            let row_area = Rect::new(inner_x, area.y + FIRST_TASK_ROW + i as u16, inner_width, 1);
            f.render_widget(Paragraph::new(text).style(style), row_area);
        }
    }
}

/// Shorten a title that does not fit, marking the cut with an ellipsis.
fn fit_title(title: &str, width: usize) -> String {
    if cell_width(title) <= width {
        return title.to_string();
    }
    format!("{}...", fit_to_width(title, width.saturating_sub(3)))
}
