//! Board layout: three equal lanes above a full-width control strip.
//!
//! ```text
//! +-----------+-------------+----------+
//! |  Backlog  | In Progress |   Done   |
//! |           |             |          |
//! +-----------+-------------+----------+
//! |              Controls              |
//! +------------------------------------+
//! ```
//!
//! Geometry is fixed when the board is built. A terminal smaller than the
//! control strip plus a few lines still renders, with empty or clipped regions.

use std::io;

use chrono::{DateTime, Utc};
use ratatui::{backend::Backend, layout::Rect, Frame, Terminal};
use tracing::{debug, trace};

use crate::task::TaskRecord;
use crate::tui::column::ColumnWindow;
use crate::tui::controls::ControlPanel;
use crate::tui::enums::Lane;
use crate::tui::selection::Selection;

/// Default height of the control strip.
pub const CONTROL_LINES: u16 = 7;

/// A read-only copy of the three lanes as handed over by the producer.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub columns: [Vec<TaskRecord>; 3],
    pub taken_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(columns: [Vec<TaskRecord>; 3]) -> Self {
        Snapshot {
            columns,
            taken_at: Utc::now(),
        }
    }

    pub fn lengths(&self) -> [usize; 3] {
        [self.columns[0].len(), self.columns[1].len(), self.columns[2].len()]
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Snapshot::new(Default::default())
    }
}

/// Screen regions derived from the terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub column_width: u16,
    pub column_height: u16,
    pub control_height: u16,
    pub total_width: u16,
}

impl Geometry {
    pub fn compute(width: u16, height: u16, control_lines: u16) -> Self {
        let column_height = height.saturating_sub(control_lines);
        Geometry {
            column_width: width / 3,
            column_height,
            control_height: height - column_height,
            total_width: width,
        }
    }

    pub fn column_area(&self, index: usize) -> Rect {
        Rect::new(self.column_width * index as u16, 0, self.column_width, self.column_height)
    }

    pub fn control_area(&self) -> Rect {
        Rect::new(0, self.column_height, self.total_width, self.control_height)
    }
}

/// Owns the lane windows and the control panel.
pub struct Board {
    geometry: Geometry,
    control_lines: u16,
    columns: [ColumnWindow; 3],
    controls: ControlPanel,
    snapshot: Snapshot,
}

impl Board {
    /// Build a board for a `width` x `height` terminal.
    pub fn new(width: u16, height: u16, control_lines: u16) -> Self {
        let geometry = Geometry::compute(width, height, control_lines);
        let (columns, controls) = Self::windows(&geometry);
        Board {
            geometry,
            control_lines,
            columns,
            controls,
            snapshot: Snapshot::default(),
        }
    }

    fn windows(geometry: &Geometry) -> ([ColumnWindow; 3], ControlPanel) {
        let columns = Lane::ALL.map(|lane| ColumnWindow::new(lane, geometry.column_area(lane.index())));
        (columns, ControlPanel::new(geometry.control_area()))
    }

    /// Recompute geometry and recreate the windows for a new terminal size.
    pub fn rebuild_geometry(&mut self, width: u16, height: u16) {
        self.geometry = Geometry::compute(width, height, self.control_lines);
        let (columns, controls) = Self::windows(&self.geometry);
        self.columns = columns;
        self.controls = controls;
        debug!(geometry = ?self.geometry, "board geometry rebuilt");
    }

    /// Replace the displayed lanes.
    pub fn set_column_data(&mut self, snapshot: Snapshot) {
        debug!(lengths = ?snapshot.lengths(), "board data replaced");
        self.snapshot = snapshot;
    }

    pub fn column_lengths(&self) -> [usize; 3] {
        self.snapshot.lengths()
    }

    /// The task under `selection`, if that lane has such a row.
    pub fn selected_task(&self, selection: Selection) -> Option<&TaskRecord> {
        self.snapshot.columns.get(selection.column)?.get(selection.row)
    }

    /// Paint every lane and the control panel into `f`.
    pub fn render(&self, f: &mut Frame, selection: Selection) {
        for (index, window) in self.columns.iter().enumerate() {
            let selected = (selection.column == index).then_some(selection.row);
            window.render(f, &self.snapshot.columns[index], selected);
        }
        self.controls.render(f, self.selected_task(selection), self.snapshot.taken_at);
    }

    /// Repaint the whole board and flush it to the terminal.
    pub fn redraw<B: Backend>(&self, terminal: &mut Terminal<B>, selection: Selection) -> io::Result<()> {
        let uuid = self.selected_task(selection).and_then(|task| task.uuid.as_deref());
        trace!(column = selection.column, row = selection.row, ?uuid, "redraw");
        terminal.draw(|f| self.render(f, selection))?;
        Ok(())
    }
}
