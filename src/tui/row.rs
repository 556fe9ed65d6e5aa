//! Fixed-width rendering of a single task row.
//!
//! A row reads `"<description> [<project>]"`. When it does not fit, the
//! description is cut and an ellipsis inserted before the project tag so the
//! project stays visible. Short rows are padded with spaces so a highlight
//! bar spans the full lane.

use unicode_width::UnicodeWidthChar;

use crate::task::TaskRecord;

/// Cells reserved on each side of a lane's interior.
pub const BORDER_CELLS: usize = 1;

const ELLIPSIS: &str = "...";

/// Format `task` for a lane `available_width` cells wide.
///
/// The result always occupies exactly `available_width - 2 * border_cells`
/// terminal cells (zero if the lane is narrower than its borders) and never
/// contains a line break. Widths are counted in cells, so a double-width
/// character uses two.
pub fn format_row(task: &TaskRecord, available_width: usize, border_cells: usize) -> String {
    let usable = available_width.saturating_sub(2 * border_cells);
    let description = single_line(&task.description);
    let project = task.project.as_deref().map(single_line);

    let label = match &project {
        Some(project) => format!("{description} [{project}]"),
        None => description.clone(),
    };

    let row = if cell_width(&label) <= usable {
        label
    } else {
        // Room left for the description once the decoration is accounted for.
        let decoration = match &project {
            Some(project) => cell_width(project) + 6,
            None => ELLIPSIS.len(),
        };
        let (head, _) = take_cells(&description, usable.saturating_sub(decoration));
        match &project {
            Some(project) => format!("{head}{ELLIPSIS} [{project}]"),
            None => format!("{head}{ELLIPSIS}"),
        }
    };

    fit_to_width(&row, usable)
}

/// Replace every line-break character with a space.
pub fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{2028}' | '\u{2029}' => ' ',
            other => other,
        })
        .collect()
}

/// Number of terminal cells `text` occupies.
pub fn cell_width(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// Longest prefix of `text` that fits in `width` cells, with its width.
fn take_cells(text: &str, width: usize) -> (String, usize) {
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    (out, used)
}

/// Cut or right-pad `text` to exactly `width` cells.
///
/// A double-width character that would straddle the edge is dropped and
/// replaced by padding.
pub fn fit_to_width(text: &str, width: usize) -> String {
    let (mut out, used) = take_cells(text, width);
    out.extend(std::iter::repeat(' ').take(width - used));
    out
}
