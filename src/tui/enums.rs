//! Enumerations for board navigation.

/// Navigation commands produced by the key table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
    Quit,
}

/// The three kanban lanes, in on-screen order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    Backlog,
    InProgress,
    Done,
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::Backlog, Lane::InProgress, Lane::Done];

    /// Column heading shown at the top of the lane.
    pub fn title(self) -> &'static str {
        match self {
            Lane::Backlog => "Backlog",
            Lane::InProgress => "In Progress",
            Lane::Done => "Done",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_order_matches_index() {
        for (i, lane) in Lane::ALL.iter().enumerate() {
            assert_eq!(lane.index(), i);
        }
        assert_eq!(Lane::ALL.map(Lane::title), ["Backlog", "In Progress", "Done"]);
    }
}
