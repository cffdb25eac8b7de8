//! Screen layout definitions for the TUI
//!
//! Sidebar of panels on the left, the active panel's controls on the right,
//! a one-row key hint footer along the bottom.

use ratatui::layout::{Constraint, Layout, Rect};

/// Width of the panel sidebar, including its borders.
pub const SIDEBAR_WIDTH: u16 = 18;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Panel list on the left
    pub sidebar: Rect,

    /// Active panel's controls
    pub panel: Rect,

    /// Key hint footer
    pub footer: Rect,
}

/// Create the main screen layout
pub fn create(area: Rect) -> ScreenAreas {
    let rows = Layout::vertical([
        Constraint::Min(3),    // Content
        Constraint::Length(1), // Footer hints
    ])
    .split(area);

    let columns = Layout::horizontal([
        Constraint::Length(SIDEBAR_WIDTH), // Sidebar
        Constraint::Min(40),               // Controls
    ])
    .split(rows[0]);

    ScreenAreas {
        sidebar: columns[0],
        panel: columns[1],
        footer: rows[1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_areas() {
        let area = Rect::new(0, 0, 80, 24);
        let layout = create(area);

        assert_eq!(layout.sidebar.width, SIDEBAR_WIDTH);
        assert_eq!(layout.panel.width, 80 - SIDEBAR_WIDTH);
        assert_eq!(layout.footer.height, 1);
        assert_eq!(layout.footer.y, 23);
        // Sidebar and panel share the content row
        assert_eq!(layout.sidebar.height, 23);
        assert_eq!(layout.panel.height, 23);
    }

    #[test]
    fn test_layout_narrow_terminal() {
        let area = Rect::new(0, 0, 40, 10);
        let layout = create(area);

        // Panel keeps its minimum even when the terminal is narrow
        assert!(layout.panel.width >= 22);
        assert_eq!(layout.footer.y, 9);
    }
}
