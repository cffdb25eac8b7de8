//! Settings panels
//!
//! The console is organized into five fixed panels, shown as a sidebar.
//! Panel order matches the sidebar layout and the `1`..`5` hotkeys.

/// One settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Device,
    Network,
    Toggles,
    Software,
    Community,
}

impl Panel {
    /// All panels in sidebar order.
    pub const ALL: [Panel; 5] = [
        Panel::Device,
        Panel::Network,
        Panel::Toggles,
        Panel::Software,
        Panel::Community,
    ];

    /// Sidebar label.
    pub fn label(&self) -> &'static str {
        match self {
            Panel::Device => "Device",
            Panel::Network => "Network",
            Panel::Toggles => "Toggles",
            Panel::Software => "Software",
            Panel::Community => "Community",
        }
    }

    /// Index within [`Panel::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Panel::Device => 0,
            Panel::Network => 1,
            Panel::Toggles => 2,
            Panel::Software => 3,
            Panel::Community => 4,
        }
    }

    /// Panel at `index`, if in range.
    pub fn from_index(index: usize) -> Option<Panel> {
        Panel::ALL.get(index).copied()
    }

    /// Next panel, wrapping around.
    pub fn next(&self) -> Panel {
        Panel::ALL[(self.index() + 1) % Panel::ALL.len()]
    }

    /// Previous panel, wrapping around.
    pub fn prev(&self) -> Panel {
        Panel::ALL[(self.index() + Panel::ALL.len() - 1) % Panel::ALL.len()]
    }
}
