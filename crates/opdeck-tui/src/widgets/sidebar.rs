//! Panel sidebar widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use opdeck_app::Panel;

use crate::theme::styles;

/// Widget listing the five panels, active one highlighted.
pub struct Sidebar {
    active: Panel,
}

impl Sidebar {
    pub fn new(active: Panel) -> Self {
        Self { active }
    }
}

impl Widget for Sidebar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::region_block("opdeck", false);
        let inner = block.inner(area);
        block.render(area, buf);

        for (i, panel) in Panel::ALL.iter().enumerate() {
            if i as u16 >= inner.height {
                break;
            }
            let row = Rect::new(inner.x, inner.y + i as u16, inner.width, 1);
            let (style, marker) = if *panel == self.active {
                (styles::focused_selected(), "▸ ")
            } else {
                (styles::text_secondary(), "  ")
            };
            let line = Line::from(vec![
                Span::raw(marker),
                Span::raw(format!("{} {}", i + 1, panel.label())),
            ]);
            Paragraph::new(line).style(style).render(row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(active: Panel) -> Buffer {
        let area = Rect::new(0, 0, 18, 10);
        let mut buf = Buffer::empty(area);
        Sidebar::new(active).render(area, &mut buf);
        buf
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
    }

    #[test]
    fn test_all_panels_listed() {
        let buf = render(Panel::Device);
        for (i, panel) in Panel::ALL.iter().enumerate() {
            assert!(
                row_text(&buf, 1 + i as u16).contains(panel.label()),
                "{} missing from sidebar",
                panel.label()
            );
        }
    }

    #[test]
    fn test_active_panel_marked() {
        let buf = render(Panel::Toggles);
        assert!(row_text(&buf, 3).contains('▸'));
        assert!(!row_text(&buf, 1).contains('▸'));
    }
}
