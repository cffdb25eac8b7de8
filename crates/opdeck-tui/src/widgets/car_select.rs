//! Car selection screen
//!
//! Replaces the panel area while active. A plain scrollable list; the top
//! entry clears the selection.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use opdeck_app::CarSelect;

use crate::theme::styles;

pub struct CarSelectList<'a> {
    select: &'a CarSelect,
}

impl<'a> CarSelectList<'a> {
    pub fn new(select: &'a CarSelect) -> Self {
        Self { select }
    }
}

impl Widget for CarSelectList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::region_block("Select Your Car", true);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let visible = inner.height as usize;
        let offset = self.select.selected.saturating_sub(visible.saturating_sub(1));

        for (row, (index, entry)) in self
            .select
            .entries
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .enumerate()
        {
            let y = inner.y + row as u16;
            let (style, marker) = if index == self.select.selected {
                (styles::focused_selected(), "▸ ")
            } else {
                (styles::text_primary(), "  ")
            };
            let line = Line::from(vec![Span::raw(marker), Span::raw(entry.clone())]);
            Paragraph::new(line)
                .style(style)
                .render(Rect::new(inner.x, y, inner.width, 1), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opdeck_app::state::CAR_NOT_SELECTED;

    fn text(buf: &Buffer) -> String {
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_entries_and_selection_marker() {
        let select = CarSelect {
            entries: vec![
                CAR_NOT_SELECTED.to_string(),
                "GENESIS".to_string(),
                "KIA STINGER".to_string(),
            ],
            selected: 2,
        };
        let area = Rect::new(0, 0, 40, 8);
        let mut buf = Buffer::empty(area);
        CarSelectList::new(&select).render(area, &mut buf);
        let out = text(&buf);

        assert!(out.contains(CAR_NOT_SELECTED));
        assert!(out.contains("▸ KIA STINGER"));
        assert!(out.contains("  GENESIS"));
    }

    #[test]
    fn test_scrolls_to_selected_entry() {
        let select = CarSelect {
            entries: (0..40).map(|i| format!("CAR {i:02}")).collect(),
            selected: 39,
        };
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        CarSelectList::new(&select).render(area, &mut buf);
        let out = text(&buf);

        assert!(out.contains("▸ CAR 39"));
        assert!(!out.contains("CAR 00"));
    }
}
