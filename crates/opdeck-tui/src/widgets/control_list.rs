//! Control list widget
//!
//! Renders the active panel's rows: title on the left, value on the right.
//! The selected row's description is shown in the bottom row of the block.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use opdeck_app::{Control, ControlKind};

use crate::theme::styles;

pub struct ControlList<'a> {
    title: &'a str,
    controls: &'a [Control],
    selected: usize,
}

impl<'a> ControlList<'a> {
    pub fn new(title: &'a str, controls: &'a [Control], selected: usize) -> Self {
        Self {
            title,
            controls,
            selected,
        }
    }

    fn value_span(control: &Control) -> Span<'static> {
        match &control.kind {
            ControlKind::Label { value } => {
                Span::styled(value.clone(), styles::text_secondary())
            }
            ControlKind::Toggle { value: true, .. } => {
                Span::styled("● ON ".to_string(), styles::status_green())
            }
            ControlKind::Toggle { value: false, .. } => {
                Span::styled("○ off".to_string(), styles::text_muted())
            }
            ControlKind::Selector { .. } => {
                let name = control.selector_name().unwrap_or("");
                Span::styled(format!("◀ {name:^8} ▶"), styles::accent())
            }
            ControlKind::Button {
                label,
                enabled: true,
                ..
            } => Span::styled(format!("[ {label} ]"), styles::accent()),
            ControlKind::Button { label, .. } => {
                Span::styled(format!("[ {label} ]"), styles::text_muted())
            }
        }
    }
}

impl Widget for ControlList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::region_block(self.title, true);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 2 || inner.width < 4 {
            return;
        }

        // Last inner row holds the selected row's description.
        let list_height = (inner.height - 1) as usize;
        let offset = self.selected.saturating_sub(list_height.saturating_sub(1));

        for (row, (index, control)) in self
            .controls
            .iter()
            .enumerate()
            .skip(offset)
            .take(list_height)
            .enumerate()
        {
            let y = inner.y + row as u16;
            let selected = index == self.selected;

            let value = Self::value_span(control);
            let value_width = value.content.chars().count() as u16;
            let title_width = inner.width.saturating_sub(value_width + 3) as usize;

            let title_style = if selected {
                styles::focused_selected()
            } else if control.is_activatable() {
                styles::text_primary()
            } else {
                styles::text_secondary()
            };

            let mut title: String = control.title.chars().take(title_width).collect();
            if selected {
                title = format!("▸ {title}");
            } else {
                title = format!("  {title}");
            }

            let line_area = Rect::new(inner.x, y, inner.width, 1);
            Paragraph::new(Line::from(Span::styled(title, title_style)))
                .render(line_area, buf);

            let value_area = Rect::new(
                inner.x + inner.width.saturating_sub(value_width + 1),
                y,
                value_width.min(inner.width),
                1,
            );
            Paragraph::new(Line::from(value)).render(value_area, buf);
        }

        if let Some(control) = self.controls.get(self.selected) {
            if !control.description.is_empty() {
                let desc_area =
                    Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
                Paragraph::new(Line::from(Span::styled(
                    control.description.clone(),
                    styles::text_muted(),
                )))
                .render(desc_area, buf);
            }
        }
    }
}
