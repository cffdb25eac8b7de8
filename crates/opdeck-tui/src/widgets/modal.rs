//! Modal dialogs
//!
//! Confirmation, text input, and alert overlays, centered over the panel
//! area with the background dimmed.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget, Wrap},
};

use opdeck_app::Modal;

use crate::theme::{palette, styles};

/// Center a fixed-size rect within an area, clamped to the area.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

/// Dim all cells in the given area, simulating a translucent overlay.
pub fn dim_background(buf: &mut Buffer, area: Rect) {
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            buf[(x, y)].set_style(Style::default().fg(palette::TEXT_MUTED));
        }
    }
}

/// Widget rendering the active modal over the whole screen.
pub struct ModalOverlay<'a> {
    modal: &'a Modal,
}

impl<'a> ModalOverlay<'a> {
    pub fn new(modal: &'a Modal) -> Self {
        Self { modal }
    }

    fn body(&self) -> (String, Vec<Line<'static>>) {
        match self.modal {
            Modal::Confirm { title, message, .. } => (
                title.clone(),
                vec![
                    Line::from(message.clone()),
                    Line::default(),
                    Line::from(vec![
                        Span::styled("[Enter]", styles::keybinding()),
                        Span::raw(" Confirm   "),
                        Span::styled("[Esc]", styles::keybinding()),
                        Span::raw(" Cancel"),
                    ]),
                ],
            ),
            Modal::Input { title, buffer } => (
                title.clone(),
                vec![
                    Line::from(vec![
                        Span::styled(format!("{buffer}▏"), styles::accent()),
                    ]),
                    Line::default(),
                    Line::from(vec![
                        Span::styled("[Enter]", styles::keybinding()),
                        Span::raw(" Submit   "),
                        Span::styled("[Esc]", styles::keybinding()),
                        Span::raw(" Cancel"),
                    ]),
                ],
            ),
            Modal::Alert { message } => (
                "Notice".to_string(),
                vec![
                    Line::from(message.clone()),
                    Line::default(),
                    Line::from(vec![
                        Span::styled("[Enter]", styles::keybinding()),
                        Span::raw(" Dismiss"),
                    ]),
                ],
            ),
        }
    }
}

impl Widget for ModalOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        dim_background(buf, area);

        let (title, lines) = self.body();
        let height = lines.len() as u16 + 2;
        let modal_area = centered_rect(50, height, area);

        Clear.render(modal_area, buf);
        let block = styles::modal_block(&title);
        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
