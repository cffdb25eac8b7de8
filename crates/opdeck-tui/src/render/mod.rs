//! Main render/view function

use ratatui::layout::Alignment;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use opdeck_app::state::AppState;

use crate::layout;
use crate::theme::{palette, styles};
use crate::widgets::{modal::ModalOverlay, CarSelectList, ControlList, Sidebar};

/// Render the complete UI. Pure: state is only read.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Fill the terminal with the background color
    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    let areas = layout::create(area);

    frame.render_widget(Sidebar::new(state.active_panel), areas.sidebar);

    if let Some(select) = &state.car_select {
        frame.render_widget(CarSelectList::new(select), areas.panel);
    } else {
        let controls = state.controls();
        frame.render_widget(
            ControlList::new(state.active_panel.label(), &controls, state.selected),
            areas.panel,
        );
    }

    frame.render_widget(footer_hints(state), areas.footer);

    if let Some(modal) = &state.modal {
        frame.render_widget(ModalOverlay::new(modal), area);
    }
}

fn footer_hints(state: &AppState) -> Paragraph<'static> {
    let hints: &[(&str, &str)] = if state.modal.is_some() {
        &[("Enter", "confirm"), ("Esc", "cancel")]
    } else if state.car_select.is_some() {
        &[("↑↓", "move"), ("Enter", "select"), ("Esc", "back")]
    } else {
        &[
            ("Tab", "panel"),
            ("↑↓", "move"),
            ("←→", "adjust"),
            ("Enter", "activate"),
            ("q", "close"),
        ]
    };

    let mut spans = Vec::new();
    for (i, (key, label)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ·  ", styles::text_muted()));
        }
        spans.push(Span::styled(format!("[{key}]"), styles::keybinding()));
        spans.push(Span::styled(format!(" {label}"), styles::text_secondary()));
    }
    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}
