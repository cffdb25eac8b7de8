//! Key routing
//!
//! Keys route to the active modal first, then the car selection sub-screen,
//! then the panel itself. Everything resolves to a follow-up [`Message`] or
//! a direct state change; no key handler performs side effects.

use opdeck_core::params::keys;
use tracing::info;

use crate::handler::{OutboundSignal, UpdateAction, UpdateResult};
use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, Modal, CAR_NOT_SELECTED};

pub fn handle_key(state: &mut AppState, key: InputKey) -> UpdateResult {
    match &state.modal {
        Some(Modal::Input { .. }) => return input_modal_key(state, key),
        Some(Modal::Confirm { .. }) => return confirm_modal_key(key),
        Some(Modal::Alert { .. }) => return UpdateResult::message(Message::AlertDismiss),
        None => {}
    }

    if state.car_select.is_some() {
        return car_select_key(state, key);
    }

    match key {
        InputKey::Tab => UpdateResult::message(Message::NextPanel),
        InputKey::BackTab => UpdateResult::message(Message::PrevPanel),
        InputKey::Char(c @ '1'..='5') => {
            UpdateResult::message(Message::GotoPanel(c as usize - '1' as usize))
        }
        InputKey::Up => UpdateResult::message(Message::PrevItem),
        InputKey::Down => UpdateResult::message(Message::NextItem),
        InputKey::Home => {
            state.selected = 0;
            UpdateResult::none()
        }
        InputKey::End => {
            state.selected = state.controls().len().saturating_sub(1);
            UpdateResult::none()
        }
        InputKey::Left => UpdateResult::message(Message::SelectorDec),
        InputKey::Right => UpdateResult::message(Message::SelectorInc),
        InputKey::Enter | InputKey::Char(' ') => UpdateResult::message(Message::Activate),
        InputKey::Esc | InputKey::Char('q') => UpdateResult::message(Message::CloseRequested),
        InputKey::CharCtrl('c') => UpdateResult::message(Message::Quit),
        _ => UpdateResult::none(),
    }
}

fn input_modal_key(state: &mut AppState, key: InputKey) -> UpdateResult {
    let Some(Modal::Input { buffer, .. }) = &mut state.modal else {
        return UpdateResult::none();
    };
    match key {
        InputKey::Char(c) if !c.is_control() => {
            buffer.push(c);
            UpdateResult::none()
        }
        InputKey::Backspace => {
            buffer.pop();
            UpdateResult::none()
        }
        InputKey::Enter => {
            let username = buffer.trim().to_string();
            state.modal = None;
            if username.is_empty() {
                UpdateResult::none()
            } else {
                UpdateResult::message(Message::SshUsernameSubmitted { username })
            }
        }
        InputKey::Esc => {
            state.modal = None;
            UpdateResult::none()
        }
        _ => UpdateResult::none(),
    }
}

fn confirm_modal_key(key: InputKey) -> UpdateResult {
    match key {
        InputKey::Enter | InputKey::Char('y') => UpdateResult::message(Message::ConfirmAccept),
        InputKey::Esc | InputKey::Char('n') => UpdateResult::message(Message::ConfirmCancel),
        _ => UpdateResult::none(),
    }
}

fn car_select_key(state: &mut AppState, key: InputKey) -> UpdateResult {
    let Some(select) = &mut state.car_select else {
        return UpdateResult::none();
    };
    match key {
        InputKey::Up => {
            select.selected = select.selected.saturating_sub(1);
            UpdateResult::none()
        }
        InputKey::Down => {
            if select.selected + 1 < select.entries.len() {
                select.selected += 1;
            }
            UpdateResult::none()
        }
        InputKey::Enter => {
            let choice = select.entries[select.selected].clone();
            state.car_select = None;
            let result = if choice == CAR_NOT_SELECTED {
                state.params.remove(keys::SELECTED_CAR)
            } else {
                state.params.put(keys::SELECTED_CAR, &choice)
            };
            if let Err(e) = result {
                tracing::error!(error = %e, "failed to store car selection");
                return UpdateResult::none();
            }
            info!(car = %choice, "car selection changed");
            UpdateResult::action(UpdateAction::EmitSignal(OutboundSignal::SelectedCarChanged))
        }
        InputKey::Esc => {
            state.car_select = None;
            UpdateResult::none()
        }
        _ => UpdateResult::none(),
    }
}
