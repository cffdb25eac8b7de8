//! Top-level message dispatch

use crate::handler::{controls, keys, software, ssh, OutboundSignal, UpdateAction, UpdateResult};
use crate::message::Message;
use crate::panel::Panel;
use crate::state::{AppState, Modal};

/// Apply one message to the state.
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Key(key) => keys::handle_key(state, key),
        Message::Tick => UpdateResult::none(),
        Message::Quit => {
            state.should_quit = true;
            UpdateResult::none()
        }

        Message::Shown => {
            state.reset_navigation();
            UpdateResult::none()
        }
        Message::NextPanel => {
            state.active_panel = state.active_panel.next();
            state.selected = 0;
            UpdateResult::none()
        }
        Message::PrevPanel => {
            state.active_panel = state.active_panel.prev();
            state.selected = 0;
            UpdateResult::none()
        }
        Message::GotoPanel(index) => {
            if let Some(panel) = Panel::from_index(index) {
                if panel != state.active_panel {
                    state.active_panel = panel;
                    state.selected = 0;
                }
            }
            UpdateResult::none()
        }
        Message::NextItem => {
            let len = state.controls().len();
            if len > 0 && state.selected + 1 < len {
                state.selected += 1;
            }
            UpdateResult::none()
        }
        Message::PrevItem => {
            state.selected = state.selected.saturating_sub(1);
            UpdateResult::none()
        }
        Message::Activate => controls::activate_selected(state),
        Message::SelectorDec => controls::step_selector(state, -1),
        Message::SelectorInc => controls::step_selector(state, 1),
        Message::CloseRequested => {
            UpdateResult::action(UpdateAction::EmitSignal(OutboundSignal::CloseSettings))
        }

        Message::ConfirmAccept => {
            match state.modal.take() {
                Some(Modal::Confirm { action, .. }) => controls::execute_action(state, action),
                other => {
                    // Not a confirm modal; put it back untouched.
                    state.modal = other;
                    UpdateResult::none()
                }
            }
        }
        Message::ConfirmCancel => {
            if matches!(state.modal, Some(Modal::Confirm { .. })) {
                state.modal = None;
            }
            UpdateResult::none()
        }
        Message::AlertDismiss => {
            if matches!(state.modal, Some(Modal::Alert { .. })) {
                state.modal = None;
            }
            UpdateResult::none()
        }

        Message::OffroadTransition(offroad) => {
            state.offroad = offroad;
            state.clamp_selected();
            UpdateResult::none()
        }
        Message::ParamFileChanged { key } => software::handle_param_file_changed(state, &key),

        Message::SshUsernameSubmitted { username } => ssh::begin_fetch(state, username),
        Message::SshKeysFetched { username, keys } => ssh::on_fetched(state, username, keys),
        Message::SshKeysEmpty { username } => ssh::on_empty(state, username),
        Message::SshKeysFailed { username } => ssh::on_failed(state, username),
        Message::SshKeysTimedOut => ssh::on_timed_out(state),
    }
}
