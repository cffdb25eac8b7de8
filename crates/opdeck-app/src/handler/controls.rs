//! Control activation and execution
//!
//! `activate_selected` resolves the selected row: toggles flip in place,
//! selectors step, buttons either open a confirmation or execute directly.
//! `execute_action` runs the effect of a (possibly confirmed) button.

use opdeck_core::params::keys;
use tracing::{error, info};

use crate::controls::{ButtonAction, ControlKind};
use crate::handler::{ssh, OutboundSignal, UpdateAction, UpdateResult};
use crate::state::{AppState, Modal};

pub fn activate_selected(state: &mut AppState) -> UpdateResult {
    let Some(control) = state.selected_control() else {
        return UpdateResult::none();
    };

    match control.kind {
        ControlKind::Label { .. } => UpdateResult::none(),
        ControlKind::Toggle { key, value } => {
            if let Err(e) = state.params.put_bool(key, !value) {
                error!(key, error = %e, "toggle write failed");
            } else {
                info!(key, value = !value, "toggle flipped");
            }
            UpdateResult::none()
        }
        // Enter on a selector steps forward, same as the right arrow.
        ControlKind::Selector { .. } => step_selector(state, 1),
        ControlKind::Button {
            action, enabled, ..
        } => {
            if !enabled {
                return UpdateResult::none();
            }
            if action.needs_confirm() {
                state.modal = Some(Modal::Confirm {
                    title: control.title,
                    message: action.confirm_message().to_string(),
                    action,
                });
                return UpdateResult::none();
            }
            execute_action(state, action)
        }
    }
}

/// Step the selected selector by `delta`, clamped to `[0, max]`.
pub fn step_selector(state: &mut AppState, delta: i64) -> UpdateResult {
    let Some(control) = state.selected_control() else {
        return UpdateResult::none();
    };
    let ControlKind::Selector { key, max, .. } = control.kind else {
        return UpdateResult::none();
    };

    // Re-read the store: a malformed value steps from zero.
    let current = state.params.get_int(key).unwrap_or(0).clamp(0, max);
    let next = (current + delta).clamp(0, max);
    if next != current || state.params.get_int(key) != Some(current) {
        if let Err(e) = state.params.put(key, &next.to_string()) {
            error!(key, error = %e, "selector write failed");
        } else {
            info!(key, value = next, "selector stepped");
        }
    }
    UpdateResult::none()
}

/// Effect of a button, after any confirmation has been accepted.
pub fn execute_action(state: &mut AppState, action: ButtonAction) -> UpdateResult {
    let soft_restart_delay = state.settings.device.soft_restart_delay_ms;
    let reboot_delay = state.settings.device.reboot_delay_ms;

    match action {
        ButtonAction::ShowDriverCamera => {
            UpdateResult::action(UpdateAction::EmitSignal(OutboundSignal::ShowDriverCamera))
        }
        ButtonAction::ResetCalibration => {
            remove_param(state, keys::CALIBRATION_PARAMS);
            UpdateResult::none()
        }
        ButtonAction::ReviewTrainingGuide => {
            remove_param(state, keys::COMPLETED_TRAINING_VERSION);
            UpdateResult::action(UpdateAction::EmitSignal(
                OutboundSignal::ReviewTrainingGuide,
            ))
        }
        ButtonAction::ExtraFeatures => {
            UpdateResult::action(UpdateAction::RunShellThenSoftRestart {
                command: state.settings.scripts.extra_features.clone(),
                delay_ms: soft_restart_delay,
            })
        }
        ButtonAction::ResetCalibrationAndLive => {
            remove_param(state, keys::CALIBRATION_PARAMS);
            remove_param(state, keys::LIVE_PARAMETERS);
            UpdateResult::action(UpdateAction::SoftRestartAndClose {
                delay_ms: soft_restart_delay,
            })
        }
        ButtonAction::SoftRestart => UpdateResult::action(UpdateAction::SoftRestartAndClose {
            delay_ms: soft_restart_delay,
        }),
        ButtonAction::Reboot => UpdateResult::action(UpdateAction::Reboot),
        ButtonAction::PowerOff => UpdateResult::action(UpdateAction::PowerOff),
        ButtonAction::Uninstall => {
            if let Err(e) = state.params.put_bool(keys::DO_UNINSTALL, true) {
                error!(error = %e, "failed to set uninstall flag");
            }
            UpdateResult::none()
        }
        ButtonAction::CheckUpdate => {
            state.software.checking = true;
            state.software.update_failed = false;
            UpdateResult::action(UpdateAction::RunShell {
                command: "pkill -1 -f selfdrive.updated".to_string(),
            })
        }
        ButtonAction::GitPull => UpdateResult::action(UpdateAction::RunShellThenReboot {
            command: state.settings.scripts.git_pull.clone(),
            delay_ms: reboot_delay,
        }),
        ButtonAction::ClearDrivingLogs => UpdateResult::action(UpdateAction::RunShell {
            command: state.settings.scripts.clear_driving_logs.clone(),
        }),
        ButtonAction::PandaFlash => UpdateResult::action(UpdateAction::RunShellThenReboot {
            command: state.settings.scripts.panda_flash.clone(),
            delay_ms: reboot_delay,
        }),
        ButtonAction::PandaRecover => UpdateResult::action(UpdateAction::RunShellThenReboot {
            command: state.settings.scripts.panda_recover.clone(),
            delay_ms: reboot_delay,
        }),
        ButtonAction::SshKeys => ssh::activate(state),
        ButtonAction::SelectCar => {
            state.open_car_select();
            UpdateResult::none()
        }
    }
}

fn remove_param(state: &AppState, key: &str) {
    if let Err(e) = state.params.remove(key) {
        error!(key, error = %e, "parameter remove failed");
    } else {
        info!(key, "parameter removed");
    }
}
