//! Per-panel control builders
//!
//! Each builder snapshots the parameter store into a `Vec<Control>`. The
//! lists are rebuilt on every draw, so a parameter changed behind the
//! console's back shows up on the next tick without any cache invalidation.

use chrono::{DateTime, NaiveDateTime, Utc};
use opdeck_core::params::keys;
use opdeck_core::{calibration, hardware, Params};

use crate::controls::{ButtonAction, Control};
use crate::panel::Panel;
use crate::state::AppState;

/// Lateral control algorithm names, indexed by the stored selector value.
pub const LATERAL_CONTROL_NAMES: &[&str] = &["PID", "INDI", "LQR"];
/// Multi-function camera behavior names.
pub const MFC_NAMES: &[&str] = &["LKAS", "LDWS", "LFA"];
/// Longitudinal control mode names.
pub const LONG_CONTROL_NAMES: &[&str] = &["MAD", "MAD+LONG"];

/// Controls for the active panel.
pub fn panel_controls(state: &AppState) -> Vec<Control> {
    match state.active_panel {
        Panel::Device => device_panel(state),
        Panel::Network => network_panel(state),
        Panel::Toggles => toggles_panel(&state.params),
        Panel::Software => software_panel(state),
        Panel::Community => community_panel(&state.params),
    }
}

fn device_panel(state: &AppState) -> Vec<Control> {
    let params = &state.params;
    let offroad = state.offroad;

    let mut controls = vec![
        Control::label(
            "Dongle ID",
            params.get(keys::DONGLE_ID).unwrap_or_else(|| "N/A".into()),
        ),
        Control::label(
            "Serial",
            params
                .get(keys::HARDWARE_SERIAL)
                .unwrap_or_else(|| "N/A".into()),
        ),
        Control::button(
            ButtonAction::ShowDriverCamera,
            "PREVIEW",
            "Driver Camera",
            "Preview the driver facing camera to check mounting.",
        )
        .offroad_gated(offroad),
        Control::button(
            ButtonAction::ResetCalibration,
            "RESET",
            "Reset Calibration",
            calibration_description(params),
        )
        .offroad_gated(offroad),
    ];

    // Hidden entirely in passive (dashcam-only) mode.
    if !params.get_bool(keys::PASSIVE) {
        controls.push(
            Control::button(
                ButtonAction::ReviewTrainingGuide,
                "REVIEW",
                "Review Training Guide",
                "Review the rules, features and limitations.",
            )
            .offroad_gated(offroad),
        );
    }

    controls.extend([
        Control::button(
            ButtonAction::ExtraFeatures,
            "RUN",
            "Extra Features",
            "Install community extra features, then soft restart.",
        ),
        Control::button(
            ButtonAction::ResetCalibrationAndLive,
            "RUN",
            "Reset Calibration & Live Params",
            "Clear both stores, then soft restart.",
        ),
        Control::button(
            ButtonAction::SoftRestart,
            "RESTART",
            "Soft Restart",
            "Restart the driving processes without rebooting.",
        ),
        Control::button(ButtonAction::Reboot, "REBOOT", "Reboot", ""),
        Control::button(ButtonAction::PowerOff, "POWER OFF", "Power Off", ""),
    ]);

    controls
}

fn calibration_description(params: &Params) -> String {
    let decoded = params
        .get_raw(keys::CALIBRATION_PARAMS)
        .and_then(|raw| calibration::decode(&raw).ok());
    match decoded {
        Some(calib) if calib.calibrated => format!(
            "Device is mounted {}. Reset to recalibrate.",
            calib.offset_description()
        ),
        Some(_) => "Calibration in progress.".to_string(),
        None => "Reset the stored camera calibration.".to_string(),
    }
}

fn network_panel(state: &AppState) -> Vec<Control> {
    let params = &state.params;
    let bound = params
        .get(keys::GITHUB_SSH_KEYS)
        .map(|k| !k.trim().is_empty())
        .unwrap_or(false);
    let ssh_label = if state.ssh.fetching {
        "LOADING"
    } else if bound {
        "REMOVE"
    } else {
        "ADD"
    };
    let ssh_description = match params.get(keys::GITHUB_USERNAME) {
        Some(username) if bound => format!("Keys installed for github.com/{}", username.trim()),
        _ => "Authorize SSH access with your GitHub public keys.".to_string(),
    };

    vec![
        Control::toggle(
            keys::SSH_ENABLED,
            params.get_bool(keys::SSH_ENABLED),
            "Enable SSH",
            "Allow SSH connections to the device.",
        ),
        Control::button(ButtonAction::SshKeys, ssh_label, "SSH Keys", ssh_description)
            .enabled(!state.ssh.fetching),
        Control::selector(
            keys::LATERAL_CONTROL_SELECT,
            params.get_int(keys::LATERAL_CONTROL_SELECT).unwrap_or(0),
            LATERAL_CONTROL_NAMES,
            "Lateral Control",
            "Steering control algorithm. Takes effect after restart.",
        ),
        Control::selector(
            keys::MFC_SELECT,
            params.get_int(keys::MFC_SELECT).unwrap_or(0),
            MFC_NAMES,
            "MFC Camera",
            "Multi-function camera behavior.",
        ),
        Control::selector(
            keys::LONG_CONTROL_SELECT,
            params.get_int(keys::LONG_CONTROL_SELECT).unwrap_or(0),
            LONG_CONTROL_NAMES,
            "Long Control",
            "Longitudinal control mode.",
        ),
        Control::button(
            ButtonAction::GitPull,
            "RUN",
            "Git Pull",
            "Pull the latest code, then reboot.",
        ),
        Control::button(
            ButtonAction::ClearDrivingLogs,
            "RUN",
            "Delete Driving Logs",
            "Delete all saved driving logs from internal storage.",
        ),
        Control::button(
            ButtonAction::PandaFlash,
            "RUN",
            "Panda Flash",
            "Reflash the panda firmware, then reboot.",
        ),
        Control::button(
            ButtonAction::PandaRecover,
            "RUN",
            "Panda Recover",
            "Recover the panda firmware, then reboot.",
        ),
    ]
}

fn toggles_panel(params: &Params) -> Vec<Control> {
    [
        (
            keys::OPENPILOT_ENABLED,
            "Enable openpilot",
            "Use the openpilot system for adaptive cruise and lane keeping.",
        ),
        (
            keys::IS_METRIC,
            "Use Metric System",
            "Display speed in km/h instead of mph.",
        ),
        (
            keys::IS_LDW_ENABLED,
            "Lane Departure Warnings",
            "Alert when drifting over a lane line while steering is idle.",
        ),
        (
            keys::AUTO_LANE_CHANGE,
            "Auto Lane Change",
            "Start lane changes from the turn signal alone.",
        ),
        (
            keys::UPLOAD_RAW,
            "Upload Raw Logs",
            "Upload full-resolution driving data on wifi.",
        ),
        (
            keys::END_TO_END,
            "End-to-End Lateral",
            "Let the driving model steer without lane lines.",
        ),
        (
            keys::COMMUNITY_FEATURES,
            "Community Features",
            "Enable features not maintained upstream.",
        ),
    ]
    .into_iter()
    .map(|(key, title, desc)| Control::toggle(key, params.get_bool(key), title, desc))
    .collect()
}

fn software_panel(state: &AppState) -> Vec<Control> {
    let params = &state.params;

    let check_label = if state.software.checking {
        "CHECKING"
    } else {
        "CHECK"
    };
    let check_description = if state.software.update_failed {
        "Last update check failed.".to_string()
    } else {
        "Fetch the latest release information.".to_string()
    };

    vec![
        Control::label(
            "Version",
            params.get(keys::VERSION).unwrap_or_else(|| "N/A".into()),
        ),
        Control::label(
            "Git Remote",
            params
                .get(keys::GIT_REMOTE)
                .unwrap_or_else(|| "N/A".into()),
        ),
        Control::label(
            "Git Branch",
            params
                .get(keys::GIT_BRANCH)
                .unwrap_or_else(|| "N/A".into()),
        ),
        Control::label(
            "Git Commit",
            params
                .get(keys::GIT_COMMIT)
                .map(|c| c.trim().chars().take(10).collect::<String>())
                .unwrap_or_else(|| "N/A".into()),
        ),
        Control::label(
            "OS Version",
            hardware::os_version().unwrap_or_else(|| "N/A".into()),
        ),
        Control::label("Last Update", last_update_label(params, Utc::now())),
        Control::button(
            ButtonAction::CheckUpdate,
            check_label,
            "Check for Updates",
            check_description,
        )
        .enabled(!state.software.checking),
        Control::button(
            ButtonAction::Uninstall,
            "UNINSTALL",
            "Uninstall openpilot",
            "Remove openpilot on the next boot.",
        )
        .offroad_gated(state.offroad),
    ]
}

fn community_panel(params: &Params) -> Vec<Control> {
    let selected = params
        .get(keys::SELECTED_CAR)
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());
    let car_description = match &selected {
        Some(car) => format!("Selected: {car}"),
        None => "No car selected, fingerprinting at startup.".to_string(),
    };

    let mut controls = vec![Control::button(
        ButtonAction::SelectCar,
        "SELECT",
        "Select Your Car",
        car_description,
    )];

    controls.extend(
        [
            (
                keys::PUT_PREBUILT,
                "Prebuilt Enable",
                "Skip compiling the UI at boot.",
            ),
            (
                keys::DISABLE_SHUTDOWND,
                "Disable Shutdownd",
                "Keep the device powered after ignition off.",
            ),
            (
                keys::DISABLE_LOGGER,
                "Disable Logger",
                "Stop recording driving data.",
            ),
            (
                keys::DISABLE_GPS,
                "Disable GPS",
                "Turn the GPS receiver off.",
            ),
            (
                keys::UI_TPMS,
                "Show TPMS",
                "Show tire pressures on the driving screen.",
            ),
        ]
        .into_iter()
        .map(|(key, title, desc)| Control::toggle(key, params.get_bool(key), title, desc)),
    );

    controls
}

/// Human-readable age of the last successful update.
pub fn last_update_label(params: &Params, now: DateTime<Utc>) -> String {
    let raw = match params.get(keys::LAST_UPDATE_TIME) {
        Some(raw) => raw,
        None => return "never".to_string(),
    };
    match parse_update_time(raw.trim()) {
        Some(then) => time_ago(then, now),
        None => "never".to_string(),
    }
}

// The updater writes an ISO 8601 timestamp, historically without a zone
// suffix. Treat zoneless values as UTC.
fn parse_update_time(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(then);
    let seconds = delta.num_seconds();
    if seconds < 60 {
        "now".to_string()
    } else if seconds < 3600 {
        let m = delta.num_minutes();
        format!("{m} minute{} ago", if m == 1 { "" } else { "s" })
    } else if seconds < 86_400 {
        let h = delta.num_hours();
        format!("{h} hour{} ago", if h == 1 { "" } else { "s" })
    } else if seconds < 7 * 86_400 {
        let d = delta.num_days();
        format!("{d} day{} ago", if d == 1 { "" } else { "s" })
    } else {
        then.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::controls::ControlKind;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn state() -> (TempDir, AppState) {
        let dir = TempDir::new().unwrap();
        let params = Params::new(dir.path()).unwrap();
        (dir, AppState::new(params, Settings::default()))
    }

    #[test]
    fn test_every_panel_builds_rows() {
        let (_dir, mut state) = state();
        for panel in Panel::ALL {
            state.active_panel = panel;
            assert!(!state.controls().is_empty(), "{panel:?} panel is empty");
        }
    }

    #[test]
    fn test_training_guide_hidden_in_passive_mode() {
        let (_dir, mut state) = state();
        state.active_panel = Panel::Device;
        let with_guide = state.controls().len();
        state.params.put_bool(keys::PASSIVE, true).unwrap();
        assert_eq!(state.controls().len(), with_guide - 1);
    }

    #[test]
    fn test_onroad_disables_offroad_only_buttons() {
        let (_dir, mut state) = state();
        state.offroad = false;
        state.active_panel = Panel::Device;
        for control in state.controls() {
            if let ControlKind::Button {
                action, enabled, ..
            } = control.kind
            {
                assert_eq!(
                    enabled,
                    !action.offroad_only(),
                    "{action:?} enabled while onroad"
                );
            }
        }
    }

    #[test]
    fn test_ssh_button_label_follows_binding() {
        let (_dir, mut state) = state();
        state.active_panel = Panel::Network;

        let label_of = |state: &AppState| {
            state
                .controls()
                .into_iter()
                .find_map(|c| match c.kind {
                    ControlKind::Button {
                        action: ButtonAction::SshKeys,
                        label,
                        ..
                    } => Some(label),
                    _ => None,
                })
                .unwrap()
        };

        assert_eq!(label_of(&state), "ADD");

        state.params.put(keys::GITHUB_USERNAME, "alice").unwrap();
        state
            .params
            .put(keys::GITHUB_SSH_KEYS, "ssh-rsa AAAA")
            .unwrap();
        assert_eq!(label_of(&state), "REMOVE");

        state.ssh.fetching = true;
        assert_eq!(label_of(&state), "LOADING");
    }

    #[test]
    fn test_selector_defaults_to_zero() {
        let (_dir, mut state) = state();
        state.active_panel = Panel::Network;
        let selector = state
            .controls()
            .into_iter()
            .find(|c| matches!(c.kind, ControlKind::Selector { .. }))
            .unwrap();
        if let ControlKind::Selector { value, max, .. } = selector.kind {
            assert_eq!(value, 0);
            assert_eq!(max, 2);
        }
    }

    #[test]
    fn test_last_update_label_relative() {
        let dir = TempDir::new().unwrap();
        let params = Params::new(dir.path()).unwrap();
        let now = Utc.with_ymd_and_hms(2021, 6, 1, 12, 0, 0).unwrap();

        assert_eq!(last_update_label(&params, now), "never");

        params
            .put(keys::LAST_UPDATE_TIME, "2021-06-01T11:55:00")
            .unwrap();
        assert_eq!(last_update_label(&params, now), "5 minutes ago");

        params
            .put(keys::LAST_UPDATE_TIME, "2021-05-30T12:00:00+00:00")
            .unwrap();
        assert_eq!(last_update_label(&params, now), "2 days ago");

        params.put(keys::LAST_UPDATE_TIME, "not a time").unwrap();
        assert_eq!(last_update_label(&params, now), "never");
    }

    #[test]
    fn test_time_ago_buckets() {
        let now = Utc.with_ymd_and_hms(2021, 6, 1, 12, 0, 0).unwrap();
        let at = |secs: i64| now - chrono::Duration::seconds(secs);
        assert_eq!(time_ago(at(10), now), "now");
        assert_eq!(time_ago(at(90), now), "1 minute ago");
        assert_eq!(time_ago(at(7200), now), "2 hours ago");
        assert_eq!(time_ago(at(30 * 86_400), now), "2021-05-02");
    }
}
