//! Control model
//!
//! Every row on a panel is a [`Control`]: a title, an optional description
//! shown for the selected row, and a [`ControlKind`] that determines how the
//! row renders and what activating it does. Panels rebuild their control
//! lists from the parameter store on every draw, so a control's `value`
//! fields are always a snapshot of the store.

/// What activating a button does. The handler maps each variant to its
/// parameter writes, shell commands, or outbound signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    ShowDriverCamera,
    ResetCalibration,
    ReviewTrainingGuide,
    ExtraFeatures,
    ResetCalibrationAndLive,
    SoftRestart,
    Reboot,
    PowerOff,
    Uninstall,
    CheckUpdate,
    GitPull,
    ClearDrivingLogs,
    PandaFlash,
    PandaRecover,
    SshKeys,
    SelectCar,
}

impl ButtonAction {
    /// Destructive actions ask for confirmation before executing.
    pub fn needs_confirm(&self) -> bool {
        matches!(
            self,
            ButtonAction::ResetCalibration
                | ButtonAction::ReviewTrainingGuide
                | ButtonAction::ExtraFeatures
                | ButtonAction::ResetCalibrationAndLive
                | ButtonAction::Reboot
                | ButtonAction::PowerOff
                | ButtonAction::Uninstall
                | ButtonAction::GitPull
                | ButtonAction::ClearDrivingLogs
                | ButtonAction::PandaFlash
                | ButtonAction::PandaRecover
        )
    }

    /// Actions only available while the device is offroad. These buttons
    /// follow every offroad transition broadcast.
    pub fn offroad_only(&self) -> bool {
        matches!(
            self,
            ButtonAction::ShowDriverCamera
                | ButtonAction::ResetCalibration
                | ButtonAction::ReviewTrainingGuide
                | ButtonAction::Uninstall
        )
    }

    /// Confirmation prompt for destructive actions.
    pub fn confirm_message(&self) -> &'static str {
        match self {
            ButtonAction::ResetCalibration => {
                "Are you sure you want to reset calibration?"
            }
            ButtonAction::ReviewTrainingGuide => {
                "Are you sure you want to review the training guide?"
            }
            ButtonAction::ExtraFeatures => "Process?",
            ButtonAction::ResetCalibrationAndLive => {
                "Are you sure you want to reset calibration and live params?"
            }
            ButtonAction::Reboot => "Are you sure you want to reboot?",
            ButtonAction::PowerOff => "Are you sure you want to power off?",
            ButtonAction::Uninstall => "Are you sure you want to uninstall?",
            ButtonAction::GitPull => "Process?",
            ButtonAction::ClearDrivingLogs => "Delete all saved driving logs?",
            ButtonAction::PandaFlash => "Process?",
            ButtonAction::PandaRecover => "Process?",
            _ => "Continue?",
        }
    }
}

/// Renderable/activatable payload of a control row.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    /// Read-only informational row.
    Label { value: String },
    /// Boolean parameter bound to `key`.
    Toggle { key: &'static str, value: bool },
    /// Bounded integer parameter stepped with left/right.
    Selector {
        key: &'static str,
        value: i64,
        max: i64,
        names: &'static [&'static str],
    },
    /// One-shot action, optionally gated on the device being offroad.
    Button {
        label: String,
        action: ButtonAction,
        enabled: bool,
    },
}

/// One row on a settings panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub title: String,
    pub description: String,
    pub kind: ControlKind,
}

impl Control {
    pub fn label(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            kind: ControlKind::Label {
                value: value.into(),
            },
        }
    }

    pub fn toggle(
        key: &'static str,
        value: bool,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind: ControlKind::Toggle { key, value },
        }
    }

    pub fn selector(
        key: &'static str,
        value: i64,
        names: &'static [&'static str],
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        debug_assert!(!names.is_empty());
        Self {
            title: title.into(),
            description: description.into(),
            kind: ControlKind::Selector {
                key,
                value,
                max: names.len() as i64 - 1,
                names,
            },
        }
    }

    pub fn button(
        action: ButtonAction,
        label: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind: ControlKind::Button {
                label: label.into(),
                action,
                enabled: true,
            },
        }
    }

    /// Disable the button when the device is onroad.
    pub fn offroad_gated(mut self, offroad: bool) -> Self {
        if let ControlKind::Button {
            action, enabled, ..
        } = &mut self.kind
        {
            if action.offroad_only() {
                *enabled = offroad;
            }
        }
        self
    }

    /// Force the enabled flag, regardless of gating.
    pub fn enabled(mut self, value: bool) -> Self {
        if let ControlKind::Button { enabled, .. } = &mut self.kind {
            *enabled = value;
        }
        self
    }

    /// Whether activating this row can do anything.
    pub fn is_activatable(&self) -> bool {
        match &self.kind {
            ControlKind::Label { .. } => false,
            ControlKind::Button { enabled, .. } => *enabled,
            _ => true,
        }
    }

    /// Display name for a selector's current value. Out-of-range stored
    /// values render as blank rather than panicking.
    pub fn selector_name(&self) -> Option<&'static str> {
        if let ControlKind::Selector { value, names, .. } = &self.kind {
            names.get(*value as usize).copied().or(Some(""))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offroad_gating_only_affects_offroad_actions() {
        let dcam = Control::button(ButtonAction::ShowDriverCamera, "PREVIEW", "Driver Camera", "")
            .offroad_gated(false);
        assert!(!dcam.is_activatable());

        let reboot =
            Control::button(ButtonAction::Reboot, "REBOOT", "Reboot", "").offroad_gated(false);
        assert!(reboot.is_activatable());
    }

    #[test]
    fn test_selector_name_out_of_range_is_blank() {
        let names: &[&str] = &["PID", "INDI", "LQR"];
        let mut control = Control::selector("LateralControlSelect", 1, names, "Lateral", "");
        assert_eq!(control.selector_name(), Some("INDI"));
        if let ControlKind::Selector { value, .. } = &mut control.kind {
            *value = 9;
        }
        assert_eq!(control.selector_name(), Some(""));
    }

    #[test]
    fn test_confirm_classification() {
        assert!(ButtonAction::Reboot.needs_confirm());
        assert!(ButtonAction::ClearDrivingLogs.needs_confirm());
        assert!(!ButtonAction::SoftRestart.needs_confirm());
        assert!(!ButtonAction::SshKeys.needs_confirm());
        assert!(!ButtonAction::CheckUpdate.needs_confirm());
    }

    #[test]
    fn test_labels_are_not_activatable() {
        let control = Control::label("Version", "0.8.2");
        assert!(!control.is_activatable());
    }
}
