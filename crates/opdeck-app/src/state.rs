//! Application state
//!
//! Single source of truth for the console. Mutated only by the update
//! handlers; the TUI renders from an immutable borrow.

use opdeck_core::params::keys;
use opdeck_core::Params;

use crate::config::Settings;
use crate::controls::{ButtonAction, Control};
use crate::items;
use crate::panel::Panel;

/// Cars offered by the selection screen when the store has no
/// `SupportedCars` list of its own.
pub const BUILTIN_CARS: &[&str] = &[
    "GENESIS",
    "GENESIS G70",
    "GENESIS G80",
    "GENESIS G90",
    "HYUNDAI IONIQ",
    "HYUNDAI KONA",
    "HYUNDAI SANTAFE",
    "HYUNDAI SONATA",
    "KIA K5",
    "KIA K7",
    "KIA NIRO",
    "KIA SORENTO",
    "KIA STINGER",
];

/// Entry shown for "no car selected".
pub const CAR_NOT_SELECTED: &str = "[ Not selected ]";

/// Modal dialog overlaying the active panel.
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Destructive action pending confirmation.
    Confirm {
        title: String,
        message: String,
        action: ButtonAction,
    },
    /// Free-text input (GitHub username).
    Input { title: String, buffer: String },
    /// Dismissable notice.
    Alert { message: String },
}

/// Remote key fetch status.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SshState {
    /// A fetch task is in flight; the button reads LOADING and stays
    /// disabled until a terminal outcome lands.
    pub fetching: bool,
}

/// Software panel status not derivable from the store alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoftwareStatus {
    /// An update check was requested and no result has landed yet.
    pub checking: bool,
    /// The updater reported a non-zero failure count.
    pub update_failed: bool,
}

/// Car selection sub-screen.
#[derive(Debug, Clone, PartialEq)]
pub struct CarSelect {
    /// Row 0 is [`CAR_NOT_SELECTED`]; the rest are car names.
    pub entries: Vec<String>,
    pub selected: usize,
}

/// Complete console state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub params: Params,
    pub settings: Settings,

    pub active_panel: Panel,
    /// Selected row within the active panel.
    pub selected: usize,

    /// Device offroad state, driven by the `IsOffroad` broadcast.
    pub offroad: bool,

    pub modal: Option<Modal>,
    pub ssh: SshState,
    pub software: SoftwareStatus,
    pub car_select: Option<CarSelect>,

    pub should_quit: bool,
}

impl AppState {
    pub fn new(params: Params, settings: Settings) -> Self {
        // Absent IsOffroad reads as offroad: a device showing the settings
        // console with no onroad indication should not lock its buttons.
        let offroad = params
            .get(keys::IS_OFFROAD)
            .map(|v| v.trim() == "1")
            .unwrap_or(true);
        Self {
            params,
            settings,
            active_panel: Panel::Device,
            selected: 0,
            offroad,
            modal: None,
            ssh: SshState::default(),
            software: SoftwareStatus::default(),
            car_select: None,
            should_quit: false,
        }
    }

    /// Reset navigation to the first panel and first row. Runs every time
    /// the shell is shown so it never reopens mid-list.
    pub fn reset_navigation(&mut self) {
        self.active_panel = Panel::Device;
        self.selected = 0;
        self.modal = None;
        self.car_select = None;
    }

    /// Snapshot the active panel's controls from the parameter store.
    pub fn controls(&self) -> Vec<Control> {
        items::panel_controls(self)
    }

    /// Currently selected control, if the panel has any rows.
    pub fn selected_control(&self) -> Option<Control> {
        let controls = self.controls();
        controls.into_iter().nth(self.selected)
    }

    /// Keep the selection within the active panel's rows.
    pub fn clamp_selected(&mut self) {
        let len = self.controls().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// Open the car selection sub-screen, cursor on the current choice.
    pub fn open_car_select(&mut self) {
        let mut entries = vec![CAR_NOT_SELECTED.to_string()];
        match self.params.get(keys::SUPPORTED_CARS) {
            Some(raw) if !raw.trim().is_empty() => {
                entries.extend(raw.lines().map(str::trim).filter(|l| !l.is_empty()).map(String::from));
            }
            _ => entries.extend(BUILTIN_CARS.iter().map(|c| c.to_string())),
        }
        let current = self.params.get(keys::SELECTED_CAR);
        let selected = current
            .as_deref()
            .map(str::trim)
            .and_then(|car| entries.iter().position(|e| e == car))
            .unwrap_or(0);
        self.car_select = Some(CarSelect { entries, selected });
    }
}
