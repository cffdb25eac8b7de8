//! Updater state tracking
//!
//! The updater daemon runs out-of-process and reports through the store:
//! a successful check bumps `LastUpdateTime`, a failed one bumps
//! `UpdateFailedCount`. The watcher surfaces those writes here.

use opdeck_core::params::keys;
use tracing::debug;

use crate::handler::UpdateResult;
use crate::message::Message;
use crate::state::AppState;

pub fn handle_param_file_changed(state: &mut AppState, key: &str) -> UpdateResult {
    match key {
        keys::LAST_UPDATE_TIME => {
            debug!("update check succeeded");
            state.software.checking = false;
            state.software.update_failed = false;
            UpdateResult::none()
        }
        keys::UPDATE_FAILED_COUNT => {
            let failed = state.params.get_int(keys::UPDATE_FAILED_COUNT).unwrap_or(0) > 0;
            if failed {
                debug!("update check failed");
                state.software.checking = false;
                state.software.update_failed = true;
            }
            UpdateResult::none()
        }
        keys::IS_OFFROAD => {
            let offroad = state.params.get_bool(keys::IS_OFFROAD);
            UpdateResult::message(Message::OffroadTransition(offroad))
        }
        _ => UpdateResult::none(),
    }
}
