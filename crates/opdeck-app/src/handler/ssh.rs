//! GitHub key binding
//!
//! The stored username and key list are a pair: they are written together
//! on a successful fetch and removed together on unbind, so the store never
//! holds a username without keys or keys without a username.

use opdeck_core::params::keys;
use tracing::{error, info, warn};

use crate::github;
use crate::handler::{UpdateAction, UpdateResult};
use crate::state::{AppState, Modal};

pub fn activate(state: &mut AppState) -> UpdateResult {
    if state.ssh.fetching {
        // Fetch already in flight; the button is disabled, this guard
        // covers any other path in.
        return UpdateResult::none();
    }

    let bound = state
        .params
        .get(keys::GITHUB_SSH_KEYS)
        .map(|k| !k.trim().is_empty())
        .unwrap_or(false);

    if bound {
        unbind(state);
        UpdateResult::none()
    } else {
        state.modal = Some(Modal::Input {
            title: "Enter your GitHub username".to_string(),
            buffer: String::new(),
        });
        UpdateResult::none()
    }
}

pub fn begin_fetch(state: &mut AppState, username: String) -> UpdateResult {
    state.ssh.fetching = true;
    let url = github::keys_url(&state.settings.network.key_host, &username);
    info!(username, url, "fetching public keys");
    UpdateResult::action(UpdateAction::FetchSshKeys {
        username,
        url,
        timeout_ms: state.settings.network.fetch_timeout_ms,
    })
}

pub fn on_fetched(state: &mut AppState, username: String, fetched: String) -> UpdateResult {
    state.ssh.fetching = false;
    let wrote = state
        .params
        .put(keys::GITHUB_USERNAME, &username)
        .and_then(|_| state.params.put(keys::GITHUB_SSH_KEYS, &fetched));
    if let Err(e) = wrote {
        // Keep the pair invariant: a half-written binding is removed.
        error!(error = %e, "failed to store key binding");
        unbind(state);
        state.modal = Some(Modal::Alert {
            message: "Failed to store the fetched keys.".to_string(),
        });
        return UpdateResult::none();
    }
    info!(username, "public keys installed");
    UpdateResult::none()
}

pub fn on_empty(state: &mut AppState, username: String) -> UpdateResult {
    state.ssh.fetching = false;
    warn!(username, "user has no keys on GitHub");
    state.modal = Some(Modal::Alert {
        message: format!("Username '{username}' has no keys on GitHub"),
    });
    UpdateResult::none()
}

pub fn on_failed(state: &mut AppState, username: String) -> UpdateResult {
    state.ssh.fetching = false;
    warn!(username, "key fetch failed");
    state.modal = Some(Modal::Alert {
        message: format!("Username '{username}' doesn't exist on GitHub"),
    });
    UpdateResult::none()
}

pub fn on_timed_out(state: &mut AppState) -> UpdateResult {
    state.ssh.fetching = false;
    warn!("key fetch timed out");
    state.modal = Some(Modal::Alert {
        message: "Request timed out".to_string(),
    });
    UpdateResult::none()
}

fn unbind(state: &AppState) {
    // Remove both halves; remove is idempotent so partial bindings clear too.
    if let Err(e) = state.params.remove(keys::GITHUB_USERNAME) {
        error!(error = %e, "failed to remove stored username");
    }
    if let Err(e) = state.params.remove(keys::GITHUB_SSH_KEYS) {
        error!(error = %e, "failed to remove stored keys");
    }
    info!("public key binding removed");
}
