//! Remote public key fetch
//!
//! GitHub (and compatible forges) serve a user's public keys as plain text
//! at `/<username>.keys`. The fetch runs on a spawned task and reports its
//! terminal outcome back to the update loop as a message; the task never
//! touches state directly.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::message::Message;

/// URL serving `username`'s public keys on `host`.
pub fn keys_url(host: &str, username: &str) -> String {
    format!("{}/{}.keys", host.trim_end_matches('/'), username)
}

/// Spawn the fetch task. Exactly one terminal message is sent per call.
pub fn spawn_fetch(
    tx: mpsc::Sender<Message>,
    username: String,
    url: String,
    timeout_ms: u64,
) {
    tokio::spawn(async move {
        let outcome = fetch(&url, timeout_ms).await;
        debug!(username, ?outcome, "key fetch finished");
        let message = match outcome {
            FetchOutcome::Keys(keys) => Message::SshKeysFetched { username, keys },
            FetchOutcome::Empty => Message::SshKeysEmpty { username },
            FetchOutcome::Failed => Message::SshKeysFailed { username },
            FetchOutcome::TimedOut => Message::SshKeysTimedOut,
        };
        if tx.send(message).await.is_err() {
            warn!("update loop gone, dropping key fetch result");
        }
    });
}

#[derive(Debug)]
enum FetchOutcome {
    Keys(String),
    Empty,
    Failed,
    TimedOut,
}

async fn fetch(url: &str, timeout_ms: u64) -> FetchOutcome {
    let client = match reqwest::Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "failed to build http client");
            return FetchOutcome::Failed;
        }
    };

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) if e.is_timeout() => return FetchOutcome::TimedOut,
        Err(e) => {
            warn!(error = %e, "key fetch request failed");
            return FetchOutcome::Failed;
        }
    };

    if !response.status().is_success() {
        // GitHub answers 404 for unknown usernames.
        return FetchOutcome::Failed;
    }

    match response.text().await {
        Ok(body) => classify_body(body),
        Err(e) if e.is_timeout() => FetchOutcome::TimedOut,
        Err(e) => {
            warn!(error = %e, "key fetch body read failed");
            FetchOutcome::Failed
        }
    }
}

// A user can exist with zero keys; the forge then serves an empty body.
fn classify_body(body: String) -> FetchOutcome {
    if body.trim().is_empty() {
        FetchOutcome::Empty
    } else {
        FetchOutcome::Keys(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_url_layout() {
        assert_eq!(
            keys_url("https://github.com", "alice"),
            "https://github.com/alice.keys"
        );
        assert_eq!(
            keys_url("https://github.com/", "bob"),
            "https://github.com/bob.keys"
        );
    }

    #[test]
    fn test_blank_body_counts_as_no_keys() {
        assert!(matches!(
            classify_body("  \n ".to_string()),
            FetchOutcome::Empty
        ));
        assert!(matches!(
            classify_body("ssh-ed25519 AAAA".to_string()),
            FetchOutcome::Keys(_)
        ));
    }
}
