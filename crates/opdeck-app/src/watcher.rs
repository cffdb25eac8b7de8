//! Parameter file watcher
//!
//! Other daemons on the device write parameters behind the console's back:
//! the updater bumps `LastUpdateTime` / `UpdateFailedCount`, and the manager
//! flips `IsOffroad`. The watcher observes the store directory and turns
//! debounced changes to subscribed keys into messages for the update loop.

use std::path::PathBuf;
use std::time::Duration;

use notify::RecursiveMode;
use notify_debouncer_full::{new_debouncer, DebounceEventResult};
use opdeck_core::params::keys;
use opdeck_core::Params;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::message::Message;

/// Default debounce duration in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Keys the console subscribes to by default.
pub const DEFAULT_WATCH_KEYS: &[&str] = &[
    keys::IS_OFFROAD,
    keys::LAST_UPDATE_TIME,
    keys::UPDATE_FAILED_COUNT,
];

/// Configuration for the parameter watcher
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// Parameter keys to report changes for
    pub keys: Vec<String>,
    /// Debounce duration
    pub debounce: Duration,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            keys: DEFAULT_WATCH_KEYS.iter().map(|k| (*k).to_string()).collect(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }
}

impl WatcherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the subscribed keys
    pub fn with_keys(mut self, keys: Vec<String>) -> Self {
        self.keys = keys;
        self
    }

    /// Set debounce duration in milliseconds
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce = Duration::from_millis(ms);
        self
    }
}

/// Watches the parameter store directory for subscribed key changes.
///
/// The store root is watched rather than the individual files so that keys
/// created after startup are still observed.
pub struct ParamWatcher {
    root: PathBuf,
    config: WatcherConfig,
    stop_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl ParamWatcher {
    pub fn new(params: &Params, config: WatcherConfig) -> Self {
        Self {
            root: params.root().to_path_buf(),
            config,
            stop_tx: None,
        }
    }

    /// Start watching. Sends [`Message::ParamFileChanged`] to the channel.
    pub fn start(&mut self, message_tx: mpsc::Sender<Message>) -> Result<(), String> {
        if self.is_running() {
            return Err("Watcher is already running".to_string());
        }

        let root = self.root.clone();
        let config = self.config.clone();
        let (stop_tx, stop_rx) = tokio::sync::oneshot::channel();

        self.stop_tx = Some(stop_tx);

        tokio::task::spawn_blocking(move || {
            Self::run_watcher(root, config, message_tx, stop_rx);
        });

        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
    }

    pub fn is_running(&self) -> bool {
        self.stop_tx.is_some()
    }

    fn run_watcher(
        root: PathBuf,
        config: WatcherConfig,
        message_tx: mpsc::Sender<Message>,
        mut stop_rx: tokio::sync::oneshot::Receiver<()>,
    ) {
        let tx_clone = message_tx.clone();
        let subscribed = config.keys.clone();

        let debouncer_result = new_debouncer(
            config.debounce,
            None,
            move |result: DebounceEventResult| match result {
                Ok(events) => {
                    // One message per subscribed key, however many raw
                    // events the debounce window collected.
                    let mut changed: Vec<String> = events
                        .iter()
                        .flat_map(|event| event.paths.iter())
                        .filter_map(|path| path.file_name()?.to_str())
                        .filter(|name| subscribed.iter().any(|k| k == name))
                        .map(String::from)
                        .collect();
                    changed.sort();
                    changed.dedup();

                    for key in changed {
                        debug!(key, "watched parameter changed");
                        let _ = tx_clone.blocking_send(Message::ParamFileChanged { key });
                    }
                }
                Err(errors) => {
                    for e in errors {
                        warn!("Parameter watcher error: {:?}", e);
                    }
                }
            },
        );

        let mut debouncer = match debouncer_result {
            Ok(d) => d,
            Err(e) => {
                error!("Failed to create parameter watcher: {}", e);
                return;
            }
        };

        if let Err(e) = debouncer.watch(&root, RecursiveMode::NonRecursive) {
            error!("Failed to watch {}: {}", root.display(), e);
            return;
        }
        info!("Watching parameter store: {}", root.display());

        loop {
            match stop_rx.try_recv() {
                Ok(()) | Err(tokio::sync::oneshot::error::TryRecvError::Closed) => {
                    info!("Parameter watcher stopping");
                    break;
                }
                Err(tokio::sync::oneshot::error::TryRecvError::Empty) => {
                    std::thread::sleep(Duration::from_millis(100));
                }
            }
        }
    }
}

impl Drop for ParamWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_watcher_config_default() {
        let config = WatcherConfig::default();
        assert_eq!(config.debounce, Duration::from_millis(300));
        assert!(config.keys.iter().any(|k| k == keys::IS_OFFROAD));
        assert!(config.keys.iter().any(|k| k == keys::LAST_UPDATE_TIME));
    }

    #[test]
    fn test_watcher_config_builder() {
        let config = WatcherConfig::new()
            .with_debounce_ms(50)
            .with_keys(vec![keys::IS_OFFROAD.to_string()]);
        assert_eq!(config.debounce, Duration::from_millis(50));
        assert_eq!(config.keys, vec![keys::IS_OFFROAD.to_string()]);
    }

    #[test]
    fn test_param_watcher_creation() {
        let dir = TempDir::new().unwrap();
        let params = Params::new(dir.path()).unwrap();
        let watcher = ParamWatcher::new(&params, WatcherConfig::default());
        assert!(!watcher.is_running());
    }

    #[tokio::test]
    async fn test_stop_when_not_started() {
        let dir = TempDir::new().unwrap();
        let params = Params::new(dir.path()).unwrap();
        let mut watcher = ParamWatcher::new(&params, WatcherConfig::default());
        watcher.stop();
        assert!(!watcher.is_running());
    }

    #[tokio::test]
    async fn test_double_start_error() {
        let dir = TempDir::new().unwrap();
        let params = Params::new(dir.path()).unwrap();
        let mut watcher = ParamWatcher::new(&params, WatcherConfig::default());
        let (tx, _rx) = mpsc::channel(32);

        assert!(watcher.start(tx.clone()).is_ok());
        assert!(watcher.is_running());
        assert!(watcher.start(tx).unwrap_err().contains("already running"));
        watcher.stop();
    }
}
