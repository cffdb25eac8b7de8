//! File-backed parameter store
//!
//! One file per key under a root directory, matching the on-device layout
//! used by the rest of the platform (`/data/params/d/<Key>`). Reads never
//! fail: a missing or malformed value is the caller's default. Writes go
//! through a temp file + rename so a concurrent reader never observes a
//! partial value.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Named constants for every parameter key the console binds.
pub mod keys {
    // Feature toggles
    pub const OPENPILOT_ENABLED: &str = "OpenpilotEnabledToggle";
    pub const IS_METRIC: &str = "IsMetric";
    pub const COMMUNITY_FEATURES: &str = "CommunityFeaturesToggle";
    pub const IS_LDW_ENABLED: &str = "IsLdwEnabled";
    pub const AUTO_LANE_CHANGE: &str = "AutoLaneChangeEnabled";
    pub const UPLOAD_RAW: &str = "UploadRaw";
    pub const END_TO_END: &str = "EndToEndToggle";

    // Community toggles
    pub const PUT_PREBUILT: &str = "PutPrebuilt";
    pub const DISABLE_SHUTDOWND: &str = "DisableShutdownd";
    pub const DISABLE_LOGGER: &str = "DisableLogger";
    pub const DISABLE_GPS: &str = "DisableGps";
    pub const UI_TPMS: &str = "UiTpms";

    // Step selectors
    pub const LATERAL_CONTROL_SELECT: &str = "LateralControlSelect";
    pub const MFC_SELECT: &str = "MfcSelect";
    pub const LONG_CONTROL_SELECT: &str = "LongControlSelect";

    // SSH key management
    pub const SSH_ENABLED: &str = "SshEnabled";
    pub const GITHUB_USERNAME: &str = "GithubUsername";
    pub const GITHUB_SSH_KEYS: &str = "GithubSshKeys";

    // Device state and actions
    pub const IS_OFFROAD: &str = "IsOffroad";
    pub const PASSIVE: &str = "Passive";
    pub const CALIBRATION_PARAMS: &str = "CalibrationParams";
    pub const LIVE_PARAMETERS: &str = "LiveParameters";
    pub const COMPLETED_TRAINING_VERSION: &str = "CompletedTrainingVersion";
    pub const SOFT_RESTART_TRIGGERED: &str = "SoftRestartTriggered";
    pub const DO_UNINSTALL: &str = "DoUninstall";

    // Identity and software info
    pub const DONGLE_ID: &str = "DongleId";
    pub const HARDWARE_SERIAL: &str = "HardwareSerial";
    pub const VERSION: &str = "Version";
    pub const GIT_REMOTE: &str = "GitRemote";
    pub const GIT_BRANCH: &str = "GitBranch";
    pub const GIT_COMMIT: &str = "GitCommit";
    pub const LAST_UPDATE_TIME: &str = "LastUpdateTime";
    pub const UPDATE_FAILED_COUNT: &str = "UpdateFailedCount";

    // Car selection
    pub const SELECTED_CAR: &str = "SelectedCar";
    pub const SUPPORTED_CARS: &str = "SupportedCars";
}

/// Handle to the parameter directory.
///
/// Cheap to clone; every operation re-touches the filesystem, so two handles
/// over the same root always agree.
#[derive(Debug, Clone)]
pub struct Params {
    root: PathBuf,
}

impl Params {
    /// Open (and create if needed) the store at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|_| Error::ParamsUnavailable { path: root.clone() })?;
        Ok(Self { root })
    }

    /// Path of the file backing `key`, usable with a file watcher.
    pub fn path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read a parameter. Missing key reads as `None`.
    pub fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path(key)).ok()
    }

    /// Read a boolean parameter. Anything other than a stored `"1"` is false.
    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key).map(|v| v.trim() == "1").unwrap_or(false)
    }

    /// Read an integer parameter. Missing or malformed values read as `None`.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key)?.trim().parse().ok()
    }

    /// Read raw bytes (used for the calibration payload).
    pub fn get_raw(&self, key: &str) -> Option<Vec<u8>> {
        fs::read(self.path(key)).ok()
    }

    /// Write a parameter atomically (temp file + rename).
    pub fn put(&self, key: &str, value: &str) -> Result<()> {
        self.put_raw(key, value.as_bytes())
    }

    /// Write a boolean parameter as `"1"` / `"0"`.
    pub fn put_bool(&self, key: &str, value: bool) -> Result<()> {
        self.put(key, if value { "1" } else { "0" })
    }

    /// Write raw bytes atomically.
    pub fn put_raw(&self, key: &str, value: &[u8]) -> Result<()> {
        let tmp = self.root.join(format!(".{key}.tmp"));
        fs::write(&tmp, value).map_err(|e| Error::param_write(key, e.to_string()))?;
        fs::rename(&tmp, self.path(key)).map_err(|e| Error::param_write(key, e.to_string()))?;
        Ok(())
    }

    /// Remove a parameter. Removing a missing key is not an error.
    pub fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::param_write(key, e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, Params) {
        let dir = TempDir::new().unwrap();
        let params = Params::new(dir.path()).unwrap();
        (dir, params)
    }

    #[test]
    fn test_put_get_round_trip() {
        let (_dir, params) = store();
        params.put(keys::SELECTED_CAR, "GENESIS G70").unwrap();
        assert_eq!(
            params.get(keys::SELECTED_CAR),
            Some("GENESIS G70".to_string())
        );
    }

    #[test]
    fn test_missing_key_reads_as_none() {
        let (_dir, params) = store();
        assert_eq!(params.get("NoSuchKey"), None);
        assert!(!params.get_bool("NoSuchKey"));
        assert_eq!(params.get_int("NoSuchKey"), None);
    }

    #[test]
    fn test_bool_round_trip() {
        let (_dir, params) = store();
        params.put_bool(keys::IS_METRIC, true).unwrap();
        assert!(params.get_bool(keys::IS_METRIC));
        params.put_bool(keys::IS_METRIC, false).unwrap();
        assert!(!params.get_bool(keys::IS_METRIC));
    }

    #[test]
    fn test_bool_only_one_is_true() {
        let (_dir, params) = store();
        params.put(keys::IS_METRIC, "true").unwrap();
        assert!(!params.get_bool(keys::IS_METRIC));
        params.put(keys::IS_METRIC, "1").unwrap();
        assert!(params.get_bool(keys::IS_METRIC));
    }

    #[test]
    fn test_malformed_int_reads_as_none() {
        let (_dir, params) = store();
        params.put(keys::LATERAL_CONTROL_SELECT, "banana").unwrap();
        assert_eq!(params.get_int(keys::LATERAL_CONTROL_SELECT), None);
        params.put(keys::LATERAL_CONTROL_SELECT, "2").unwrap();
        assert_eq!(params.get_int(keys::LATERAL_CONTROL_SELECT), Some(2));
    }

    #[test]
    fn test_int_tolerates_trailing_newline() {
        let (_dir, params) = store();
        params.put(keys::UPDATE_FAILED_COUNT, "3\n").unwrap();
        assert_eq!(params.get_int(keys::UPDATE_FAILED_COUNT), Some(3));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (_dir, params) = store();
        params.put(keys::GITHUB_USERNAME, "alice").unwrap();
        params.remove(keys::GITHUB_USERNAME).unwrap();
        assert_eq!(params.get(keys::GITHUB_USERNAME), None);
        // Second remove of a missing key must not error
        params.remove(keys::GITHUB_USERNAME).unwrap();
    }

    #[test]
    fn test_path_points_into_root() {
        let (dir, params) = store();
        let path = params.path(keys::LAST_UPDATE_TIME);
        assert!(path.starts_with(dir.path()));
        assert_eq!(path.file_name().unwrap(), keys::LAST_UPDATE_TIME);
    }

    #[test]
    fn test_raw_round_trip() {
        let (_dir, params) = store();
        let payload = vec![1u8, 0, 0, 255];
        params.put_raw(keys::CALIBRATION_PARAMS, &payload).unwrap();
        assert_eq!(params.get_raw(keys::CALIBRATION_PARAMS), Some(payload));
    }
}
