//! Hardware and process primitives
//!
//! Reboot, power off, and external script launches. These are all
//! fire-and-forget: the console never captures an exit status, and a
//! failure to launch is logged at debug level and otherwise ignored.

use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

/// Reboot the device immediately.
pub fn reboot() {
    info!("reboot requested");
    run("reboot", &[]);
}

/// Power the device off immediately.
pub fn poweroff() {
    info!("power off requested");
    run("poweroff", &[]);
}

/// Run a shell command line (`sh -c <command>`), discarding the result.
///
/// Blocks until the command exits; the settings console accepts that the
/// event loop stalls for the duration.
pub fn run_shell(command: &str) {
    debug!(command, "running shell command");
    run("sh", &["-c", command]);
}

/// Device OS version string, if the version file exists.
pub fn os_version() -> Option<String> {
    os_version_from(Path::new("/VERSION"))
}

/// Read an OS version string from an arbitrary path (test seam).
pub fn os_version_from(path: &Path) -> Option<String> {
    let raw = std::fs::read_to_string(path).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn run(program: &str, args: &[&str]) {
    match Command::new(program).args(args).status() {
        Ok(status) => debug!(program, ?status, "command finished"),
        Err(e) => debug!(program, error = %e, "command failed to launch"),
    }
}
