//! # opdeck-core - Core Domain Types
//!
//! Foundation crate for opdeck. Provides the file-backed parameter store,
//! error handling, calibration payload decoding, and hardware primitives.
//!
//! This crate has **zero internal dependencies** -- it only depends on
//! external crates (thiserror, tracing, dirs).
//!
//! ## Public API
//!
//! ### Parameter Store (`params`)
//! - [`Params`] - File-per-key store with typed get/put/remove
//! - [`params::keys`] - Named constants for every bound parameter key
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ### Calibration (`calibration`)
//! - [`calibration::decode()`] - Decode the stored calibration payload
//! - [`Calibration`] - Calibrated flag plus pitch/yaw offsets in degrees
//!
//! ### Hardware (`hardware`)
//! - [`hardware::reboot()`], [`hardware::poweroff()`] - Immediate power actions
//! - [`hardware::run_shell()`] - Fire-and-forget shell command
//! - [`hardware::os_version()`] - Device OS version string
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use opdeck_core::prelude::*;
//! ```

pub mod calibration;
pub mod error;
pub mod hardware;
pub mod logging;
pub mod params;

/// Prelude for common imports used throughout all opdeck crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use calibration::Calibration;
pub use error::{Error, Result, ResultExt};
pub use params::Params;
