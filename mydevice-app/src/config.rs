//! Device settings for one invocation.
//!
//! There are no configuration files. The device path comes from the command
//! line or the `MYDEVICE_PATH` environment variable, falling back to the node
//! the kernel module creates when it loads.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// Path of the character device created by the kernel module.
pub const DEVICE_PATH: &str = "/dev/my_device";

/// Environment variable that overrides [`DEVICE_PATH`].
pub const DEVICE_PATH_ENV: &str = "MYDEVICE_PATH";

/// Size of a single read, matching the kernel module's buffer.
pub const BUFFER_SIZE: usize = 1024;

/// Resolved settings for talking to the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Device node to open
    pub device: PathBuf,

    /// Maximum number of bytes taken by one read
    pub buffer_size: usize,
}

impl Config {
    /// Settings for a device node other than the default one.
    pub fn with_device(device: impl Into<PathBuf>) -> Self {
        Self {
            device: device.into(),
            ..Self::default()
        }
    }

    /// Check that the settings can describe a usable device.
    pub fn validate(&self) -> Result<()> {
        if self.device.as_os_str().is_empty() {
            return Err(Error::Config("device path is empty".to_string()));
        }
        if self.buffer_size == 0 {
            return Err(Error::Config("buffer size must be non-zero".to_string()));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device: PathBuf::from(DEVICE_PATH),
            buffer_size: BUFFER_SIZE,
        }
    }
}
