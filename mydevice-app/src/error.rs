//! Common error types for mydevice-app.
//!
//! The `Display` text of each variant is the line printed to the user, so
//! the commands can report an error by writing it out verbatim. System
//! errors are shown as `<op> <path>: <description>` with the description in
//! lower case and without the `(os error N)` suffix.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for device operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The device node could not be opened
    #[error("Error opening device file: open {}: {}", .path.display(), describe(.source))]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The single read call failed
    #[error("Error reading from device: read {}: {}", .path.display(), describe(.source))]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The single read call returned no data
    #[error("Error reading from device: EOF")]
    EndOfFile,

    /// The single write call failed
    #[error("Error writing to device: write {}: {}", .path.display(), describe(.source))]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Settings that cannot describe a usable device
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Results using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

// Render an I/O error as a bare lower-case description.
fn describe(err: &io::Error) -> String {
    let text = err.to_string();
    let text = match err.raw_os_error() {
        Some(code) => text
            .strip_suffix(&format!(" (os error {code})"))
            .unwrap_or(&text)
            .to_string(),
        None => text,
    };

    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => text,
    }
}
