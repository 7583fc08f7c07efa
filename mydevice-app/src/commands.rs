//! The read and write operations.
//!
//! Each operation opens its own handle, performs one transfer and writes a
//! report to `out`. Device failures are part of the report rather than an
//! error return; the only error that escapes is a failure to write the
//! report itself.

use std::io::{self, Write};

use crate::config::Config;
use crate::device::Device;
use crate::error::{Error, Result};
use crate::tracing::prelude::*;

/// Operation selected on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Read one buffer from the device
    Read,
    /// Write a message to the device, as raw bytes
    Write { message: Vec<u8> },
}

/// Run `command` against the device described by `config`.
pub fn run(command: &Command, config: &Config, out: &mut impl Write) -> io::Result<()> {
    match command {
        Command::Read => read_device(config, out),
        Command::Write { message } => write_device(config, message, out),
    }
}

/// Read up to one buffer from the device and print it as text.
pub fn read_device(config: &Config, out: &mut impl Write) -> io::Result<()> {
    match try_read(config) {
        Ok(data) => {
            writeln!(out, "Read {} bytes from device:", data.len())?;
            writeln!(out, "{}", String::from_utf8_lossy(&data))
        }
        Err(e) => report_failure(out, e),
    }
}

/// Write `message` to the device and print how many bytes it took.
pub fn write_device(config: &Config, message: &[u8], out: &mut impl Write) -> io::Result<()> {
    match try_write(config, message) {
        Ok(n) => writeln!(out, "Wrote {n} bytes to device."),
        Err(e) => report_failure(out, e),
    }
}

fn report_failure(out: &mut impl Write, e: Error) -> io::Result<()> {
    debug!(error = ?e, "Device operation failed.");
    writeln!(out, "{e}")
}

/// Open the device and read one buffer, returning the bytes instead of
/// printing them.
pub fn try_read(config: &Config) -> Result<Vec<u8>> {
    let mut device = Device::open(&config.device)?;
    device.read_once(config.buffer_size)
}

/// Open the device and write `data` once, returning the accepted count.
pub fn try_write(config: &Config, data: &[u8]) -> Result<usize> {
    let mut device = Device::open(&config.device)?;
    device.write_once(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::{NamedTempFile, TempDir};

    fn output_of(command: &Command, config: &Config) -> String {
        let mut out = Vec::new();
        run(command, config, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_write_reports_byte_count() {
        let file = NamedTempFile::new().unwrap();
        let config = Config::with_device(file.path());

        let command = Command::Write {
            message: b"hello world".to_vec(),
        };
        assert_eq!(output_of(&command, &config), "Wrote 11 bytes to device.\n");
        assert_eq!(fs::read(file.path()).unwrap(), b"hello world");
    }

    #[test]
    fn test_read_echoes_contents() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "driver buffer").unwrap();
        let config = Config::with_device(file.path());

        assert_eq!(
            output_of(&Command::Read, &config),
            "Read 13 bytes from device:\ndriver buffer\n"
        );
    }

    #[test]
    fn test_read_replaces_invalid_utf8() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), [b'o', b'k', 0xff]).unwrap();
        let config = Config::with_device(file.path());

        assert_eq!(
            output_of(&Command::Read, &config),
            "Read 3 bytes from device:\nok\u{fffd}\n"
        );
    }

    #[test]
    fn test_read_limited_to_buffer_size() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), vec![b'a'; 1500]).unwrap();
        let config = Config::with_device(file.path());

        let output = output_of(&Command::Read, &config);
        let body = output
            .strip_prefix("Read 1024 bytes from device:\n")
            .expect("header with full buffer count");
        assert_eq!(body, format!("{}\n", "a".repeat(1024)));
    }

    #[test]
    fn test_open_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let config = Config::with_device(dir.path().join("absent"));

        for command in [
            Command::Read,
            Command::Write {
                message: b"x".to_vec(),
            },
        ] {
            let output = output_of(&command, &config);
            assert!(
                output.starts_with("Error opening device file: open "),
                "unexpected output for {command:?}: {output}"
            );
        }
    }

    #[test]
    fn test_empty_read_is_reported_as_eof() {
        let file = NamedTempFile::new().unwrap();
        let config = Config::with_device(file.path());

        assert_eq!(
            output_of(&Command::Read, &config),
            "Error reading from device: EOF\n"
        );
    }

    #[test]
    fn test_write_failure_is_reported() {
        if !Path::new("/dev/full").exists() {
            eprintln!("skipping: /dev/full not present");
            return;
        }
        let config = Config::with_device("/dev/full");

        let command = Command::Write {
            message: b"hello".to_vec(),
        };
        assert_eq!(
            output_of(&command, &config),
            "Error writing to device: write /dev/full: no space left on device\n"
        );
    }

    #[test]
    fn test_write_raw_bytes() {
        let file = NamedTempFile::new().unwrap();
        let config = Config::with_device(file.path());

        let command = Command::Write {
            message: vec![0xff, b'a'],
        };
        assert_eq!(output_of(&command, &config), "Wrote 2 bytes to device.\n");
        assert_eq!(fs::read(file.path()).unwrap(), [0xff, b'a']);
    }

    #[test]
    fn test_try_read() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "abc").unwrap();

        let data = try_read(&Config::with_device(file.path())).unwrap();
        assert_eq!(data, b"abc");
    }
}
