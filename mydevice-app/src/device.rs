//! Access to the character device node.
//!
//! The device is opened read/write and each operation is exactly one system
//! call. Short reads and short writes are reported as they happen, not
//! retried. A read that returns no data is [`Error::EndOfFile`]. The handle
//! is closed when the [`Device`] is dropped.

use rustix::fs::{self, Mode, OFlags};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::tracing::prelude::*;

/// Permission bits passed along with the open call.
const OPEN_MODE: u32 = 0o666;

/// An open handle on the device node.
#[derive(Debug)]
pub struct Device {
    file: File,
    path: PathBuf,
}

impl Device {
    /// Open the device node for reading and writing.
    ///
    /// The node is never created; a missing path is an [`Error::Open`].
    pub fn open(path: &Path) -> Result<Self> {
        let fd = fs::open(
            path,
            OFlags::RDWR | OFlags::CLOEXEC,
            Mode::from_bits_truncate(OPEN_MODE as _),
        )
        .map_err(|errno| Error::Open {
            path: path.to_path_buf(),
            source: errno.into(),
        })?;

        debug!(path = %path.display(), "Opened device.");
        Ok(Self {
            file: File::from(fd),
            path: path.to_path_buf(),
        })
    }

    /// Perform one read of at most `buffer_size` bytes.
    ///
    /// The returned buffer is truncated to the number of bytes the read
    /// produced, which is never zero.
    pub fn read_once(&mut self, buffer_size: usize) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; buffer_size];
        let n = self.file.read(&mut buffer).map_err(|source| Error::Read {
            path: self.path.clone(),
            source,
        })?;
        trace!(path = %self.path.display(), bytes = n, "Read from device.");
        if n == 0 {
            return Err(Error::EndOfFile);
        }
        buffer.truncate(n);
        Ok(buffer)
    }

    /// Perform one write of `data`, returning the count the kernel accepted.
    pub fn write_once(&mut self, data: &[u8]) -> Result<usize> {
        let n = self.file.write(data).map_err(|source| Error::Write {
            path: self.path.clone(),
            source,
        })?;
        trace!(
            path = %self.path.display(),
            bytes = n,
            requested = data.len(),
            "Wrote to device."
        );
        Ok(n)
    }
}
