//! Read from and write to the `my_device` character device.
//!
//! The library holds everything the `mydevice-app` binary does so that it can
//! be exercised against a substitute file in tests.

pub mod cli;
pub mod commands;
pub mod config;
pub mod device;
pub mod error;
pub mod tracing;
