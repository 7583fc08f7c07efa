//! Command-line parsing.
//!
//! Parsing is done with clap, but failures are mapped onto the program's own
//! usage messages so that every argument error is one of three fixed texts
//! printed to stdout.
//!
//! The words after `write` never reach clap. They are split off first and
//! joined byte for byte, so `--help`, `--` and non-UTF-8 words all end up in
//! the message.

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;
use thiserror::Error;

use crate::commands::Command;
use crate::config::{Config, BUFFER_SIZE, DEVICE_PATH, DEVICE_PATH_ENV};

/// General usage line.
pub const USAGE: &str = "Usage: mydevice-app <read|write> [message]";

/// Usage line for `write` without a message.
pub const WRITE_USAGE: &str = "Usage: mydevice-app write \"Your message here\"";

#[derive(Debug, Parser)]
#[command(name = "mydevice-app")]
#[command(version, about = "Read from or write to the my_device character device", long_about = None)]
#[command(disable_help_subcommand = true)]
struct Cli {
    /// Device node to open
    #[arg(long, global = true, value_name = "PATH", env = DEVICE_PATH_ENV, default_value = DEVICE_PATH)]
    device: PathBuf,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Read one buffer from the device and print it
    Read {
        /// Anything after `read` is accepted and ignored
        #[arg(hide = true, num_args = 0.., value_parser = clap::value_parser!(OsString))]
        ignored: Vec<OsString>,
    },
    /// Write a message to the device; all following words, joined with
    /// single spaces
    Write,
}

/// A fully parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub config: Config,
    pub command: Command,
}

/// Reasons the command line does not describe an operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgsError {
    #[error("{}", USAGE)]
    MissingCommand,

    #[error("{}", WRITE_USAGE)]
    MissingMessage,

    #[error("Invalid command. Use 'read' or 'write'.\n{}", USAGE)]
    InvalidCommand,

    /// `--help` or `--version` output, already rendered
    #[error("{0}")]
    Info(String),
}

impl ArgsError {
    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            ArgsError::Info(_) => 0,
            _ => 1,
        }
    }
}

impl From<clap::Error> for ArgsError {
    fn from(err: clap::Error) -> Self {
        match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                ArgsError::Info(err.render().to_string())
            }
            ErrorKind::MissingSubcommand
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => ArgsError::MissingCommand,
            _ => ArgsError::InvalidCommand,
        }
    }
}

/// Parse a full argument list, program name first.
pub fn parse_from<I, T>(args: I) -> Result<Invocation, ArgsError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let words = split_write_words(&mut args);

    let cli = Cli::try_parse_from(args)?;

    let command = match (cli.command, words) {
        (CliCommand::Read { .. }, _) => Command::Read,
        (CliCommand::Write, Some(words)) if !words.is_empty() => Command::Write {
            message: join_words(&words),
        },
        (CliCommand::Write, _) => return Err(ArgsError::MissingMessage),
    };

    Ok(Invocation {
        config: Config {
            device: cli.device,
            buffer_size: BUFFER_SIZE,
        },
        command,
    })
}

// Find the subcommand past any leading `--device` options and, when it is
// `write`, remove and return everything after it.
fn split_write_words(args: &mut Vec<OsString>) -> Option<Vec<OsString>> {
    let mut i = 1;
    while let Some(arg) = args.get(i) {
        let bytes = arg.as_bytes();
        if bytes == b"--device" {
            i += 2;
        } else if bytes.starts_with(b"-") && bytes != b"-" && bytes != b"--" {
            i += 1;
        } else {
            break;
        }
    }

    if args.get(i).map(OsString::as_os_str) == Some(OsStr::new("write")) {
        Some(args.split_off(i + 1))
    } else {
        None
    }
}

fn join_words(words: &[OsString]) -> Vec<u8> {
    let mut message = Vec::new();
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            message.push(b' ');
        }
        message.extend_from_slice(word.as_bytes());
    }
    message
}
