use anyhow::{Context, Result};
use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use mydevice_app::cli;
use mydevice_app::commands;
use mydevice_app::tracing::{self, prelude::*};

fn main() -> Result<ExitCode> {
    tracing::init_journald_or_stderr();

    let invocation = match cli::parse_from(env::args_os()) {
        Ok(invocation) => invocation,
        Err(cli::ArgsError::Info(text)) => {
            print!("{text}");
            return Ok(ExitCode::SUCCESS);
        }
        Err(err) => {
            println!("{err}");
            return Ok(ExitCode::from(err.exit_code()));
        }
    };

    if let Err(err) = invocation.config.validate() {
        println!("{err}");
        return Ok(ExitCode::FAILURE);
    }
    debug!(command = ?invocation.command, device = %invocation.config.device.display(), "Starting.");

    // Device failures are reported on stdout and leave the exit status at 0.
    let mut out = io::stdout().lock();
    commands::run(&invocation.command, &invocation.config, &mut out)
        .and_then(|()| out.flush())
        .context("failed to write report to stdout")?;

    Ok(ExitCode::SUCCESS)
}
