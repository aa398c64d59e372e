//! Dispatches to the appropriate command handler based on the parsed arguments.
//!
//! # Returns
//! - `Ok(ExitStatus)` describing how the command finished
//! - `Err` if the command fails (e.g., invalid config, filesystem errors)

use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{init::init, rewrite::rewrite},
    exit_status::ExitStatus,
};

pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Rewrite(cmd)) => rewrite(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
