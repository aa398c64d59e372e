//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `rewrite`: Replace hard-coded literals with localization keys
//! - `init`: Initialize a lokey configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Rewrite(cmd)) => cmd.args.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

#[derive(Debug, Clone, Parser)]
pub struct RewriteArgs {
    /// Source folder (your project or a subfolder)
    #[arg(long)]
    pub src: PathBuf,

    /// Output folder to write modified files (required unless --dry-run)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Existing strings file to seed keys and values
    #[arg(long)]
    pub strings: Option<PathBuf>,

    /// Write the strings file, with new entries appended, into the output folder
    #[arg(long)]
    pub write_strings: bool,

    /// Path of the written strings file, relative to the output folder (overrides config file)
    #[arg(long)]
    pub strings_out: Option<PathBuf>,

    /// Name of the call whose literal argument is rewritten (overrides config file)
    #[arg(long)]
    pub call_name: Option<String>,

    /// Scan and report without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct RewriteCommand {
    #[command(flatten)]
    pub args: RewriteArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert hard-coded Text("...") calls to Text("key".localized)
    Rewrite(RewriteCommand),
    /// Initialize a new .lokeyrc.json configuration file
    Init,
}
