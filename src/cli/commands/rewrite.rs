//! Rewrite command - Replace hard-coded literals with localization keys.
//!
//! Copies the source tree to the output tree, rewrites every
//! `Text("literal")` call it can safely externalize into
//! `Text("key".localized)`, and optionally writes the strings table with the
//! newly minted entries appended.
//!
//! Use `--dry-run` to scan and report without writing anything.

use std::path::PathBuf;

use anyhow::Result;

use super::super::{args::RewriteCommand, exit_status::ExitStatus, report};
use crate::{
    config::{CONFIG_FILE_NAME, load_config},
    core::pipeline::{self, RewriteOptions},
};

pub fn rewrite(cmd: RewriteCommand) -> Result<ExitStatus> {
    let args = cmd.args;
    let verbose = args.verbose;

    let config_result = load_config(&args.src)?;
    if verbose && !config_result.from_file {
        eprintln!(
            "Note: No {} found, using default configuration",
            CONFIG_FILE_NAME
        );
    }

    // CLI > config file > defaults
    let mut config = config_result.config;
    if let Some(call_name) = args.call_name {
        config.call_name = call_name;
    }
    config.validate()?;

    let strings_out = args
        .strings_out
        .unwrap_or_else(|| PathBuf::from(&config.strings_out));

    let options = RewriteOptions {
        src: args.src,
        out: args.out,
        strings_in: args.strings,
        write_strings: args.write_strings,
        strings_out,
        dry_run: args.dry_run,
        verbose,
    };

    let summary = pipeline::run(&config, &options)?;
    report::print_rewrite(&summary, &options);

    // A dry run that found work signals it like a linter finding issues
    if options.dry_run && summary.rewritten() > 0 {
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}
