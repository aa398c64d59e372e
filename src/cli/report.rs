//! Report formatting and printing utilities.
//!
//! Separate from core logic so the rewrite engine can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::core::{
    escape::encode_table,
    pipeline::{FileReport, RewriteOptions, RunSummary},
    rewrite::RewriteOccurrence,
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Maximum number of new keys listed in the preview.
const MAX_PREVIEW_KEYS: usize = 20;

/// Print the rewrite report to stdout.
pub fn print_rewrite(summary: &RunSummary, options: &RewriteOptions) {
    print_rewrite_to(summary, options, &mut io::stdout().lock());
}

/// Print the rewrite report to a custom writer.
pub fn print_rewrite_to<W: Write>(summary: &RunSummary, options: &RewriteOptions, writer: &mut W) {
    if options.verbose {
        print_skipped(&summary.files, writer);
    }

    let _ = writeln!(writer, "{}", "Localization rewrite report".bold());
    let _ = writeln!(writer, "  Source:        {}", options.src.display());
    let output = match (&options.out, options.dry_run) {
        (Some(out), false) => out.display().to_string(),
        _ => "(dry-run)".to_string(),
    };
    let _ = writeln!(writer, "  Output:        {}", output);
    let strings_in = options
        .strings_in
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "none".to_string());
    let _ = writeln!(
        writer,
        "  Strings input: {} ({} existing entries)",
        strings_in, summary.existing_entries
    );
    if let Some(written) = &summary.strings_written {
        let _ = writeln!(writer, "  Strings out:   {}", written.display());
    }
    let _ = writeln!(writer);

    let _ = writeln!(
        writer,
        "  Files scanned: {} ({} changed)",
        summary.files_scanned, summary.files_changed
    );
    let _ = writeln!(
        writer,
        "  Rewritten:     {} literal(s) ({} reused key(s))",
        summary.rewritten(),
        summary.reused
    );
    let _ = writeln!(
        writer,
        "  Skipped:       {} literal(s) (interpolated: {}, format: {})",
        summary.skipped(),
        summary.skipped_interpolated,
        summary.skipped_format
    );
    let _ = writeln!(writer, "  New keys:      {}", summary.additions.len());
    if summary.unreadable_files > 0 {
        let _ = writeln!(
            writer,
            "  {} {} file(s) are not valid UTF-8 and were left alone",
            "warning:".bold().yellow(),
            summary.unreadable_files
        );
    }
    if summary.inaccessible_paths > 0 {
        let _ = writeln!(
            writer,
            "  {} {} path(s) could not be accessed during the scan",
            "warning:".bold().yellow(),
            summary.inaccessible_paths
        );
    }

    print_preview(summary, writer);
    print_outcome(summary, options, writer);
}

fn print_preview<W: Write>(summary: &RunSummary, writer: &mut W) {
    if summary.additions.is_empty() {
        return;
    }

    let quoted: Vec<(String, String)> = summary
        .additions
        .iter()
        .take(MAX_PREVIEW_KEYS)
        .map(|(k, v)| {
            (
                format!("\"{}\"", encode_table(k)),
                format!("\"{}\"", encode_table(v)),
            )
        })
        .collect();
    let key_width = quoted
        .iter()
        .map(|(k, _)| UnicodeWidthStr::width(k.as_str()))
        .max()
        .unwrap_or(0);

    let _ = writeln!(writer);
    let _ = writeln!(writer, "{}", "New keys preview:".bold());
    for (key, value) in &quoted {
        let padding = key_width - UnicodeWidthStr::width(key.as_str());
        let _ = writeln!(
            writer,
            "  {}{:padding$} = {}",
            key.cyan(),
            "",
            value,
            padding = padding
        );
    }

    let remaining = summary.additions.len().saturating_sub(MAX_PREVIEW_KEYS);
    if remaining > 0 {
        let _ = writeln!(writer, "  {}", format!("... and {} more", remaining).dimmed());
    }
}

fn print_outcome<W: Write>(summary: &RunSummary, options: &RewriteOptions, writer: &mut W) {
    let _ = writeln!(writer);
    if summary.rewritten() == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "Nothing to rewrite".green()
        );
    } else if options.dry_run {
        let _ = writeln!(
            writer,
            "{} {} literal(s) in {} file(s).",
            "Would rewrite".yellow().bold(),
            summary.rewritten(),
            summary.files_changed
        );
        let _ = writeln!(
            writer,
            "Run without {} to write these changes.",
            "--dry-run".cyan()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Rewrote {} literal(s) in {} file(s)",
                summary.rewritten(),
                summary.files_changed
            )
            .green()
        );
    }

    if summary.skipped() > 0 && !options.verbose {
        let _ = writeln!(
            writer,
            "{} {} literal(s) left for manual review (use {} for details)",
            FAILURE_MARK.yellow(),
            summary.skipped(),
            "-v".cyan()
        );
    }
}

/// List every skipped literal cargo-style.
fn print_skipped<W: Write>(files: &[FileReport], writer: &mut W) {
    for file in files {
        for occ in file.occurrences.iter().filter(|o| o.outcome.is_skip()) {
            print_skipped_occurrence(&file.path.display().to_string(), occ, writer);
        }
    }
}

fn print_skipped_occurrence<W: Write>(path: &str, occ: &RewriteOccurrence, writer: &mut W) {
    let width = occ.line.to_string().len();

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        "warning".bold().yellow(),
        occ.raw,
        "skipped".dimmed().cyan()
    );
    let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), path, occ.line, occ.col);
    let _ = writeln!(writer, "{:>width$} {}", "", "|".blue(), width = width);
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        occ.line.to_string().blue(),
        "|".blue(),
        occ.source_line,
        width = width
    );

    let prefix: String = occ
        .source_line
        .chars()
        .take(occ.col.saturating_sub(1))
        .collect();
    let caret_padding = UnicodeWidthStr::width(prefix.as_str());
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        "^".yellow(),
        width = width,
        padding = caret_padding
    );
    if let Some(reason) = occ.outcome.skip_reason() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            reason,
            width = width
        );
    }
    let _ = writeln!(writer);
}
