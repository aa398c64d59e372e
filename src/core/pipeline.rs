//! Run orchestration.
//!
//! One run is strictly sequential:
//!
//! 1. Load the input table and build the shared [`RewriteContext`]
//! 2. Copy the source tree to the output tree (skipped in dry-run)
//! 3. Rewrite each selected file in sorted order, writing changed files
//! 4. Append all pending additions to the output table once

use std::{
    fs::{self, OpenOptions},
    path::{Component, Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use colored::Colorize;

use super::{
    context::{KeySource, RewriteContext},
    file_scanner::{copy_tree, scan_files},
    rewrite::{LiteralOutcome, RewriteOccurrence, Rewriter},
    table::{PendingAdditions, TranslationTable, persist},
};
use crate::config::Config;

/// Inputs for one run, after CLI and config have been merged.
#[derive(Debug, Clone)]
pub struct RewriteOptions {
    pub src: PathBuf,
    pub out: Option<PathBuf>,
    pub strings_in: Option<PathBuf>,
    pub write_strings: bool,
    pub strings_out: PathBuf,
    pub dry_run: bool,
    pub verbose: bool,
}

/// Occurrences found in one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    /// Path relative to the source root.
    pub path: PathBuf,
    pub occurrences: Vec<RewriteOccurrence>,
}

/// Everything a run did, for reporting.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub files_scanned: usize,
    pub files_changed: usize,
    /// Literals replaced with a newly minted key.
    pub minted: usize,
    /// Literals replaced with a key that already existed.
    pub reused: usize,
    pub skipped_interpolated: usize,
    pub skipped_format: usize,
    /// Files left alone because they are not valid UTF-8.
    pub unreadable_files: usize,
    /// Directory entries the walk could not access.
    pub inaccessible_paths: usize,
    pub existing_entries: usize,
    pub additions: PendingAdditions,
    /// Where the table was written, if it was.
    pub strings_written: Option<PathBuf>,
    pub files: Vec<FileReport>,
}

impl RunSummary {
    pub fn rewritten(&self) -> usize {
        self.minted + self.reused
    }

    pub fn skipped(&self) -> usize {
        self.skipped_interpolated + self.skipped_format
    }

    fn tally(&mut self, occurrences: &[RewriteOccurrence]) {
        for occ in occurrences {
            match &occ.outcome {
                LiteralOutcome::Rewrite {
                    source: KeySource::Minted,
                    ..
                } => self.minted += 1,
                LiteralOutcome::Rewrite { .. } => self.reused += 1,
                LiteralOutcome::SkipInterpolated => self.skipped_interpolated += 1,
                LiteralOutcome::SkipFormat { .. } => self.skipped_format += 1,
            }
        }
    }
}

/// Absolute form of `path` with symlinks and `..` resolved.
///
/// The longest existing prefix is canonicalized; components below it do not
/// exist yet and are resolved lexically.
fn resolve_path(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)
        .with_context(|| format!("Invalid path: {}", path.display()))?;

    let mut resolved = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => continue,
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other),
        }
        if let Ok(canonical) = fs::canonicalize(&resolved) {
            resolved = canonical;
        }
    }
    Ok(resolved)
}

/// Reject output trees that overlap the source tree.
fn check_output_dir(src: &Path, out: &Path) -> Result<()> {
    let src = resolve_path(src)?;
    let out = resolve_path(out)?;

    if out.starts_with(&src) || src.starts_with(&out) {
        bail!(
            "Output directory {} must not overlap source directory {}",
            out.display(),
            src.display()
        );
    }
    Ok(())
}

/// Run the whole rewrite over `options.src`.
pub fn run(config: &Config, options: &RewriteOptions) -> Result<RunSummary> {
    let src = &options.src;
    if !src.is_dir() {
        bail!("Source directory does not exist: {}", src.display());
    }

    let out = match (&options.out, options.dry_run) {
        (Some(out), _) => {
            check_output_dir(src, out)?;
            Some(out.as_path())
        }
        (None, true) => None,
        (None, false) => bail!("--out is required unless --dry-run is given"),
    };

    if let Some(strings_in) = &options.strings_in
        && !strings_in.exists()
        && options.verbose
    {
        eprintln!(
            "{} Strings file not found, starting from an empty table: {}",
            "warning:".bold().yellow(),
            strings_in.display()
        );
    }

    // Read before the output tree is replaced, the input table may live in it.
    let seed = match &options.strings_in {
        Some(path) if options.write_strings && path.is_file() => Some(
            fs::read(path)
                .with_context(|| format!("Failed to read strings file: {}", path.display()))?,
        ),
        _ => None,
    };
    let table = TranslationTable::load(options.strings_in.as_deref())?;
    let mut summary = RunSummary {
        existing_entries: table.len(),
        ..Default::default()
    };
    let mut ctx = RewriteContext::new(table, config.unify_new_values);
    let rewriter = Rewriter::new(
        &config.call_name,
        &config.marker,
        &config.format_placeholders,
    )?;

    let write_root = if options.dry_run { None } else { out };
    if let Some(out) = write_root {
        copy_tree(src, out)?;
    }

    let scan = scan_files(src, &config.extensions, &config.ignores, options.verbose);
    summary.files_scanned = scan.files.len();
    summary.inaccessible_paths = scan.skipped_count;

    for path in &scan.files {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
        let Ok(content) = String::from_utf8(bytes) else {
            summary.unreadable_files += 1;
            if options.verbose {
                eprintln!(
                    "{} Skipping file that is not valid UTF-8: {}",
                    "warning:".bold().yellow(),
                    path.display()
                );
            }
            continue;
        };

        if !rewriter.has_candidates(&content) {
            continue;
        }

        ctx.begin_file();
        let result = rewriter.rewrite(&content, &mut ctx);
        let rel = path.strip_prefix(src).unwrap_or(path).to_path_buf();

        if result.content != content {
            summary.files_changed += 1;
            if let Some(out) = write_root {
                write_file(&out.join(&rel), &result.content)?;
            }
        }

        summary.tally(&result.occurrences);
        summary.files.push(FileReport {
            path: rel,
            occurrences: result.occurrences,
        });
    }

    if options.write_strings
        && let Some(out) = write_root
    {
        let target = out.join(&options.strings_out);
        prepare_strings_file(seed.as_deref(), &target)?;
        persist(&target, &ctx.pending)?;
        summary.strings_written = Some(target);
    }

    summary.additions = ctx.pending;
    Ok(summary)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Seed the output table with the input table bytes, or make sure it exists.
fn prepare_strings_file(seed: Option<&[u8]>, target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    match seed {
        Some(bytes) => {
            fs::write(target, bytes)
                .with_context(|| format!("Failed to write file: {}", target.display()))?;
        }
        None => {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(target)
                .with_context(|| format!("Failed to create file: {}", target.display()))?;
        }
    }
    Ok(())
}
