//! Translation table store.
//!
//! Reads `"key" = "value";` resource files into lookup indices and appends
//! newly minted entries. Existing lines are never rewritten or reordered.

use std::{
    collections::{BTreeMap, HashMap},
    fs::{self, OpenOptions},
    io::Write,
    path::Path,
    sync::LazyLock,
};

use anyhow::{Context, Result};
use regex::Regex;

use super::escape::{decode_table, encode_table};

/// Matches one `"key" = "value";` line. Both spans use the table dialect.
static ENTRY_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*"((?:[^"\\]|\\.)+)"\s*=\s*"((?:[^"\\]|\\.)+)"\s*;\s*$"#).unwrap()
});

/// Newly minted entries for one run, key to logical value.
///
/// Ordered by key so persisted output is deterministic.
pub type PendingAdditions = BTreeMap<String, String>;

/// Parsed contents of an existing translation table.
#[derive(Debug, Default, Clone)]
pub struct TranslationTable {
    /// Key to value; a repeated key keeps its last value.
    pub key_to_val: HashMap<String, String>,
    /// Value to key; a repeated value keeps its first key.
    pub val_to_key: HashMap<String, String>,
}

impl TranslationTable {
    /// Load a table from disk.
    ///
    /// A missing path (or no path at all) yields an empty table.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read strings file: {}", path.display()))?;
        Ok(Self::parse(&content))
    }

    /// Parse table text. Lines that are not entries are ignored.
    pub fn parse(content: &str) -> Self {
        let mut table = Self::default();

        for line in content.lines() {
            let Some(caps) = ENTRY_LINE_REGEX.captures(line) else {
                continue;
            };
            let key = decode_table(&caps[1]);
            let value = decode_table(&caps[2]);

            table
                .val_to_key
                .entry(value.clone())
                .or_insert_with(|| key.clone());
            table.key_to_val.insert(key, value);
        }

        table
    }

    pub fn len(&self) -> usize {
        self.key_to_val.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key_to_val.is_empty()
    }
}

/// Format one table line, without the trailing newline.
pub fn format_entry(key: &str, value: &str) -> String {
    format!("\"{}\" = \"{}\";", encode_table(key), encode_table(value))
}

/// Append pending additions to the table at `path`.
///
/// Does nothing when there is nothing to add. When the file already has
/// content, exactly one blank line separates it from the new entries.
/// Returns the number of entries written.
pub fn persist(path: &Path, additions: &PendingAdditions) -> Result<usize> {
    if additions.is_empty() {
        return Ok(0);
    }

    let existing = if path.exists() {
        fs::read(path).with_context(|| format!("Failed to read strings file: {}", path.display()))?
    } else {
        Vec::new()
    };

    let mut out = String::new();
    if !existing.is_empty() {
        if !existing.ends_with(b"\n") {
            out.push('\n');
        }
        out.push('\n');
    }
    for (key, value) in additions {
        out.push_str(&format_entry(key, value));
        out.push('\n');
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open strings file: {}", path.display()))?;
    file.write_all(out.as_bytes())
        .with_context(|| format!("Failed to write strings file: {}", path.display()))?;

    Ok(additions.len())
}
