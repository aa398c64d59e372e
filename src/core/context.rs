use std::collections::{HashMap, HashSet};

use super::{
    key::{slugify, uniquify},
    table::{PendingAdditions, TranslationTable},
};

/// Where a key assigned to a literal came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// The value was already in the input table.
    Table,
    /// The value was minted earlier in this run.
    Run,
    /// A new key was minted for this occurrence.
    Minted,
}

/// Run-global state shared by every file processed in one run.
///
/// Created once from the input table and threaded by `&mut` through each
/// file's rewrite. Processing is sequential, so every mutation is visible to
/// all later occurrences.
#[derive(Debug)]
pub struct RewriteContext {
    /// Keys in use: every table key plus every key minted so far.
    pub existing_keys: HashSet<String>,

    /// Value to key from the input table. Read-only during a run.
    pub val_to_key: HashMap<String, String>,

    /// Value to key for values minted in the current file, or in the whole
    /// run when `unify_new_values` is set.
    pub minted: HashMap<String, String>,

    /// New entries to append to the table at the end of the run.
    pub pending: PendingAdditions,

    /// Reuse keys minted in earlier files for repeated new values.
    pub unify_new_values: bool,
}

impl RewriteContext {
    pub fn new(table: TranslationTable, unify_new_values: bool) -> Self {
        let TranslationTable {
            key_to_val,
            val_to_key,
        } = table;

        Self {
            existing_keys: key_to_val.into_keys().collect(),
            val_to_key,
            minted: HashMap::new(),
            pending: PendingAdditions::new(),
            unify_new_values,
        }
    }

    /// Start a new file. Minted values stop being reused unless the run
    /// unifies new values across files.
    pub fn begin_file(&mut self) {
        if !self.unify_new_values {
            self.minted.clear();
        }
    }

    /// Resolve the key for a logical value, minting one if needed.
    pub fn key_for(&mut self, value: &str) -> (String, KeySource) {
        if let Some(key) = self.val_to_key.get(value) {
            return (key.clone(), KeySource::Table);
        }
        if let Some(key) = self.minted.get(value) {
            return (key.clone(), KeySource::Run);
        }

        let key = uniquify(&slugify(value), &self.existing_keys);
        self.existing_keys.insert(key.clone());
        self.pending
            .entry(key.clone())
            .or_insert_with(|| value.to_string());
        self.minted
            .entry(value.to_string())
            .or_insert_with(|| key.clone());

        (key, KeySource::Minted)
    }
}
