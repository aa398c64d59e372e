//! Lokey - move hard-coded UI strings into a localization table
//!
//! Lokey scans a source tree for `Text("literal")` calls, replaces each
//! literal with a reference to a localization key (`Text("key".localized)`)
//! and appends the newly minted key/value pairs to a `Localizable.strings`
//! table, reusing keys for values the table already knows.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands, report, exit status)
//! - `config`: Configuration file loading and parsing
//! - `core`: Escaping, key derivation, table store, rewrite engine and run pipeline

pub mod cli;
pub mod config;
pub mod core;
