//! Core rewrite engine.
//!
//! Data flows one way through a run:
//!
//! ```text
//! table (existing entries)
//!     ↓
//! rewrite (per file, consulting and extending the shared context)
//!     ↓
//! pipeline (aggregates pending additions)
//!     ↓
//! table (append new entries once)
//! ```

pub mod context;
pub mod escape;
pub mod file_scanner;
pub mod key;
pub mod pipeline;
pub mod rewrite;
pub mod table;

pub use context::{KeySource, RewriteContext};
pub use rewrite::{FileRewrite, LiteralOutcome, RewriteOccurrence, Rewriter};
pub use table::{PendingAdditions, TranslationTable};
