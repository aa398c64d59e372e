//! Literal rewrite engine.
//!
//! Finds `CALL("literal")` constructs by lexical matching and replaces each
//! one with `CALL("key".marker)`. Matching is lexical, not a parse: only the
//! single-literal call shape is recognized, and literals that cannot be
//! externalized as flat strings are left untouched.

use anyhow::{Context, Result};
use regex::Regex;

use super::{
    context::{KeySource, RewriteContext},
    escape::{decode_source, encode_source, has_interpolation},
};

/// Outcome for one matched literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralOutcome {
    /// Replaced with a reference to `key`.
    Rewrite { key: String, source: KeySource },
    /// Left as-is: the literal interpolates an expression.
    SkipInterpolated,
    /// Left as-is: the literal contains a format placeholder.
    SkipFormat { placeholder: String },
}

impl LiteralOutcome {
    pub fn is_skip(&self) -> bool {
        !matches!(self, LiteralOutcome::Rewrite { .. })
    }

    /// Human-readable reason for a skip, `None` for rewrites.
    pub fn skip_reason(&self) -> Option<String> {
        match self {
            LiteralOutcome::Rewrite { .. } => None,
            LiteralOutcome::SkipInterpolated => {
                Some("literal interpolates an expression".to_string())
            }
            LiteralOutcome::SkipFormat { placeholder } => Some(format!(
                "literal contains format placeholder \"{}\"",
                placeholder
            )),
        }
    }
}

/// A single matched literal and what was done with it.
#[derive(Debug, Clone)]
pub struct RewriteOccurrence {
    /// Literal text as found between the quotes.
    pub raw: String,
    /// Decoded logical value.
    pub value: String,
    /// 1-based line of the call.
    pub line: usize,
    /// 1-based column (in chars) of the call.
    pub col: usize,
    /// The full source line containing the call.
    pub source_line: String,
    pub outcome: LiteralOutcome,
}

/// Result of rewriting one file's text.
#[derive(Debug, Clone, Default)]
pub struct FileRewrite {
    pub content: String,
    pub occurrences: Vec<RewriteOccurrence>,
}

impl FileRewrite {
    pub fn rewritten_count(&self) -> usize {
        self.occurrences
            .iter()
            .filter(|o| !o.outcome.is_skip())
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.occurrences
            .iter()
            .filter(|o| o.outcome.is_skip())
            .count()
    }
}

/// Compiled matcher and skip rules for one run.
#[derive(Debug, Clone)]
pub struct Rewriter {
    regex: Regex,
    call_name: String,
    marker_suffix: String,
    placeholders: Vec<String>,
}

impl Rewriter {
    /// Build a rewriter for `call_name("...")` with the `.marker` suffix.
    pub fn new(call_name: &str, marker: &str, placeholders: &[String]) -> Result<Self> {
        let pattern = format!(
            r#"\b{}\(\s*"((?:[^"\\]|\\.)+)"\s*\)"#,
            regex::escape(call_name)
        );
        let regex = Regex::new(&pattern)
            .with_context(|| format!("Invalid call name: \"{}\"", call_name))?;

        Ok(Self {
            regex,
            call_name: call_name.to_string(),
            marker_suffix: format!(".{}", marker),
            placeholders: placeholders.to_vec(),
        })
    }

    /// Whether `source` contains at least one candidate call.
    pub fn has_candidates(&self, source: &str) -> bool {
        self.regex
            .find_iter(source)
            .any(|m| !self.already_localized(source, m.end()))
    }

    /// Decide what to do with a raw literal without touching any state.
    pub fn classify(&self, raw: &str, value: &str) -> Option<LiteralOutcome> {
        if has_interpolation(raw) {
            return Some(LiteralOutcome::SkipInterpolated);
        }
        self.placeholders
            .iter()
            .find(|p| value.contains(p.as_str()))
            .map(|p| LiteralOutcome::SkipFormat {
                placeholder: p.clone(),
            })
    }

    /// Rewrite every candidate call in `source`, left to right.
    ///
    /// Keys assigned to earlier occurrences are recorded in `ctx` before the
    /// next occurrence is looked at.
    pub fn rewrite(&self, source: &str, ctx: &mut RewriteContext) -> FileRewrite {
        let line_index = build_line_index(source);
        let mut content = String::with_capacity(source.len());
        let mut occurrences = Vec::new();
        let mut last_end = 0;

        for caps in self.regex.captures_iter(source) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if self.already_localized(source, whole.end()) {
                continue;
            }

            let raw = &caps[1];
            let value = decode_source(raw);
            let outcome = match self.classify(raw, &value) {
                Some(skip) => skip,
                None => {
                    let (key, key_source) = ctx.key_for(&value);
                    content.push_str(&source[last_end..whole.start()]);
                    content.push_str(&format!(
                        "{}(\"{}\"{})",
                        self.call_name,
                        encode_source(&key),
                        self.marker_suffix
                    ));
                    last_end = whole.end();
                    LiteralOutcome::Rewrite {
                        key,
                        source: key_source,
                    }
                }
            };

            let (line, col) = offset_to_line_col(source, &line_index, whole.start());
            occurrences.push(RewriteOccurrence {
                raw: raw.to_string(),
                value,
                line,
                col,
                source_line: line_text(source, &line_index, line).to_string(),
                outcome,
            });
        }

        content.push_str(&source[last_end..]);
        FileRewrite {
            content,
            occurrences,
        }
    }

    fn already_localized(&self, source: &str, end: usize) -> bool {
        source[end..].trim_start().starts_with(&self.marker_suffix)
    }
}

/// Byte offsets where each line starts.
fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// 1-based line and char column for a byte offset.
fn offset_to_line_col(content: &str, line_index: &[usize], offset: usize) -> (usize, usize) {
    let line = match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    };
    let line_start = line_index[line - 1];
    let col = content[line_start..offset].chars().count() + 1;
    (line, col)
}

fn line_text<'a>(content: &'a str, line_index: &[usize], line: usize) -> &'a str {
    let start = line_index[line - 1];
    let end = line_index
        .get(line)
        .map(|next| next - 1)
        .unwrap_or(content.len());
    content[start..end].trim_end_matches('\r')
}
