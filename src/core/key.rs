//! Key derivation: turning natural-language text into dotted lookup keys.

use std::collections::HashSet;

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Key used when nothing usable survives slugification.
pub const FALLBACK_KEY: &str = "text";

/// Maximum length of a slugified key, in characters.
pub const MAX_KEY_LEN: usize = 60;

const SEPARATOR: char = '.';

/// Derive a lowercase, dot-separated key from arbitrary text.
///
/// Text is lowercased and decomposed (NFKD) so accented letters fall back to
/// their base letter. ASCII letters and digits are kept, runs of whitespace
/// and punctuation collapse into a single `.`, and letters from other scripts
/// (which have no ASCII base) are dropped. The result is capped at
/// [`MAX_KEY_LEN`] characters and falls back to [`FALLBACK_KEY`] when empty.
///
/// # Examples
///
/// ```
/// use lokey::core::key::slugify;
///
/// assert_eq!(slugify("Example Text!"), "example.text");
/// assert_eq!(slugify("Café au lait"), "cafe.au.lait");
/// assert_eq!(slugify(""), "text");
/// assert_eq!(slugify("你好"), "text");
/// ```
pub fn slugify(text: &str) -> String {
    let mut key = String::with_capacity(text.len());
    let mut prev_separator = false;

    for ch in text.trim().to_lowercase().nfkd() {
        if ch.is_ascii_alphanumeric() {
            key.push(ch.to_ascii_lowercase());
            prev_separator = false;
        } else if ch.is_alphanumeric() || is_combining_mark(ch) {
            continue;
        } else if !prev_separator {
            key.push(SEPARATOR);
            prev_separator = true;
        }
    }

    let mut key = key.trim_matches(SEPARATOR).to_string();
    if key.is_empty() {
        return FALLBACK_KEY.to_string();
    }

    // Only ASCII survives above, so byte length equals char length.
    if key.len() > MAX_KEY_LEN {
        key.truncate(MAX_KEY_LEN);
        key = key.trim_matches(SEPARATOR).to_string();
    }

    key
}

/// Return `base` if unused, otherwise the first free `base.N` for `N >= 2`.
///
/// The set is not modified; callers insert the returned key themselves.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use lokey::core::key::uniquify;
///
/// let mut keys = HashSet::new();
/// assert_eq!(uniquify("greeting", &keys), "greeting");
///
/// keys.insert("greeting".to_string());
/// assert_eq!(uniquify("greeting", &keys), "greeting.2");
/// ```
pub fn uniquify(base: &str, existing_keys: &HashSet<String>) -> String {
    if !existing_keys.contains(base) {
        return base.to_string();
    }

    let mut n = 2;
    loop {
        let candidate = format!("{}{}{}", base, SEPARATOR, n);
        if !existing_keys.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
