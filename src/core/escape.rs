//! Escaping dialects for string literals.
//!
//! Two dialects are handled here:
//!
//! - **Source literals**: the raw text between the quotes of a source string
//!   literal. Decoding understands the usual backslash escapes.
//! - **Table literals**: the quoted spans of a `"key" = "value";` line. Only
//!   backslash and double quote are escaped.
//!
//! The two are not inverses of each other: a value decoded from source is
//! re-encoded with the table dialect when it is persisted.

/// Decode the raw text of a source string literal into its logical value.
///
/// Recognized escapes: `\\`, `\"`, `\'`, `\n`, `\t`, `\r`, `\0` and `\u{XXXX}`.
/// Any other escape (including the interpolation opener `\(`) is kept
/// verbatim, backslash included.
///
/// # Examples
///
/// ```
/// use lokey::core::escape::decode_source;
///
/// assert_eq!(decode_source(r#"Say \"hi\""#), r#"Say "hi""#);
/// assert_eq!(decode_source(r"a\nb"), "a\nb");
/// assert_eq!(decode_source(r"\u{e9}t\u{e9}"), "été");
/// assert_eq!(decode_source(r"Hi \(name)"), r"Hi \(name)");
/// ```
pub fn decode_source(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('u') => match decode_unicode_scalar(chars.as_str()) {
                Some((ch, consumed)) => {
                    out.push(ch);
                    chars.nth(consumed - 1);
                }
                None => out.push_str("\\u"),
            },
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

/// Parse `{XXXX}` at the start of `rest`, returning the char and the number
/// of chars consumed (braces included).
fn decode_unicode_scalar(rest: &str) -> Option<(char, usize)> {
    let body = rest.strip_prefix('{')?;
    let close = body.find('}')?;
    let hex = &body[..close];
    if hex.is_empty() || hex.len() > 8 {
        return None;
    }
    let code = u32::from_str_radix(hex, 16).ok()?;
    let ch = char::from_u32(code)?;
    Some((ch, hex.chars().count() + 2))
}

/// Whether the raw source literal contains an interpolation segment `\(`.
///
/// Escaped backslashes are honoured, so `\\(` is a literal backslash followed
/// by a parenthesis and does not count.
pub fn has_interpolation(raw: &str) -> bool {
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('(') => return true,
                Some(_) | None => {}
            }
        }
    }
    false
}

/// Encode a logical value for a source string literal.
///
/// Only what is needed to keep the literal well-formed is escaped.
pub fn encode_source(logical: &str) -> String {
    let mut out = String::with_capacity(logical.len());
    for c in logical.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape backslashes and double quotes for the translation table.
///
/// # Examples
///
/// ```
/// use lokey::core::escape::encode_table;
///
/// assert_eq!(encode_table(r#"Say "hi""#), r#"Say \"hi\""#);
/// assert_eq!(encode_table(r"C:\tmp"), r"C:\\tmp");
/// ```
pub fn encode_table(logical: &str) -> String {
    logical.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Reverse of [`encode_table`]: unescape `\\` and `\"`, keep everything else.
pub fn decode_table(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some('\\') | Some('"') => {
                    if let Some(next) = chars.next() {
                        out.push(next);
                    }
                    continue;
                }
                _ => {}
            }
        }
        out.push(c);
    }
    out
}
