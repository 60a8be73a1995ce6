//! Line grammar of the `.properties` format.
//!
//! ```text
//! # comment            ! also a comment
//! key=value            key: value            key value
//! multi = first, \
//!         second       (continuation, leading blanks dropped)
//! path = C:\\agents\\fom
//! name = caf\u00e9
//! ```
//!
//! Rules:
//! - Natural lines end with `\n`, `\r`, or `\r\n`.
//! - Leading blanks (space, tab, form feed) are ignored.  Blank lines and
//!   lines starting with `#` or `!` are comments.
//! - A line ending in an odd number of backslashes continues on the next
//!   natural line.
//! - The key ends at the first unescaped `=`, `:`, or blank.  Blanks around
//!   the separator are skipped, and at most one `=`/`:` is consumed.
//! - Escapes: `\t`, `\n`, `\r`, `\f`, `\uXXXX`; any other `\c` yields `c`.

use crate::properties::PropertiesError;

/// Parses every entry in `text`, in source order.
pub fn entries(text: &str) -> Entries<'_> {
    Entries {
        lines: NaturalLines { rest: text },
        line_no: 0,
    }
}

/// Iterator over the `(key, value)` entries of a properties text.
pub struct Entries<'a> {
    lines: NaturalLines<'a>,
    line_no: usize,
}

impl Iterator for Entries<'_> {
    type Item = Result<(String, String), PropertiesError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.line_no += 1;
            let start_line = self.line_no;

            let trimmed = trim_blanks(line);
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }

            let mut logical = trimmed.to_string();
            while ends_with_continuation(&logical) {
                logical.pop();
                match self.lines.next() {
                    Some(next) => {
                        self.line_no += 1;
                        logical.push_str(trim_blanks(next));
                    }
                    None => break,
                }
            }

            return Some(split_entry(&logical, start_line));
        }
    }
}

struct NaturalLines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for NaturalLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        match self.rest.find(['\r', '\n']) {
            Some(pos) => {
                let line = &self.rest[..pos];
                let skip = if self.rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                self.rest = &self.rest[pos + skip..];
                Some(line)
            }
            None => {
                let line = self.rest;
                self.rest = "";
                Some(line)
            }
        }
    }
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

fn trim_blanks(s: &str) -> &str {
    s.trim_start_matches(is_blank)
}

fn ends_with_continuation(s: &str) -> bool {
    s.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn split_entry(line: &str, line_no: usize) -> Result<(String, String), PropertiesError> {
    let mut key_end = line.len();
    let mut value_start = line.len();
    let mut has_separator = false;
    let mut preceding_backslash = false;

    for (i, c) in line.char_indices() {
        if !preceding_backslash && (c == '=' || c == ':') {
            key_end = i;
            value_start = i + 1;
            has_separator = true;
            break;
        }
        if !preceding_backslash && is_blank(c) {
            key_end = i;
            value_start = i + c.len_utf8();
            break;
        }
        preceding_backslash = c == '\\' && !preceding_backslash;
    }

    let mut value = trim_blanks(&line[value_start..]);
    if !has_separator {
        if let Some(after) = value.strip_prefix(['=', ':']) {
            value = trim_blanks(after);
        }
    }

    let key = unescape(&line[..key_end], line_no)?;
    let value = unescape(value, line_no)?;
    Ok((key, value))
}

/// Resolves escape sequences.  `\u` escapes are UTF-16 code units, so
/// surrogate pairs written as two escapes combine into one character.
fn unescape(raw: &str, line_no: usize) -> Result<String, PropertiesError> {
    if !raw.contains('\\') {
        return Ok(raw.to_string());
    }

    let mut units: Vec<u16> = Vec::with_capacity(raw.len());
    let mut buf = [0u16; 2];
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        let decoded = if c == '\\' {
            match chars.next() {
                Some('u') => {
                    let mut code: u16 = 0;
                    for _ in 0..4 {
                        let digit = chars
                            .next()
                            .and_then(|h| h.to_digit(16))
                            .ok_or(PropertiesError::MalformedUnicodeEscape { line: line_no })?;
                        code = (code << 4) | digit as u16;
                    }
                    units.push(code);
                    continue;
                }
                Some('t') => '\t',
                Some('n') => '\n',
                Some('r') => '\r',
                Some('f') => '\x0c',
                Some(other) => other,
                // A dangling backslash at the very end is dropped.
                None => break,
            }
        } else {
            c
        };
        units.extend_from_slice(decoded.encode_utf16(&mut buf));
    }

    Ok(String::from_utf16_lossy(&units))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
