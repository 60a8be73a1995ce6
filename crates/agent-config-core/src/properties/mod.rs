//! Flat key/value properties sources.
//!
//! A [`Properties`] map is parsed from the classic `.properties` text format
//! (see [`grammar`] for the line rules).  Later occurrences of a key replace
//! earlier ones, but iteration keeps the position of the first occurrence so
//! diagnostics list keys in the order an operator wrote them.

use std::borrow::Cow;
use std::collections::HashMap;

use thiserror::Error;

pub mod grammar;

/// Errors produced while parsing a properties source.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PropertiesError {
    /// A `\u` escape was not followed by four hexadecimal digits.
    #[error("malformed \\uXXXX escape on line {line}")]
    MalformedUnicodeEscape { line: usize },
}

/// An ordered, de-duplicated set of key/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Properties {
    /// Parses properties text.
    ///
    /// # Errors
    ///
    /// Returns [`PropertiesError::MalformedUnicodeEscape`] if a key or value
    /// contains a truncated or non-hex `\u` escape.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use agent_config_core::Properties;
    ///
    /// let props = Properties::parse("# agent\nfederateName = Alpha\n").unwrap();
    /// assert_eq!(props.get("federateName"), Some("Alpha"));
    /// ```
    pub fn parse(text: &str) -> Result<Self, PropertiesError> {
        let mut properties = Self::default();
        for entry in grammar::entries(text) {
            let (key, value) = entry?;
            properties.insert(key, value);
        }
        Ok(properties)
    }

    /// Decodes raw bytes and parses them.
    ///
    /// UTF-8 is tried first; bytes that are not valid UTF-8 are read as
    /// ISO-8859-1, the historical encoding of this format.  A leading UTF-8
    /// byte-order mark is dropped.
    ///
    /// # Errors
    ///
    /// Same as [`Properties::parse`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PropertiesError> {
        Self::parse(&decode(bytes))
    }

    /// Inserts or replaces a value.  Returns the previous value, if any.
    pub fn insert(&mut self, key: String, value: String) -> Option<String> {
        match self.index.get(&key) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot].1.as_str())
    }

    /// Returns the value for `key`, or `default` when the key is absent.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the source defined no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, value)` pairs in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn decode(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text.strip_prefix('\u{feff}').unwrap_or(text)),
        // ISO-8859-1 maps every byte to the code point of the same value.
        Err(_) => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
