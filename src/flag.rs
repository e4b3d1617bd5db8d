//! Repeatable string flags
//!
//! [`StringSlice`] collects every occurrence of a flag such as
//! `-c a.json -c b.env` into an ordered list, which can be passed straight to
//! [`crate::load`].

use std::fmt;
use std::ops::Deref;

/// Ordered, append-only list of flag values. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringSlice(Vec<String>);

impl StringSlice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one occurrence of the flag. Never fails.
    pub fn set(&mut self, value: impl Into<String>) {
        self.0.push(value.into());
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

/// Comma-joined in insertion order, no spaces.
impl fmt::Display for StringSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

impl Deref for StringSlice {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for StringSlice {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

impl FromIterator<String> for StringSlice {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<String> for StringSlice {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for StringSlice {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a StringSlice {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
