//! Free-form string tags and the token-subset match rule.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A normalised set of tag tokens.
///
/// Tags are written as whitespace separated strings (`"inner left muscle"`) and
/// stored as an ordered token set, so `"left inner muscle"` is the same tag.
/// A query matches when all of its tokens are present in the target set.
///
/// Deserialization accepts a list of strings and splits each on whitespace.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<String>")]
pub struct Tags(BTreeSet<String>);

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a whitespace separated tag string.
    pub fn parse(tags: &str) -> Self {
        Self(tags.split_whitespace().map(str::to_owned).collect())
    }

    /// Adds every token of `tags` to this set.
    pub fn add(&mut self, tags: &str) {
        self.0.extend(tags.split_whitespace().map(str::to_owned));
    }

    /// Merges another tag set into this one.
    pub fn extend(&mut self, other: &Tags) {
        self.0.extend(other.0.iter().cloned());
    }

    /// Returns `true` when every token of `query` is present here.
    ///
    /// The empty query is contained in every set.
    pub fn contains(&self, query: &Tags) -> bool {
        query.0.is_subset(&self.0)
    }

    /// String form of [`contains`](Self::contains).
    pub fn matches(&self, query: &str) -> bool {
        query.split_whitespace().all(|token| self.0.contains(token))
    }

    /// Returns `true` if the set holds the single token `token`.
    pub fn has(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for token in &self.0 {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(token)?;
            first = false;
        }
        Ok(())
    }
}

impl From<&str> for Tags {
    fn from(tags: &str) -> Self {
        Self::parse(tags)
    }
}

impl From<String> for Tags {
    fn from(tags: String) -> Self {
        Self::parse(&tags)
    }
}

impl From<Vec<String>> for Tags {
    fn from(entries: Vec<String>) -> Self {
        let mut tags = Self::new();
        for entry in &entries {
            tags.add(entry);
        }
        tags
    }
}

impl From<&String> for Tags {
    fn from(tags: &String) -> Self {
        Self::parse(tags)
    }
}

/// Anything that carries a tag set and can be filtered by a tag query.
pub trait Tagged {
    fn tags(&self) -> &Tags;

    fn matches(&self, query: &Tags) -> bool {
        self.tags().contains(query)
    }
}
