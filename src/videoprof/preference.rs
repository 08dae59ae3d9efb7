//! # Preferences
//!
//! A [`Preference`] is a named bucket that attribute values resolve into. It
//! pairs a matching rule with a [`Level`] that decides how the bucket is
//! displayed and whether files landing in it are flagged.
//!
//! ## Matching
//!
//! Patterns made only of alphanumeric characters are compared for exact
//! equality. Anything else is a regular expression anchored at the **start**
//! of the value but not at its end, so `ab.` matches `abc` and also `abcd`.
//! Configurations relying on full-string matches must add `$` themselves.
//!
//! Preferences created from an observed value ([`Preference::literal`]) only
//! ever match that exact value.
//!
//! ## Identity
//!
//! Two preferences are the same bucket when their titles are equal, whatever
//! their pattern or level. Counting and deduplication rely on this, so
//! `PartialEq` and `Hash` only look at the title.

use crate::error::Result;
use crate::level::Level;
use regex::Regex;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone)]
enum Matcher {
    Exact,
    Prefix(Regex),
    /// Created from an observed value: equal to that value and nothing else.
    Literal(String),
}

#[derive(Debug, Clone)]
pub struct Preference {
    title: String,
    pattern: String,
    level: Level,
    matcher: Matcher,
}

impl Preference {
    pub fn new(title: impl Into<String>, pattern: impl Into<String>, level: Level) -> Result<Self> {
        let pattern = pattern.into();
        let matcher = if is_alphanumeric(&pattern) {
            Matcher::Exact
        } else {
            Matcher::Prefix(Regex::new(&format!("^(?:{})", pattern))?)
        };

        Ok(Self {
            title: title.into(),
            pattern,
            level,
            matcher,
        })
    }

    /// A preference matching only `value` itself. The stored pattern is the
    /// escaped value, but matching is a full comparison, so a longer value
    /// starting with this one is not absorbed.
    pub fn literal(title: impl Into<String>, value: &str, level: Level) -> Self {
        Self {
            title: title.into(),
            pattern: regex::escape(value),
            level,
            matcher: Matcher::Literal(value.to_string()),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn matches(&self, value: &str) -> bool {
        match &self.matcher {
            Matcher::Exact => value == self.pattern,
            Matcher::Prefix(regex) => regex.is_match(value),
            Matcher::Literal(literal) => value == literal,
        }
    }

    pub fn is_flagged(&self) -> bool {
        self.level.is_flagged()
    }

    pub fn render(&self, input: &str) -> String {
        self.level.render(input)
    }
}

impl PartialEq for Preference {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
    }
}

impl Eq for Preference {}

impl Hash for Preference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.title.hash(state);
    }
}

// Mirrors Python's str.isalnum: non-empty and every char alphanumeric.
fn is_alphanumeric(pattern: &str) -> bool {
    !pattern.is_empty() && pattern.chars().all(char::is_alphanumeric)
}
