//! Outline types: the engine's output.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Depth of a heading in the document hierarchy (1 = top level).
///
/// Rendered as `H<n>` in JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HeadingLevel(u32);

impl HeadingLevel {
    /// Top-level heading.
    pub const H1: Self = HeadingLevel(1);

    /// Create a level; `None` for zero.
    pub fn new(level: u32) -> Option<Self> {
        (level >= 1).then_some(HeadingLevel(level))
    }

    /// The numeric level.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.0)
    }
}

impl FromStr for HeadingLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix('H')
            .or_else(|| s.strip_prefix('h'))
            .and_then(|n| n.parse::<u32>().ok())
            .and_then(HeadingLevel::new)
            .ok_or_else(|| Error::Other(format!("Invalid heading level: {}", s)))
    }
}

impl TryFrom<String> for HeadingLevel {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HeadingLevel> for String {
    fn from(level: HeadingLevel) -> Self {
        level.to_string()
    }
}

/// A heading detected in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingCandidate {
    /// Heading level
    pub level: HeadingLevel,
    /// Heading text (numbering prefix removed)
    pub text: String,
    /// Page number (1-based)
    pub page: u32,
}

impl HeadingCandidate {
    /// Create a new heading.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Title plus ordered heading list for one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    /// Document title (empty when the first page has no text)
    pub title: String,

    /// Headings in document order
    #[serde(rename = "outline")]
    pub entries: Vec<HeadingCandidate>,
}

impl Outline {
    /// Create an outline.
    pub fn new(title: impl Into<String>, entries: Vec<HeadingCandidate>) -> Self {
        Self {
            title: title.into(),
            entries,
        }
    }

    /// Number of headings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no headings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Headings at a given level.
    pub fn at_level(&self, level: HeadingLevel) -> impl Iterator<Item = &HeadingCandidate> {
        self.entries.iter().filter(move |e| e.level == level)
    }

    /// Deepest level present, if any.
    pub fn max_depth(&self) -> Option<HeadingLevel> {
        self.entries.iter().map(|e| e.level).max()
    }
}
