//! Running header and footer detection.

use std::collections::{HashMap, HashSet};

use super::config::OutlineConfig;
use super::normalize::NormalizedText;
use crate::model::Line;

/// Line texts that repeat across a large share of a document's pages.
///
/// Computed once per document before classification and read-only after.
#[derive(Debug, Clone, Default)]
pub struct BoilerplateSet {
    keys: HashSet<NormalizedText>,
    fold_digits: bool,
}

impl BoilerplateSet {
    /// Detect boilerplate over all lines of a document, one `Vec` per page.
    ///
    /// A text counts once per page no matter how often it occurs there. It
    /// is boilerplate when it appears on strictly more than
    /// `repetition_fraction` of all pages. Documents shorter than
    /// `min_boilerplate_pages` yield an empty set.
    pub fn detect(pages: &[Vec<Line>], config: &OutlineConfig) -> Self {
        let mut set = Self {
            keys: HashSet::new(),
            fold_digits: config.fold_digits,
        };

        let total_pages = pages.len();
        if total_pages < config.min_boilerplate_pages.max(2) {
            return set;
        }

        let mut page_counts: HashMap<NormalizedText, usize> = HashMap::new();
        for lines in pages {
            let on_page: HashSet<NormalizedText> = lines
                .iter()
                .map(|line| set.key(line.text()))
                .filter(|key| !key.is_empty())
                .collect();
            for key in on_page {
                *page_counts.entry(key).or_insert(0) += 1;
            }
        }

        let threshold = config.repetition_fraction * total_pages as f32;
        set.keys = page_counts
            .into_iter()
            .filter(|(_, count)| *count as f32 > threshold)
            .map(|(key, _)| key)
            .collect();

        log::debug!(
            "Boilerplate: {} repeated line(s) across {} pages",
            set.keys.len(),
            total_pages
        );

        set
    }

    /// Check whether a line is boilerplate.
    pub fn contains(&self, line: &Line) -> bool {
        !self.keys.is_empty() && self.keys.contains(&self.key(line.text()))
    }

    /// Number of boilerplate texts.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if no boilerplate was found.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Boilerplate texts, sorted for stable display.
    pub fn texts(&self) -> Vec<&str> {
        let mut texts: Vec<&str> = self.keys.iter().map(|k| k.as_str()).collect();
        texts.sort_unstable();
        texts
    }

    fn key(&self, text: &str) -> NormalizedText {
        let normalized = NormalizedText::new(text);
        if self.fold_digits {
            normalized.fold_digits()
        } else {
            normalized
        }
    }
}
