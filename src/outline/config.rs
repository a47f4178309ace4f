//! Tunable thresholds for outline inference.

use crate::model::DEFAULT_LINE_OVERLAP_RATIO;

/// Fraction of pages a line must appear on (strictly more than) to count as
/// a running header or footer.
pub const DEFAULT_REPETITION_FRACTION: f32 = 0.5;

/// Minimum page count before boilerplate filtering activates.
pub const DEFAULT_MIN_BOILERPLATE_PAGES: usize = 3;

/// How much larger than body text (as a fraction) an unnumbered line must be
/// to count as a heading.
pub const DEFAULT_SIZE_MARGIN: f32 = 0.2;

/// Unnumbered headings must have fewer words than this.
pub const DEFAULT_MAX_HEADING_WORDS: usize = 5;

/// Options for outline inference.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineConfig {
    /// Repetition threshold for boilerplate, as a fraction of total pages
    pub repetition_fraction: f32,

    /// Minimum number of pages before boilerplate detection runs
    pub min_boilerplate_pages: usize,

    /// Replace digit runs with `#` when comparing lines for repetition,
    /// so "Page 1" and "Page 2" footers count as the same line
    pub fold_digits: bool,

    /// Font size margin over body text for unnumbered headings
    pub size_margin: f32,

    /// Word count limit (exclusive) for unnumbered headings
    pub max_heading_words: usize,

    /// When set, numbered headings must be larger than body size times
    /// this ratio
    pub numbered_min_size_ratio: Option<f32>,

    /// Drop first-page headings that repeat the title
    pub skip_title_echo: bool,

    /// Vertical overlap ratio for grouping fragments into lines
    pub line_overlap_ratio: f32,
}

impl OutlineConfig {
    /// Create a config with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the boilerplate repetition fraction.
    pub fn with_repetition_fraction(mut self, fraction: f32) -> Self {
        self.repetition_fraction = fraction;
        self
    }

    /// Set the minimum page count for boilerplate detection.
    pub fn with_min_boilerplate_pages(mut self, pages: usize) -> Self {
        self.min_boilerplate_pages = pages;
        self
    }

    /// Enable or disable digit folding for boilerplate detection.
    pub fn with_fold_digits(mut self, fold: bool) -> Self {
        self.fold_digits = fold;
        self
    }

    /// Set the font size margin for unnumbered headings.
    pub fn with_size_margin(mut self, margin: f32) -> Self {
        self.size_margin = margin;
        self
    }

    /// Set the word count limit for unnumbered headings.
    pub fn with_max_heading_words(mut self, words: usize) -> Self {
        self.max_heading_words = words;
        self
    }

    /// Require numbered headings to exceed `ratio` times body size.
    pub fn with_numbered_min_size_ratio(mut self, ratio: f32) -> Self {
        self.numbered_min_size_ratio = Some(ratio);
        self
    }

    /// Enable or disable dropping headings that echo the title.
    pub fn with_skip_title_echo(mut self, skip: bool) -> Self {
        self.skip_title_echo = skip;
        self
    }

    /// Set the line grouping overlap ratio.
    pub fn with_line_overlap_ratio(mut self, ratio: f32) -> Self {
        self.line_overlap_ratio = ratio;
        self
    }
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            repetition_fraction: DEFAULT_REPETITION_FRACTION,
            min_boilerplate_pages: DEFAULT_MIN_BOILERPLATE_PAGES,
            fold_digits: false,
            size_margin: DEFAULT_SIZE_MARGIN,
            max_heading_words: DEFAULT_MAX_HEADING_WORDS,
            numbered_min_size_ratio: None,
            skip_title_echo: false,
            line_overlap_ratio: DEFAULT_LINE_OVERLAP_RATIO,
        }
    }
}
