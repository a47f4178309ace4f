//! Visual text lines built from fragments.
//!
//! A [`Line`] is one or more fragments judged to occupy the same visual row
//! of a page. Grouping works on vertical overlap of the fragments' bounding
//! boxes, so runs with slightly different baselines (superscripts, mixed
//! font sizes) still land on the same line.

use std::cmp::Ordering;

use super::TextFragment;

/// Fraction of the smaller fragment height two fragments must share
/// vertically to be considered the same line.
pub const DEFAULT_LINE_OVERLAP_RATIO: f32 = 0.5;

/// Gap between fragments, as a fraction of the average character width,
/// above which a space is inserted when joining text.
const SPACE_GAP_RATIO: f32 = 0.2;

/// Horizontal overlap, as a fraction of the narrower fragment, above which
/// two fragments with equal text are one overprinted run.
const OVERPRINT_OVERLAP_RATIO: f32 = 0.5;

/// A text line composed of fragments on the same visual row.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    fragments: Vec<TextFragment>,
    text: String,
    page: u32,
    top: f32,
    bottom: f32,
}

impl Line {
    /// Build a line from fragments of a single page.
    ///
    /// Fragments are put in reading order (left to right) and their text is
    /// joined once; the result is cached. A fragment that repeats its left
    /// neighbour's text over the same span (overprinted fake bold) is left
    /// out of the text but stays in [`Line::fragments`].
    pub fn from_fragments(mut fragments: Vec<TextFragment>) -> Self {
        fragments.sort_by(|a, b| a.bbox.x0.partial_cmp(&b.bbox.x0).unwrap_or(Ordering::Equal));

        let mut visible: Vec<&TextFragment> = Vec::with_capacity(fragments.len());
        for fragment in &fragments {
            if !visible.last().is_some_and(|prev| is_overprint(prev, fragment)) {
                visible.push(fragment);
            }
        }

        let page = fragments.first().map(|f| f.page).unwrap_or(0);
        let top = fragments
            .iter()
            .map(|f| vertical_extent(f).0)
            .fold(f32::INFINITY, f32::min);
        let bottom = fragments
            .iter()
            .map(|f| vertical_extent(f).1)
            .fold(f32::NEG_INFINITY, f32::max);
        let text = join_fragments(&visible);

        Self {
            fragments,
            text,
            page,
            top: if top.is_finite() { top } else { 0.0 },
            bottom: if bottom.is_finite() { bottom } else { 0.0 },
        }
    }

    /// All fragments in reading order, overprinted copies included.
    pub fn fragments(&self) -> &[TextFragment] {
        &self.fragments
    }

    /// Reading-order text of the line.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Page index (0-based).
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Top edge of the line.
    pub fn top(&self) -> f32 {
        self.top
    }

    /// Bottom edge of the line.
    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    /// Largest font size among the line's fragments.
    pub fn max_font_size(&self) -> f32 {
        self.fragments
            .iter()
            .map(|f| f.font_size)
            .fold(0.0, f32::max)
    }

    /// Whether any fragment on the line is bold.
    pub fn is_bold(&self) -> bool {
        self.fragments.iter().any(|f| f.bold)
    }

    /// Number of whitespace-delimited words.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Check if the line has no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Group one page's fragments into lines, ordered top to bottom.
///
/// Blank fragments are dropped. A fragment joins the line being built when
/// its vertical extent overlaps the line's first fragment by at least
/// `overlap_ratio` of the smaller of the two heights.
pub fn group_into_lines(fragments: &[TextFragment], overlap_ratio: f32) -> Vec<Line> {
    let mut ordered: Vec<&TextFragment> = fragments.iter().filter(|f| !f.is_blank()).collect();
    if ordered.is_empty() {
        return vec![];
    }

    ordered.sort_by(|a, b| {
        a.bbox
            .y0
            .partial_cmp(&b.bbox.y0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.bbox.x0.partial_cmp(&b.bbox.x0).unwrap_or(Ordering::Equal))
    });

    let mut lines = Vec::new();
    let mut current: Vec<TextFragment> = Vec::new();
    let mut anchor = (0.0_f32, 0.0_f32);

    for fragment in ordered {
        let extent = vertical_extent(fragment);
        if !current.is_empty() && same_row(anchor, extent, overlap_ratio) {
            current.push(fragment.clone());
            continue;
        }

        if !current.is_empty() {
            lines.push(Line::from_fragments(std::mem::take(&mut current)));
        }
        anchor = extent;
        current.push(fragment.clone());
    }

    if !current.is_empty() {
        lines.push(Line::from_fragments(current));
    }

    lines
}

/// Vertical extent `(top, bottom)` of a fragment.
///
/// Decoders that only know the baseline emit zero-height boxes; those use
/// the font size as their height.
fn vertical_extent(fragment: &TextFragment) -> (f32, f32) {
    let top = fragment.bbox.y0;
    let height = fragment.bbox.height();
    if height > 0.0 {
        (top, fragment.bbox.y1)
    } else {
        (top, top + fragment.font_size.max(1.0))
    }
}

fn is_overprint(first: &TextFragment, second: &TextFragment) -> bool {
    if first.text.trim() != second.text.trim() {
        return false;
    }
    let overlap = first.bbox.x1.min(second.bbox.x1) - first.bbox.x0.max(second.bbox.x0);
    let narrower = first.bbox.width().min(second.bbox.width());
    narrower > 0.0 && overlap >= narrower * OVERPRINT_OVERLAP_RATIO
}

fn same_row(a: (f32, f32), b: (f32, f32), overlap_ratio: f32) -> bool {
    let overlap = a.1.min(b.1) - a.0.max(b.0);
    if overlap <= 0.0 {
        return false;
    }
    let smaller = (a.1 - a.0).min(b.1 - b.0);
    overlap >= smaller * overlap_ratio
}

/// Join fragment text left to right, inserting spaces at visual gaps.
fn join_fragments(fragments: &[&TextFragment]) -> String {
    let mut result = String::new();

    for (i, fragment) in fragments.iter().enumerate() {
        if i == 0 {
            result.push_str(&fragment.text);
            continue;
        }

        let prev = fragments[i - 1];
        let gap = fragment.bbox.x0 - prev.bbox.x1;

        let char_count = fragment.text.chars().count();
        let avg_char_width = if char_count > 0 && fragment.bbox.width() > 0.0 {
            fragment.bbox.width() / char_count as f32
        } else {
            fragment.font_size * 0.5
        };

        let prev_has_space = prev.text.ends_with(char::is_whitespace);
        let curr_has_space = fragment.text.starts_with(char::is_whitespace);

        let spaceless = match (prev.text.chars().last(), fragment.text.chars().next()) {
            (Some(a), Some(b)) => is_spaceless_script_char(a) && is_spaceless_script_char(b),
            _ => false,
        };

        if gap > avg_char_width * SPACE_GAP_RATIO
            && !prev_has_space
            && !curr_has_space
            && !spaceless
        {
            result.push(' ');
        }
        result.push_str(&fragment.text);
    }

    result
}

/// Check if a character belongs to a script written without word spaces.
///
/// Chinese and Japanese qualify; Korean (Hangul) uses spaces and does not.
pub fn is_spaceless_script_char(c: char) -> bool {
    matches!(
        c as u32,
        0x3000..=0x303F       // CJK symbols and punctuation
            | 0x3040..=0x309F // Hiragana
            | 0x30A0..=0x30FF // Katakana
            | 0x3400..=0x4DBF // CJK extension A
            | 0x4E00..=0x9FFF // CJK unified ideographs
            | 0x20000..=0x2EBEF
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BoundingBox;

    fn frag(text: &str, x0: f32, y0: f32, x1: f32, size: f32) -> TextFragment {
        TextFragment::new(text, size, BoundingBox::new(x0, y0, x1, y0 + size), 0)
    }

    #[test]
    fn test_group_same_row() {
        let fragments = vec![
            frag("World", 60.0, 100.0, 90.0, 12.0),
            frag("Hello", 20.0, 101.0, 50.0, 12.0),
        ];
        let lines = group_into_lines(&fragments, DEFAULT_LINE_OVERLAP_RATIO);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "Hello World");
    }

    #[test]
    fn test_group_separate_rows_top_to_bottom() {
        let fragments = vec![
            frag("second", 20.0, 130.0, 60.0, 12.0),
            frag("first", 20.0, 100.0, 60.0, 12.0),
        ];
        let lines = group_into_lines(&fragments, DEFAULT_LINE_OVERLAP_RATIO);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "first");
        assert_eq!(lines[1].text(), "second");
    }

    #[test]
    fn test_group_mixed_sizes_on_one_row() {
        // A large run and a small run sharing a baseline region.
        let fragments = vec![
            frag("2.1", 20.0, 100.0, 40.0, 18.0),
            frag("Data Collection", 46.0, 104.0, 160.0, 12.0),
        ];
        let lines = group_into_lines(&fragments, DEFAULT_LINE_OVERLAP_RATIO);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "2.1 Data Collection");
        assert_eq!(lines[0].max_font_size(), 18.0);
    }

    #[test]
    fn test_zero_height_fragments_use_font_size() {
        let a = TextFragment::new("Left", 12.0, BoundingBox::new(10.0, 50.0, 40.0, 50.0), 0);
        let b = TextFragment::new("Right", 12.0, BoundingBox::new(50.0, 52.0, 80.0, 52.0), 0);
        let lines = group_into_lines(&[a, b], DEFAULT_LINE_OVERLAP_RATIO);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "Left Right");
    }

    #[test]
    fn test_blank_fragments_dropped() {
        let fragments = vec![frag("   ", 20.0, 100.0, 40.0, 12.0)];
        assert!(group_into_lines(&fragments, DEFAULT_LINE_OVERLAP_RATIO).is_empty());
        assert!(group_into_lines(&[], DEFAULT_LINE_OVERLAP_RATIO).is_empty());
    }

    #[test]
    fn test_no_space_for_touching_fragments() {
        let fragments = vec![
            frag("Intro", 20.0, 100.0, 50.0, 12.0),
            frag("duction", 50.0, 100.0, 92.0, 12.0),
        ];
        let lines = group_into_lines(&fragments, DEFAULT_LINE_OVERLAP_RATIO);
        assert_eq!(lines[0].text(), "Introduction");
    }

    #[test]
    fn test_no_space_between_cjk() {
        let fragments = vec![
            frag("日本", 20.0, 100.0, 44.0, 12.0),
            frag("語", 50.0, 100.0, 62.0, 12.0),
        ];
        let lines = group_into_lines(&fragments, DEFAULT_LINE_OVERLAP_RATIO);
        assert_eq!(lines[0].text(), "日本語");
    }

    #[test]
    fn test_existing_whitespace_not_doubled() {
        let fragments = vec![
            frag("Table ", 20.0, 100.0, 56.0, 12.0),
            frag("of Contents", 70.0, 100.0, 136.0, 12.0),
        ];
        let lines = group_into_lines(&fragments, DEFAULT_LINE_OVERLAP_RATIO);
        assert_eq!(lines[0].text(), "Table of Contents");
    }

    #[test]
    fn test_line_style_accessors() {
        let fragments = vec![
            frag("Big", 20.0, 100.0, 50.0, 20.0).with_bold(true),
            frag("small words here", 60.0, 106.0, 150.0, 11.0),
        ];
        let lines = group_into_lines(&fragments, DEFAULT_LINE_OVERLAP_RATIO);
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert!(line.is_bold());
        assert_eq!(line.word_count(), 4);
        assert_eq!(line.max_font_size(), 20.0);
        assert_eq!(line.top(), 100.0);
        assert_eq!(line.bottom(), 120.0);
    }

    #[test]
    fn test_overprinted_fragments_collapse() {
        let fragments = vec![
            frag("Summary", 72.0, 100.0, 130.0, 16.0).with_bold(true),
            frag("Summary", 72.4, 100.3, 130.4, 16.0).with_bold(true),
        ];
        let lines = group_into_lines(&fragments, DEFAULT_LINE_OVERLAP_RATIO);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "Summary");
        assert_eq!(lines[0].word_count(), 1);
        assert_eq!(lines[0].fragments().len(), 2);
    }

    #[test]
    fn test_repeated_words_side_by_side_kept() {
        let fragments = vec![
            frag("very", 20.0, 100.0, 44.0, 12.0),
            frag("very", 50.0, 100.0, 74.0, 12.0),
        ];
        let lines = group_into_lines(&fragments, DEFAULT_LINE_OVERLAP_RATIO);
        assert_eq!(lines[0].text(), "very very");
    }

    #[test]
    fn test_spaceless_script_chars() {
        assert!(is_spaceless_script_char('中'));
        assert!(is_spaceless_script_char('ひ'));
        assert!(is_spaceless_script_char('カ'));
        assert!(!is_spaceless_script_char('한'));
        assert!(!is_spaceless_script_char('a'));
    }
}
