//! Title detection on the first page.

use super::body_size::quantize;
use super::normalize::collapse_whitespace;
use crate::model::Line;

/// Title of a document from the lines of its first page.
///
/// Every fragment at the page's largest font size contributes, in reading
/// order (lines top to bottom, fragments left to right). Returns an empty
/// string when the page has no text.
pub fn detect_title(first_page: &[Line]) -> String {
    let max_size = first_page
        .iter()
        .flat_map(|line| line.fragments())
        .filter(|f| !f.is_blank())
        .map(|f| quantize(f.font_size))
        .max();

    let Some(max_size) = max_size else {
        return String::new();
    };

    let parts: Vec<&str> = first_page
        .iter()
        .flat_map(|line| line.fragments())
        .filter(|f| !f.is_blank() && quantize(f.font_size) == max_size)
        .map(|f| f.text.as_str())
        .collect();

    collapse_whitespace(&parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{group_into_lines, BoundingBox, TextFragment, DEFAULT_LINE_OVERLAP_RATIO};

    fn frag(text: &str, size: f32, x0: f32, y0: f32) -> TextFragment {
        let width = text.chars().count() as f32 * size * 0.5;
        TextFragment::new(text, size, BoundingBox::new(x0, y0, x0 + width, y0 + size), 0)
    }

    #[test]
    fn test_title_spans_two_lines() {
        let fragments = vec![
            frag("Annual", 24.0, 100.0, 60.0),
            frag("Report 2024", 24.0, 100.0, 90.0),
            frag("Prepared by the finance team", 11.0, 100.0, 140.0),
        ];
        let lines = group_into_lines(&fragments, DEFAULT_LINE_OVERLAP_RATIO);
        assert_eq!(detect_title(&lines), "Annual Report 2024");
    }

    #[test]
    fn test_title_joins_runs_on_one_line() {
        let fragments = vec![
            frag("Report", 20.0, 180.0, 60.0),
            frag("Quarterly", 20.0, 60.0, 60.0),
            frag("subtitle", 12.0, 60.0, 100.0),
        ];
        let lines = group_into_lines(&fragments, DEFAULT_LINE_OVERLAP_RATIO);
        assert_eq!(detect_title(&lines), "Quarterly Report");
    }

    #[test]
    fn test_uniform_page_joins_everything() {
        let fragments = vec![
            frag("First line", 12.0, 50.0, 50.0),
            frag("Second  line", 12.0, 50.0, 70.0),
            frag("Third line", 12.0, 50.0, 90.0),
        ];
        let lines = group_into_lines(&fragments, DEFAULT_LINE_OVERLAP_RATIO);
        assert_eq!(detect_title(&lines), "First line Second line Third line");
    }

    #[test]
    fn test_overprinted_title_keeps_every_fragment() {
        let fragments = vec![
            frag("Report", 24.0, 100.0, 60.0),
            frag("Report", 24.0, 100.5, 60.5),
            frag("Body text follows here", 11.0, 100.0, 120.0),
        ];
        let lines = group_into_lines(&fragments, DEFAULT_LINE_OVERLAP_RATIO);
        assert_eq!(lines[0].text(), "Report");
        assert_eq!(detect_title(&lines), "Report Report");
    }

    #[test]
    fn test_empty_page_has_empty_title() {
        assert_eq!(detect_title(&[]), "");
    }

    #[test]
    fn test_near_equal_sizes_match() {
        let fragments = vec![
            frag("Big", 18.01, 50.0, 50.0),
            frag("Title", 17.99, 50.0, 80.0),
        ];
        let lines = group_into_lines(&fragments, DEFAULT_LINE_OVERLAP_RATIO);
        assert_eq!(detect_title(&lines), "Big Title");
    }
}
