//! Text fragments as produced by the decoder.

use serde::{Deserialize, Serialize};

/// Axis-aligned box in points, top-left origin (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BoundingBox {
    /// Create a bounding box, normalizing swapped corners.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

/// A run of text sharing consistent font attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    /// The text content
    pub text: String,
    /// Font size in points
    pub font_size: f32,
    /// Whether the font is bold
    pub bold: bool,
    /// Whether the font is italic
    #[serde(default)]
    pub italic: bool,
    /// Position on the page
    pub bbox: BoundingBox,
    /// Page index (0-based)
    pub page: u32,
    /// Base font name, when the decoder knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,
}

impl TextFragment {
    /// Create a regular-weight fragment.
    pub fn new(text: impl Into<String>, font_size: f32, bbox: BoundingBox, page: u32) -> Self {
        Self {
            text: text.into(),
            font_size,
            bold: false,
            italic: false,
            bbox,
            page,
            font_name: None,
        }
    }

    /// Set the bold flag.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Set the italic flag.
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Set the base font name.
    pub fn with_font_name(mut self, name: impl Into<String>) -> Self {
        self.font_name = Some(name.into());
        self
    }

    /// Whether the fragment carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// All fragments of one page, in decoder order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FragmentPage {
    /// Page index (0-based)
    pub index: u32,
    /// Fragments on this page
    pub fragments: Vec<TextFragment>,
}

impl FragmentPage {
    /// Create an empty page.
    pub fn new(index: u32) -> Self {
        Self {
            index,
            fragments: Vec::new(),
        }
    }

    /// Create a page from fragments.
    pub fn with_fragments(index: u32, fragments: Vec<TextFragment>) -> Self {
        Self { index, fragments }
    }

    /// Add a fragment.
    pub fn push(&mut self, fragment: TextFragment) {
        self.fragments.push(fragment);
    }

    /// Check whether the page has any visible text.
    pub fn has_text(&self) -> bool {
        self.fragments.iter().any(|f| !f.is_blank())
    }
}

/// The fragment stream for one document: pages in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FragmentDocument {
    /// Pages in document order
    pub pages: Vec<FragmentPage>,
}

impl FragmentDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from pages.
    pub fn from_pages(pages: Vec<FragmentPage>) -> Self {
        Self { pages }
    }

    /// Add a page.
    pub fn add_page(&mut self, page: FragmentPage) {
        self.pages.push(page);
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total number of fragments across all pages.
    pub fn fragment_count(&self) -> usize {
        self.pages.iter().map(|p| p.fragments.len()).sum()
    }

    /// Check if the document has no pages or no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragment_count() == 0
    }
}
