//! # pdfoutline
//!
//! Title and heading outline inference for PDF documents.
//!
//! PDFs rarely carry a usable table of contents. This library rebuilds one
//! from typography alone: text is decoded into positioned fragments, grouped
//! into lines, and classified by a small set of rules (section numbering,
//! size and weight). Running headers and footers are filtered out first.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{extract_outline, render};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let outline = extract_outline("report.pdf")?;
//!     println!("{}", render::to_json(&outline, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! The engine also works on fragments from any other source; see
//! [`outline::OutlineEngine`].

pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod outline;
pub mod parser;
pub mod render;

pub use batch::{process_directory, BatchOptions, BatchReport, DocumentResult};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf, PdfFormat};
pub use error::{Error, Result};
pub use model::{
    BoundingBox, FragmentDocument, FragmentPage, HeadingCandidate, HeadingLevel, Line, Outline,
    TextFragment,
};
pub use outline::{HeadingClassifier, HeadingRule, OutlineConfig, OutlineEngine};
pub use parser::{ErrorMode, ParseOptions, PdfParser};
pub use render::JsonFormat;

use std::io::Read;
use std::path::Path;

/// Decode a PDF file into text fragments.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::parse_file;
///
/// let doc = parse_file("report.pdf").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<FragmentDocument> {
    PdfParser::open(path)?.parse()
}

/// Decode a PDF file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<FragmentDocument> {
    PdfParser::open_with_options(path, options)?.parse()
}

/// Decode a PDF from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<FragmentDocument> {
    PdfParser::from_bytes(data)?.parse()
}

/// Decode a PDF from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<FragmentDocument> {
    PdfParser::from_bytes_with_options(data, options)?.parse()
}

/// Decode a PDF from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<FragmentDocument> {
    PdfParser::from_reader(reader)?.parse()
}

/// Extract the outline of a PDF file with default settings.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::extract_outline;
///
/// let outline = extract_outline("report.pdf").unwrap();
/// for heading in &outline.entries {
///     println!("{} {} (p. {})", heading.level, heading.text, heading.page);
/// }
/// ```
pub fn extract_outline<P: AsRef<Path>>(path: P) -> Result<Outline> {
    OutlineExtractor::new().extract_file(path)
}

/// Extract the outline of an in-memory PDF with default settings.
pub fn extract_outline_from_bytes(data: &[u8]) -> Result<Outline> {
    OutlineExtractor::new().extract_bytes(data)
}

/// Build an outline from an already decoded fragment stream.
pub fn outline_from_document(document: &FragmentDocument) -> Outline {
    OutlineEngine::default().build(document)
}

/// Builder combining decoding options and inference settings.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{OutlineConfig, OutlineExtractor};
///
/// let outline = OutlineExtractor::new()
///     .lenient()
///     .with_config(OutlineConfig::new().with_fold_digits(true))
///     .extract_file("report.pdf")?;
/// # Ok::<(), pdfoutline::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct OutlineExtractor {
    parse_options: ParseOptions,
    engine: OutlineEngine,
}

impl OutlineExtractor {
    /// Create an extractor with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set decoding options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Skip pages that fail to decode instead of failing the document.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Set inference thresholds, keeping the current rule chain.
    pub fn with_config(mut self, config: OutlineConfig) -> Self {
        let classifier = std::mem::take(&mut self.engine).into_classifier();
        self.engine = OutlineEngine::new(config).with_classifier(classifier);
        self
    }

    /// Replace the heading rule chain.
    pub fn with_classifier(mut self, classifier: HeadingClassifier) -> Self {
        self.engine = self.engine.with_classifier(classifier);
        self
    }

    /// Decoding options in effect.
    pub fn parse_options(&self) -> &ParseOptions {
        &self.parse_options
    }

    /// The inference engine.
    pub fn engine(&self) -> &OutlineEngine {
        &self.engine
    }

    /// Decode and outline a PDF file.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<Outline> {
        let document = PdfParser::open_with_options(path, self.parse_options.clone())?.parse()?;
        Ok(self.engine.build(&document))
    }

    /// Decode and outline an in-memory PDF.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<Outline> {
        let document =
            PdfParser::from_bytes_with_options(data, self.parse_options.clone())?.parse()?;
        Ok(self.engine.build(&document))
    }

    /// Outline an already decoded document.
    pub fn extract_document(&self, document: &FragmentDocument) -> Outline {
        self.engine.build(document)
    }
}
