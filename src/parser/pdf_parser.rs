//! PDF document parser producing fragment streams.

use std::io::Read;
use std::path::Path;

use crate::detect::{detect_format_from_bytes, detect_format_from_path};
use crate::error::{Error, Result};
use crate::model::{FragmentDocument, FragmentPage};

use super::backend::{LopdfBackend, PdfBackend};
use super::fragments::FragmentExtractor;
use super::options::{ErrorMode, ParseOptions};

/// PDF document parser.
pub struct PdfParser {
    backend: LopdfBackend,
    options: ParseOptions,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        detect_format_from_path(path)?;
        let backend = LopdfBackend::load_file(path)?;
        Ok(Self { backend, options })
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        detect_format_from_bytes(data)?;
        let backend = LopdfBackend::load_bytes(data)?;
        Ok(Self { backend, options })
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse a PDF from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Decode every page into text fragments.
    ///
    /// Page indices in the result are 0-based and contiguous. In lenient
    /// mode a page that fails to decode is kept as an empty page so later
    /// page numbers stay correct.
    pub fn parse(&self) -> Result<FragmentDocument> {
        if self.backend.is_encrypted() {
            return Err(Error::Encrypted);
        }

        let pages = self.backend.pages();
        let limit = self
            .options
            .max_pages
            .map_or(pages.len(), |max| (max as usize).min(pages.len()));

        let mut document = FragmentDocument::new();

        for (index, (&page_num, &page_id)) in pages.iter().take(limit).enumerate() {
            let index = index as u32;
            let extractor = FragmentExtractor::new(&self.backend, page_id, index);

            let fragments = match extractor.extract() {
                Ok(fragments) => fragments,
                Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!("Failed to extract text from page {}: {}", page_num, e);
                    Vec::new()
                }
                Err(e) => return Err(e),
            };

            log::trace!("Page {}: {} fragments", page_num, fragments.len());
            document.add_page(FragmentPage::with_fragments(index, fragments));
        }

        log::debug!(
            "Decoded {} of {} pages, {} fragments",
            document.page_count(),
            pages.len(),
            document.fragment_count()
        );

        if self.options.require_text && document.is_empty() {
            return Err(Error::NoExtractableText);
        }

        Ok(document)
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.backend.pages().len() as u32
    }

    /// Check if the document is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.backend.is_encrypted()
    }

    /// Get PDF version.
    pub fn version(&self) -> String {
        self.backend.version()
    }

    /// Options in effect.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }
}
