//! PDF decoding: documents to fragment streams.

mod backend;
mod fragments;
mod options;
mod pdf_parser;

pub use backend::{
    decode_text_simple, BackendFontInfo, ContentOp, LopdfBackend, MediaBox, PageId, PdfBackend,
    PdfValue,
};
pub use fragments::{is_bold_font, is_italic_font, FragmentExtractor};
pub use options::{ErrorMode, ParseOptions};
pub use pdf_parser::PdfParser;
