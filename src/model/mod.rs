//! Data model shared by the decoder and the outline engine.
//!
//! Fragments flow in from the decoder (or the caller), are grouped into
//! [`Line`]s per page, and come out as an [`Outline`].

mod fragment;
mod line;
mod outline;

pub use fragment::{BoundingBox, FragmentDocument, FragmentPage, TextFragment};
pub use line::{group_into_lines, is_spaceless_script_char, Line, DEFAULT_LINE_OVERLAP_RATIO};
pub use outline::{HeadingCandidate, HeadingLevel, Outline};
