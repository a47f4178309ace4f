//! Final outline assembly.

use super::normalize::NormalizedText;
use crate::model::{HeadingCandidate, Outline};

/// Builds the final outline from classified candidates.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineAssembler {
    skip_title_echo: bool,
}

impl OutlineAssembler {
    /// Create an assembler.
    pub fn new(skip_title_echo: bool) -> Self {
        Self { skip_title_echo }
    }

    /// Deduplicate candidates and attach the title.
    ///
    /// A candidate is dropped when its normalized text and page equal those
    /// of the last candidate kept. With title-echo skipping on, first-page
    /// candidates matching the title are dropped as well.
    pub fn assemble(&self, title: String, candidates: Vec<HeadingCandidate>) -> Outline {
        let title_key = NormalizedText::new(&title);
        let mut entries: Vec<HeadingCandidate> = Vec::with_capacity(candidates.len());
        let mut last: Option<(NormalizedText, u32)> = None;
        let mut dropped = 0usize;

        for candidate in candidates {
            let key = NormalizedText::new(&candidate.text);

            if self.skip_title_echo && candidate.page == 1 && !title_key.is_empty() && key == title_key {
                dropped += 1;
                continue;
            }

            if let Some((last_key, last_page)) = &last {
                if *last_key == key && *last_page == candidate.page {
                    dropped += 1;
                    continue;
                }
            }

            last = Some((key, candidate.page));
            entries.push(candidate);
        }

        if dropped > 0 {
            log::debug!("Assembler dropped {} duplicate heading(s)", dropped);
        }

        Outline::new(title, entries)
    }
}
