//! Outline inference.
//!
//! Turns a [`FragmentDocument`] into an [`Outline`] in two passes. The
//! profile pass groups fragments into lines and gathers document-wide facts
//! (running headers and footers, body text size, title). The classify pass
//! then runs the heading rules over every line and assembles the result.
//!
//! ```
//! use pdfoutline::model::{BoundingBox, FragmentDocument, FragmentPage, TextFragment};
//! use pdfoutline::outline::OutlineEngine;
//!
//! let page = FragmentPage::with_fragments(0, vec![
//!     TextFragment::new("Field Guide", 22.0, BoundingBox::new(72.0, 60.0, 250.0, 82.0), 0),
//!     TextFragment::new("1 Birds", 14.0, BoundingBox::new(72.0, 120.0, 140.0, 134.0), 0),
//!     TextFragment::new("Some body text.", 11.0, BoundingBox::new(72.0, 150.0, 200.0, 161.0), 0),
//! ]);
//! let outline = OutlineEngine::default().build(&FragmentDocument::from_pages(vec![page]));
//!
//! assert_eq!(outline.title, "Field Guide");
//! assert_eq!(outline.entries[0].text, "Birds");
//! ```

mod assembler;
mod body_size;
mod boilerplate;
mod classifier;
mod config;
mod normalize;
mod rules;
mod title;

pub use assembler::OutlineAssembler;
pub use body_size::estimate_body_size;
pub use boilerplate::BoilerplateSet;
pub use classifier::HeadingClassifier;
pub use config::{
    OutlineConfig, DEFAULT_MAX_HEADING_WORDS, DEFAULT_MIN_BOILERPLATE_PAGES,
    DEFAULT_REPETITION_FRACTION, DEFAULT_SIZE_MARGIN,
};
pub use normalize::{collapse_whitespace, NormalizedText};
pub use rules::{EmphasizedHeadingRule, HeadingRule, NumberedHeadingRule, RuleContext, Verdict};
pub use title::detect_title;

use crate::model::{group_into_lines, FragmentDocument, Line, Outline};

/// Document-wide facts from the profile pass.
#[derive(Debug, Clone)]
pub struct DocumentProfile {
    /// Lines of each page, in page order
    pub pages: Vec<Vec<Line>>,
    /// Running headers and footers
    pub boilerplate: BoilerplateSet,
    /// Dominant body text size
    pub body_size: Option<f32>,
    /// Title from the first page
    pub title: String,
}

impl DocumentProfile {
    /// Total number of lines.
    pub fn line_count(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }
}

/// Outline inference engine.
#[derive(Debug, Default)]
pub struct OutlineEngine {
    config: OutlineConfig,
    classifier: HeadingClassifier,
}

impl OutlineEngine {
    /// Engine with the default rule chain.
    pub fn new(config: OutlineConfig) -> Self {
        Self {
            config,
            classifier: HeadingClassifier::default(),
        }
    }

    /// Replace the rule chain.
    pub fn with_classifier(mut self, classifier: HeadingClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// The engine's thresholds.
    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    /// The heading rule chain.
    pub fn classifier(&self) -> &HeadingClassifier {
        &self.classifier
    }

    /// Take the rule chain out of the engine.
    pub fn into_classifier(self) -> HeadingClassifier {
        self.classifier
    }

    /// Run the profile pass.
    pub fn profile(&self, document: &FragmentDocument) -> DocumentProfile {
        let pages: Vec<Vec<Line>> = document
            .pages
            .iter()
            .map(|page| group_into_lines(&page.fragments, self.config.line_overlap_ratio))
            .collect();

        let boilerplate = BoilerplateSet::detect(&pages, &self.config);
        let body_size = estimate_body_size(&pages, &boilerplate);
        let title = pages.first().map(|lines| detect_title(lines)).unwrap_or_default();

        DocumentProfile {
            pages,
            boilerplate,
            body_size,
            title,
        }
    }

    /// Build the outline for a document.
    pub fn build(&self, document: &FragmentDocument) -> Outline {
        let profile = self.profile(document);
        self.build_from_profile(profile)
    }

    /// Classify and assemble from an existing profile.
    pub fn build_from_profile(&self, profile: DocumentProfile) -> Outline {
        let ctx = RuleContext::new(profile.body_size, &self.config);
        let candidates = self.classifier.classify(&profile.pages, &profile.boilerplate, &ctx);
        let candidate_count = candidates.len();

        let outline =
            OutlineAssembler::new(self.config.skip_title_echo).assemble(profile.title, candidates);

        log::debug!(
            "Outline: {} pages, {} lines, {} boilerplate, body size {:?}, {}/{} headings kept",
            profile.pages.len(),
            profile.pages.iter().map(Vec::len).sum::<usize>(),
            profile.boilerplate.len(),
            profile.body_size,
            outline.len(),
            candidate_count
        );

        outline
    }
}

/// Build an outline with the given thresholds and the default rules.
pub fn build_outline(document: &FragmentDocument, config: &OutlineConfig) -> Outline {
    OutlineEngine::new(config.clone()).build(document)
}
