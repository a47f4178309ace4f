//! Directory batch processing.
//!
//! Every `*.pdf` file in an input directory becomes `<stem>.json` in an
//! output directory. A document that fails to decode is recorded and the
//! rest of the batch continues.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::detect::has_pdf_extension;
use crate::error::{Error, Result};
use crate::render::{write_json, JsonFormat};
use crate::OutlineExtractor;

/// Default input directory.
pub const DEFAULT_INPUT_DIR: &str = "input";

/// Default output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Options for a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Directory scanned for PDF files (not recursive)
    pub input_dir: PathBuf,

    /// Directory receiving JSON outlines; created if missing
    pub output_dir: PathBuf,

    /// JSON layout of output files
    pub format: JsonFormat,

    /// Process documents on the rayon thread pool
    pub parallel: bool,
}

impl BatchOptions {
    /// Create options for the given directories.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Set the JSON format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Process documents one at a time.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            format: JsonFormat::Pretty,
            parallel: true,
        }
    }
}

/// Outcome for one input document.
#[derive(Debug)]
pub enum DocumentResult {
    /// Outline written.
    Ok {
        input: PathBuf,
        output: PathBuf,
        headings: usize,
    },
    /// Decoding or writing failed.
    Failed { input: PathBuf, error: Error },
}

impl DocumentResult {
    /// The input file.
    pub fn input(&self) -> &Path {
        match self {
            DocumentResult::Ok { input, .. } | DocumentResult::Failed { input, .. } => input,
        }
    }

    /// Check if the document succeeded.
    pub fn is_ok(&self) -> bool {
        matches!(self, DocumentResult::Ok { .. })
    }

    /// The error, for failed documents.
    pub fn error(&self) -> Option<&Error> {
        match self {
            DocumentResult::Failed { error, .. } => Some(error),
            DocumentResult::Ok { .. } => None,
        }
    }
}

/// Results of a batch run, in input file order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One result per input file
    pub results: Vec<DocumentResult>,
}

impl BatchReport {
    /// Number of documents processed.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check if the input directory had no PDFs.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of documents that succeeded.
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_ok()).count()
    }

    /// Documents that failed.
    pub fn failures(&self) -> impl Iterator<Item = &DocumentResult> {
        self.results.iter().filter(|r| !r.is_ok())
    }
}

/// List PDF files directly inside `dir`, sorted by name.
pub fn list_pdfs<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_pdf_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Output path for an input file: `<output_dir>/<stem>.json`.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    name.push(".json");
    output_dir.join(name)
}

/// Process every PDF in the input directory.
pub fn process_directory(options: &BatchOptions, extractor: &OutlineExtractor) -> Result<BatchReport> {
    process_directory_with_progress(options, extractor, |_| {})
}

/// Process every PDF in the input directory, calling `on_done` as each
/// document finishes.
///
/// Fails only when the directories themselves are unusable; per-document
/// errors land in the report.
pub fn process_directory_with_progress<F>(
    options: &BatchOptions,
    extractor: &OutlineExtractor,
    on_done: F,
) -> Result<BatchReport>
where
    F: Fn(&DocumentResult) + Sync,
{
    let inputs = list_pdfs(&options.input_dir)?;
    fs::create_dir_all(&options.output_dir)?;

    log::info!(
        "Processing {} PDF(s) from {}",
        inputs.len(),
        options.input_dir.display()
    );

    let run = |input: &PathBuf| {
        let result = process_one(input, options, extractor);
        on_done(&result);
        result
    };

    let results: Vec<DocumentResult> = if options.parallel {
        inputs.par_iter().map(run).collect()
    } else {
        inputs.iter().map(run).collect()
    };

    let report = BatchReport { results };
    log::info!(
        "Batch finished: {}/{} succeeded",
        report.succeeded(),
        report.len()
    );
    Ok(report)
}

fn process_one(input: &Path, options: &BatchOptions, extractor: &OutlineExtractor) -> DocumentResult {
    let output = output_path_for(input, &options.output_dir);

    let written = extractor
        .extract_file(input)
        .and_then(|outline| write_json(&outline, &output, options.format).map(|_| outline.len()));

    match written {
        Ok(headings) => {
            log::debug!("{} -> {} ({} headings)", input.display(), output.display(), headings);
            DocumentResult::Ok {
                input: input.to_path_buf(),
                output,
                headings,
            }
        }
        Err(error) => {
            log::warn!("Failed to process {}: {}", input.display(), error);
            DocumentResult::Failed {
                input: input.to_path_buf(),
                error,
            }
        }
    }
}
