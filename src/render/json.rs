//! JSON rendering for outlines.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{Error, Result};
use crate::model::Outline;

/// Indentation used by [`JsonFormat::Pretty`].
const PRETTY_INDENT: &[u8] = b"    ";

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Indented with four spaces
    #[default]
    Pretty,
    /// Single line, no extra whitespace
    Compact,
}

/// Serialize an outline to JSON.
///
/// Non-ASCII text is written as-is, not escaped.
pub fn to_json(outline: &Outline, format: JsonFormat) -> Result<String> {
    let bytes = match format {
        JsonFormat::Compact => serde_json::to_vec(outline)?,
        JsonFormat::Pretty => {
            let mut buf = Vec::new();
            let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(PRETTY_INDENT));
            outline.serialize(&mut ser)?;
            buf
        }
    };

    String::from_utf8(bytes).map_err(|e| Error::Render(e.to_string()))
}

/// Serialize an outline and write it to `path`.
pub fn write_json<P: AsRef<Path>>(outline: &Outline, path: P, format: JsonFormat) -> Result<()> {
    let mut json = to_json(outline, format)?;
    json.push('\n');
    fs::write(path, json)?;
    Ok(())
}

/// Parse an outline from JSON.
pub fn from_json(json: &str) -> Result<Outline> {
    Ok(serde_json::from_str(json)?)
}
