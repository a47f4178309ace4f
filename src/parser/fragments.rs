//! Content stream walking: PDF text operators to [`TextFragment`]s.
//!
//! A simplified text-rendering state machine. Glyph widths are not read from
//! font programs; each character is assumed to be half an em wide, which is
//! close enough for line grouping and space insertion.

use crate::error::Result;
use crate::model::{is_spaceless_script_char, BoundingBox, TextFragment};

use super::backend::{
    get_number_from_value, BackendFontInfo, ContentOp, MediaBox, PageId, PdfBackend, PdfValue,
};

/// Approximate glyph width as a fraction of the font size.
const APPROX_CHAR_WIDTH_RATIO: f32 = 0.5;

/// Ascender height as a fraction of the font size.
const ASCENT_RATIO: f32 = 0.8;

/// Descender depth as a fraction of the font size.
const DESCENT_RATIO: f32 = 0.2;

/// TJ adjustment (thousandths of an em) treated as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// The identity matrix `[a, b, c, d, e, f]`.
const IDENTITY: [f32; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// Font name markers for bold faces (matched case-insensitively).
const BOLD_MARKERS: &[&str] = &["BOLD", "BLACK", "HEAVY", "SEMIBOLD"];

/// Font name markers for italic faces.
const ITALIC_MARKERS: &[&str] = &["ITALIC", "OBLIQUE"];

/// Multiply two affine matrices: `m1 × m2`.
fn multiply(m1: &[f32; 6], m2: &[f32; 6]) -> [f32; 6] {
    [
        m1[0] * m2[0] + m1[1] * m2[2],
        m1[0] * m2[1] + m1[1] * m2[3],
        m1[2] * m2[0] + m1[3] * m2[2],
        m1[2] * m2[1] + m1[3] * m2[3],
        m1[4] * m2[0] + m1[5] * m2[2] + m2[4],
        m1[4] * m2[1] + m1[5] * m2[3] + m2[5],
    ]
}

fn transform_point(m: &[f32; 6], x: f32, y: f32) -> (f32, f32) {
    (m[0] * x + m[2] * y + m[4], m[1] * x + m[3] * y + m[5])
}

fn matrix_from(operands: &[PdfValue]) -> Option<[f32; 6]> {
    if operands.len() < 6 {
        return None;
    }
    let vals: Vec<f32> = operands[..6].iter().filter_map(get_number_from_value).collect();
    match vals.as_slice() {
        [a, b, c, d, e, f] => Some([*a, *b, *c, *d, *e, *f]),
        _ => None,
    }
}

/// Check a base font name for a bold face.
pub fn is_bold_font(name: &str) -> bool {
    let upper = name.to_uppercase();
    BOLD_MARKERS.iter().any(|m| upper.contains(m))
}

/// Check a base font name for an italic face.
pub fn is_italic_font(name: &str) -> bool {
    let upper = name.to_uppercase();
    ITALIC_MARKERS.iter().any(|m| upper.contains(m))
}

/// Strip a subset tag such as `ABCDEF+` from a base font name.
fn strip_subset_tag(name: &str) -> &str {
    match name.split_once('+') {
        Some((tag, rest)) if tag.len() == 6 && tag.chars().all(|c| c.is_ascii_uppercase()) => rest,
        _ => name,
    }
}

/// Text and graphics state tracked while walking a content stream.
#[derive(Debug, Clone)]
struct TextState {
    font_key: Vec<u8>,
    font_name: String,
    font_size: f32,
    bold: bool,
    italic: bool,
    text_matrix: [f32; 6],
    line_matrix: [f32; 6],
    ctm: [f32; 6],
    horiz_scale: f32,
    char_spacing: f32,
    word_spacing: f32,
    text_rise: f32,
    leading: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font_key: Vec::new(),
            font_name: String::new(),
            font_size: 0.0,
            bold: false,
            italic: false,
            text_matrix: IDENTITY,
            line_matrix: IDENTITY,
            ctm: IDENTITY,
            horiz_scale: 1.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            text_rise: 0.0,
            leading: 0.0,
        }
    }
}

impl TextState {
    /// Text space to user space.
    fn rendering_matrix(&self) -> [f32; 6] {
        multiply(&self.text_matrix, &self.ctm)
    }

    /// Current pen position in user space, including text rise.
    fn position(&self) -> (f32, f32) {
        transform_point(&self.rendering_matrix(), 0.0, self.text_rise)
    }

    /// Font size after text matrix and CTM scaling.
    fn effective_font_size(&self) -> f32 {
        let m = self.rendering_matrix();
        (self.font_size * (m[1] * m[1] + m[3] * m[3]).sqrt()).abs()
    }

    fn advance_x(&mut self, dx: f32) {
        self.text_matrix[4] += dx * self.text_matrix[0];
        self.text_matrix[5] += dx * self.text_matrix[1];
    }

    /// Advance the pen past `text` as if it had been shown.
    fn advance_after_show(&mut self, text: &str) {
        let glyph = self.font_size * APPROX_CHAR_WIDTH_RATIO;
        let mut dx = 0.0;
        for ch in text.chars() {
            dx += glyph + self.char_spacing;
            if ch == ' ' {
                dx += self.word_spacing;
            }
        }
        self.advance_x(dx * self.horiz_scale);
    }

    fn translate_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = multiply(&[1.0, 0.0, 0.0, 1.0, tx, ty], &self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        self.translate_line(0.0, -self.leading);
    }

    fn set_font(&mut self, key: Vec<u8>, base_font: &str, size: f32) {
        self.font_key = key;
        self.font_size = size;
        self.font_name = strip_subset_tag(base_font).to_string();
        self.bold = is_bold_font(base_font);
        self.italic = is_italic_font(base_font);
    }

    /// Restore everything `q`/`Q` saves; the text matrices belong to the
    /// enclosing text object and survive.
    fn restore(&mut self, saved: TextState) {
        let text_matrix = self.text_matrix;
        let line_matrix = self.line_matrix;
        *self = saved;
        self.text_matrix = text_matrix;
        self.line_matrix = line_matrix;
    }
}

/// Extracts positioned text fragments from one page.
pub struct FragmentExtractor<'a> {
    backend: &'a dyn PdfBackend,
    page_id: PageId,
    page_index: u32,
    media_box: MediaBox,
    fonts: Vec<BackendFontInfo>,
}

impl<'a> FragmentExtractor<'a> {
    /// Prepare extraction for a page; `page_index` is 0-based.
    pub fn new(backend: &'a dyn PdfBackend, page_id: PageId, page_index: u32) -> Self {
        let fonts = backend.page_fonts(page_id).unwrap_or_else(|e| {
            log::debug!("Page {}: no font resources ({})", page_index.saturating_add(1), e);
            Vec::new()
        });
        Self {
            backend,
            page_id,
            page_index,
            media_box: backend.media_box(page_id),
            fonts,
        }
    }

    /// Decode the page's content stream and extract its fragments.
    pub fn extract(&self) -> Result<Vec<TextFragment>> {
        let raw = self.backend.page_content(self.page_id)?;
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        let ops = self.backend.decode_content(&raw)?;
        Ok(self.run(&ops))
    }

    /// Walk already-decoded operations.
    pub fn run(&self, ops: &[ContentOp]) -> Vec<TextFragment> {
        let mut state = TextState::default();
        let mut saved: Vec<TextState> = Vec::new();
        let mut fragments = Vec::new();

        for op in ops {
            let operands = op.operands.as_slice();
            match op.operator.as_str() {
                "q" => saved.push(state.clone()),
                "Q" => {
                    if let Some(prev) = saved.pop() {
                        state.restore(prev);
                    }
                }
                "cm" => {
                    if let Some(m) = matrix_from(operands) {
                        state.ctm = multiply(&m, &state.ctm);
                    }
                }
                "BT" => {
                    state.text_matrix = IDENTITY;
                    state.line_matrix = IDENTITY;
                }
                "ET" => {}
                "Tf" => self.handle_tf(operands, &mut state),
                "Tm" => {
                    if let Some(m) = matrix_from(operands) {
                        state.text_matrix = m;
                        state.line_matrix = m;
                    }
                }
                "Td" | "TD" => {
                    if let (Some(tx), Some(ty)) = (
                        operands.first().and_then(get_number_from_value),
                        operands.get(1).and_then(get_number_from_value),
                    ) {
                        if op.operator == "TD" {
                            state.leading = -ty;
                        }
                        state.translate_line(tx, ty);
                    }
                }
                "T*" => state.next_line(),
                "TL" => set_number(operands, &mut state.leading),
                "Tc" => set_number(operands, &mut state.char_spacing),
                "Tw" => set_number(operands, &mut state.word_spacing),
                "Ts" => set_number(operands, &mut state.text_rise),
                "Tz" => {
                    if let Some(v) = operands.first().and_then(get_number_from_value) {
                        state.horiz_scale = v / 100.0;
                    }
                }
                "Tj" => {
                    if let Some(operand) = operands.first() {
                        self.show_string(operand, &mut state, &mut fragments);
                    }
                }
                "TJ" => {
                    if let Some(PdfValue::Array(items)) = operands.first() {
                        self.show_array(items, &mut state, &mut fragments);
                    }
                }
                "'" => {
                    state.next_line();
                    if let Some(operand) = operands.first() {
                        self.show_string(operand, &mut state, &mut fragments);
                    }
                }
                "\"" => {
                    if operands.len() >= 3 {
                        if let Some(aw) = get_number_from_value(&operands[0]) {
                            state.word_spacing = aw;
                        }
                        if let Some(ac) = get_number_from_value(&operands[1]) {
                            state.char_spacing = ac;
                        }
                        state.next_line();
                        self.show_string(&operands[2], &mut state, &mut fragments);
                    }
                }
                _ => {}
            }
        }

        fragments
    }

    fn handle_tf(&self, operands: &[PdfValue], state: &mut TextState) {
        let (Some(PdfValue::Name(key)), Some(size)) = (
            operands.first(),
            operands.get(1).and_then(get_number_from_value),
        ) else {
            return;
        };

        let base_font = self
            .fonts
            .iter()
            .find(|info| info.name == *key)
            .and_then(|info| info.base_font.clone())
            .unwrap_or_else(|| String::from_utf8_lossy(key).into_owned());

        state.set_font(key.clone(), &base_font, size);
    }

    fn decode(&self, value: &PdfValue, state: &TextState) -> Option<String> {
        match value {
            PdfValue::Str(bytes) => Some(self.backend.decode_text(self.page_id, &state.font_key, bytes)),
            _ => None,
        }
    }

    fn show_string(&self, operand: &PdfValue, state: &mut TextState, out: &mut Vec<TextFragment>) {
        let Some(text) = self.decode(operand, state) else {
            return;
        };
        let start = state.position();
        state.advance_after_show(&text);
        self.emit(text, start, state, out);
    }

    /// `TJ`: strings interleaved with kerning adjustments. One fragment per
    /// array; large negative adjustments become spaces.
    fn show_array(&self, items: &[PdfValue], state: &mut TextState, out: &mut Vec<TextFragment>) {
        let start = state.position();
        let mut text = String::new();

        for item in items {
            if let Some(decoded) = self.decode(item, state) {
                state.advance_after_show(&decoded);
                text.push_str(&decoded);
                continue;
            }

            let Some(adjustment) = get_number_from_value(item) else {
                continue;
            };
            state.advance_x(-adjustment / 1000.0 * state.font_size * state.horiz_scale);

            let word_gap = -adjustment > TJ_SPACE_THRESHOLD;
            let needs_space = text
                .chars()
                .last()
                .is_some_and(|c| !c.is_whitespace() && c != '\u{00A0}' && !is_spaceless_script_char(c));
            if word_gap && needs_space {
                text.push(' ');
            }
        }

        self.emit(text, start, state, out);
    }

    /// Push a fragment spanning from `start` to the current pen position.
    fn emit(&self, text: String, start: (f32, f32), state: &TextState, out: &mut Vec<TextFragment>) {
        if text.trim().is_empty() {
            return;
        }

        let size = state.effective_font_size();
        let end = state.position();
        let mut width = (end.0 - start.0).abs();
        if width <= 0.0 {
            width = text.chars().count() as f32 * size * APPROX_CHAR_WIDTH_RATIO;
        }

        let baseline = self.media_box.flip_y(start.1);
        let x0 = start.0.min(end.0);
        let bbox = BoundingBox::new(
            x0,
            baseline - size * ASCENT_RATIO,
            x0 + width,
            baseline + size * DESCENT_RATIO,
        );

        let mut fragment = TextFragment::new(text, size, bbox, self.page_index)
            .with_bold(state.bold)
            .with_italic(state.italic);
        if !state.font_name.is_empty() {
            fragment = fragment.with_font_name(state.font_name.clone());
        }
        out.push(fragment);
    }
}

fn set_number(operands: &[PdfValue], target: &mut f32) {
    if let Some(v) = operands.first().and_then(get_number_from_value) {
        *target = v;
    }
}
