//! Dominant body text size.

use std::collections::BTreeMap;

use super::boilerplate::BoilerplateSet;
use crate::model::Line;

/// Font sizes are compared in tenths of a point.
pub(crate) fn quantize(size: f32) -> i32 {
    (size * 10.0).round() as i32
}

pub(crate) fn dequantize(key: i32) -> f32 {
    key as f32 / 10.0
}

/// Most frequent line font size among non-boilerplate lines.
///
/// Each line votes once with its largest fragment size. Ties go to the
/// smaller size. Returns `None` when no line qualifies.
pub fn estimate_body_size(pages: &[Vec<Line>], boilerplate: &BoilerplateSet) -> Option<f32> {
    let mut histogram: BTreeMap<i32, usize> = BTreeMap::new();

    for line in pages.iter().flatten() {
        if line.is_blank() || boilerplate.contains(line) {
            continue;
        }
        let size = line.max_font_size();
        if size <= 0.0 {
            continue;
        }
        *histogram.entry(quantize(size)).or_insert(0) += 1;
    }

    // Ascending iteration plus a strict comparison keeps the smaller size on ties.
    let mut best: Option<(i32, usize)> = None;
    for (&key, &count) in &histogram {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((key, count));
        }
    }

    best.map(|(key, _)| dequantize(key))
}
