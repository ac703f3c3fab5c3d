//! Span collection: normalizing extractor spans into uniform records.

use unicode_normalization::UnicodeNormalization;

use crate::geometry::BBox;
use crate::model::{Rgb, TextSpan};
use crate::source::RawSpan;

/// Font flag bit marking italic text.
const FLAG_ITALIC: u32 = 1 << 1;

/// Font flag bit marking bold text.
const FLAG_BOLD: u32 = 1 << 4;

/// Convert a raw extractor span into a [`TextSpan`].
///
/// Bold and italic come from the font flags or, failing that, the font name.
pub fn from_raw(raw: &RawSpan) -> TextSpan {
    let font = raw.font.to_lowercase();
    let is_bold = raw.flags & FLAG_BOLD != 0 || is_bold_font_name(&font);
    let is_italic = raw.flags & FLAG_ITALIC != 0 || is_italic_font_name(&font);

    TextSpan {
        text: raw.text.clone(),
        bbox: BBox::from_array(raw.bbox),
        font_name: raw.font.clone(),
        font_size: raw.size,
        color: Rgb::from_packed(raw.color),
        is_bold,
        is_italic,
        block_id: raw.block_no,
        line_id: raw.line_no,
    }
}

fn is_bold_font_name(lower: &str) -> bool {
    lower.contains("bold") || lower.contains("black") || lower.contains("heavy")
}

fn is_italic_font_name(lower: &str) -> bool {
    lower.contains("italic") || lower.contains("oblique")
}

/// Normalize a page's spans.
///
/// Every input span yields exactly one output span, in arrival order. Text
/// is NFC-normalized, colors are clamped, inverted boxes are re-ordered and
/// unusable font sizes fall back to `default_font_size`.
pub fn collect(spans: &[TextSpan], default_font_size: f32) -> Vec<TextSpan> {
    spans
        .iter()
        .map(|s| {
            let font_size = if s.font_size.is_finite() && s.font_size > 0.0 {
                s.font_size
            } else {
                default_font_size
            };
            TextSpan {
                text: s.text.nfc().collect(),
                bbox: s.bbox.normalized(),
                font_size,
                color: s.color.clamped(),
                ..s.clone()
            }
        })
        .collect()
}

/// Mean font size of the spans, or `default` if there are none.
pub fn average_font_size(spans: &[TextSpan], default: f32) -> f32 {
    if spans.is_empty() {
        return default;
    }
    spans.iter().map(|s| s.font_size).sum::<f32>() / spans.len() as f32
}
