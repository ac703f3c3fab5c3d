//! Paragraphs of grouped text spans.

use serde::{Deserialize, Serialize};

use super::TextSpan;

/// A group of spans judged to form one continuous block of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Spans in reading order
    pub spans: Vec<TextSpan>,

    /// Smallest top edge of the spans
    pub top_y: f32,

    /// Largest bottom edge of the spans
    pub bottom_y: f32,

    /// Vertical gap to the previous paragraph on the page (0 for the first)
    pub space_before: f32,
}

impl Paragraph {
    /// Create a paragraph from spans, computing its vertical extent.
    pub fn from_spans(spans: Vec<TextSpan>) -> Self {
        if spans.is_empty() {
            return Self {
                spans,
                top_y: 0.0,
                bottom_y: 0.0,
                space_before: 0.0,
            };
        }

        let top_y = spans
            .iter()
            .map(|s| s.bbox.y0)
            .fold(f32::INFINITY, f32::min);
        let bottom_y = spans
            .iter()
            .map(|s| s.bbox.y1)
            .fold(f32::NEG_INFINITY, f32::max);

        Self {
            spans,
            top_y,
            bottom_y,
            space_before: 0.0,
        }
    }

    /// The first span, which drives heading classification.
    pub fn lead_span(&self) -> Option<&TextSpan> {
        self.spans.first()
    }

    /// Text of the paragraph as emitted: spans joined by single spaces.
    pub fn plain_text(&self) -> String {
        self.spans
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Character count of [`Paragraph::plain_text`].
    pub fn text_len(&self) -> usize {
        let spaces = self.spans.len().saturating_sub(1);
        self.spans.iter().map(|s| s.text.chars().count()).sum::<usize>() + spaces
    }

    /// Number of spans.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Check if the paragraph has no spans.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}
