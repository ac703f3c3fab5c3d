//! Heading classification.
//!
//! PDFs carry no semantic heading markup, so headings are guessed from the
//! lead span's size relative to the page average, its weight, and brevity.
//! Misclassifications are expected and accepted.

use crate::model::Paragraph;

use super::options::HeadingConfig;

/// Role of a paragraph in the output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextRole {
    /// Body text
    #[default]
    Body,
    /// Heading of the given level (1 or 2)
    Heading(u8),
}

impl TextRole {
    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, TextRole::Heading(_))
    }

    /// Heading level, or `None` for body text.
    pub fn level(&self) -> Option<u8> {
        match self {
            TextRole::Heading(level) => Some(*level),
            TextRole::Body => None,
        }
    }
}

/// Labels paragraphs as headings or body text.
#[derive(Debug, Clone, Default)]
pub struct HeadingClassifier {
    config: HeadingConfig,
}

impl HeadingClassifier {
    /// Create a classifier with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with custom thresholds.
    pub fn with_config(config: HeadingConfig) -> Self {
        Self { config }
    }

    /// Classify a paragraph against the page's average font size.
    ///
    /// A paragraph is a heading when its lead span is larger than
    /// `avg * size_ratio` or bold, and its text is shorter than `max_chars`.
    /// Level 1 needs a lead span larger than `avg * level_one_ratio`.
    pub fn classify(&self, paragraph: &Paragraph, avg_font_size: f32) -> TextRole {
        let Some(lead) = paragraph.lead_span() else {
            return TextRole::Body;
        };

        let is_larger = lead.font_size > avg_font_size * self.config.size_ratio;
        let is_short = paragraph.text_len() < self.config.max_chars;

        if !((is_larger || lead.is_bold) && is_short) {
            return TextRole::Body;
        }

        if lead.font_size > avg_font_size * self.config.level_one_ratio {
            TextRole::Heading(1)
        } else {
            TextRole::Heading(2)
        }
    }
}
