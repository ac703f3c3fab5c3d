//! Text spans and colors.

use serde::{Deserialize, Serialize};

use crate::geometry::BBox;

/// An RGB color with channels normalized to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

impl Rgb {
    /// Pure black.
    pub const BLACK: Rgb = Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Pure white.
    pub const WHITE: Rgb = Rgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Create a color from normalized channels.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a packed `0xRRGGBB` integer.
    ///
    /// # Examples
    ///
    /// ```
    /// use reflow::model::Rgb;
    ///
    /// let red = Rgb::from_packed(0xFF0000);
    /// assert_eq!(red, Rgb::new(1.0, 0.0, 0.0));
    /// ```
    pub fn from_packed(color: u32) -> Self {
        Self {
            r: ((color >> 16) & 0xFF) as f32 / 255.0,
            g: ((color >> 8) & 0xFF) as f32 / 255.0,
            b: (color & 0xFF) as f32 / 255.0,
        }
    }

    /// Clamp every channel into `[0, 1]`. NaN channels become 0.
    pub fn clamped(&self) -> Self {
        let clamp = |c: f32| if c.is_nan() { 0.0 } else { c.clamp(0.0, 1.0) };
        Self {
            r: clamp(self.r),
            g: clamp(self.g),
            b: clamp(self.b),
        }
    }

    /// Check if this is pure white.
    pub fn is_white(&self) -> bool {
        self.r >= 1.0 && self.g >= 1.0 && self.b >= 1.0
    }
}

/// A run of text sharing one font, size and color, with its bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// Position on the page
    pub bbox: BBox,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    /// Text color
    pub color: Rgb,
    /// Bold weight
    pub is_bold: bool,
    /// Italic style
    pub is_italic: bool,
    /// Block number assigned by the extractor
    pub block_id: u32,
    /// Line number within the block
    pub line_id: u32,
}

impl TextSpan {
    /// Create a span with default styling (black, regular weight).
    pub fn new(text: impl Into<String>, bbox: BBox, font_size: f32) -> Self {
        Self {
            text: text.into(),
            bbox,
            font_name: String::new(),
            font_size,
            color: Rgb::BLACK,
            is_bold: false,
            is_italic: false,
            block_id: 0,
            line_id: 0,
        }
    }

    /// Set the block and line numbers.
    pub fn in_block(mut self, block_id: u32, line_id: u32) -> Self {
        self.block_id = block_id;
        self.line_id = line_id;
        self
    }

    /// Set the text color.
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    /// Mark the span bold.
    pub fn bold(mut self) -> Self {
        self.is_bold = true;
        self
    }
}
