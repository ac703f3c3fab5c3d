//! Target document-builder interface.
//!
//! The engine drives a [`DocumentBuilder`] in strict emission order and never
//! reads anything back from it. Implementations own the output format.
//!
//! # Example
//!
//! ```
//! use reflow::builder::{DocumentBuilder, ParagraphFormat, RecordingBuilder, RunStyle};
//! use reflow::model::Rgb;
//!
//! let mut builder = RecordingBuilder::new();
//! let para = builder.new_paragraph(ParagraphFormat::heading(1)).unwrap();
//! builder
//!     .append_run(para, "Introduction", RunStyle::new(18.0).with_color(Rgb::BLACK))
//!     .unwrap();
//! let events = builder.finalize().unwrap();
//! assert_eq!(events.len(), 2);
//! ```

mod markdown;
mod recording;

pub use markdown::MarkdownBuilder;
pub use recording::{BuildEvent, RecordingBuilder};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{ImageElement, Rgb};

/// Opaque reference to a paragraph created by a builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParagraphHandle(pub usize);

/// Opaque reference to a table created by a builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableHandle(pub usize);

/// Paragraph-level formatting.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ParagraphFormat {
    /// Space above the paragraph in points
    pub space_before_pt: f32,

    /// Heading level (1-2) or `None` for body text
    pub heading_level: Option<u8>,
}

impl ParagraphFormat {
    /// Body paragraph with the given leading space.
    pub fn body(space_before_pt: f32) -> Self {
        Self {
            space_before_pt,
            heading_level: None,
        }
    }

    /// Heading paragraph without leading space.
    pub fn heading(level: u8) -> Self {
        Self {
            space_before_pt: 0.0,
            heading_level: Some(level),
        }
    }
}

/// Character formatting of a text run. The color is always explicit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunStyle {
    /// Font size in points
    pub size_pt: f32,
    /// Bold
    pub bold: bool,
    /// Italic
    pub italic: bool,
    /// Text color
    pub color: Rgb,
}

impl RunStyle {
    /// Regular black run of the given size.
    pub fn new(size_pt: f32) -> Self {
        Self {
            size_pt,
            bold: false,
            italic: false,
            color: Rgb::BLACK,
        }
    }

    /// Set the color.
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    /// Set bold and italic.
    pub fn with_emphasis(mut self, bold: bool, italic: bool) -> Self {
        self.bold = bold;
        self.italic = italic;
        self
    }
}

/// Formatting of a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellStyle {
    /// Font size in points
    pub size_pt: f32,
    /// Bold
    pub bold: bool,
    /// Text color
    pub color: Rgb,
    /// Cell shading, if any
    pub background: Option<Rgb>,
}

/// Sink for reconstructed document content.
///
/// Per-item errors returned by these methods are logged and the item is
/// skipped; errors from [`DocumentBuilder::insert_page_break`] abort the
/// document.
pub trait DocumentBuilder {
    /// What [`DocumentBuilder::finalize`] produces.
    type Output;

    /// Open a new paragraph.
    fn new_paragraph(&mut self, format: ParagraphFormat) -> Result<ParagraphHandle>;

    /// Append a styled run of text to a paragraph.
    fn append_run(&mut self, paragraph: ParagraphHandle, text: &str, style: RunStyle) -> Result<()>;

    /// Append an image scaled to `width_in` inches; the aspect ratio is kept.
    fn append_image(&mut self, image: ImageElement, width_in: f32) -> Result<()>;

    /// Create an empty `rows x cols` table.
    fn new_table(&mut self, rows: usize, cols: usize) -> Result<TableHandle>;

    /// Set the text and formatting of one table cell.
    fn set_cell(
        &mut self,
        table: TableHandle,
        row: usize,
        col: usize,
        text: &str,
        style: CellStyle,
    ) -> Result<()>;

    /// Insert a page break.
    fn insert_page_break(&mut self) -> Result<()>;

    /// Finish the document and return the output.
    fn finalize(self) -> Result<Self::Output>
    where
        Self: Sized;
}
