//! In-memory extraction source backed by a serialized extraction dump.
//!
//! The dump mirrors what a PDF model reports per page: raw spans with packed
//! colors and font flags, base64 image payloads, table grids and fill shapes.

use std::io::Read;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use super::ExtractionSource;
use crate::engine::collector;
use crate::error::{Error, Result};
use crate::geometry::BBox;
use crate::model::{
    FillShape, ImageElement, ImageEncoding, Rgb, TableCell, TableElement, TextSpan,
};

/// A text span exactly as the PDF model reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSpan {
    /// Text content
    pub text: String,
    /// `[x0, y0, x1, y1]`
    pub bbox: [f32; 4],
    /// Font name
    #[serde(default)]
    pub font: String,
    /// Font size in points
    #[serde(default)]
    pub size: f32,
    /// Packed `0xRRGGBB` color
    #[serde(default)]
    pub color: u32,
    /// Font flags bit-field (bit 1 italic, bit 4 bold)
    #[serde(default)]
    pub flags: u32,
    /// Block number
    #[serde(default)]
    pub block_no: u32,
    /// Line number within the block
    #[serde(default)]
    pub line_no: u32,
}

/// An image entry of the dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedImage {
    /// Base64-encoded image bytes
    pub data: String,
    /// `[x0, y0, x1, y1]`
    pub bbox: [f32; 4],
    /// Displayed width; defaults to the bbox width
    #[serde(default)]
    pub width: Option<f32>,
    /// Displayed height; defaults to the bbox height
    #[serde(default)]
    pub height: Option<f32>,
    /// File extension reported by the extractor
    #[serde(default)]
    pub ext: Option<String>,
}

/// A table cell entry of the dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedCell {
    /// Cell text
    #[serde(default)]
    pub text: String,
    /// 0-based row
    pub row: usize,
    /// 0-based column
    pub col: usize,
    /// `[x0, y0, x1, y1]`, absent when the grid has no cell positions
    #[serde(default)]
    pub bbox: Option<[f32; 4]>,
}

/// A table entry of the dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedTable {
    /// Cells of the grid
    pub cells: Vec<ExtractedCell>,
    /// Row count
    pub rows: usize,
    /// Column count
    pub cols: usize,
    /// `[x0, y0, x1, y1]`
    pub bbox: [f32; 4],
}

/// A fill shape entry of the dump.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtractedFill {
    /// `[x0, y0, x1, y1]`
    pub bbox: [f32; 4],
    /// Normalized `[r, g, b]`
    pub color: [f32; 3],
}

/// One page of the dump.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedPage {
    /// Raw spans
    #[serde(default)]
    pub spans: Vec<RawSpan>,
    /// Images
    #[serde(default)]
    pub images: Vec<ExtractedImage>,
    /// Tables
    #[serde(default)]
    pub tables: Vec<ExtractedTable>,
    /// Fill shapes
    #[serde(default)]
    pub fills: Vec<ExtractedFill>,
    /// Extraction failure recorded by the producer of the dump
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A whole extraction dump.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// Pages in order
    pub pages: Vec<ExtractedPage>,
}

/// [`ExtractionSource`] over an [`ExtractedDocument`] held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    doc: ExtractedDocument,
}

impl MemorySource {
    /// Wrap an already-parsed dump.
    pub fn from_document(doc: ExtractedDocument) -> Self {
        Self { doc }
    }

    /// Parse a JSON dump.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: ExtractedDocument = serde_json::from_str(json)?;
        Ok(Self::from_document(doc))
    }

    /// Parse a JSON dump from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let doc: ExtractedDocument = serde_json::from_reader(reader)?;
        Ok(Self::from_document(doc))
    }

    /// Load a JSON dump from a file.
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Access the underlying dump.
    pub fn document(&self) -> &ExtractedDocument {
        &self.doc
    }

    fn page(&self, page: usize) -> Result<&ExtractedPage> {
        let p = self
            .doc
            .pages
            .get(page)
            .ok_or(Error::PageOutOfRange(page, self.doc.pages.len()))?;
        match &p.error {
            Some(message) => Err(Error::source(page, message.clone())),
            None => Ok(p),
        }
    }
}

impl ExtractionSource for MemorySource {
    fn page_count(&self) -> usize {
        self.doc.pages.len()
    }

    fn text_spans(&self, page: usize) -> Result<Vec<TextSpan>> {
        Ok(self
            .page(page)?
            .spans
            .iter()
            .filter(|s| !s.text.trim().is_empty())
            .map(collector::from_raw)
            .collect())
    }

    fn images(&self, page: usize) -> Result<Vec<ImageElement>> {
        let mut images = Vec::new();
        for (i, img) in self.page(page)?.images.iter().enumerate() {
            let data = match STANDARD.decode(img.data.as_bytes()) {
                Ok(data) => data,
                Err(e) => {
                    log::warn!("Skipping image {} on page {}: {}", i, page, e);
                    continue;
                }
            };

            let bbox = BBox::from_array(img.bbox).normalized();
            let mut element = ImageElement::new(data, bbox);
            if let Some(ext) = &img.ext {
                let declared = ImageEncoding::from_extension(ext);
                if declared != ImageEncoding::Unknown {
                    element = element.with_encoding(declared);
                }
            }
            if img.width.is_some() || img.height.is_some() {
                let width = img.width.unwrap_or(element.width);
                let height = img.height.unwrap_or(element.height);
                element = element.with_dimensions(width, height);
            }
            images.push(element);
        }
        Ok(images)
    }

    fn tables(&self, page: usize) -> Result<Vec<TableElement>> {
        Ok(self
            .page(page)?
            .tables
            .iter()
            .map(|t| {
                let cells = t
                    .cells
                    .iter()
                    .map(|c| {
                        let bbox = c
                            .bbox
                            .map(|b| BBox::from_array(b).normalized())
                            .unwrap_or_default();
                        TableCell::new(c.text.clone(), c.row, c.col).with_bbox(bbox)
                    })
                    .collect();
                TableElement::new(cells, t.rows, t.cols, BBox::from_array(t.bbox).normalized())
            })
            .collect())
    }

    fn fill_shapes(&self, page: usize) -> Result<Vec<FillShape>> {
        Ok(self
            .page(page)?
            .fills
            .iter()
            .map(|f| {
                FillShape::new(
                    BBox::from_array(f.bbox).normalized(),
                    Rgb::new(f.color[0], f.color[1], f.color[2]).clamped(),
                )
            })
            .collect())
    }
}
