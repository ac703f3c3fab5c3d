//! Source extraction interface.
//!
//! Provides a trait-based interface over the external PDF model, isolating
//! the reconstruction engine from whatever library decodes the PDF. The
//! engine only reads from a source and never mutates what it returns.

mod memory;

pub use memory::{
    ExtractedCell, ExtractedDocument, ExtractedFill, ExtractedImage, ExtractedPage, ExtractedTable,
    MemorySource, RawSpan,
};

use crate::error::Result;
use crate::model::{FillShape, ImageElement, TableElement, TextSpan};

/// Abstract interface for per-page primitive extraction.
///
/// Coordinates are page-local points with the origin at the top-left corner;
/// colors are normalized RGB triples. Pages are addressed by 0-based index.
pub trait ExtractionSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Positioned text spans of a page.
    fn text_spans(&self, page: usize) -> Result<Vec<TextSpan>>;

    /// Raster images of a page.
    fn images(&self, page: usize) -> Result<Vec<ImageElement>>;

    /// Raw table grids detected on a page.
    fn tables(&self, page: usize) -> Result<Vec<TableElement>>;

    /// Vector fill shapes of a page.
    fn fill_shapes(&self, page: usize) -> Result<Vec<FillShape>>;
}

impl<S: ExtractionSource + ?Sized> ExtractionSource for &S {
    fn page_count(&self) -> usize {
        (**self).page_count()
    }

    fn text_spans(&self, page: usize) -> Result<Vec<TextSpan>> {
        (**self).text_spans(page)
    }

    fn images(&self, page: usize) -> Result<Vec<ImageElement>> {
        (**self).images(page)
    }

    fn tables(&self, page: usize) -> Result<Vec<TableElement>> {
        (**self).tables(page)
    }

    fn fill_shapes(&self, page: usize) -> Result<Vec<FillShape>> {
        (**self).fill_shapes(page)
    }
}
