//! Data model for page primitives and composed content.
//!
//! Spans, images, tables and fill shapes arrive from the extraction source;
//! paragraphs and content items are derived per page by the engine. Every
//! value here is created fresh for a page and discarded once emitted.

mod image;
mod page;
mod paragraph;
mod span;
mod table;

pub use image::{ImageElement, ImageEncoding};
pub use page::{ContentItem, PageContent};
pub use paragraph::Paragraph;
pub use span::{Rgb, TextSpan};
pub use table::{FillShape, TableCell, TableElement};
