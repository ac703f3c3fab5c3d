//! Content items and composed pages.

use serde::{Deserialize, Serialize};

use super::{ImageElement, Paragraph, TableElement};

/// The unit of reading-order sequencing on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItem {
    /// A paragraph of text
    Text(Paragraph),

    /// A raster image
    Image(ImageElement),

    /// A table with resolved cell styling
    Table(TableElement),
}

impl ContentItem {
    /// Sort key: the item's top y-coordinate.
    pub fn order_y(&self) -> f32 {
        match self {
            ContentItem::Text(p) => p.top_y,
            ContentItem::Image(img) => img.bbox.y0,
            ContentItem::Table(t) => t.bbox.y0,
        }
    }

    /// Short name of the item kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentItem::Text(_) => "text",
            ContentItem::Image(_) => "image",
            ContentItem::Table(_) => "table",
        }
    }

    /// Check if this item is a paragraph.
    pub fn is_text(&self) -> bool {
        matches!(self, ContentItem::Text(_))
    }

    /// Check if this item is an image.
    pub fn is_image(&self) -> bool {
        matches!(self, ContentItem::Image(_))
    }

    /// Check if this item is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, ContentItem::Table(_))
    }
}

/// One page's composed content, ready to be emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    /// 0-based page index
    pub index: usize,

    /// Items in reading order
    pub items: Vec<ContentItem>,

    /// Average span font size on the page (before table exclusion)
    pub avg_font_size: f32,

    /// Whether this is the document's last page
    pub is_last: bool,
}

impl PageContent {
    /// Check if the page has no content items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of content items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Iterate over the sort keys in order.
    pub fn order_keys(&self) -> impl Iterator<Item = f32> + '_ {
        self.items.iter().map(ContentItem::order_y)
    }
}
