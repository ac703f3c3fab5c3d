//! Per-page state shared by composition and emission.

/// Values derived once per page and read by the emitters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageContext {
    /// 0-based page index
    pub index: usize,
    /// Mean span font size on the page, or the default when it has no spans
    pub avg_font_size: f32,
    /// Font size for table cells whose size could not be recovered
    pub default_font_size: f32,
    /// Whether this is the document's last page
    pub is_last: bool,
}

impl PageContext {
    /// Create a context for the page at `index` of `page_count` pages.
    pub fn new(
        index: usize,
        page_count: usize,
        avg_font_size: f32,
        default_font_size: f32,
    ) -> Self {
        Self {
            index,
            avg_font_size,
            default_font_size,
            is_last: index + 1 >= page_count,
        }
    }

    /// 1-based page number, for messages.
    pub fn page_number(&self) -> usize {
        self.index + 1
    }
}
