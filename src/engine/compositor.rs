//! Reading-order composition and emission.
//!
//! [`compose`] merges a page's paragraphs, images and tables into a single
//! sequence sorted by top edge. [`Compositor`] then replays that sequence
//! against a [`DocumentBuilder`]. A builder failure on one item is logged and
//! only that item is skipped.

use log::{debug, warn};

use crate::builder::{CellStyle, DocumentBuilder, ParagraphFormat, RunStyle};
use crate::error::Result;
use crate::model::{ContentItem, ImageElement, Paragraph, TableElement, TextSpan};

use super::context::PageContext;
use super::heading::{HeadingClassifier, TextRole};
use super::stats::ReconstructionStats;

/// Points per inch.
const POINTS_PER_INCH: f32 = 72.0;

/// Merge a page's content into reading order.
///
/// Items are keyed by their top y-coordinate. The sort is stable, so ties
/// keep paragraphs before images before tables, each in discovery order.
/// NaN keys sort to the ends of the sequence.
pub fn compose(
    paragraphs: Vec<Paragraph>,
    images: Vec<ImageElement>,
    tables: Vec<TableElement>,
) -> Vec<ContentItem> {
    let mut items: Vec<ContentItem> =
        Vec::with_capacity(paragraphs.len() + images.len() + tables.len());
    items.extend(paragraphs.into_iter().map(ContentItem::Text));
    items.extend(images.into_iter().map(ContentItem::Image));
    items.extend(tables.into_iter().map(ContentItem::Table));

    items.sort_by(|a, b| (a.order_y() + 0.0).total_cmp(&(b.order_y() + 0.0)));
    items
}

/// Discretize a vertical gap in points into paragraph spacing.
pub fn spacing_bucket(space_before: f32) -> f32 {
    if space_before > 20.0 {
        12.0
    } else if space_before > 10.0 {
        6.0
    } else {
        0.0
    }
}

/// Emits composed items against a builder.
#[derive(Debug, Clone)]
pub struct Compositor {
    classifier: HeadingClassifier,
    max_image_width_in: f32,
}

impl Compositor {
    /// Create a compositor.
    pub fn new(classifier: HeadingClassifier, max_image_width_in: f32) -> Self {
        Self {
            classifier,
            max_image_width_in,
        }
    }

    /// Image width in inches, capped to fit the page.
    pub fn image_width_in(&self, image: &ImageElement) -> f32 {
        (image.width / POINTS_PER_INCH).min(self.max_image_width_in)
    }

    /// Emit one page's items in order.
    ///
    /// Builder failures are logged and counted per item and never stop the page.
    /// Builder calls are not transactional: when a run is rejected midway, the
    /// paragraph keeps the runs appended before it and still counts as skipped.
    pub fn emit_page<B: DocumentBuilder>(
        &self,
        items: Vec<ContentItem>,
        ctx: &PageContext,
        builder: &mut B,
        stats: &mut ReconstructionStats,
    ) {
        for (position, item) in items.into_iter().enumerate() {
            let kind = item.kind();
            let emitted = match item {
                ContentItem::Text(para) => self.emit_paragraph(&para, ctx, builder, stats),
                ContentItem::Image(image) => self.emit_image(image, ctx, builder, stats),
                ContentItem::Table(table) => self.emit_table(&table, ctx, builder, stats),
            };

            if let Err(e) = emitted {
                warn!(
                    "Skipping {} item {} on page {}: {}",
                    kind,
                    position,
                    ctx.page_number(),
                    e
                );
                stats.skipped_items += 1;
            }
        }
    }

    fn emit_paragraph<B: DocumentBuilder>(
        &self,
        para: &Paragraph,
        ctx: &PageContext,
        builder: &mut B,
        stats: &mut ReconstructionStats,
    ) -> Result<()> {
        if para.is_empty() {
            return Ok(());
        }

        let role = self.classifier.classify(para, ctx.avg_font_size);
        let format = ParagraphFormat {
            space_before_pt: spacing_bucket(para.space_before),
            heading_level: role.level(),
        };
        let handle = builder.new_paragraph(format)?;

        let last = para.spans.len() - 1;
        for (i, span) in para.spans.iter().enumerate() {
            let style = run_style(span);
            builder.append_run(handle, &span.text, style)?;
            stats.runs += 1;
            if i < last {
                builder.append_run(handle, " ", style)?;
                stats.runs += 1;
            }
        }

        match role {
            TextRole::Heading(_) => stats.headings += 1,
            TextRole::Body => stats.paragraphs += 1,
        }
        Ok(())
    }

    fn emit_image<B: DocumentBuilder>(
        &self,
        image: ImageElement,
        ctx: &PageContext,
        builder: &mut B,
        stats: &mut ReconstructionStats,
    ) -> Result<()> {
        if image.is_empty() {
            warn!("Skipping image with no data on page {}", ctx.page_number());
            stats.skipped_items += 1;
            return Ok(());
        }

        let width_in = self.image_width_in(&image);
        builder.append_image(image, width_in)?;
        stats.images += 1;
        Ok(())
    }

    fn emit_table<B: DocumentBuilder>(
        &self,
        table: &TableElement,
        ctx: &PageContext,
        builder: &mut B,
        stats: &mut ReconstructionStats,
    ) -> Result<()> {
        if table.is_empty() {
            warn!(
                "Skipping {}x{} table on page {}",
                table.rows,
                table.cols,
                ctx.page_number()
            );
            stats.skipped_items += 1;
            return Ok(());
        }

        if !table.is_consistent() {
            warn!(
                "Table on page {} declares {}x{} but has {} cells",
                ctx.page_number(),
                table.rows,
                table.cols,
                table.cells.len()
            );
        }

        let handle = builder.new_table(table.rows, table.cols)?;
        stats.tables += 1;

        for cell in &table.cells {
            if !table.in_bounds(cell) {
                debug!(
                    "Cell ({}, {}) outside {}x{} table on page {}",
                    cell.row,
                    cell.col,
                    table.rows,
                    table.cols,
                    ctx.page_number()
                );
                stats.skipped_cells += 1;
                continue;
            }

            let style = CellStyle {
                size_pt: cell.font_size_or(ctx.default_font_size),
                bold: cell.is_bold,
                color: cell.text_color_or_default(),
                background: cell.background_color,
            };
            match builder.set_cell(handle, cell.row, cell.col, &cell.text, style) {
                Ok(()) => stats.cells += 1,
                Err(e) => {
                    warn!(
                        "Skipping cell ({}, {}) on page {}: {}",
                        cell.row,
                        cell.col,
                        ctx.page_number(),
                        e
                    );
                    stats.skipped_cells += 1;
                }
            }
        }

        // Empty spacer paragraph separating the table from what follows
        if let Err(e) = builder.new_paragraph(ParagraphFormat::body(0.0)) {
            debug!("No spacer after table on page {}: {}", ctx.page_number(), e);
        }
        Ok(())
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(HeadingClassifier::default(), 6.0)
    }
}

fn run_style(span: &TextSpan) -> RunStyle {
    RunStyle {
        size_pt: span.font_size,
        bold: span.is_bold,
        italic: span.is_italic,
        color: span.color,
    }
}
