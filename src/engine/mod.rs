//! Document reconstruction engine.
//!
//! The engine reads per-page primitives from an [`ExtractionSource`], derives
//! each page's reading-order content, and replays it against a
//! [`DocumentBuilder`]:
//!
//! 1. [`collector`] normalizes the page's spans
//! 2. [`table_style`] recovers cell colors from fills and spans
//! 3. spans inside tables are dropped and [`grouper`] builds paragraphs
//! 4. [`compositor`] orders paragraphs, images and tables and emits them
//!
//! Pages are independent until emission, so they can be composed in parallel;
//! emission itself is strictly sequential in page order.

pub mod collector;
pub mod compositor;
mod context;
pub mod grouper;
pub mod heading;
mod options;
mod stats;
pub mod table_style;

pub use compositor::Compositor;
pub use context::PageContext;
pub use grouper::ParagraphGrouper;
pub use heading::{HeadingClassifier, TextRole};
pub use options::{EngineOptions, ErrorMode, GrouperConfig, HeadingConfig};
pub use stats::ReconstructionStats;
pub use table_style::{OverlapMatcher, TableStyleResolver, ToleranceMatcher};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, trace, warn};
use rayon::prelude::*;

use crate::builder::DocumentBuilder;
use crate::error::{Error, Result};
use crate::model::{PageContent, TableElement};
use crate::source::ExtractionSource;

/// Emission state, advanced once per step and never revisiting a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EmitState {
    /// Fetching the composed content of a page
    ProcessingPage(usize),
    /// Replaying a page's items against the builder
    EmittingContent(usize),
    /// Deciding whether a page break follows the page
    PageBreakOrDone(usize),
    /// All pages handled
    Done,
}

/// Reconstructs flow documents from extracted page primitives.
pub struct Engine {
    options: EngineOptions,
    resolver: TableStyleResolver,
    grouper: ParagraphGrouper,
    compositor: Compositor,
    cancel: Option<Arc<AtomicBool>>,
}

impl Engine {
    /// Create an engine with the given options.
    pub fn new(options: EngineOptions) -> Self {
        Self {
            resolver: TableStyleResolver::new(options.match_tolerance),
            grouper: ParagraphGrouper::with_config(options.grouper),
            compositor: Compositor::new(
                HeadingClassifier::with_config(options.heading),
                options.max_image_width_in,
            ),
            cancel: None,
            options,
        }
    }

    /// Replace the spatial predicate used to match fills and spans to cells.
    pub fn with_matcher(mut self, matcher: Box<dyn OverlapMatcher>) -> Self {
        self.resolver = TableStyleResolver::with_matcher(matcher);
        self
    }

    /// Stop before the next page once `flag` is set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Engine options.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Derive one page's reading-order content.
    ///
    /// Failing to read spans, images or tables fails the page. Failing to
    /// read fill shapes only loses cell backgrounds.
    pub fn compose_page<S>(&self, source: &S, index: usize) -> Result<PageContent>
    where
        S: ExtractionSource + ?Sized,
    {
        let page_count = source.page_count();
        if index >= page_count {
            return Err(Error::PageOutOfRange(index, page_count));
        }

        let default_size = self.options.default_font_size;
        let raw_spans = source.text_spans(index)?;
        let images = source.images(index)?;
        let raw_tables = source.tables(index)?;
        let shapes = source.fill_shapes(index).unwrap_or_else(|e| {
            warn!(
                "Fill shapes unavailable on page {}, cell backgrounds dropped: {}",
                index + 1,
                e
            );
            Vec::new()
        });

        let spans = collector::collect(&raw_spans, default_size);
        let avg_font_size = collector::average_font_size(&spans, default_size);

        let tables: Vec<TableElement> = raw_tables
            .iter()
            .map(|table| self.resolver.resolve(table, &shapes, &spans))
            .collect();
        let body = grouper::exclude_table_spans(&spans, &tables);
        let paragraphs = self.grouper.group(body);

        debug!(
            "Page {}: {} spans, {} paragraphs, {} images, {} tables, avg font {:.1}pt",
            index + 1,
            spans.len(),
            paragraphs.len(),
            images.len(),
            tables.len(),
            avg_font_size
        );

        Ok(PageContent {
            index,
            items: compositor::compose(paragraphs, images, tables),
            avg_font_size,
            is_last: index + 1 == page_count,
        })
    }

    /// Composed pages in page order, computed eagerly in parallel or lazily.
    fn composed_pages<'a, S>(
        &'a self,
        source: &'a S,
    ) -> Box<dyn Iterator<Item = Result<PageContent>> + 'a>
    where
        S: ExtractionSource + Sync + ?Sized,
    {
        let page_count = source.page_count();
        if self.options.parallel {
            let pages: Vec<Result<PageContent>> = (0..page_count)
                .into_par_iter()
                .map(|index| self.compose_page(source, index))
                .collect();
            Box::new(pages.into_iter())
        } else {
            Box::new((0..page_count).map(move |index| self.compose_page(source, index)))
        }
    }

    /// Reconstruct the whole document into `builder`.
    ///
    /// Pages are emitted in order with exactly one page break between
    /// consecutive emitted pages. In [`ErrorMode::Lenient`] a failing page is
    /// skipped without leaving a stray break behind.
    pub fn reconstruct<S, B>(&self, source: &S, builder: &mut B) -> Result<ReconstructionStats>
    where
        S: ExtractionSource + Sync + ?Sized,
        B: DocumentBuilder,
    {
        let page_count = source.page_count();
        let mut pages = self.composed_pages(source);
        let mut stats = ReconstructionStats::new();
        let mut current: Option<PageContent> = None;
        let mut break_pending = false;
        let mut state = EmitState::ProcessingPage(0);

        while state != EmitState::Done {
            trace!("{:?}", state);
            state = match state {
                EmitState::ProcessingPage(index) if index >= page_count => EmitState::Done,
                EmitState::ProcessingPage(index) => {
                    if self.is_cancelled() {
                        return Err(Error::Cancelled { page: index });
                    }
                    match pages.next() {
                        Some(Ok(page)) => {
                            current = Some(page);
                            EmitState::EmittingContent(index)
                        }
                        Some(Err(e)) => match self.options.error_mode {
                            ErrorMode::Strict => return Err(e),
                            ErrorMode::Lenient => {
                                warn!("Skipping page {}: {}", index + 1, e);
                                stats.skipped_pages += 1;
                                EmitState::ProcessingPage(index + 1)
                            }
                        },
                        None => EmitState::Done,
                    }
                }
                EmitState::EmittingContent(index) => {
                    if let Some(page) = current.take() {
                        if break_pending {
                            builder.insert_page_break()?;
                            stats.page_breaks += 1;
                            break_pending = false;
                        }
                        let ctx = PageContext::new(
                            page.index,
                            page_count,
                            page.avg_font_size,
                            self.options.default_font_size,
                        );
                        self.compositor.emit_page(page.items, &ctx, builder, &mut stats);
                        stats.pages += 1;
                    }
                    EmitState::PageBreakOrDone(index)
                }
                EmitState::PageBreakOrDone(index) => {
                    if index + 1 < page_count {
                        break_pending = true;
                        EmitState::ProcessingPage(index + 1)
                    } else {
                        EmitState::Done
                    }
                }
                EmitState::Done => EmitState::Done,
            };
        }

        Ok(stats)
    }

    /// Reconstruct the document and finalize the builder.
    pub fn reconstruct_into<S, B>(
        &self,
        source: &S,
        mut builder: B,
    ) -> Result<(B::Output, ReconstructionStats)>
    where
        S: ExtractionSource + Sync + ?Sized,
        B: DocumentBuilder,
    {
        let stats = self.reconstruct(source, &mut builder)?;
        let output = builder.finalize()?;
        Ok((output, stats))
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("options", &self.options)
            .field("cancellable", &self.cancel.is_some())
            .finish_non_exhaustive()
    }
}
