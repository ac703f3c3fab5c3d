//! # reflow
//!
//! Document reconstruction from extracted PDF page primitives.
//!
//! A PDF page is a bag of positioned glyph runs, images, table grids and
//! filled rectangles. This library turns those primitives into an ordered,
//! styled flow document (paragraphs, headings, images, tables and page
//! breaks) by driving a [`DocumentBuilder`] that owns the output format.
//!
//! ## Quick Start
//!
//! ```no_run
//! use reflow::{to_markdown, MemorySource};
//!
//! fn main() -> reflow::Result<()> {
//!     // Load primitives dumped by an extractor
//!     let source = MemorySource::open("extraction.json")?;
//!
//!     let markdown = to_markdown(&source)?;
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Span collection**: normalize text, colors and font metadata
//! - **Table styling**: recover cell shading and text color from vector fills
//! - **Paragraph grouping**: cluster spans into lines and paragraphs
//! - **Heading classification**: size and weight heuristics per paragraph
//! - **Reading order**: interleave text, images and tables by vertical position
//! - **Parallel processing**: pages are composed with Rayon, emitted in order

pub mod builder;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod model;
pub mod source;

// Re-export commonly used types
pub use builder::{
    BuildEvent, CellStyle, DocumentBuilder, MarkdownBuilder, ParagraphFormat, ParagraphHandle,
    RecordingBuilder, RunStyle, TableHandle,
};
pub use engine::{
    Engine, EngineOptions, ErrorMode, GrouperConfig, HeadingConfig, OverlapMatcher,
    ReconstructionStats, ToleranceMatcher,
};
pub use error::{Error, Result};
pub use geometry::BBox;
pub use model::{
    ContentItem, FillShape, ImageElement, ImageEncoding, PageContent, Paragraph, Rgb, TableCell,
    TableElement, TextSpan,
};
pub use source::{ExtractionSource, MemorySource};

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Reconstruct a document into `builder` with default options.
///
/// Returns the builder's finalized output along with statistics.
///
/// # Example
///
/// ```
/// use reflow::{reconstruct, MemorySource, RecordingBuilder};
///
/// let source = MemorySource::from_json(r#"{"pages": [{"spans": []}, {"spans": []}]}"#)?;
/// let (events, stats) = reconstruct(&source, RecordingBuilder::new())?;
/// assert_eq!(stats.page_breaks, 1);
/// assert_eq!(events.len(), 1);
/// # Ok::<(), reflow::Error>(())
/// ```
pub fn reconstruct<S, B>(source: &S, builder: B) -> Result<(B::Output, ReconstructionStats)>
where
    S: ExtractionSource + Sync + ?Sized,
    B: DocumentBuilder,
{
    reconstruct_with_options(source, builder, EngineOptions::default())
}

/// Reconstruct a document into `builder` with custom options.
///
/// # Example
///
/// ```no_run
/// use reflow::{reconstruct_with_options, EngineOptions, MarkdownBuilder, MemorySource};
///
/// let source = MemorySource::open("extraction.json").unwrap();
/// let options = EngineOptions::new().lenient().sequential();
/// let (markdown, _stats) =
///     reconstruct_with_options(&source, MarkdownBuilder::new(), options).unwrap();
/// ```
pub fn reconstruct_with_options<S, B>(
    source: &S,
    builder: B,
    options: EngineOptions,
) -> Result<(B::Output, ReconstructionStats)>
where
    S: ExtractionSource + Sync + ?Sized,
    B: DocumentBuilder,
{
    Engine::new(options).reconstruct_into(source, builder)
}

/// Reconstruct a document as Markdown.
pub fn to_markdown<S>(source: &S) -> Result<String>
where
    S: ExtractionSource + Sync + ?Sized,
{
    let (markdown, _) = reconstruct(source, MarkdownBuilder::new())?;
    Ok(markdown)
}

/// Reconstruct a document as a list of builder events.
pub fn to_events<S>(source: &S) -> Result<Vec<BuildEvent>>
where
    S: ExtractionSource + Sync + ?Sized,
{
    let (events, _) = reconstruct(source, RecordingBuilder::new())?;
    Ok(events)
}

/// Builder for configuring and running reconstruction.
///
/// # Example
///
/// ```no_run
/// use reflow::{MemorySource, Reflow};
///
/// let source = MemorySource::open("extraction.json")?;
/// let markdown = Reflow::new()
///     .lenient()
///     .sequential()
///     .with_gap_factor(1.5)
///     .to_markdown(&source)?;
/// # Ok::<(), reflow::Error>(())
/// ```
pub struct Reflow {
    options: EngineOptions,
    matcher: Option<Box<dyn OverlapMatcher>>,
    cancel: Option<Arc<AtomicBool>>,
}

impl Reflow {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: EngineOptions::default(),
            matcher: None,
            cancel: None,
        }
    }

    /// Replace all engine options.
    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Skip pages whose extraction fails.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    /// Disable parallel page composition.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Set the same-block continuation gap multiplier.
    pub fn with_gap_factor(mut self, factor: f32) -> Self {
        self.options = self.options.with_continuation_gap_factor(factor);
        self
    }

    /// Use a custom spatial matcher for table styling.
    pub fn with_matcher(mut self, matcher: Box<dyn OverlapMatcher>) -> Self {
        self.matcher = Some(matcher);
        self
    }

    /// Stop before the next page once `flag` is set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Build the configured engine.
    pub fn engine(self) -> Engine {
        let mut engine = Engine::new(self.options);
        if let Some(matcher) = self.matcher {
            engine = engine.with_matcher(matcher);
        }
        if let Some(flag) = self.cancel {
            engine = engine.with_cancel_flag(flag);
        }
        engine
    }

    /// Reconstruct into any builder.
    pub fn convert<S, B>(self, source: &S, builder: B) -> Result<(B::Output, ReconstructionStats)>
    where
        S: ExtractionSource + Sync + ?Sized,
        B: DocumentBuilder,
    {
        self.engine().reconstruct_into(source, builder)
    }

    /// Reconstruct as Markdown.
    pub fn to_markdown<S>(self, source: &S) -> Result<String>
    where
        S: ExtractionSource + Sync + ?Sized,
    {
        let (markdown, _) = self.convert(source, MarkdownBuilder::new())?;
        Ok(markdown)
    }

    /// Reconstruct as builder events.
    pub fn to_events<S>(self, source: &S) -> Result<Vec<BuildEvent>>
    where
        S: ExtractionSource + Sync + ?Sized,
    {
        let (events, _) = self.convert(source, RecordingBuilder::new())?;
        Ok(events)
    }
}

impl Default for Reflow {
    fn default() -> Self {
        Self::new()
    }
}
