//! Builder that records every call as an event.

use serde::{Deserialize, Serialize};

use super::{CellStyle, DocumentBuilder, ParagraphFormat, ParagraphHandle, RunStyle, TableHandle};
use crate::error::{Error, Result};
use crate::model::{ImageElement, ImageEncoding, Rgb};

/// One recorded builder call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BuildEvent {
    /// A paragraph was opened
    Paragraph {
        space_before_pt: f32,
        heading_level: Option<u8>,
    },
    /// A run was appended to a paragraph
    Run {
        paragraph: usize,
        text: String,
        size_pt: f32,
        bold: bool,
        italic: bool,
        color: Rgb,
    },
    /// An image was appended
    Image {
        width_in: f32,
        encoding: ImageEncoding,
        byte_len: usize,
    },
    /// A table was created
    Table { rows: usize, cols: usize },
    /// A table cell was set
    Cell {
        table: usize,
        row: usize,
        col: usize,
        text: String,
        size_pt: f32,
        bold: bool,
        color: Rgb,
        background: Option<Rgb>,
    },
    /// A page break was inserted
    PageBreak,
}

/// [`DocumentBuilder`] that keeps an in-memory log of calls.
///
/// Useful for inspecting reconstruction output and as the `events` output
/// format of the command line tool.
#[derive(Debug, Clone, Default)]
pub struct RecordingBuilder {
    events: Vec<BuildEvent>,
    paragraphs: usize,
    tables: Vec<(usize, usize)>,
}

impl RecordingBuilder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far.
    pub fn events(&self) -> &[BuildEvent] {
        &self.events
    }

    /// Number of page breaks recorded so far.
    pub fn page_breaks(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, BuildEvent::PageBreak))
            .count()
    }
}

impl DocumentBuilder for RecordingBuilder {
    type Output = Vec<BuildEvent>;

    fn new_paragraph(&mut self, format: ParagraphFormat) -> Result<ParagraphHandle> {
        self.events.push(BuildEvent::Paragraph {
            space_before_pt: format.space_before_pt,
            heading_level: format.heading_level,
        });
        let handle = ParagraphHandle(self.paragraphs);
        self.paragraphs += 1;
        Ok(handle)
    }

    fn append_run(
        &mut self,
        paragraph: ParagraphHandle,
        text: &str,
        style: RunStyle,
    ) -> Result<()> {
        if paragraph.0 >= self.paragraphs {
            return Err(Error::builder(format!("unknown paragraph {}", paragraph.0)));
        }
        self.events.push(BuildEvent::Run {
            paragraph: paragraph.0,
            text: text.to_string(),
            size_pt: style.size_pt,
            bold: style.bold,
            italic: style.italic,
            color: style.color,
        });
        Ok(())
    }

    fn append_image(&mut self, image: ImageElement, width_in: f32) -> Result<()> {
        self.events.push(BuildEvent::Image {
            width_in,
            encoding: image.encoding,
            byte_len: image.size(),
        });
        Ok(())
    }

    fn new_table(&mut self, rows: usize, cols: usize) -> Result<TableHandle> {
        self.events.push(BuildEvent::Table { rows, cols });
        self.tables.push((rows, cols));
        Ok(TableHandle(self.tables.len() - 1))
    }

    fn set_cell(
        &mut self,
        table: TableHandle,
        row: usize,
        col: usize,
        text: &str,
        style: CellStyle,
    ) -> Result<()> {
        let Some(&(rows, cols)) = self.tables.get(table.0) else {
            return Err(Error::builder(format!("unknown table {}", table.0)));
        };
        if row >= rows || col >= cols {
            return Err(Error::builder(format!(
                "cell ({}, {}) outside {}x{} table",
                row, col, rows, cols
            )));
        }
        self.events.push(BuildEvent::Cell {
            table: table.0,
            row,
            col,
            text: text.to_string(),
            size_pt: style.size_pt,
            bold: style.bold,
            color: style.color,
            background: style.background,
        });
        Ok(())
    }

    fn insert_page_break(&mut self) -> Result<()> {
        self.events.push(BuildEvent::PageBreak);
        Ok(())
    }

    fn finalize(self) -> Result<Self::Output> {
        Ok(self.events)
    }
}
