//! Markdown output.

use super::{CellStyle, DocumentBuilder, ParagraphFormat, ParagraphHandle, RunStyle, TableHandle};
use crate::error::{Error, Result};
use crate::model::ImageElement;

/// A block of output, rendered on finalize.
#[derive(Debug, Clone)]
enum MdBlock {
    Paragraph {
        heading_level: Option<u8>,
        text: String,
    },
    Image {
        alt: String,
        path: String,
    },
    Table {
        cols: usize,
        cells: Vec<Vec<String>>,
    },
    PageBreak,
}

/// [`DocumentBuilder`] producing a Markdown string.
///
/// Headings become `#`/`##`, bold and italic runs get emphasis markers,
/// tables become pipe tables with row 0 as the header, and page breaks
/// become horizontal rules. Images are referenced as `image-N.ext`; the
/// payloads are kept and available from [`MarkdownBuilder::images`].
#[derive(Debug, Clone, Default)]
pub struct MarkdownBuilder {
    blocks: Vec<MdBlock>,
    images: Vec<(String, Vec<u8>)>,
    escape_special_chars: bool,
}

impl MarkdownBuilder {
    /// Create a builder that escapes Markdown syntax in text.
    pub fn new() -> Self {
        Self {
            escape_special_chars: true,
            ..Default::default()
        }
    }

    /// Enable or disable escaping of Markdown syntax characters.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Image file names and payloads referenced so far.
    pub fn images(&self) -> &[(String, Vec<u8>)] {
        &self.images
    }

    fn paragraph_text(&mut self, handle: ParagraphHandle) -> Result<&mut String> {
        match self.blocks.get_mut(handle.0) {
            Some(MdBlock::Paragraph { text, .. }) => Ok(text),
            _ => Err(Error::builder(format!("unknown paragraph {}", handle.0))),
        }
    }

    fn escape(&self, text: &str) -> String {
        if self.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }

    /// Render the document without consuming the builder.
    pub fn render(&self) -> String {
        let mut output = String::new();
        for block in &self.blocks {
            match block {
                MdBlock::Paragraph {
                    heading_level,
                    text,
                } => {
                    let text = text.trim();
                    if text.is_empty() {
                        continue;
                    }
                    if let Some(level) = heading_level {
                        output.push_str(&"#".repeat(*level as usize));
                        output.push(' ');
                    }
                    output.push_str(text);
                    output.push_str("\n\n");
                }
                MdBlock::Image { alt, path } => {
                    output.push_str(&format!("![{}]({})\n\n", alt, path));
                }
                MdBlock::Table { cols, cells } => render_table(&mut output, *cols, cells),
                MdBlock::PageBreak => output.push_str("---\n\n"),
            }
        }

        let trimmed = output.trim_end().len();
        output.truncate(trimmed);
        if !output.is_empty() {
            output.push('\n');
        }
        output
    }
}

impl DocumentBuilder for MarkdownBuilder {
    type Output = String;

    fn new_paragraph(&mut self, format: ParagraphFormat) -> Result<ParagraphHandle> {
        self.blocks.push(MdBlock::Paragraph {
            heading_level: format.heading_level,
            text: String::new(),
        });
        Ok(ParagraphHandle(self.blocks.len() - 1))
    }

    fn append_run(
        &mut self,
        paragraph: ParagraphHandle,
        text: &str,
        style: RunStyle,
    ) -> Result<()> {
        let is_heading = matches!(
            self.blocks.get(paragraph.0),
            Some(MdBlock::Paragraph {
                heading_level: Some(_),
                ..
            })
        );

        let styled = if text.trim().is_empty() {
            text.to_string()
        } else {
            // Heading markup already implies weight
            let bold = style.bold && !is_heading;
            apply_text_style(&self.escape(text), bold, style.italic)
        };
        self.paragraph_text(paragraph)?.push_str(&styled);
        Ok(())
    }

    fn append_image(&mut self, image: ImageElement, _width_in: f32) -> Result<()> {
        let number = self.images.len() + 1;
        let path = format!("image-{}.{}", number, image.encoding.extension());
        self.blocks.push(MdBlock::Image {
            alt: format!("image {}", number),
            path: path.clone(),
        });
        self.images.push((path, image.data));
        Ok(())
    }

    fn new_table(&mut self, rows: usize, cols: usize) -> Result<TableHandle> {
        self.blocks.push(MdBlock::Table {
            cols,
            cells: vec![vec![String::new(); cols]; rows],
        });
        Ok(TableHandle(self.blocks.len() - 1))
    }

    fn set_cell(
        &mut self,
        table: TableHandle,
        row: usize,
        col: usize,
        text: &str,
        style: CellStyle,
    ) -> Result<()> {
        let content = self.escape(&text.replace('\n', " "));
        let content = content.trim();
        let content = if style.bold && !content.is_empty() {
            format!("**{}**", content)
        } else {
            content.to_string()
        };

        let Some(MdBlock::Table { cells, .. }) = self.blocks.get_mut(table.0) else {
            return Err(Error::builder(format!("unknown table {}", table.0)));
        };
        let slot = cells
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or_else(|| Error::builder(format!("cell ({}, {}) outside table", row, col)))?;
        *slot = content;
        Ok(())
    }

    fn insert_page_break(&mut self) -> Result<()> {
        self.blocks.push(MdBlock::PageBreak);
        Ok(())
    }

    fn finalize(self) -> Result<Self::Output> {
        Ok(self.render())
    }
}

fn apply_text_style(text: &str, bold: bool, italic: bool) -> String {
    // Keep surrounding whitespace outside the markers
    let start = text.len() - text.trim_start().len();
    let end = text.trim_end().len();
    let (lead, core, tail) = (&text[..start], &text[start..end], &text[end..]);

    let mut result = core.to_string();
    if italic {
        result = format!("*{}*", result);
    }
    if bold {
        result = format!("**{}**", result);
    }
    format!("{}{}{}", lead, result, tail)
}

fn render_table(output: &mut String, cols: usize, cells: &[Vec<String>]) {
    if cols == 0 || cells.is_empty() {
        return;
    }

    for (i, row) in cells.iter().enumerate() {
        output.push('|');
        for cell in row {
            output.push_str(&format!(" {} |", cell));
        }
        output.push('\n');

        if i == 0 {
            output.push('|');
            output.push_str(&" --- |".repeat(cols));
            output.push('\n');
        }
    }
    output.push('\n');
}

/// Escape characters that would be read as Markdown syntax inside a line.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BBox;
    use crate::model::Rgb;

    fn cell_style(bold: bool) -> CellStyle {
        CellStyle {
            size_pt: 11.0,
            bold,
            color: Rgb::BLACK,
            background: None,
        }
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("a*b_c"), "a\\*b\\_c");
        assert_eq!(escape_markdown("1. item - x"), "1. item - x");
    }

    #[test]
    fn test_apply_text_style() {
        assert_eq!(apply_text_style("word", true, false), "**word**");
        assert_eq!(apply_text_style("word", false, true), "*word*");
        assert_eq!(apply_text_style(" word ", true, true), " ***word*** ");
    }

    #[test]
    fn test_heading_and_body() {
        let mut md = MarkdownBuilder::new();
        let h = md.new_paragraph(ParagraphFormat::heading(1)).unwrap();
        md.append_run(h, "Report", RunStyle::new(20.0).with_emphasis(true, false))
            .unwrap();
        let p = md.new_paragraph(ParagraphFormat::body(0.0)).unwrap();
        md.append_run(p, "Plain", RunStyle::new(10.0)).unwrap();
        md.append_run(p, " ", RunStyle::new(10.0)).unwrap();
        md.append_run(p, "bold", RunStyle::new(10.0).with_emphasis(true, false))
            .unwrap();

        assert_eq!(md.finalize().unwrap(), "# Report\n\nPlain **bold**\n");
    }

    #[test]
    fn test_table_with_header_separator() {
        let mut md = MarkdownBuilder::new();
        let t = md.new_table(2, 2).unwrap();
        md.set_cell(t, 0, 0, "Name", cell_style(true)).unwrap();
        md.set_cell(t, 0, 1, "Qty", cell_style(true)).unwrap();
        md.set_cell(t, 1, 0, "a|b", cell_style(false)).unwrap();
        assert!(md.set_cell(t, 2, 0, "x", cell_style(false)).is_err());

        let out = md.finalize().unwrap();
        assert_eq!(
            out,
            "| **Name** | **Qty** |\n| --- | --- |\n| a\\|b |  |\n"
        );
    }

    #[test]
    fn test_images_and_page_breaks() {
        let mut md = MarkdownBuilder::new();
        let png = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];
        md.append_image(ImageElement::new(png, BBox::new(0.0, 0.0, 72.0, 72.0)), 1.0)
            .unwrap();
        md.insert_page_break().unwrap();
        md.append_image(ImageElement::new(vec![1, 2, 3], BBox::default()), 1.0)
            .unwrap();

        assert_eq!(md.images().len(), 2);
        assert_eq!(md.images()[0].0, "image-1.png");
        let out = md.finalize().unwrap();
        assert_eq!(
            out,
            "![image 1](image-1.png)\n\n---\n\n![image 2](image-2.bin)\n"
        );
    }

    #[test]
    fn test_run_on_table_handle_rejected() {
        let mut md = MarkdownBuilder::new();
        let t = md.new_table(1, 1).unwrap();
        let err = md
            .append_run(ParagraphHandle(t.0), "x", RunStyle::new(10.0))
            .unwrap_err();
        assert!(matches!(err, Error::Builder(_)));
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(MarkdownBuilder::new().finalize().unwrap(), "");
    }
}
