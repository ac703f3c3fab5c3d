//! Table grids and vector fill shapes.

use serde::{Deserialize, Serialize};

use super::Rgb;
use crate::geometry::BBox;

/// A table detected on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableElement {
    /// Cells in the grid (empty cells may be omitted)
    pub cells: Vec<TableCell>,

    /// Number of rows in the grid
    pub rows: usize,

    /// Number of columns in the grid
    pub cols: usize,

    /// Bounding box of the whole table
    pub bbox: BBox,
}

impl TableElement {
    /// Create a table from cells and grid dimensions.
    pub fn new(cells: Vec<TableCell>, rows: usize, cols: usize, bbox: BBox) -> Self {
        Self {
            cells,
            rows,
            cols,
            bbox,
        }
    }

    /// Build a table from rows of text; cells carry no position.
    pub fn from_rows<S: Into<String>>(rows: Vec<Vec<S>>, bbox: BBox) -> Self {
        let row_count = rows.len();
        let col_count = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let cells = rows
            .into_iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.into_iter()
                    .enumerate()
                    .map(move |(c, text)| TableCell::new(text, r, c))
            })
            .collect();
        Self::new(cells, row_count, col_count, bbox)
    }

    /// Check the grid invariant `rows * cols >= cells.len()`.
    pub fn is_consistent(&self) -> bool {
        self.rows.saturating_mul(self.cols) >= self.cells.len()
    }

    /// Check if the grid has no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Get a cell by position.
    pub fn cell(&self, row: usize, col: usize) -> Option<&TableCell> {
        self.cells.iter().find(|c| c.row == row && c.col == col)
    }

    /// Check if a cell position lies inside the declared grid.
    pub fn in_bounds(&self, cell: &TableCell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Plain text of the table, tab-separated by column.
    pub fn plain_text(&self) -> String {
        (0..self.rows)
            .map(|r| {
                (0..self.cols)
                    .map(|c| self.cell(r, c).map(|cell| cell.text.as_str()).unwrap_or(""))
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table cell with optional recovered styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell text
    pub text: String,

    /// 0-based row index
    pub row: usize,

    /// 0-based column index
    pub col: usize,

    /// Cell position; all zeros when the source grid has no positions
    #[serde(default)]
    pub bbox: BBox,

    /// Recovered background fill
    #[serde(default)]
    pub background_color: Option<Rgb>,

    /// Recovered text color
    #[serde(default)]
    pub text_color: Option<Rgb>,

    /// Recovered font size in points
    #[serde(default)]
    pub font_size: Option<f32>,

    /// Recovered bold flag
    #[serde(default)]
    pub is_bold: bool,
}

impl TableCell {
    /// Create an unstyled cell without position.
    pub fn new(text: impl Into<String>, row: usize, col: usize) -> Self {
        Self {
            text: text.into(),
            row,
            col,
            bbox: BBox::default(),
            background_color: None,
            text_color: None,
            font_size: None,
            is_bold: false,
        }
    }

    /// Set the cell position.
    pub fn with_bbox(mut self, bbox: BBox) -> Self {
        self.bbox = bbox;
        self
    }

    /// Check if the cell has a usable position.
    pub fn has_position(&self) -> bool {
        !self.bbox.is_zero()
    }

    /// Text color, black when unresolved.
    pub fn text_color_or_default(&self) -> Rgb {
        self.text_color.unwrap_or(Rgb::BLACK)
    }

    /// Font size, `default` when unresolved.
    pub fn font_size_or(&self, default: f32) -> f32 {
        self.font_size.unwrap_or(default)
    }
}

/// A vector-drawn filled shape, used to infer cell backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FillShape {
    /// Shape bounds
    pub bbox: BBox,
    /// Fill color
    pub fill_color: Rgb,
}

impl FillShape {
    /// Create a fill shape.
    pub fn new(bbox: BBox, fill_color: Rgb) -> Self {
        Self { bbox, fill_color }
    }
}
