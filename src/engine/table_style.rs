//! Table cell style recovery.
//!
//! Cell backgrounds come from vector fill shapes that enclose the cell; text
//! color, size and weight come from the first span lying inside the cell.
//! The first matching candidate wins: overlapping fills are not ranked by
//! z-order, and later spans of a multi-run cell are ignored.

use crate::geometry::BBox;
use crate::model::{FillShape, TableCell, TableElement, TextSpan};

/// Spatial predicate deciding whether a candidate box sits inside a container.
pub trait OverlapMatcher: Send + Sync {
    /// Check if `inner` lies within `outer`.
    fn matches(&self, outer: &BBox, inner: &BBox) -> bool;

    /// First fill shape enclosing `cell` whose color is not pure white.
    fn first_fill<'a>(&self, cell: &BBox, shapes: &'a [FillShape]) -> Option<&'a FillShape> {
        shapes
            .iter()
            .find(|s| !s.fill_color.is_white() && self.matches(&s.bbox, cell))
    }

    /// First span lying inside `cell`.
    fn first_span<'a>(&self, cell: &BBox, spans: &'a [TextSpan]) -> Option<&'a TextSpan> {
        spans.iter().find(|s| self.matches(cell, &s.bbox))
    }
}

/// Containment with a fixed slack on all four edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceMatcher {
    /// Slack in points
    pub tolerance: f32,
}

impl ToleranceMatcher {
    /// Create a matcher with the given slack.
    pub fn new(tolerance: f32) -> Self {
        Self { tolerance }
    }
}

impl Default for ToleranceMatcher {
    fn default() -> Self {
        Self::new(5.0)
    }
}

impl OverlapMatcher for ToleranceMatcher {
    fn matches(&self, outer: &BBox, inner: &BBox) -> bool {
        outer.expand(self.tolerance).encloses(inner)
    }
}

/// Resolves per-cell background and text styling for tables.
pub struct TableStyleResolver {
    matcher: Box<dyn OverlapMatcher>,
}

impl TableStyleResolver {
    /// Create a resolver using [`ToleranceMatcher`] with the given slack.
    pub fn new(tolerance: f32) -> Self {
        Self::with_matcher(Box::new(ToleranceMatcher::new(tolerance)))
    }

    /// Create a resolver with a custom matcher.
    pub fn with_matcher(matcher: Box<dyn OverlapMatcher>) -> Self {
        Self { matcher }
    }

    /// Return a copy of `table` with cell styling filled in where resolvable.
    ///
    /// Cells without a position keep their defaults.
    pub fn resolve(
        &self,
        table: &TableElement,
        shapes: &[FillShape],
        spans: &[TextSpan],
    ) -> TableElement {
        let cells = table
            .cells
            .iter()
            .map(|cell| self.resolve_cell(cell, shapes, spans))
            .collect();

        TableElement {
            cells,
            rows: table.rows,
            cols: table.cols,
            bbox: table.bbox,
        }
    }

    fn resolve_cell(
        &self,
        cell: &TableCell,
        shapes: &[FillShape],
        spans: &[TextSpan],
    ) -> TableCell {
        let mut resolved = cell.clone();
        if !cell.has_position() {
            return resolved;
        }

        if let Some(shape) = self.matcher.first_fill(&cell.bbox, shapes) {
            resolved.background_color = Some(shape.fill_color);
        }

        if let Some(span) = self.matcher.first_span(&cell.bbox, spans) {
            resolved.text_color = Some(span.color);
            resolved.font_size = Some(span.font_size);
            resolved.is_bold = span.is_bold;
        }

        resolved
    }
}

impl Default for TableStyleResolver {
    fn default() -> Self {
        Self::with_matcher(Box::new(ToleranceMatcher::default()))
    }
}

impl std::fmt::Debug for TableStyleResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableStyleResolver").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rgb;

    fn table_with_cell(bbox: BBox) -> TableElement {
        TableElement::new(
            vec![TableCell::new("Total", 0, 0).with_bbox(bbox)],
            1,
            1,
            bbox,
        )
    }

    fn span_at(bbox: BBox, color: Rgb, size: f32) -> TextSpan {
        TextSpan::new("Total", bbox, size).with_color(color)
    }

    #[test]
    fn test_tolerance_matcher() {
        let m = ToleranceMatcher::default();
        let cell = BBox::new(100.0, 100.0, 200.0, 120.0);
        // Fill slightly smaller than the cell, within 5pt
        assert!(m.matches(&BBox::new(104.0, 103.0, 196.0, 117.0), &cell));
        assert!(!m.matches(&BBox::new(106.0, 100.0, 200.0, 120.0), &cell));
    }

    #[test]
    fn test_resolves_background_and_text() {
        let cell_box = BBox::new(100.0, 100.0, 200.0, 120.0);
        let table = table_with_cell(cell_box);
        let fill = FillShape::new(BBox::new(98.0, 98.0, 202.0, 122.0), Rgb::new(0.8, 0.9, 1.0));
        let span = span_at(BBox::new(104.0, 104.0, 150.0, 116.0), Rgb::new(1.0, 0.0, 0.0), 9.0)
            .bold();

        let resolved = TableStyleResolver::default().resolve(&table, &[fill], &[span]);
        let cell = &resolved.cells[0];
        assert_eq!(cell.background_color, Some(Rgb::new(0.8, 0.9, 1.0)));
        assert_eq!(cell.text_color, Some(Rgb::new(1.0, 0.0, 0.0)));
        assert_eq!(cell.font_size, Some(9.0));
        assert!(cell.is_bold);
        // Input untouched
        assert!(table.cells[0].background_color.is_none());
    }

    #[test]
    fn test_white_fill_ignored() {
        let cell_box = BBox::new(100.0, 100.0, 200.0, 120.0);
        let shapes = [
            FillShape::new(BBox::new(0.0, 0.0, 600.0, 800.0), Rgb::WHITE),
            FillShape::new(cell_box, Rgb::new(0.5, 0.5, 0.5)),
        ];
        let resolved =
            TableStyleResolver::default().resolve(&table_with_cell(cell_box), &shapes, &[]);
        assert_eq!(resolved.cells[0].background_color, Some(Rgb::new(0.5, 0.5, 0.5)));
    }

    #[test]
    fn test_first_overlapping_fill_wins() {
        let cell_box = BBox::new(100.0, 100.0, 200.0, 120.0);
        let shapes = [
            FillShape::new(BBox::new(90.0, 90.0, 300.0, 300.0), Rgb::new(0.0, 0.0, 1.0)),
            FillShape::new(cell_box, Rgb::new(1.0, 1.0, 0.0)),
        ];
        let resolved =
            TableStyleResolver::default().resolve(&table_with_cell(cell_box), &shapes, &[]);
        assert_eq!(resolved.cells[0].background_color, Some(Rgb::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_first_span_wins() {
        let cell_box = BBox::new(100.0, 100.0, 200.0, 120.0);
        let spans = [
            span_at(BBox::new(102.0, 102.0, 140.0, 118.0), Rgb::new(0.0, 0.5, 0.0), 8.0),
            span_at(BBox::new(150.0, 102.0, 190.0, 118.0), Rgb::new(1.0, 0.0, 0.0), 14.0)
                .bold(),
        ];
        let resolved =
            TableStyleResolver::default().resolve(&table_with_cell(cell_box), &[], &spans);
        let cell = &resolved.cells[0];
        assert_eq!(cell.text_color, Some(Rgb::new(0.0, 0.5, 0.0)));
        assert_eq!(cell.font_size, Some(8.0));
        assert!(!cell.is_bold);
    }

    #[test]
    fn test_zero_bbox_cell_keeps_defaults() {
        let table = TableElement::new(
            vec![TableCell::new("x", 0, 0)],
            1,
            1,
            BBox::new(0.0, 0.0, 50.0, 50.0),
        );
        // A fill and span that would match a zero box under tolerance
        let shapes = [FillShape::new(
            BBox::new(0.0, 0.0, 10.0, 10.0),
            Rgb::new(1.0, 0.0, 0.0),
        )];
        let spans = [span_at(
            BBox::new(0.0, 0.0, 1.0, 1.0),
            Rgb::new(0.0, 0.0, 1.0),
            20.0,
        )];

        let resolved = TableStyleResolver::default().resolve(&table, &shapes, &spans);
        let cell = &resolved.cells[0];
        assert!(cell.background_color.is_none());
        assert!(cell.text_color.is_none());
        assert!(cell.font_size.is_none());
        assert_eq!(cell.text_color_or_default(), Rgb::BLACK);
        assert_eq!(cell.font_size_or(11.0), 11.0);
    }

    #[test]
    fn test_custom_matcher() {
        struct Never;
        impl OverlapMatcher for Never {
            fn matches(&self, _outer: &BBox, _inner: &BBox) -> bool {
                false
            }
        }

        let cell_box = BBox::new(100.0, 100.0, 200.0, 120.0);
        let shapes = [FillShape::new(cell_box, Rgb::new(0.5, 0.5, 0.5))];
        let resolved = TableStyleResolver::with_matcher(Box::new(Never))
            .resolve(&table_with_cell(cell_box), &shapes, &[]);
        assert!(resolved.cells[0].background_color.is_none());
    }
}
