//! Line and paragraph grouping.
//!
//! Spans are sorted into coarse rows, then walked pairwise: a span joins the
//! open paragraph when it sits on the same line as its predecessor, or when
//! it continues the same extractor block after a small vertical gap.

use crate::model::{Paragraph, TableElement, TextSpan};

use super::options::GrouperConfig;

/// Clusters a page's spans into paragraphs.
#[derive(Debug, Clone, Default)]
pub struct ParagraphGrouper {
    config: GrouperConfig,
}

impl ParagraphGrouper {
    /// Create a grouper with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grouper with custom thresholds.
    pub fn with_config(config: GrouperConfig) -> Self {
        Self { config }
    }

    /// Group spans into paragraphs.
    ///
    /// Every span lands in exactly one paragraph. Paragraphs come out in
    /// discovery order, each with `space_before` measured from the previous
    /// paragraph's bottom edge.
    pub fn group(&self, spans: Vec<TextSpan>) -> Vec<Paragraph> {
        if spans.is_empty() {
            return vec![];
        }

        let sorted = self.sort_reading_order(spans);

        let mut groups: Vec<Vec<TextSpan>> = Vec::new();
        let mut current: Vec<TextSpan> = Vec::new();

        for span in sorted {
            let joins = current
                .last()
                .map(|prev| self.continues(prev, &span))
                .unwrap_or(true);

            if !joins {
                groups.push(std::mem::take(&mut current));
            }
            current.push(span);
        }

        if !current.is_empty() {
            groups.push(current);
        }

        let mut paragraphs: Vec<Paragraph> = Vec::with_capacity(groups.len());
        for group in groups {
            let mut para = Paragraph::from_spans(group);
            if let Some(prev) = paragraphs.last() {
                para.space_before = para.top_y - prev.bottom_y;
            }
            paragraphs.push(para);
        }

        paragraphs
    }

    /// Sort by `(round(y0 / row_bucket), x0)`.
    ///
    /// The coarse bucket puts spans of one visual row together even when the
    /// source emits them out of order; the sort is stable for exact ties.
    /// Non-finite coordinates sort to the ends instead of breaking the order.
    fn sort_reading_order(&self, mut spans: Vec<TextSpan>) -> Vec<TextSpan> {
        let bucket = self.config.row_bucket;
        // Adding 0.0 folds -0.0 into 0.0, which total_cmp would otherwise order apart
        let row = |s: &TextSpan| (s.bbox.y0 / bucket).round() + 0.0;
        spans.sort_by(|a, b| {
            row(a)
                .total_cmp(&row(b))
                .then_with(|| (a.bbox.x0 + 0.0).total_cmp(&(b.bbox.x0 + 0.0)))
        });
        spans
    }

    /// Check if `curr` continues the paragraph ending with `prev`.
    fn continues(&self, prev: &TextSpan, curr: &TextSpan) -> bool {
        let same_line =
            (curr.bbox.y0 - prev.bbox.y0).abs() < prev.font_size * self.config.same_line_factor;
        if same_line {
            return true;
        }

        curr.block_id == prev.block_id
            && (curr.bbox.y0 - prev.bbox.y1)
                < prev.font_size * self.config.continuation_gap_factor
    }
}

/// Drop spans whose top-left corner falls inside any table's bounding box.
pub fn exclude_table_spans(spans: &[TextSpan], tables: &[TableElement]) -> Vec<TextSpan> {
    spans
        .iter()
        .filter(|s| !tables.iter().any(|t| t.bbox.contains_origin_of(&s.bbox)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BBox;

    fn span(text: &str, x0: f32, y0: f32, font_size: f32, block: u32) -> TextSpan {
        TextSpan::new(
            text,
            BBox::new(x0, y0, x0 + 40.0, y0 + font_size),
            font_size,
        )
        .in_block(block, 0)
    }

    fn texts(p: &Paragraph) -> Vec<&str> {
        p.spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_empty_page() {
        assert!(ParagraphGrouper::new().group(vec![]).is_empty());
    }

    #[test]
    fn test_same_line_pair_then_new_paragraph() {
        let spans = vec![
            span("span1", 10.0, 10.0, 10.0, 0),
            span("span2", 60.0, 10.0, 10.0, 0),
            span("span3", 10.0, 40.0, 10.0, 0),
        ];
        let paragraphs = ParagraphGrouper::new().group(spans);

        assert_eq!(paragraphs.len(), 2);
        assert_eq!(texts(&paragraphs[0]), vec!["span1", "span2"]);
        assert_eq!(texts(&paragraphs[1]), vec!["span3"]);
        assert_eq!(paragraphs[0].space_before, 0.0);
        assert_eq!(paragraphs[1].space_before, 20.0);
    }

    #[test]
    fn test_out_of_order_spans_sorted_left_to_right() {
        let spans = vec![
            span("world", 80.0, 12.0, 10.0, 0),
            span("Hello", 10.0, 10.0, 10.0, 0),
        ];
        let paragraphs = ParagraphGrouper::new().group(spans);
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(texts(&paragraphs[0]), vec!["Hello", "world"]);
    }

    #[test]
    fn test_same_block_continuation() {
        // Second line starts 5pt below the first line's bottom edge
        let spans = vec![
            span("line one", 10.0, 100.0, 10.0, 4),
            span("line two", 10.0, 115.0, 10.0, 4),
        ];
        let paragraphs = ParagraphGrouper::new().group(spans);
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].top_y, 100.0);
        assert_eq!(paragraphs[0].bottom_y, 125.0);
    }

    #[test]
    fn test_different_block_breaks() {
        let spans = vec![
            span("line one", 10.0, 100.0, 10.0, 4),
            span("line two", 10.0, 115.0, 10.0, 5),
        ];
        assert_eq!(ParagraphGrouper::new().group(spans).len(), 2);
    }

    #[test]
    fn test_gap_factor_is_configurable() {
        // Gap of 17pt: continues at K=2.0 (limit 20pt), breaks at K=1.5 (limit 15pt)
        let spans = vec![
            span("a", 10.0, 100.0, 10.0, 1),
            span("b", 10.0, 127.0, 10.0, 1),
        ];
        assert_eq!(ParagraphGrouper::new().group(spans.clone()).len(), 1);

        let strict = ParagraphGrouper::with_config(GrouperConfig {
            continuation_gap_factor: 1.5,
            ..GrouperConfig::default()
        });
        assert_eq!(strict.group(spans).len(), 2);
    }

    #[test]
    fn test_every_span_kept_once() {
        let spans: Vec<TextSpan> = (0..25)
            .map(|i| span(&format!("s{}", i), (i % 3) as f32 * 50.0, (i * 7) as f32, 9.0, i / 4))
            .collect();
        let paragraphs = ParagraphGrouper::new().group(spans.clone());

        let mut seen: Vec<String> = paragraphs
            .iter()
            .flat_map(|p| p.spans.iter().map(|s| s.text.clone()))
            .collect();
        seen.sort();
        let mut expected: Vec<String> = spans.into_iter().map(|s| s.text).collect();
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_rows_straddling_zero_share_a_bucket() {
        let spans = vec![
            span("right", 80.0, -1.0, 10.0, 0),
            span("left", 10.0, 2.0, 10.0, 0),
        ];
        let paragraphs = ParagraphGrouper::new().group(spans);
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(texts(&paragraphs[0]), vec!["left", "right"]);
    }

    #[test]
    fn test_nan_coordinates_keep_every_span() {
        let spans: Vec<TextSpan> = (0..40)
            .map(|i| {
                let y0 = if i % 3 == 0 { f32::NAN } else { i as f32 * 15.0 };
                span(&format!("s{}", i), (i % 4) as f32 * 30.0, y0, 10.0, i / 5)
            })
            .collect();
        let paragraphs = ParagraphGrouper::new().group(spans);
        let total: usize = paragraphs.iter().map(Paragraph::len).sum();
        assert_eq!(total, 40);
    }

    #[test]
    fn test_exclude_table_spans() {
        let table = TableElement::new(vec![], 1, 1, BBox::new(50.0, 100.0, 300.0, 200.0));
        let spans = vec![
            span("inside", 60.0, 120.0, 10.0, 0),
            span("edge", 50.0, 100.0, 10.0, 0),
            span("above", 60.0, 80.0, 10.0, 0),
        ];
        let kept = exclude_table_spans(&spans, &[table]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].text, "above");
    }
}
