//! Reconstruction statistics.

use serde::{Deserialize, Serialize};

/// Counters collected while emitting a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconstructionStats {
    /// Pages emitted
    pub pages: u32,

    /// Body paragraphs emitted
    pub paragraphs: u32,

    /// Heading paragraphs emitted
    pub headings: u32,

    /// Text runs appended (space separators included)
    pub runs: u32,

    /// Images emitted
    pub images: u32,

    /// Tables emitted
    pub tables: u32,

    /// Table cells set
    pub cells: u32,

    /// Page breaks inserted
    pub page_breaks: u32,

    /// Pages skipped after an extraction failure
    pub skipped_pages: u32,

    /// Content items dropped because they were empty or the builder rejected them
    pub skipped_items: u32,

    /// Table cells dropped for lying outside the grid or being rejected
    pub skipped_cells: u32,
}

impl ReconstructionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total paragraphs, headings included.
    pub fn total_paragraphs(&self) -> u32 {
        self.paragraphs + self.headings
    }

    /// Check if anything was skipped.
    pub fn has_skips(&self) -> bool {
        self.skipped_pages + self.skipped_items + self.skipped_cells > 0
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ReconstructionStats) {
        self.pages += other.pages;
        self.paragraphs += other.paragraphs;
        self.headings += other.headings;
        self.runs += other.runs;
        self.images += other.images;
        self.tables += other.tables;
        self.cells += other.cells;
        self.page_breaks += other.page_breaks;
        self.skipped_pages += other.skipped_pages;
        self.skipped_items += other.skipped_items;
        self.skipped_cells += other.skipped_cells;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_merge() {
        let mut stats = ReconstructionStats {
            pages: 1,
            paragraphs: 3,
            headings: 1,
            ..Default::default()
        };
        let other = ReconstructionStats {
            pages: 2,
            paragraphs: 4,
            skipped_cells: 1,
            ..Default::default()
        };
        stats.merge(&other);

        assert_eq!(stats.pages, 3);
        assert_eq!(stats.total_paragraphs(), 8);
        assert!(stats.has_skips());
        assert!(!ReconstructionStats::new().has_skips());
    }

    #[test]
    fn test_stats_serialize() {
        let stats = ReconstructionStats {
            tables: 2,
            ..Default::default()
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["tables"], 2);
        assert_eq!(json["page_breaks"], 0);
    }
}
