//! Engine options and tuning constants.

/// Options controlling document reconstruction.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Paragraph grouping thresholds
    pub grouper: GrouperConfig,

    /// Heading classification thresholds
    pub heading: HeadingConfig,

    /// Edge tolerance in points for matching spans and fills to table cells
    pub match_tolerance: f32,

    /// Font size used when a page has no spans or a cell has no resolved size
    pub default_font_size: f32,

    /// Widest image emitted, in inches
    pub max_image_width_in: f32,

    /// How page-level extraction failures are handled
    pub error_mode: ErrorMode,

    /// Whether to compose pages in parallel before emitting them in order
    pub parallel: bool,
}

impl EngineOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set grouping thresholds.
    pub fn with_grouper(mut self, grouper: GrouperConfig) -> Self {
        self.grouper = grouper;
        self
    }

    /// Set the same-block continuation gap multiplier.
    pub fn with_continuation_gap_factor(mut self, factor: f32) -> Self {
        self.grouper.continuation_gap_factor = factor;
        self
    }

    /// Set heading thresholds.
    pub fn with_heading(mut self, heading: HeadingConfig) -> Self {
        self.heading = heading;
        self
    }

    /// Set the cell matching tolerance in points.
    pub fn with_match_tolerance(mut self, tolerance: f32) -> Self {
        self.match_tolerance = tolerance;
        self
    }

    /// Set the default font size.
    pub fn with_default_font_size(mut self, size: f32) -> Self {
        self.default_font_size = size;
        self
    }

    /// Set the maximum image width in inches.
    pub fn with_max_image_width(mut self, inches: f32) -> Self {
        self.max_image_width_in = inches;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Skip pages whose extraction fails instead of aborting.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable parallel page composition.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Compose pages one at a time.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            grouper: GrouperConfig::default(),
            heading: HeadingConfig::default(),
            match_tolerance: 5.0,
            default_font_size: 11.0,
            max_image_width_in: 6.0,
            error_mode: ErrorMode::Strict,
            parallel: true,
        }
    }
}

/// Thresholds for clustering spans into paragraphs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrouperConfig {
    /// Height in points of the coarse row buckets used for sorting
    pub row_bucket: f32,
    /// Two spans share a line when their tops differ by less than this times the font size
    pub same_line_factor: f32,
    /// Same-block spans continue a paragraph when the gap is below this times the font size
    pub continuation_gap_factor: f32,
}

impl Default for GrouperConfig {
    fn default() -> Self {
        Self {
            row_bucket: 10.0,
            same_line_factor: 0.5,
            continuation_gap_factor: 2.0,
        }
    }
}

/// Thresholds for heading classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingConfig {
    /// Lead span size ratio over the page average that suggests a heading
    pub size_ratio: f32,
    /// Ratio above which a heading is level 1 instead of level 2
    pub level_one_ratio: f32,
    /// Headings are shorter than this many characters
    pub max_chars: usize,
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self {
            size_ratio: 1.2,
            level_one_ratio: 1.5,
            max_chars: 100,
        }
    }
}

/// Handling of page-level extraction failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Abort the document on the first failing page
    #[default]
    Strict,
    /// Log and skip failing pages
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_options_builder() {
        let options = EngineOptions::new()
            .lenient()
            .sequential()
            .with_continuation_gap_factor(1.5)
            .with_match_tolerance(3.0);

        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert!(!options.parallel);
        assert_eq!(options.grouper.continuation_gap_factor, 1.5);
        assert_eq!(options.match_tolerance, 3.0);
    }

    #[test]
    fn test_default_options() {
        let options = EngineOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert!(options.parallel);
        assert_eq!(options.default_font_size, 11.0);
        assert_eq!(options.max_image_width_in, 6.0);
        assert_eq!(options.grouper.continuation_gap_factor, 2.0);
        assert_eq!(options.heading.max_chars, 100);
    }
}
