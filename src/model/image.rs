//! Raster images placed on a page.

use serde::{Deserialize, Serialize};

use crate::geometry::BBox;

/// An image extracted from a page, with its placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageElement {
    /// Encoded image bytes
    #[serde(skip)]
    pub data: Vec<u8>,

    /// Placement on the page
    pub bbox: BBox,

    /// Displayed width in points
    pub width: f32,

    /// Displayed height in points
    pub height: f32,

    /// Encoding of `data`
    pub encoding: ImageEncoding,
}

impl ImageElement {
    /// Create an image; the encoding is sniffed from the data.
    pub fn new(data: Vec<u8>, bbox: BBox) -> Self {
        let encoding = ImageEncoding::detect(&data);
        Self {
            data,
            bbox,
            width: bbox.width(),
            height: bbox.height(),
            encoding,
        }
    }

    /// Override the encoding.
    pub fn with_encoding(mut self, encoding: ImageEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Override the displayed dimensions.
    pub fn with_dimensions(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Size of the encoded data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Check if there is no payload to hand to a builder.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Encoding of image bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageEncoding {
    /// JPEG
    Jpeg,
    /// PNG
    Png,
    /// GIF
    Gif,
    /// TIFF
    Tiff,
    /// BMP
    Bmp,
    /// WEBP
    Webp,
    /// JPEG 2000
    Jpx,
    /// Unrecognized
    #[default]
    Unknown,
}

impl ImageEncoding {
    /// Detect the encoding from magic bytes.
    pub fn detect(data: &[u8]) -> Self {
        if data.len() < 8 {
            return ImageEncoding::Unknown;
        }

        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return ImageEncoding::Jpeg;
        }

        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return ImageEncoding::Png;
        }

        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return ImageEncoding::Gif;
        }

        // Little-endian or big-endian TIFF header
        if data.starts_with(&[0x49, 0x49, 0x2A, 0x00])
            || data.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
        {
            return ImageEncoding::Tiff;
        }

        if data.starts_with(b"BM") {
            return ImageEncoding::Bmp;
        }

        if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return ImageEncoding::Webp;
        }

        if data.starts_with(&[0x00, 0x00, 0x00, 0x0C, 0x6A, 0x50, 0x20, 0x20]) {
            return ImageEncoding::Jpx;
        }

        ImageEncoding::Unknown
    }

    /// Map a file extension (as reported by extractors) to an encoding.
    pub fn from_extension(ext: &str) -> Self {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => ImageEncoding::Jpeg,
            "png" => ImageEncoding::Png,
            "gif" => ImageEncoding::Gif,
            "tif" | "tiff" => ImageEncoding::Tiff,
            "bmp" => ImageEncoding::Bmp,
            "webp" => ImageEncoding::Webp,
            "jpx" | "jp2" => ImageEncoding::Jpx,
            _ => ImageEncoding::Unknown,
        }
    }

    /// Preferred file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageEncoding::Jpeg => "jpg",
            ImageEncoding::Png => "png",
            ImageEncoding::Gif => "gif",
            ImageEncoding::Tiff => "tiff",
            ImageEncoding::Bmp => "bmp",
            ImageEncoding::Webp => "webp",
            ImageEncoding::Jpx => "jp2",
            ImageEncoding::Unknown => "bin",
        }
    }
}

impl std::fmt::Display for ImageEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_encoding() {
        let jpeg = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];
        assert_eq!(ImageEncoding::detect(&jpeg), ImageEncoding::Jpeg);

        let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(ImageEncoding::detect(&png), ImageEncoding::Png);

        assert_eq!(ImageEncoding::detect(&[0u8; 4]), ImageEncoding::Unknown);
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(ImageEncoding::from_extension("JPEG"), ImageEncoding::Jpeg);
        assert_eq!(ImageEncoding::from_extension(".png"), ImageEncoding::Png);
        assert_eq!(ImageEncoding::from_extension("xyz"), ImageEncoding::Unknown);
    }

    #[test]
    fn test_image_new_uses_bbox_dimensions() {
        let img = ImageElement::new(vec![1, 2, 3], BBox::new(10.0, 20.0, 154.0, 92.0));
        assert_eq!(img.width, 144.0);
        assert_eq!(img.height, 72.0);
        assert_eq!(img.encoding, ImageEncoding::Unknown);
        assert_eq!(img.size(), 3);
    }
}
