//! Bounding-box geometry in page space.
//!
//! Coordinates are page-local points with the origin at the top-left corner,
//! so `y` grows downwards: `y0` is the top edge and `y1` the bottom edge.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box `(x0, y0, x1, y1)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BBox {
    /// Create a bounding box from its corners.
    ///
    /// # Examples
    ///
    /// ```
    /// use reflow::geometry::BBox;
    ///
    /// let bbox = BBox::new(10.0, 20.0, 110.0, 70.0);
    /// assert_eq!(bbox.width(), 100.0);
    /// assert_eq!(bbox.height(), 50.0);
    /// ```
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Create a bounding box from a `[x0, y0, x1, y1]` array.
    pub fn from_array(coords: [f32; 4]) -> Self {
        Self::new(coords[0], coords[1], coords[2], coords[3])
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Check if every coordinate is zero (position unavailable).
    pub fn is_zero(&self) -> bool {
        self.x0 == 0.0 && self.y0 == 0.0 && self.x1 == 0.0 && self.y1 == 0.0
    }

    /// Return a copy with corners swapped where they are inverted.
    pub fn normalized(&self) -> Self {
        Self {
            x0: self.x0.min(self.x1),
            y0: self.y0.min(self.y1),
            x1: self.x0.max(self.x1),
            y1: self.y0.max(self.y1),
        }
    }

    /// Grow the box by `margin` on all four edges.
    pub fn expand(&self, margin: f32) -> Self {
        Self {
            x0: self.x0 - margin,
            y0: self.y0 - margin,
            x1: self.x1 + margin,
            y1: self.y1 + margin,
        }
    }

    /// Check if `other` lies entirely inside this box (edges inclusive).
    ///
    /// # Examples
    ///
    /// ```
    /// use reflow::geometry::BBox;
    ///
    /// let outer = BBox::new(0.0, 0.0, 100.0, 100.0);
    /// assert!(outer.encloses(&BBox::new(0.0, 10.0, 100.0, 20.0)));
    /// assert!(!outer.encloses(&BBox::new(50.0, 50.0, 150.0, 60.0)));
    /// ```
    pub fn encloses(&self, other: &BBox) -> bool {
        other.x0 >= self.x0 && other.y0 >= self.y0 && other.x1 <= self.x1 && other.y1 <= self.y1
    }

    /// Check if the top-left corner of `other` falls inside this box.
    ///
    /// Edges are inclusive. This is the test used to exclude text spans that
    /// belong to a table region.
    pub fn contains_origin_of(&self, other: &BBox) -> bool {
        self.x0 <= other.x0 && other.x0 <= self.x1 && self.y0 <= other.y0 && other.y0 <= self.y1
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Union of all boxes, or `None` for an empty iterator.
    pub fn union_all<'a>(boxes: impl IntoIterator<Item = &'a BBox>) -> Option<BBox> {
        boxes.into_iter().fold(None, |acc, b| match acc {
            None => Some(*b),
            Some(u) => Some(u.union(b)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_dimensions() {
        let b = BBox::new(5.0, 10.0, 105.0, 60.0);
        assert_eq!(b.width(), 100.0);
        assert_eq!(b.height(), 50.0);
        assert!(!b.is_zero());
        assert!(BBox::default().is_zero());
    }

    #[test]
    fn test_bbox_normalized() {
        let b = BBox::new(100.0, 80.0, 10.0, 20.0).normalized();
        assert_eq!(b, BBox::new(10.0, 20.0, 100.0, 80.0));
    }

    #[test]
    fn test_contains_origin_inclusive_edges() {
        let table = BBox::new(50.0, 100.0, 300.0, 200.0);
        // Origin exactly on the corner counts as inside
        assert!(table.contains_origin_of(&BBox::new(50.0, 100.0, 400.0, 250.0)));
        assert!(table.contains_origin_of(&BBox::new(300.0, 200.0, 310.0, 210.0)));
        assert!(!table.contains_origin_of(&BBox::new(49.9, 150.0, 60.0, 160.0)));
        assert!(!table.contains_origin_of(&BBox::new(60.0, 200.1, 70.0, 210.0)));
    }

    #[test]
    fn test_expand_and_encloses() {
        let cell = BBox::new(10.0, 10.0, 50.0, 30.0);
        let span = BBox::new(8.0, 12.0, 54.0, 28.0);
        assert!(!cell.encloses(&span));
        assert!(cell.expand(5.0).encloses(&span));
    }

    #[test]
    fn test_union_all() {
        let boxes = [
            BBox::new(10.0, 10.0, 20.0, 20.0),
            BBox::new(0.0, 15.0, 15.0, 40.0),
        ];
        assert_eq!(
            BBox::union_all(boxes.iter()),
            Some(BBox::new(0.0, 10.0, 20.0, 40.0))
        );
        assert_eq!(BBox::union_all(std::iter::empty()), None);
    }
}
