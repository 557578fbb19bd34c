use geo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A 2D axis-aligned rectangle given by its minimum and maximum coordinates.
///
/// Unlike `geo::Rect`, the corners are stored exactly as given: a rectangle
/// whose minimum exceeds its maximum on either axis is kept as is and reports
/// itself as empty. Query rectangles rely on this, since clipping a query to
/// the index domain may leave nothing behind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds2D {
    /// Minimum x coordinate (longitude for geographic domains)
    pub min_x: f64,
    /// Minimum y coordinate (latitude for geographic domains)
    pub min_y: f64,
    /// Maximum x coordinate
    pub max_x: f64,
    /// Maximum y coordinate
    pub max_y: f64,
}

impl Bounds2D {
    /// Create a rectangle from minimum and maximum coordinates.
    ///
    /// # Arguments
    ///
    /// * `min_x` - Minimum longitude/x coordinate
    /// * `min_y` - Minimum latitude/y coordinate
    /// * `max_x` - Maximum longitude/x coordinate
    /// * `max_y` - Maximum latitude/y coordinate
    ///
    /// # Examples
    ///
    /// ```
    /// use quadcell_types::bounds::Bounds2D;
    ///
    /// let bbox = Bounds2D::new(5.0, 5.0, 11.0, 11.0);
    /// assert_eq!(bbox.width(), 6.0);
    /// ```
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create a rectangle from a `geo::Rect`.
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }

    /// Convert into a `geo::Rect`.
    ///
    /// Returns `None` for empty rectangles, because `geo::Rect` would silently
    /// swap inverted corners.
    pub fn to_rect(&self) -> Option<Rect> {
        if self.is_empty() {
            return None;
        }
        Some(Rect::new(
            geo::coord! { x: self.min_x, y: self.min_y },
            geo::coord! { x: self.max_x, y: self.max_y },
        ))
    }

    /// Get the width of the rectangle (negative when inverted).
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Get the height of the rectangle (negative when inverted).
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Get the center point of the rectangle.
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// True when the rectangle has no area: `min >= max` on either axis.
    ///
    /// Rectangles with a NaN coordinate are empty as well.
    pub fn is_empty(&self) -> bool {
        !(self.min_x < self.max_x && self.min_y < self.max_y)
    }

    /// True when any coordinate is NaN.
    pub fn has_nan(&self) -> bool {
        self.min_x.is_nan() || self.min_y.is_nan() || self.max_x.is_nan() || self.max_y.is_nan()
    }

    /// True when every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
    }

    /// Check if a point lies within the rectangle, edges included.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Check if `other` lies completely within this rectangle, edges included.
    pub fn contains(&self, other: &Bounds2D) -> bool {
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    /// Check if this rectangle intersects another. Touching edges or corners
    /// count as intersecting.
    pub fn intersects(&self, other: &Bounds2D) -> bool {
        !(self.max_x < other.min_x
            || self.min_x > other.max_x
            || self.max_y < other.min_y
            || self.min_y > other.max_y)
    }

    /// Clip this rectangle to `other`.
    ///
    /// The result is empty (see [`Bounds2D::is_empty`]) when the two do not
    /// overlap with positive area.
    pub fn clip(&self, other: &Bounds2D) -> Bounds2D {
        Bounds2D::new(
            self.min_x.max(other.min_x),
            self.min_y.max(other.min_y),
            self.max_x.min(other.max_x),
            self.max_y.min(other.max_y),
        )
    }
}

impl From<Rect> for Bounds2D {
    fn from(rect: Rect) -> Self {
        Self::from_rect(rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_inverted() {
        assert!(!Bounds2D::new(0.0, 0.0, 1.0, 1.0).is_empty());
        assert!(Bounds2D::new(0.0, 0.0, 0.0, 1.0).is_empty());
        assert!(Bounds2D::new(2.0, 0.0, 1.0, 1.0).is_empty());
        assert!(Bounds2D::new(f64::NAN, 0.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn test_intersects_counts_touching() {
        let a = Bounds2D::new(0.0, 0.0, 4.0, 4.0);
        let corner = Bounds2D::new(4.0, 4.0, 8.0, 8.0);
        let apart = Bounds2D::new(4.5, 0.0, 8.0, 4.0);

        assert!(a.intersects(&corner));
        assert!(corner.intersects(&a));
        assert!(!a.intersects(&apart));
    }

    #[test]
    fn test_clip() {
        let domain = Bounds2D::new(0.0, 0.0, 16.0, 16.0);
        let query = Bounds2D::new(-10.0, 5.0, 4.0, 40.0);

        let clipped = query.clip(&domain);
        assert_eq!(clipped, Bounds2D::new(0.0, 5.0, 4.0, 16.0));

        let outside = Bounds2D::new(20.0, 20.0, 30.0, 30.0).clip(&domain);
        assert!(outside.is_empty());
    }

    #[test]
    fn test_geo_conversion() {
        let bbox = Bounds2D::new(-74.0, 40.7, -73.9, 40.8);
        let rect = bbox.to_rect().expect("non-empty rect");
        assert_eq!(Bounds2D::from(rect), bbox);

        assert!(Bounds2D::new(1.0, 1.0, 0.0, 0.0).to_rect().is_none());
    }

    #[test]
    fn test_center_and_contains() {
        let bbox = Bounds2D::new(0.0, 0.0, 10.0, 20.0);
        assert_eq!(bbox.center(), Point::new(5.0, 10.0));
        assert!(bbox.contains_point(10.0, 20.0));
        assert!(!bbox.contains_point(10.1, 20.0));
        assert!(bbox.contains(&Bounds2D::new(1.0, 1.0, 2.0, 2.0)));
    }

    #[test]
    fn test_serde_round_trip() {
        let bbox = Bounds2D::new(5.0, 5.0, 11.0, 11.0);
        let json = serde_json::to_string(&bbox).unwrap();
        let back: Bounds2D = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bbox);
    }
}
