//! Page-space geometry primitives.
//!
//! Detected elements arrive from the analysis service as bounding polygons
//! in page coordinates. The associator only ever needs centroids and
//! centroid-to-centroid distances, so this module stays deliberately small.

// Clippy pedantic allows:
// - centroid divides by a vertex count converted from usize
#![allow(clippy::cast_precision_loss)]

use serde::{Deserialize, Serialize};

/// A point in page space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point
    #[inline]
    #[must_use = "point is created but not used"]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[inline]
    #[must_use = "distance is computed but not used"]
    pub fn distance_to(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Bounding outline of a detected element on a page.
///
/// A polygon with zero points has no centroid; such records are rejected
/// individually by the associator rather than failing the whole batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon {
    /// Outline vertices in drawing order
    pub points: Vec<Point>,
}

impl Polygon {
    /// Create a polygon from its vertices
    #[inline]
    #[must_use = "polygon is created but not used"]
    pub const fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Build a polygon from a flat `[x0, y0, x1, y1, ...]` coordinate list.
    ///
    /// The analysis service transmits polygons in this shape. A trailing
    /// unpaired coordinate is dropped.
    #[must_use = "polygon is created but not used"]
    pub fn from_flat(coords: &[f64]) -> Self {
        let points = coords
            .chunks_exact(2)
            .map(|pair| Point::new(pair[0], pair[1]))
            .collect();
        Self { points }
    }

    /// Number of vertices
    #[inline]
    #[must_use = "vertex count is returned but not used"]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the polygon has no vertices
    #[inline]
    #[must_use = "emptiness check result is returned but not used"]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Arithmetic mean of the vertex coordinates, or `None` for an empty
    /// polygon (the mean is undefined without vertices).
    #[must_use = "centroid is computed but not used"]
    pub fn centroid(&self) -> Option<Point> {
        if self.points.is_empty() {
            return None;
        }

        let n = self.points.len() as f64;
        let (sum_x, sum_y) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));

        Some(Point::new(sum_x / n, sum_y / n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < f64::EPSILON);
        assert!((b.distance_to(&a) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let p = Point::new(1.5, -2.5);
        assert!(p.distance_to(&p).abs() < f64::EPSILON);
    }

    #[test]
    fn test_centroid_of_rectangle() {
        let poly = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 2.0),
            Point::new(0.0, 2.0),
        ]);
        let c = poly.centroid().unwrap();
        assert!((c.x - 2.0).abs() < f64::EPSILON);
        assert!((c.y - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_centroid_single_point() {
        let poly = Polygon::new(vec![Point::new(7.0, 9.0)]);
        let c = poly.centroid().unwrap();
        assert!((c.x - 7.0).abs() < f64::EPSILON);
        assert!((c.y - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_centroid_empty_polygon_is_none() {
        assert!(Polygon::default().centroid().is_none());
    }

    #[test]
    fn test_from_flat_pairs() {
        let poly = Polygon::from_flat(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(poly.len(), 2);
        assert_eq!(poly.points[0], Point::new(1.0, 2.0));
        assert_eq!(poly.points[1], Point::new(3.0, 4.0));
    }

    #[test]
    fn test_from_flat_drops_trailing_coordinate() {
        let poly = Polygon::from_flat(&[1.0, 2.0, 3.0]);
        assert_eq!(poly.len(), 1);
    }

    #[test]
    fn test_polygon_serde_is_flat_point_list() {
        let poly = Polygon::new(vec![Point::new(1.0, 2.0)]);
        let json = serde_json::to_string(&poly).unwrap();
        assert_eq!(json, r#"[{"x":1.0,"y":2.0}]"#);

        let back: Polygon = serde_json::from_str(&json).unwrap();
        assert_eq!(back, poly);
    }
}
