//! Polygon geometry for collision shapes
//!
//! Asteroid outlines are small convex-ish polygons stored in local
//! coordinates and moved into world space on demand. All operations are
//! value-like: they return new polygons and never mutate in place.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::rotate_deg;

/// An ordered ring of vertices relative to a local origin.
///
/// Vertex order defines the boundary and is preserved by every operation;
/// the containment test works for either winding direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    vertices: Vec<Vec2>,
}

impl Polygon {
    pub fn new(vertices: Vec<Vec2>) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Rotate every vertex about the origin by `deg` degrees
    pub fn rotate(&self, deg: f32) -> Self {
        Self {
            vertices: self.vertices.iter().map(|&v| rotate_deg(v, deg)).collect(),
        }
    }

    /// Shift every vertex by `offset`
    pub fn translate(&self, offset: Vec2) -> Self {
        Self {
            vertices: self.vertices.iter().map(|&v| v + offset).collect(),
        }
    }

    /// Even-odd ray-casting containment test.
    ///
    /// Casts a horizontal ray from `point` toward +x and counts boundary
    /// crossings. Insensitive to winding order.
    pub fn contains(&self, point: Vec2) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[j];
            if (a.y > point.y) != (b.y > point.y) {
                let cross_x = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if point.x < cross_x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Polygon {
        Polygon::new(vec![
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
        ])
    }

    #[test]
    fn test_square_contains_center() {
        assert!(unit_square().contains(Vec2::ZERO));
    }

    #[test]
    fn test_square_excludes_outside_points() {
        let square = unit_square();
        assert!(!square.contains(Vec2::new(2.0, 0.0)));
        assert!(!square.contains(Vec2::new(0.0, -1.5)));
        assert!(!square.contains(Vec2::new(-3.0, 3.0)));
    }

    #[test]
    fn test_containment_ignores_winding_order() {
        let ccw = unit_square();
        let cw = Polygon::new(ccw.vertices().iter().rev().copied().collect());
        for p in [Vec2::ZERO, Vec2::new(0.9, 0.9), Vec2::new(1.1, 0.0)] {
            assert_eq!(ccw.contains(p), cw.contains(p));
        }
    }

    #[test]
    fn test_concave_polygon_notch() {
        // Arrow-like shape with a notch on the right side
        let arrow = Polygon::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(4.0, 4.0),
            Vec2::new(0.0, 4.0),
        ]);
        assert!(arrow.contains(Vec2::new(1.0, 2.0)));
        // Inside the notch, outside the polygon
        assert!(!arrow.contains(Vec2::new(3.5, 2.0)));
    }

    #[test]
    fn test_translate_moves_containment() {
        let square = unit_square().translate(Vec2::new(10.0, 10.0));
        assert!(square.contains(Vec2::new(10.0, 10.0)));
        assert!(!square.contains(Vec2::ZERO));
    }

    #[test]
    fn test_rotate_preserves_vertex_count_and_order() {
        let rotated = unit_square().rotate(33.0);
        assert_eq!(rotated.vertices().len(), 4);
        // First vertex of the square rotates with the polygon
        let expected = crate::rotate_deg(Vec2::new(-1.0, -1.0), 33.0);
        assert!((rotated.vertices()[0] - expected).length() < 1e-6);
    }

    #[test]
    fn test_degenerate_polygon_contains_nothing() {
        let segment = Polygon::new(vec![Vec2::ZERO, Vec2::new(1.0, 1.0)]);
        assert!(!segment.contains(Vec2::new(0.5, 0.5)));
    }
}
