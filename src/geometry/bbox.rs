// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bounding box utilities

use super::equivalence::points_equivalent;
use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
///
/// Boxes are taken as given: a box with `min > max` on some axis is kept
/// as-is and only compares equal to an equally degenerate box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Self {
        let mut bbox = Self::empty();
        for point in points {
            bbox.expand_to_include(point);
        }
        bbox
    }

    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);

        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// True when `min` exceeds `max` on any axis
    pub fn is_degenerate(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Map both corners through a world matrix.
    ///
    /// Only the two stored corners are transformed and the result is not
    /// re-normalized, so rotations can leave a degenerate box.
    pub fn transform_corners(&self, matrix: &Matrix4<f64>) -> Self {
        Self {
            min: matrix.transform_point(&self.min),
            max: matrix.transform_point(&self.max),
        }
    }

    /// Check if two bounding boxes are equivalent within a per-axis tolerance
    pub fn approx_eq(&self, other: &BoundingBox, tolerance: f64) -> bool {
        points_equivalent(&self.min, &other.min, tolerance)
            && points_equivalent(&self.max, &other.max, tolerance)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box() {
        let points = [Point3::new(1.0, 2.0, 3.0), Point3::new(-1.0, -2.0, -3.0)];
        let bbox = BoundingBox::from_points(&points);

        assert_eq!(bbox.min, Point3::new(-1.0, -2.0, -3.0));
        assert_eq!(bbox.max, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(bbox.center(), Point3::new(0.0, 0.0, 0.0));
        assert_eq!(bbox.size(), Vector3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_empty_box_is_degenerate() {
        assert!(BoundingBox::empty().is_degenerate());
        assert!(BoundingBox::from_points(std::iter::empty()).is_degenerate());
    }

    #[test]
    fn test_approx_eq_inclusive_tolerance() {
        let a = BoundingBox::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
        let b = BoundingBox::new(Point3::origin(), Point3::new(1.005, 1.0, 1.0));
        let c = BoundingBox::new(Point3::origin(), Point3::new(1.02, 1.0, 1.0));

        assert!(a.approx_eq(&b, 0.01));
        assert!(!a.approx_eq(&c, 0.01));
    }

    #[test]
    fn test_degenerate_boxes_compare_as_given() {
        let flipped = BoundingBox::new(Point3::new(1.0, 1.0, 1.0), Point3::origin());
        let normal = BoundingBox::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0));

        assert!(flipped.approx_eq(&flipped, 0.01));
        assert!(!flipped.approx_eq(&normal, 0.01));
    }

    #[test]
    fn test_transform_corners_translation() {
        let bbox = BoundingBox::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
        let moved = bbox.transform_corners(&Matrix4::new_translation(&Vector3::new(5.0, 0.0, -2.0)));

        assert_eq!(moved.min, Point3::new(5.0, 0.0, -2.0));
        assert_eq!(moved.max, Point3::new(6.0, 1.0, -1.0));
    }
}
