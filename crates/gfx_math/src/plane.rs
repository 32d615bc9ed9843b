//! Infinite planes

use serde::{Serialize, Deserialize};

use crate::Vec3;

/// An infinite plane through `point` with unit `normal`
///
/// The side the normal points to is the "front" of the plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl Plane {
    /// Create a plane; the normal is normalized.
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalized(),
        }
    }

    /// Signed distance from the plane (positive in front)
    #[inline]
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        (p - self.point).dot(self.normal)
    }

    /// Unsigned distance from the plane
    #[inline]
    pub fn distance(&self, p: Vec3) -> f32 {
        self.signed_distance(p).abs()
    }

    /// True if `p` lies strictly on the front side
    #[inline]
    pub fn is_in_front(&self, p: Vec3) -> bool {
        self.signed_distance(p) > 0.0
    }
}
