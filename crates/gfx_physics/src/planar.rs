//! Planar hit boxes for bodies moving in the XY plane

use gfx_math::{mat4, Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in the XY plane
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Default for Rect {
    fn default() -> Self {
        Self::new(-1.0, -1.0, 1.0, 1.0)
    }
}

impl Rect {
    pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Bounding rectangle of the x and y of some points, or `None` when empty
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let first = points.first()?;
        let init = Self::new(first.x, first.y, first.x, first.y);
        Some(points.iter().fold(init, |r, p| Self {
            min_x: r.min_x.min(p.x),
            min_y: r.min_y.min(p.y),
            max_x: r.max_x.max(p.x),
            max_y: r.max_y.max(p.y),
        }))
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn corners(&self) -> [Vec3; 4] {
        [
            Vec3::new(self.min_x, self.min_y, 0.0),
            Vec3::new(self.max_x, self.min_y, 0.0),
            Vec3::new(self.max_x, self.max_y, 0.0),
            Vec3::new(self.min_x, self.max_y, 0.0),
        ]
    }

    /// Overlap along x and y; either is non-positive when the rectangles are apart
    pub fn overlap(&self, other: &Rect) -> (f32, f32) {
        (
            self.max_x.min(other.max_x) - self.min_x.max(other.min_x),
            self.max_y.min(other.max_y) - self.min_y.max(other.min_y),
        )
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        let (ox, oy) = self.overlap(other);
        ox > 0.0 && oy > 0.0
    }
}

/// A body whose placement is a model matrix and whose velocity lies in XY
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanarBody {
    pub model: Mat4,
    pub velocity: [f32; 2],
}

impl PlanarBody {
    pub fn new(model: Mat4, velocity: [f32; 2]) -> Self {
        Self { model, velocity }
    }
}

/// World-space bounding rectangle of a body's local extents
pub fn hit_box(body: &PlanarBody, local: &Rect) -> Rect {
    let corners = local.corners().map(|c| mat4::transform_point(body.model, c));
    // four corners, never empty
    Rect::from_points(&corners).unwrap_or(*local)
}

/// Move the body's translation by `velocity·dt`
pub fn integrate(body: &mut PlanarBody, dt: f32) {
    body.model[3][0] += body.velocity[0] * dt;
    body.model[3][1] += body.velocity[1] * dt;
}

/// Reflect off the first side of `bounds` the body is pushing through
///
/// Sides are checked top, bottom, left, right. Returns true when a
/// velocity component was flipped.
pub fn reflect_sides(body: &mut PlanarBody, local: &Rect, bounds: &Rect) -> bool {
    let hb = hit_box(body, local);
    let [vx, vy] = body.velocity;

    if hb.max_y >= bounds.max_y && vy > 0.0 || hb.min_y <= bounds.min_y && vy < 0.0 {
        body.velocity[1] = -vy;
        true
    } else if hb.min_x <= bounds.min_x && vx < 0.0 || hb.max_x >= bounds.max_x && vx > 0.0 {
        body.velocity[0] = -vx;
        true
    } else {
        false
    }
}

/// Bounce two overlapping bodies off each other
///
/// Both velocities are flipped on the axis with the smaller overlap.
/// Returns true when the bodies overlapped.
pub fn resolve_pair(
    a: &mut PlanarBody,
    a_local: &Rect,
    b: &mut PlanarBody,
    b_local: &Rect,
) -> bool {
    let (ox, oy) = hit_box(a, a_local).overlap(&hit_box(b, b_local));
    if ox <= 0.0 || oy <= 0.0 {
        return false;
    }
    let axis = if ox < oy { 0 } else { 1 };
    a.velocity[axis] = -a.velocity[axis];
    b.velocity[axis] = -b.velocity[axis];
    true
}
