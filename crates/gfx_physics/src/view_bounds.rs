//! Keep bodies inside the visible part of the screen

use gfx_math::{mat4, Mat4, Vec3, Vec4};

/// Reflect `velocity` when a body is leaving the view through a screen edge
///
/// The position is projected to normalized device coordinates and the
/// body's velocity to clip space. If the body overlaps the left or right
/// edge while moving outward, `velocity.x` is negated. Otherwise, if it
/// overlaps the top or bottom edge while moving outward, `velocity.z` is
/// negated; the camera looks straight down so screen y follows world z.
/// At most one edge applies per call.
pub fn bounce_into_view(
    view_projection: Mat4,
    position: Vec3,
    entity_velocity: Vec3,
    velocity: Vec3,
    radius: f32,
) -> Vec3 {
    let clip = mat4::transform(view_projection, Vec4::point(position));
    if clip.w.abs() <= f32::EPSILON {
        return velocity;
    }
    let ndc = clip.perspective_divide();
    let sv = mat4::transform(view_projection, Vec4::direction(entity_velocity));

    let leaving = |pos: f32, vel: f32| {
        (pos - radius < -1.0 && vel < 0.0) || (pos + radius > 1.0 && vel > 0.0)
    };

    let mut out = velocity;
    if leaving(ndc.x, sv.x) {
        out.x = -out.x;
    } else if leaving(ndc.y, sv.y) {
        out.z = -out.z;
    }
    out
}
