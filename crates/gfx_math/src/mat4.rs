//! 4x4 matrix utilities
//!
//! Matrices are column-major (`m[col][row]`) so they can be handed to a
//! graphics API without transposing. The translation lives in column 3.
//! `mul(a, b)` applies `b` first, then `a`.

use crate::{Vec3, Vec4};

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Multiply a chain of matrices left to right: `chain(&[a, b, c]) = a * b * c`
pub fn chain(matrices: &[Mat4]) -> Mat4 {
    matrices.iter().fold(IDENTITY, |acc, m| mul(acc, *m))
}

/// Transform a Vec4 by a 4x4 matrix (column-major)
///
/// result = M * v
pub fn transform(m: Mat4, v: Vec4) -> Vec4 {
    Vec4::new(
        m[0][0] * v.x + m[1][0] * v.y + m[2][0] * v.z + m[3][0] * v.w,
        m[0][1] * v.x + m[1][1] * v.y + m[2][1] * v.z + m[3][1] * v.w,
        m[0][2] * v.x + m[1][2] * v.y + m[2][2] * v.z + m[3][2] * v.w,
        m[0][3] * v.x + m[1][3] * v.y + m[2][3] * v.z + m[3][3] * v.w,
    )
}

/// Transform a point (w = 1) and drop w. No perspective divide.
pub fn transform_point(m: Mat4, p: Vec3) -> Vec3 {
    transform(m, Vec4::point(p)).xyz()
}

/// Transform a direction (w = 0); translation is ignored.
pub fn transform_direction(m: Mat4, d: Vec3) -> Vec3 {
    transform(m, Vec4::direction(d)).xyz()
}

/// Get a column vector from a matrix
pub fn get_column(m: Mat4, col: usize) -> Vec4 {
    Vec4::new(m[col][0], m[col][1], m[col][2], m[col][3])
}

/// Transpose a matrix
pub fn transpose(m: Mat4) -> Mat4 {
    [
        [m[0][0], m[1][0], m[2][0], m[3][0]],
        [m[0][1], m[1][1], m[2][1], m[3][1]],
        [m[0][2], m[1][2], m[2][2], m[3][2]],
        [m[0][3], m[1][3], m[2][3], m[3][3]],
    ]
}

/// Translation matrix
pub fn translation(x: f32, y: f32, z: f32) -> Mat4 {
    let mut m = IDENTITY;
    m[3][0] = x;
    m[3][1] = y;
    m[3][2] = z;
    m
}

/// Non-uniform scale matrix
pub fn scale(x: f32, y: f32, z: f32) -> Mat4 {
    let mut m = IDENTITY;
    m[0][0] = x;
    m[1][1] = y;
    m[2][2] = z;
    m
}

/// Uniform scale matrix
pub fn uniform_scale(s: f32) -> Mat4 {
    scale(s, s, s)
}

/// Rotation about the X axis (Y turns toward Z)
pub fn rot_x(angle: f32) -> Mat4 {
    let (sn, cs) = angle.sin_cos();
    let mut m = IDENTITY;
    m[1][1] = cs;
    m[1][2] = sn;
    m[2][1] = -sn;
    m[2][2] = cs;
    m
}

/// Rotation about the Y axis (Z turns toward X)
pub fn rot_y(angle: f32) -> Mat4 {
    let (sn, cs) = angle.sin_cos();
    let mut m = IDENTITY;
    m[0][0] = cs;
    m[0][2] = -sn;
    m[2][0] = sn;
    m[2][2] = cs;
    m
}

/// Rotation about the Z axis (X turns toward Y)
pub fn rot_z(angle: f32) -> Mat4 {
    let (sn, cs) = angle.sin_cos();
    let mut m = IDENTITY;
    m[0][0] = cs;
    m[0][1] = sn;
    m[1][0] = -sn;
    m[1][1] = cs;
    m
}

/// Euler rotation applied Y first, then X, then Z
pub fn euler_zxy(x: f32, y: f32, z: f32) -> Mat4 {
    chain(&[rot_z(z), rot_x(x), rot_y(y)])
}

/// Rotation-only view basis for a camera looking along `forward`
///
/// Rows are (right, up, -forward), so the camera looks down -Z in view space.
pub fn fix_axes(forward: Vec3, up: Vec3) -> Mat4 {
    let f = forward.normalized();
    let r = f.cross(up).normalized();
    let u = r.cross(f);
    [
        [r.x, u.x, -f.x, 0.0],
        [r.y, u.y, -f.y, 0.0],
        [r.z, u.z, -f.z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// View matrix for a camera at `eye` looking at `center`
pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Mat4 {
    let rotation = fix_axes(center - eye, up);
    mul(rotation, translation(-eye.x, -eye.y, -eye.z))
}

/// Perspective projection for a camera looking down -Z
///
/// `fovy` is the vertical field of view in radians. The horizontal scale is
/// corrected by the viewport aspect ratio. Depth maps `-near..-far` to `-1..1`.
pub fn perspective_neg_z(near: f32, far: f32, fovy: f32, width: f32, height: f32) -> Mat4 {
    let sy = 1.0 / (fovy / 2.0).tan();
    let sx = sy * height / width;
    [
        [sx, 0.0, 0.0, 0.0],
        [0.0, sy, 0.0, 0.0],
        [0.0, 0.0, -(far + near) / (far - near), -1.0],
        [0.0, 0.0, 2.0 * far * near / (near - far), 0.0],
    ]
}

/// Translation component of an affine matrix
pub fn get_translation(m: Mat4) -> Vec3 {
    Vec3::new(m[3][0], m[3][1], m[3][2])
}

/// Copy of `m` with its translation replaced
pub fn with_translation(m: Mat4, t: Vec3) -> Mat4 {
    let mut result = m;
    result[3][0] = t.x;
    result[3][1] = t.y;
    result[3][2] = t.z;
    result
}

/// Upper-left 3x3 block, column-major
pub fn rotation3(m: Mat4) -> [[f32; 3]; 3] {
    [
        [m[0][0], m[0][1], m[0][2]],
        [m[1][0], m[1][1], m[1][2]],
        [m[2][0], m[2][1], m[2][2]],
    ]
}

/// Embed a 3x3 block into an otherwise identity 4x4 matrix
pub fn from_rotation3(r: [[f32; 3]; 3]) -> Mat4 {
    [
        [r[0][0], r[0][1], r[0][2], 0.0],
        [r[1][0], r[1][1], r[1][2], 0.0],
        [r[2][0], r[2][1], r[2][2], 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}
