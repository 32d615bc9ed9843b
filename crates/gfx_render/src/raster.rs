//! Scan conversion
//!
//! Triangles are converted with the DDA (digital differential analyzer)
//! scanline method: vertices are sorted by y, the long edge and the two
//! short edges are stepped one row at a time, and each row is stepped one
//! pixel at a time. Pixel centers sit on integer coordinates, so a span
//! starts at `ceil` of its left end.
//!
//! Varyings are carried premultiplied by `1/w` so that interpolating them
//! linearly in screen space stays perspective-correct.

use std::ops::{Add, Mul, Sub};

use gfx_math::Vec4;

use crate::shading::{Varyings, VARYING_COUNT};

/// Clip-space w at or below this is treated as behind the eye
pub const W_EPSILON: f32 = 1e-6;

/// A vertex in window coordinates, ready to be stepped across
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RasterVertex {
    /// Pixel column
    pub x: f32,
    /// Pixel row, 0 at the top
    pub y: f32,
    /// NDC depth in [-1, 1]
    pub z: f32,
    /// 1 / clip w
    pub inv_w: f32,
    /// Varyings multiplied by `inv_w`
    pub attrs: [f32; VARYING_COUNT],
}

impl RasterVertex {
    /// Project a clip-space vertex onto a `width` x `height` viewport
    ///
    /// Returns `None` when the vertex is at or behind the eye plane.
    pub fn from_clip(clip: Vec4, varyings: &Varyings, width: u32, height: u32) -> Option<Self> {
        if clip.w <= W_EPSILON {
            return None;
        }
        let inv_w = 1.0 / clip.w;
        let ndc = clip.perspective_divide();
        Some(Self {
            x: (ndc.x + 1.0) * width as f32 / 2.0,
            y: (1.0 - ndc.y) * height as f32 / 2.0,
            z: ndc.z,
            inv_w,
            attrs: varyings.to_array().map(|a| a * inv_w),
        })
    }

    /// Recover the interpolated varyings
    pub fn varyings(&self) -> Varyings {
        let inv_w = self.inv_w;
        Varyings::from_array(&self.attrs.map(|a| a / inv_w))
    }

    fn coord(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

impl Add for RasterVertex {
    type Output = Self;

    fn add(self, o: Self) -> Self {
        let mut attrs = self.attrs;
        for (a, b) in attrs.iter_mut().zip(o.attrs) {
            *a += b;
        }
        Self {
            x: self.x + o.x,
            y: self.y + o.y,
            z: self.z + o.z,
            inv_w: self.inv_w + o.inv_w,
            attrs,
        }
    }
}

impl Sub for RasterVertex {
    type Output = Self;

    fn sub(self, o: Self) -> Self {
        self + o * -1.0
    }
}

impl Mul<f32> for RasterVertex {
    type Output = Self;

    fn mul(self, s: f32) -> Self {
        Self {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
            inv_w: self.inv_w * s,
            attrs: self.attrs.map(|a| a * s),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Axis {
    X,
    Y,
}

/// Points on `from -> to` at each integer coordinate along `axis` in `[lo, hi)`
///
/// `from` must not lie after `to` along `axis`; an edge with no extent
/// yields nothing.
fn dda(from: RasterVertex, to: RasterVertex, axis: Axis, lo: f32, hi: f32) -> impl Iterator<Item = RasterVertex> {
    let (start, end) = (from.coord(axis), to.coord(axis));
    let extent = end - start;
    let (first, step, count) = if extent > 0.0 {
        let step = (to - from) * (1.0 / extent);
        let first_at = start.ceil().max(lo.ceil());
        let count = (end.min(hi) - first_at).ceil().max(0.0) as usize;
        (from + step * (first_at - start), step, count)
    } else {
        (from, from * 0.0, 0)
    };
    (0..count).map(move |i| first + step * i as f32)
}

/// Every pixel covered by a triangle, clipped to the viewport
///
/// `emit` receives the pixel column and row and the interpolated vertex.
/// Rows are visited top to bottom, pixels left to right.
pub fn scanline(tri: [RasterVertex; 3], width: u32, height: u32, mut emit: impl FnMut(u32, u32, &RasterVertex)) {
    let mut sorted = tri;
    sorted.sort_by(|a, b| a.y.total_cmp(&b.y));
    let [a, b, c] = sorted;

    let (w, h) = (width as f32, height as f32);
    let long = dda(a, c, Axis::Y, 0.0, h);
    let short = dda(a, b, Axis::Y, 0.0, h).chain(dda(b, c, Axis::Y, 0.0, h));

    for (p, q) in long.zip(short) {
        let (left, right) = if p.x <= q.x { (p, q) } else { (q, p) };
        let row = p.y.round() as u32;
        for frag in dda(left, right, Axis::X, 0.0, w) {
            emit(frag.x.round() as u32, row, &frag);
        }
    }
}
