//! RGBA colors and sRGB transfer functions

/// Linear-float RGBA color
pub type Rgba = [f32; 4];

pub const ILLINI_BLUE: Rgba = [0.075, 0.16, 0.292, 1.0];
pub const ILLINI_ORANGE: Rgba = [1.0, 0.373, 0.02, 1.0];
pub const CLIFF_BROWN: Rgba = [0.12, 0.08, 0.05, 1.0];
pub const RED: Rgba = [1.0, 0.0, 0.0, 1.0];
pub const GREEN: Rgba = [0.0, 1.0, 0.0, 1.0];
pub const BLUE: Rgba = [0.0, 0.0, 1.0, 1.0];
pub const WHITE: Rgba = [1.0, 1.0, 1.0, 1.0];
pub const BLACK: Rgba = [0.0, 0.0, 0.0, 1.0];

/// Decode one sRGB channel (0..1) to linear
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Encode one linear channel (0..1) to sRGB
pub fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Apply `f` to the color channels, leaving alpha alone
pub fn map_rgb(c: Rgba, f: impl Fn(f32) -> f32) -> Rgba {
    [f(c[0]), f(c[1]), f(c[2]), c[3]]
}

/// Component-wise linear interpolation
pub fn lerp(a: Rgba, b: Rgba, t: f32) -> Rgba {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

/// Component-wise product
pub fn modulate(a: Rgba, b: Rgba) -> Rgba {
    [a[0] * b[0], a[1] * b[1], a[2] * b[2], a[3] * b[3]]
}

/// Quantize to 8 bits per channel, clamping out-of-range values
pub fn to_rgba8(c: Rgba) -> [u8; 4] {
    c.map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
}
