//! Time-driven model transforms

use std::f32::consts::TAU;

use gfx_math::{mat4, Mat4};
use serde::{Deserialize, Serialize};

/// A transform that depends only on elapsed time
///
/// Animations are evaluated each frame and multiplied onto an entity's
/// model matrix. They serialize with an explicit `kind` tag so they can be
/// written in configuration files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "params", rename_all = "snake_case")]
pub enum Animation {
    /// No change
    Identity,
    /// Constant uniform scale
    Scale { amount: f32 },
    /// Spin about Z; the angle in radians is `seconds / 2π`
    Rotation,
    /// Uniform scale oscillating between `min` and `max`
    GrowAndShrink { min: f32, max: f32, rate: f32 },
    /// Constant translation
    Translate { x: f32, y: f32, z: f32 },
    /// Product of the parts, left to right: the first part is applied last
    Compose(Vec<Animation>),
}

impl Default for Animation {
    fn default() -> Self {
        Animation::Identity
    }
}

impl Animation {
    /// Matrix for this animation at `seconds` since start
    pub fn evaluate(&self, seconds: f32) -> Mat4 {
        match self {
            Animation::Identity => mat4::IDENTITY,
            Animation::Scale { amount } => mat4::uniform_scale(*amount),
            Animation::Rotation => mat4::rot_z(seconds / TAU),
            Animation::GrowAndShrink { min, max, rate } => {
                let mid = (min + max) / 2.0;
                let amplitude = (max - min) / 2.0;
                mat4::uniform_scale(mid + amplitude * (rate * seconds / TAU).sin())
            }
            Animation::Translate { x, y, z } => mat4::translation(*x, *y, *z),
            Animation::Compose(parts) => parts
                .iter()
                .fold(mat4::IDENTITY, |acc, part| mat4::mul(acc, part.evaluate(seconds))),
        }
    }

    /// Compose with another animation applied before this one
    pub fn then_after(self, inner: Animation) -> Animation {
        match self {
            Animation::Compose(mut parts) => {
                parts.push(inner);
                Animation::Compose(parts)
            }
            outer => Animation::Compose(vec![outer, inner]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gfx_math::Vec3;

    const EPSILON: f32 = 0.0001;

    fn mat_approx_eq(a: Mat4, b: Mat4) -> bool {
        a.iter()
            .flatten()
            .zip(b.iter().flatten())
            .all(|(x, y)| (x - y).abs() < EPSILON)
    }

    #[test]
    fn test_identity_and_scale() {
        assert_eq!(Animation::Identity.evaluate(3.0), mat4::IDENTITY);
        assert_eq!(
            Animation::Scale { amount: 2.0 }.evaluate(3.0),
            mat4::uniform_scale(2.0)
        );
    }

    #[test]
    fn test_rotation_angle() {
        let m = Animation::Rotation.evaluate(TAU);
        // 2π seconds turn the logo by one radian
        assert!(mat_approx_eq(m, mat4::rot_z(1.0)));
    }

    #[test]
    fn test_grow_and_shrink_range() {
        let anim = Animation::GrowAndShrink {
            min: 0.5,
            max: 1.5,
            rate: 1.0,
        };
        assert!(mat_approx_eq(anim.evaluate(0.0), mat4::uniform_scale(1.0)));
        // sin reaches 1 when rate·t / 2π = π / 2
        let peak = anim.evaluate(TAU * std::f32::consts::FRAC_PI_2);
        assert!((peak[0][0] - 1.5).abs() < EPSILON);
        for i in 0..100 {
            let s = anim.evaluate(i as f32 * 0.37)[0][0];
            assert!(s >= 0.5 - EPSILON && s <= 1.5 + EPSILON);
        }
    }

    #[test]
    fn test_compose_applies_first_last() {
        let anim = Animation::Compose(vec![
            Animation::Translate { x: 1.0, y: 0.0, z: 0.0 },
            Animation::Scale { amount: 2.0 },
        ]);
        let p = mat4::transform_point(anim.evaluate(0.0), Vec3::new(1.0, 1.0, 0.0));
        // scaled first, then translated
        assert_eq!(p, Vec3::new(3.0, 2.0, 0.0));
    }

    #[test]
    fn test_then_after() {
        let anim = Animation::Rotation.then_after(Animation::Scale { amount: 0.5 });
        assert_eq!(
            anim,
            Animation::Compose(vec![Animation::Rotation, Animation::Scale { amount: 0.5 }])
        );
    }

    #[test]
    fn test_toml_round_trip() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            animation: Animation,
        }
        let text = r#"
            [animation]
            kind = "grow_and_shrink"
            params = { min = 0.5, max = 1.0, rate = 2.0 }
        "#;
        let parsed: Wrapper = toml::from_str(text).unwrap();
        assert_eq!(
            parsed.animation,
            Animation::GrowAndShrink {
                min: 0.5,
                max: 1.0,
                rate: 2.0
            }
        );
    }
}
