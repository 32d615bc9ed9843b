//! Cameras and projection

use gfx_math::{mat4, Mat4, Vec3};

/// A camera circling the origin once every 2π seconds
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    pub radius: f32,
    pub height: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            radius: 2.0,
            height: 1.0,
        }
    }
}

impl OrbitCamera {
    pub fn new(radius: f32, height: f32) -> Self {
        Self { radius, height }
    }

    pub fn eye(&self, seconds: f32) -> Vec3 {
        let (s, c) = seconds.sin_cos();
        Vec3::new(self.radius * c, self.height, self.radius * s)
    }

    /// View matrix looking at the origin with +Y up
    pub fn view(&self, seconds: f32) -> Mat4 {
        mat4::look_at(self.eye(seconds), Vec3::ZERO, Vec3::Y)
    }
}

/// Perspective projection parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians
    pub fovy: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fovy: 1.0,
            near: 0.1,
            far: 10.0,
        }
    }
}

impl Projection {
    pub fn new(fovy: f32, near: f32, far: f32) -> Self {
        Self { fovy, near, far }
    }

    /// Projection matrix for a `width` x `height` viewport
    pub fn matrix(&self, width: u32, height: u32) -> Mat4 {
        mat4::perspective_neg_z(self.near, self.far, self.fovy, width as f32, height as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gfx_math::Vec4;

    const EPSILON: f32 = 0.0001;

    #[test]
    fn test_orbit_eye() {
        let cam = OrbitCamera::new(3.0, 1.5);
        assert!((cam.eye(0.0) - Vec3::new(3.0, 1.5, 0.0)).length() < EPSILON);
        let quarter = cam.eye(std::f32::consts::FRAC_PI_2);
        assert!((quarter - Vec3::new(0.0, 1.5, 3.0)).length() < EPSILON);
    }

    #[test]
    fn test_orbit_looks_at_origin() {
        let cam = OrbitCamera::default();
        for t in [0.0, 0.7, 2.5] {
            let origin = mat4::transform_point(cam.view(t), Vec3::ZERO);
            // straight ahead, at the orbit distance
            assert!(origin.x.abs() < EPSILON && origin.y.abs() < EPSILON);
            assert!((origin.z + cam.eye(t).length()).abs() < EPSILON);
        }
    }

    #[test]
    fn test_projection_depth_range() {
        let p = Projection::new(1.0, 0.5, 20.0).matrix(800, 600);
        let near = mat4::transform(p, Vec4::new(0.0, 0.0, -0.5, 1.0)).perspective_divide();
        let far = mat4::transform(p, Vec4::new(0.0, 0.0, -20.0, 1.0)).perspective_divide();
        assert!((near.z + 1.0).abs() < EPSILON);
        assert!((far.z - 1.0).abs() < 1e-3);
    }
}
