//! Boids flocking
//!
//! Every steering rule works by rotating the velocity about the Y axis by a
//! small angle toward (or away from) a target direction, so boids turn
//! smoothly instead of snapping. Rules run in a fixed order: alignment,
//! cohesion, separation, then a minimum-speed clamp.

use std::f32::consts::PI;

use gfx_math::{mat4, Mat4, Rgba, Vec3};
use rand::Rng;

use crate::view_bounds::bounce_into_view;

/// Configuration for a flock
#[derive(Clone, Debug, PartialEq)]
pub struct BoidConfig {
    pub count: usize,
    /// Radius of each boid, used for the screen-edge test
    pub size: f32,
    /// Boids farther apart than this ignore each other
    pub flock_distance: f32,
    /// Flockmates closer than this push the boid away
    pub separation_distance: f32,
    pub min_speed: f32,
    /// Radians per second at priority 1
    pub turn_rate: f32,
    pub align_priority: f32,
    pub cohesion_priority: f32,
    /// Negative: steer away from crowded neighbours
    pub separation_priority: f32,
    /// Half-angle of the cone a boid can see
    pub view_angle: f32,
    /// Initial positions are drawn from `±spawn_extent` in x and z
    pub spawn_extent: f32,
}

impl Default for BoidConfig {
    fn default() -> Self {
        Self {
            count: 50,
            size: 0.03,
            flock_distance: 0.5,
            separation_distance: 0.3,
            min_speed: 0.5,
            turn_rate: 2.0,
            align_priority: 0.3,
            cohesion_priority: 0.5,
            separation_priority: -0.8,
            view_angle: PI,
            spawn_extent: 1.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Boid {
    pub position: Vec3,
    pub velocity: Vec3,
    pub color: Rgba,
}

impl Boid {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self {
            position,
            velocity,
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// Whether `b` is within `a`'s flocking range and field of view
///
/// Identity is not checked here; callers skip the boid itself.
pub fn is_flockmate(a: &Boid, b: &Boid, config: &BoidConfig) -> bool {
    let to_b = b.position - a.position;
    if to_b.length() > config.flock_distance {
        return false;
    }
    let heading = a.velocity.normalized();
    let dir = to_b.normalized();
    // no defined angle without a heading or an offset
    if heading == Vec3::ZERO || dir == Vec3::ZERO {
        return false;
    }
    heading.dot(dir).clamp(-1.0, 1.0).acos() < config.view_angle
}

/// Rotation about Y for one steering rule
pub fn turn(left: bool, priority: f32, dt: f32, config: &BoidConfig) -> Mat4 {
    let sign = if left { -1.0 } else { 1.0 };
    mat4::rot_y(config.turn_rate * priority * dt * sign)
}

/// Rotate `velocity` toward `target` with the given priority
///
/// The turn direction comes from `heading`, the boid's velocity at the
/// start of the step, not from `velocity`, which earlier rules and the
/// screen-edge bounce may already have changed.
pub fn steer(
    velocity: Vec3,
    heading: Vec3,
    target: Vec3,
    priority: f32,
    dt: f32,
    config: &BoidConfig,
) -> Vec3 {
    let left = heading.cross(target).y < 0.0;
    mat4::transform_direction(turn(left, priority, dt, config), velocity)
}

/// Rescale a velocity that has dropped to `min_speed` or below
pub fn enforce_min_speed(velocity: Vec3, min_speed: f32) -> Vec3 {
    let speed = velocity.length();
    if speed > min_speed {
        velocity
    } else if speed == 0.0 {
        Vec3::new(min_speed, 0.0, 0.0)
    } else {
        velocity * (min_speed / speed)
    }
}

/// A flock of boids in the XZ plane
pub struct Flock {
    boids: Vec<Boid>,
    pub config: BoidConfig,
}

impl Flock {
    /// Create an empty flock
    pub fn new(config: BoidConfig) -> Self {
        Self {
            boids: Vec::new(),
            config,
        }
    }

    /// Create a flock of `config.count` randomly placed boids
    pub fn spawn<R: Rng + ?Sized>(config: BoidConfig, rng: &mut R) -> Self {
        let e = config.spawn_extent;
        let mut flock = Self::new(config);
        for _ in 0..flock.config.count {
            let (px, pz, vx, vz) = if e > 0.0 {
                (
                    rng.gen_range(-e..e),
                    rng.gen_range(-e..e),
                    rng.gen_range(-e..e) / 3.0,
                    rng.gen_range(-e..e) / 3.0,
                )
            } else {
                (0.0, 0.0, 0.0, 0.0)
            };
            let mut boid = Boid::new(Vec3::new(px, 0.0, pz), Vec3::new(vx, 0.0, vz));
            boid.color = [rng.gen::<f32>(), rng.gen::<f32>(), rng.gen::<f32>(), 1.0];
            flock.boids.push(boid);
        }
        log::debug!("Spawned flock of {} boids", flock.boids.len());
        flock
    }

    pub fn push(&mut self, boid: Boid) {
        self.boids.push(boid);
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    /// Indices of the flockmates of boid `i` within `boids`
    fn mates(boids: &[Boid], i: usize, config: &BoidConfig) -> Vec<usize> {
        (0..boids.len())
            .filter(|&j| j != i && is_flockmate(&boids[i], &boids[j], config))
            .collect()
    }

    /// Apply the steering rules to one velocity
    ///
    /// `me` is the boid as seen in `snapshot`. Its position anchors the
    /// cohesion and separation targets and its velocity picks the turn
    /// direction of every rule, while `velocity` is what gets rotated.
    pub fn steer_velocity(
        velocity: Vec3,
        me: &Boid,
        mates: &[&Boid],
        dt: f32,
        config: &BoidConfig,
    ) -> Vec3 {
        if mates.is_empty() {
            return velocity;
        }
        let count = mates.len() as f32;
        let mut v = velocity;

        let heading = me.velocity;

        let alignment: Vec3 = mates.iter().map(|m| m.velocity.normalized()).sum();
        v = steer(v, heading, alignment, config.align_priority, dt, config);

        let centroid = mates.iter().map(|m| m.position).sum::<Vec3>() / count;
        let cohesion = centroid - me.position;
        v = steer(v, heading, cohesion, config.cohesion_priority, dt, config);

        let close: Vec<Vec3> = mates
            .iter()
            .filter(|m| m.position.distance(me.position) < config.separation_distance)
            .map(|m| m.position)
            .collect();
        if !close.is_empty() {
            let crowd = close.iter().copied().sum::<Vec3>() / close.len() as f32;
            let separation = crowd - me.position;
            v = steer(v, heading, separation, config.separation_priority, dt, config);
        }

        enforce_min_speed(v, config.min_speed)
    }

    /// Advance the flock by `dt` seconds
    ///
    /// Positions move first. Each boid then bounces off the screen edges of
    /// `view_projection` and steers against a snapshot of the flock taken
    /// after the move, so update order within the flock does not matter.
    pub fn step(&mut self, dt: f32, view_projection: Mat4) {
        for boid in &mut self.boids {
            boid.position += boid.velocity * dt;
        }

        let snapshot = self.boids.clone();
        let config = &self.config;
        for (i, boid) in self.boids.iter_mut().enumerate() {
            let me = &snapshot[i];
            let bounced = bounce_into_view(
                view_projection,
                me.position,
                me.velocity,
                boid.velocity,
                config.size,
            );
            let mates: Vec<&Boid> = Self::mates(&snapshot, i, config)
                .into_iter()
                .map(|j| &snapshot[j])
                .collect();
            boid.velocity = Self::steer_velocity(bounced, me, &mates, dt, config);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_flockmate_range() {
        let config = BoidConfig::default();
        let a = Boid::new(Vec3::ZERO, Vec3::X);
        assert!(is_flockmate(&a, &Boid::new(Vec3::new(0.4, 0.0, 0.0), Vec3::X), &config));
        assert!(!is_flockmate(&a, &Boid::new(Vec3::new(0.6, 0.0, 0.0), Vec3::X), &config));
    }

    #[test]
    fn test_flockmate_view_cone() {
        let config = BoidConfig {
            view_angle: PI / 2.0,
            ..Default::default()
        };
        let a = Boid::new(Vec3::ZERO, Vec3::X);
        let ahead = Boid::new(Vec3::new(0.2, 0.0, 0.1), Vec3::X);
        let behind = Boid::new(Vec3::new(-0.2, 0.0, 0.0), Vec3::X);
        assert!(is_flockmate(&a, &ahead, &config));
        assert!(!is_flockmate(&a, &behind, &config));
    }

    #[test]
    fn test_steer_turns_toward_target() {
        let config = BoidConfig::default();
        let v = Vec3::X;
        let target = Vec3::Z;
        let out = steer(v, v, target, 1.0, 0.1, &config);
        assert!(out.z > 0.0, "turned away: {:?}", out);
        assert!(approx_eq(out.length(), 1.0));

        // negative priority turns away
        let out = steer(v, v, target, -1.0, 0.1, &config);
        assert!(out.z < 0.0);

        // target on the other side
        let out = steer(v, v, -Vec3::Z, 1.0, 0.1, &config);
        assert!(out.z < 0.0);
    }

    #[test]
    fn test_steer_direction_from_heading() {
        let config = BoidConfig::default();
        // the turn follows the +x heading, not the -x velocity
        let out = steer(-Vec3::X, Vec3::X, Vec3::Z, 0.5, 0.1, &config);
        let angle = config.turn_rate * 0.5 * 0.1;
        assert!(approx_eq(out.x, -angle.cos()));
        assert!(approx_eq(out.z, -angle.sin()));
    }

    #[test]
    fn test_flockmate_needs_heading_and_offset() {
        let config = BoidConfig::default();
        let still = Boid::new(Vec3::ZERO, Vec3::ZERO);
        let moving = Boid::new(Vec3::ZERO, Vec3::X);
        let near = Boid::new(Vec3::new(0.1, 0.0, 0.0), Vec3::X);
        assert!(!is_flockmate(&still, &near, &config));
        // same position as the other boid
        assert!(!is_flockmate(&moving, &Boid::new(Vec3::ZERO, Vec3::Z), &config));
        assert!(is_flockmate(&moving, &near, &config));
    }

    #[test]
    fn test_bounced_velocity_turns_by_snapshot_heading() {
        let config = BoidConfig {
            align_priority: 0.0,
            ..Default::default()
        };
        // snapshot moves +x, the edge bounce already flipped it to -x
        let me = Boid::new(Vec3::ZERO, Vec3::X);
        let mate = Boid::new(Vec3::new(0.0, 0.0, 0.4), Vec3::X);
        let out = Flock::steer_velocity(-Vec3::X, &me, &[&mate], 0.1, &config);

        let angle = config.turn_rate * config.cohesion_priority * 0.1;
        assert!(approx_eq(out.x, -angle.cos()), "{:?}", out);
        assert!(approx_eq(out.z, -angle.sin()), "{:?}", out);
    }

    #[test]
    fn test_separation_distance_is_exclusive() {
        let config = BoidConfig {
            separation_distance: 0.25,
            align_priority: 0.0,
            cohesion_priority: 0.0,
            ..Default::default()
        };
        let me = Boid::new(Vec3::ZERO, Vec3::Z);
        let edge = Boid::new(Vec3::new(0.25, 0.0, 0.0), Vec3::Z);
        let out = Flock::steer_velocity(me.velocity, &me, &[&edge], 0.1, &config);
        assert!(approx_eq(out.x, 0.0) && approx_eq(out.z, 1.0), "{:?}", out);

        let inside = Boid::new(Vec3::new(0.2, 0.0, 0.0), Vec3::Z);
        let out = Flock::steer_velocity(me.velocity, &me, &[&inside], 0.1, &config);
        assert!(out.x < 0.0, "did not steer away: {:?}", out);
    }

    #[test]
    fn test_step_at_screen_edge_turns_by_heading() {
        let config = BoidConfig {
            align_priority: 0.0,
            ..Default::default()
        };
        let mut flock = Flock::new(config.clone());
        flock.push(Boid::new(Vec3::new(-0.9, 0.0, 0.0), -Vec3::X));
        flock.push(Boid::new(Vec3::new(-0.9, 0.0, 0.4), -Vec3::X));
        // top-down camera without perspective: screen x is -world x
        let view = mat4::look_at(Vec3::new(0.0, 3.0, 0.0), Vec3::ZERO, Vec3::Z);
        flock.step(0.1, view);

        // bounced to +x, then cohesion turns by the -x heading
        let v = flock.boids()[0].velocity;
        let angle = config.turn_rate * config.cohesion_priority * 0.1;
        assert!(approx_eq(v.x, angle.cos()), "{:?}", v);
        assert!(approx_eq(v.z, -angle.sin()), "{:?}", v);
    }

    #[test]
    fn test_min_speed() {
        assert_eq!(enforce_min_speed(Vec3::ZERO, 0.5), Vec3::new(0.5, 0.0, 0.0));
        let slow = enforce_min_speed(Vec3::new(0.0, 0.0, 0.1), 0.5);
        assert!(approx_eq(slow.length(), 0.5));
        assert!(approx_eq(slow.z, 0.5));
        let fast = Vec3::new(2.0, 0.0, 0.0);
        assert_eq!(enforce_min_speed(fast, 0.5), fast);
    }

    #[test]
    fn test_lonely_boid_keeps_velocity() {
        let config = BoidConfig::default();
        let me = Boid::new(Vec3::ZERO, Vec3::new(0.1, 0.0, 0.0));
        let out = Flock::steer_velocity(me.velocity, &me, &[], 0.1, &config);
        // not even the minimum speed applies without flockmates
        assert_eq!(out, me.velocity);
    }

    #[test]
    fn test_separation_skipped_when_spread_out() {
        let config = BoidConfig::default();
        let me = Boid::new(Vec3::ZERO, Vec3::X);
        // a mate ahead and slightly left, beyond separation distance
        let mate = Boid::new(Vec3::new(0.45, 0.0, 0.05), Vec3::X);
        let mates = [&mate];

        let out = Flock::steer_velocity(me.velocity, &me, &mates, 0.1, &config);
        // alignment target is parallel, cohesion pulls toward +z
        assert!(out.z > 0.0);
    }

    #[test]
    fn test_separation_pushes_away() {
        let config = BoidConfig {
            cohesion_priority: 0.0,
            align_priority: 0.0,
            ..Default::default()
        };
        let me = Boid::new(Vec3::ZERO, Vec3::X);
        let mate = Boid::new(Vec3::new(0.1, 0.0, 0.1), Vec3::X);
        let out = Flock::steer_velocity(me.velocity, &me, &[&mate], 0.1, &config);
        assert!(out.z < 0.0, "did not steer away: {:?}", out);
    }

    #[test]
    fn test_spawn_in_plane() {
        let mut rng = StdRng::seed_from_u64(11);
        let flock = Flock::spawn(BoidConfig::default(), &mut rng);
        assert_eq!(flock.len(), 50);
        for b in flock.boids() {
            assert_eq!(b.position.y, 0.0);
            assert_eq!(b.velocity.y, 0.0);
            assert!(b.position.x.abs() <= 1.5);
            assert!(b.velocity.z.abs() <= 0.5);
        }
    }

    #[test]
    fn test_step_keeps_min_speed() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut flock = Flock::spawn(BoidConfig::default(), &mut rng);
        let vp = mat4::mul(
            mat4::perspective_neg_z(0.1, 10.0, PI / 4.0, 1.0, 1.0),
            mat4::look_at(Vec3::new(0.0, 3.0, 0.0), Vec3::ZERO, Vec3::Z),
        );
        for _ in 0..100 {
            flock.step(0.016, vp);
        }
        for b in flock.boids() {
            assert!(b.position.is_finite());
            assert!(approx_eq(b.velocity.y, 0.0));
        }
    }
}
