//! Integration tests for the simulation pipelines
//!
//! These tests run the worlds for many steps and check the properties the
//! demos rely on:
//! 1. Burst particles lose energy and stay inside their box
//! 2. A flock stays in the ground plane and keeps moving
//! 3. Two planar bodies bounce off the bounds and each other without escaping

use std::f32::consts::PI;

use gfx_math::{mat4, Vec3};
use gfx_physics::planar::{hit_box, integrate, reflect_sides, resolve_pair};
use gfx_physics::{BoidConfig, BurstConfig, BurstWorld, Flock, Particle, PlanarBody, Rect};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ==================== Burst Tests ====================

fn kinetic_energy(world: &BurstWorld) -> f32 {
    world
        .iter()
        .map(|(_, p)| 0.5 * p.velocity.length_squared())
        .sum()
}

/// Damping and inelastic bounces should drain energy from a gravity-free box
#[test]
fn test_burst_loses_energy_without_gravity() {
    let config = BurstConfig {
        gravity: Vec3::ZERO,
        ..Default::default()
    };
    let mut world = BurstWorld::with_config(config);
    let mut rng = StdRng::seed_from_u64(99);
    world.populate(&mut rng);

    let start = kinetic_energy(&world);
    for _ in 0..500 {
        world.step(0.016);
    }
    let end = kinetic_energy(&world);

    assert!(end < start, "energy grew from {} to {}", start, end);
}

/// A single particle dropped from rest ends up settling near the floor
#[test]
fn test_burst_particle_settles_on_floor() {
    let mut world = BurstWorld::new();
    let key = world.insert(Particle::new(Vec3::new(0.0, 0.5, 0.0), 0.1));

    for _ in 0..1000 {
        world.step(0.016);
    }

    let p = world.get(key).expect("particle should still exist");
    assert!(p.position.y < -0.7, "particle at {:?}", p.position);
    assert!(p.position.y > -1.2, "particle fell through: {:?}", p.position);
}

// ==================== Flock Tests ====================

#[test]
fn test_flock_stays_planar_and_moving() {
    let config = BoidConfig::default();
    let min_speed = config.min_speed;
    let mut rng = StdRng::seed_from_u64(1234);
    let mut flock = Flock::spawn(config, &mut rng);

    let vp = mat4::mul(
        mat4::perspective_neg_z(0.1, 10.0, PI / 3.0, 800.0, 600.0),
        mat4::look_at(Vec3::new(0.0, 3.0, 0.0), Vec3::ZERO, Vec3::Z),
    );
    for _ in 0..300 {
        flock.step(0.016, vp);
    }

    let mut moving = 0;
    for boid in flock.boids() {
        assert!(boid.position.is_finite());
        assert!(boid.position.y.abs() < 1e-4);
        if boid.velocity.length() >= min_speed - 1e-4 {
            moving += 1;
        }
    }
    // boids with flockmates are clamped to the minimum speed
    assert!(moving > 0);
}

// ==================== Planar Bounce Tests ====================

#[test]
fn test_two_bodies_stay_in_bounds() {
    let local = Rect::new(-0.5, -0.5, 0.5, 0.5);
    let bounds = Rect::new(-1.0, -1.0, 1.0, 1.0);
    let shrink = mat4::uniform_scale(0.3);

    // mirrored about x = 0 so they always meet head-on
    let mut a = PlanarBody::new(mat4::mul(mat4::translation(-0.5, 0.0, 0.0), shrink), [0.7, 0.4]);
    let mut b = PlanarBody::new(mat4::mul(mat4::translation(0.5, 0.0, 0.0), shrink), [-0.7, 0.4]);
    let mut collisions = 0;

    let dt = 0.016;
    for _ in 0..2000 {
        integrate(&mut a, dt);
        integrate(&mut b, dt);
        reflect_sides(&mut a, &local, &bounds);
        reflect_sides(&mut b, &local, &bounds);
        if resolve_pair(&mut a, &local, &mut b, &local) {
            collisions += 1;
        }
    }

    assert!(collisions > 0);

    for body in [&a, &b] {
        let hb = hit_box(body, &local);
        assert!(hb.min_x > -1.1 && hb.max_x < 1.1, "escaped: {:?}", hb);
        assert!(hb.min_y > -1.1 && hb.max_y < 1.1, "escaped: {:?}", hb);
    }
}
