//! Integration tests for the logo world pipeline
//!
//! These tests verify the full systems-then-frame update works correctly:
//! 1. Bodies move and bounce off the world bounds
//! 2. Bodies bounce off each other
//! 3. Animated entities get model-view matrices from their animation

use gfx_core::{Animation, Entity, LogoSystem, Rect, World};
use gfx_math::{mat4, Vec3};

fn logo(x: f32, y: f32, velocity: [f32; 2]) -> Entity {
    Entity::new(mat4::mul(mat4::translation(x, y, 0.0), mat4::uniform_scale(0.4)))
        .with_velocity(velocity)
        .with_local_bounds(Rect::new(-0.5, -0.5, 0.5, 0.5))
}

// ==================== Bounds Tests ====================

/// A single logo crossing the right edge should turn back
#[test]
fn test_logo_reflects_off_right_side() {
    let mut world = World::with_logo_systems(Rect::new(-1.0, -1.0, 1.0, 1.0));
    let key = world.add_entity(logo(0.7, 0.0, [1.0, 0.0]));

    // 0.1 per frame: the hit box reaches x = 1 within two frames
    for _ in 0..2 {
        world.update(0.1, 0.0);
    }

    let body = world.get(key).and_then(|e| e.body).expect("logo should have a body");
    assert_eq!(body.velocity, [-1.0, 0.0]);
}

#[test]
fn test_logos_stay_inside_bounds() {
    let bounds = Rect::new(-1.0, -1.0, 1.0, 1.0);
    let mut world = World::with_logo_systems(bounds);
    world.add_entity(logo(-0.5, 0.0, [0.6, 0.45]).with_name("left"));
    world.add_entity(logo(0.5, 0.0, [-0.6, 0.45]).with_name("right"));

    let dt = 1.0 / 60.0;
    for frame in 0..3000 {
        world.update(dt, frame as f32 * dt);
    }

    for (_, entity) in world.iter() {
        let t = mat4::get_translation(entity.model);
        // half-size 0.2 plus one frame of overshoot
        assert!(t.x.abs() < 0.85, "{:?} at {:?}", entity.name, t);
        assert!(t.y.abs() < 0.85, "{:?} at {:?}", entity.name, t);
    }
}

// ==================== Collision Tests ====================

#[test]
fn test_head_on_logos_swap_direction() {
    let mut world = World::with_logo_systems(Rect::new(-5.0, -5.0, 5.0, 5.0));
    let left = world.add_entity(logo(-0.3, 0.0, [1.0, 0.0]));
    let right = world.add_entity(logo(0.3, 0.0, [-1.0, 0.0]));

    // each frame closes the 0.2 gap by 0.1 per side
    world.update(0.1, 0.0);
    world.update(0.1, 0.0);

    let vl = world.get(left).and_then(|e| e.body).map(|b| b.velocity);
    let vr = world.get(right).and_then(|e| e.body).map(|b| b.velocity);
    assert_eq!(vl, Some([-1.0, 0.0]));
    assert_eq!(vr, Some([1.0, 0.0]));
}

// ==================== Animation Tests ====================

#[test]
fn test_animated_logo_model_view() {
    let mut world = World::new().with_system(LogoSystem::Velocity);
    let key = world.add_entity(
        Entity::new(mat4::IDENTITY)
            .with_name("dancer")
            .with_animation(Animation::Compose(vec![
                Animation::GrowAndShrink {
                    min: 0.5,
                    max: 1.5,
                    rate: 1.0,
                },
                Animation::Rotation,
            ])),
    );

    world.update(0.016, 0.0);
    let at_start = world.get(key).map(|e| e.model_view).expect("entity exists");
    assert_eq!(mat4::transform_point(at_start, Vec3::X), Vec3::X);

    world.update(0.016, 5.0);
    let later = world.get(key).map(|e| e.model_view).expect("entity exists");
    let p = mat4::transform_point(later, Vec3::X);
    assert!((p - Vec3::X).length() > 0.01);
    // the static placement itself never changes
    assert_eq!(world.get(key).map(|e| e.model), Some(mat4::IDENTITY));
}
