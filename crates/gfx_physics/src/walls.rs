//! Elastic bounce against planar walls

use bitflags::bitflags;
use gfx_math::{Plane, Vec3};

/// A wall is a plane whose normal points into the playable space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wall {
    pub plane: Plane,
}

impl Wall {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            plane: Plane::new(point, normal),
        }
    }
}

/// Bounce a body off a wall
///
/// `acc_velocity` is the velocity being accumulated for this step, while
/// `position` and `entity_velocity` describe the body at the start of the
/// step. The wall pushes back along its normal with
/// `|entity_velocity·n|·2·elasticity` when the body is moving toward it
/// and is either touching it (within `radius`) or already behind it.
pub fn bounce_off_wall(
    acc_velocity: Vec3,
    position: Vec3,
    entity_velocity: Vec3,
    radius: f32,
    wall: &Wall,
    elasticity: f32,
) -> Vec3 {
    let n = wall.plane.normal;
    let approach = entity_velocity.dot(n);
    if approach > 0.0 {
        return acc_velocity;
    }
    if wall.plane.distance(position) > radius && wall.plane.is_in_front(position) {
        return acc_velocity;
    }
    acc_velocity + n * (approach.abs() * 2.0 * elasticity)
}

bitflags! {
    /// Which faces of a [`BoxBounds`] act as walls
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct WallSet: u8 {
        const NEG_X = 1 << 0;
        const POS_X = 1 << 1;
        const NEG_Y = 1 << 2;
        const POS_Y = 1 << 3;
        const NEG_Z = 1 << 4;
        const POS_Z = 1 << 5;
        const ALL = 0b11_1111;
    }
}

/// Axis-aligned box centered on the origin with inward-facing walls
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxBounds {
    pub half_extent: f32,
    pub walls: WallSet,
}

impl Default for BoxBounds {
    fn default() -> Self {
        Self::cube(1.0)
    }
}

impl BoxBounds {
    /// A closed cube spanning `[-half_extent, half_extent]` on each axis
    pub fn cube(half_extent: f32) -> Self {
        Self {
            half_extent,
            walls: WallSet::ALL,
        }
    }

    /// Leave some faces open
    pub fn with_walls(mut self, walls: WallSet) -> Self {
        self.walls = walls;
        self
    }

    /// The enabled walls, each with its normal pointing at the center
    pub fn walls(&self) -> Vec<Wall> {
        let h = self.half_extent;
        [
            (WallSet::NEG_X, Vec3::new(-h, 0.0, 0.0), Vec3::X),
            (WallSet::POS_X, Vec3::new(h, 0.0, 0.0), -Vec3::X),
            (WallSet::NEG_Y, Vec3::new(0.0, -h, 0.0), Vec3::Y),
            (WallSet::POS_Y, Vec3::new(0.0, h, 0.0), -Vec3::Y),
            (WallSet::NEG_Z, Vec3::new(0.0, 0.0, -h), Vec3::Z),
            (WallSet::POS_Z, Vec3::new(0.0, 0.0, h), -Vec3::Z),
        ]
        .into_iter()
        .filter(|(flag, _, _)| self.walls.contains(*flag))
        .map(|(_, point, normal)| Wall::new(point, normal))
        .collect()
    }

    pub fn contains(&self, p: Vec3) -> bool {
        let h = self.half_extent;
        p.x.abs() <= h && p.y.abs() <= h && p.z.abs() <= h
    }
}
