//! Particle burst: spheres bouncing inside a box

use gfx_math::{Rgba, Vec3};
use rand::Rng;
use slotmap::{new_key_type, SlotMap};

use crate::walls::{bounce_off_wall, BoxBounds, Wall};

new_key_type! {
    /// Key to a particle in a [`BurstWorld`]
    ///
    /// Generational: keys of removed particles return `None` instead of
    /// pointing at whatever reuses the slot.
    pub struct ParticleKey;
}

/// Configuration for the particle burst
#[derive(Clone, Debug, PartialEq)]
pub struct BurstConfig {
    /// Particles spawned by [`BurstWorld::populate`]
    pub count: usize,
    /// Acceleration in units per second squared
    pub gravity: Vec3,
    /// Fraction of velocity lost every step
    pub damping: f32,
    /// Fraction of the approach speed kept on a bounce
    pub elasticity: f32,
    /// Initial velocity components are drawn from `±velocity_range`
    pub velocity_range: f32,
    pub radius_min: f32,
    pub radius_max: f32,
    /// Initial positions are drawn from `±spawn_extent` on each axis
    pub spawn_extent: f32,
    /// Half-size of the containing box
    pub half_extent: f32,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            count: 50,
            gravity: Vec3::new(0.0, -0.98, 0.0),
            damping: 0.0005,
            elasticity: 0.8,
            velocity_range: 5.0,
            radius_min: 0.05,
            radius_max: 0.1,
            spawn_extent: 1.0,
            half_extent: 1.0,
        }
    }
}

/// A single sphere in the burst
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f32,
    pub color: Rgba,
}

impl Particle {
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            radius,
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }
}

/// The particle world: a set of spheres inside a closed box
pub struct BurstWorld {
    particles: SlotMap<ParticleKey, Particle>,
    walls: Vec<Wall>,
    pub config: BurstConfig,
}

impl Default for BurstWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl BurstWorld {
    /// Create an empty world with default configuration
    pub fn new() -> Self {
        Self::with_config(BurstConfig::default())
    }

    /// Create an empty world with custom configuration
    pub fn with_config(config: BurstConfig) -> Self {
        let walls = BoxBounds::cube(config.half_extent).walls();
        Self {
            particles: SlotMap::with_key(),
            walls,
            config,
        }
    }

    /// Spawn one particle with random size, color, position and velocity
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> ParticleKey {
        let c = &self.config;
        let radius = if c.radius_max > c.radius_min {
            rng.gen_range(c.radius_min..c.radius_max)
        } else {
            c.radius_min
        };
        let position = random_vec(rng, c.spawn_extent);
        let velocity = random_vec(rng, c.velocity_range);
        let color = [rng.gen::<f32>(), rng.gen::<f32>(), rng.gen::<f32>(), 1.0];

        self.insert(
            Particle::new(position, radius)
                .with_velocity(velocity)
                .with_color(color),
        )
    }

    /// Spawn `config.count` particles
    pub fn populate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for _ in 0..self.config.count {
            self.spawn(rng);
        }
        log::debug!("Spawned {} burst particles", self.config.count);
    }

    pub fn insert(&mut self, particle: Particle) -> ParticleKey {
        self.particles.insert(particle)
    }

    pub fn remove(&mut self, key: ParticleKey) -> Option<Particle> {
        self.particles.remove(key)
    }

    pub fn get(&self, key: ParticleKey) -> Option<&Particle> {
        self.particles.get(key)
    }

    pub fn get_mut(&mut self, key: ParticleKey) -> Option<&mut Particle> {
        self.particles.get_mut(key)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParticleKey, &Particle)> {
        self.particles.iter()
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Advance the simulation by `dt` seconds
    ///
    /// All positions move first. Then every velocity gets gravity and
    /// damping and is bounced off the walls, using the particle's position
    /// and velocity from before the velocity update.
    pub fn step(&mut self, dt: f32) {
        for particle in self.particles.values_mut() {
            particle.position += particle.velocity * dt;
        }

        let damping = 1.0 - self.config.damping;
        for particle in self.particles.values_mut() {
            let start = particle.velocity;
            let mut velocity = (start + self.config.gravity * dt) * damping;
            for wall in &self.walls {
                velocity = bounce_off_wall(
                    velocity,
                    particle.position,
                    start,
                    particle.radius,
                    wall,
                    self.config.elasticity,
                );
            }
            particle.velocity = velocity;
        }
    }
}

fn random_vec<R: Rng + ?Sized>(rng: &mut R, range: f32) -> Vec3 {
    if range <= 0.0 {
        return Vec3::ZERO;
    }
    Vec3::new(
        rng.gen_range(-range..range),
        rng.gen_range(-range..range),
        rng.gen_range(-range..range),
    )
}
