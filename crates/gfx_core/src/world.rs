//! World container for entities
//!
//! The World owns every entity in a scene and runs an ordered list of
//! systems over them each frame.

use gfx_physics::planar::{integrate, reflect_sides, resolve_pair};
use gfx_physics::Rect;
use slotmap::{new_key_type, SlotMap};

use crate::Entity;

new_key_type! {
    /// Key to an entity in the world
    ///
    /// Generational, so a key to a removed entity never aliases a new one.
    pub struct EntityKey;
}

/// Systems that move entities with planar bodies
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogoSystem {
    /// Advance each body by its velocity
    Velocity,
    /// Reflect bodies off the sides of the world bounds
    SideReflect,
    /// Bounce overlapping bodies off each other
    EntityCollision,
}

/// The scene: entities, the systems that update them, and their bounds
pub struct World {
    entities: SlotMap<EntityKey, Entity>,
    systems: Vec<LogoSystem>,
    /// Area bodies are kept inside
    pub bounds: Rect,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create an empty world with no systems and bounds `[-1, 1]²`
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
            systems: Vec::new(),
            bounds: Rect::default(),
        }
    }

    /// Create a world running the logo systems in their usual order
    pub fn with_logo_systems(bounds: Rect) -> Self {
        Self::new()
            .with_bounds(bounds)
            .with_system(LogoSystem::Velocity)
            .with_system(LogoSystem::SideReflect)
            .with_system(LogoSystem::EntityCollision)
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Append a system; systems run in insertion order
    pub fn with_system(mut self, system: LogoSystem) -> Self {
        self.systems.push(system);
        self
    }

    pub fn systems(&self) -> &[LogoSystem] {
        &self.systems
    }

    pub fn add_entity(&mut self, entity: Entity) -> EntityKey {
        self.entities.insert(entity)
    }

    pub fn remove_entity(&mut self, key: EntityKey) -> Option<Entity> {
        self.entities.remove(key)
    }

    pub fn get(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    pub fn get_mut(&mut self, key: EntityKey) -> Option<&mut Entity> {
        self.entities.get_mut(key)
    }

    /// Find the first entity with the given name
    pub fn get_by_name(&self, name: &str) -> Option<(EntityKey, &Entity)> {
        self.entities
            .iter()
            .find(|(_, e)| e.name.as_deref() == Some(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityKey, &Entity)> {
        self.entities.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Run every system, then recompute each entity's model-view matrix
    ///
    /// `dt` is the frame time in seconds; `seconds` is the time since start
    /// and drives animations.
    pub fn update(&mut self, dt: f32, seconds: f32) {
        for i in 0..self.systems.len() {
            match self.systems[i] {
                LogoSystem::Velocity => self.run_velocity(dt),
                LogoSystem::SideReflect => self.run_side_reflect(),
                LogoSystem::EntityCollision => self.run_entity_collision(),
            }
        }

        for entity in self.entities.values_mut() {
            entity.sync_from_body();
            entity.process_frame(seconds);
        }
    }

    fn run_velocity(&mut self, dt: f32) {
        for body in self.entities.values_mut().filter_map(|e| e.body.as_mut()) {
            integrate(body, dt);
        }
    }

    fn run_side_reflect(&mut self) {
        let bounds = self.bounds;
        for entity in self.entities.values_mut() {
            let local = entity.local;
            if let Some(body) = entity.body.as_mut() {
                if reflect_sides(body, &local, &bounds) {
                    log::trace!("{:?} reflected off the bounds", entity.name);
                }
            }
        }
    }

    /// Check every pair of bodies once
    fn run_entity_collision(&mut self) {
        let mut bodies: Vec<_> = self
            .entities
            .iter()
            .filter_map(|(key, e)| e.body.map(|b| (key, b, e.local)))
            .collect();

        for i in 0..bodies.len() {
            let (head, tail) = bodies.split_at_mut(i + 1);
            let (_, a, a_local) = &mut head[i];
            for (_, b, b_local) in tail.iter_mut() {
                resolve_pair(a, a_local, b, b_local);
            }
        }

        for (key, body, _) in bodies {
            if let Some(entity) = self.entities.get_mut(key) {
                entity.body = Some(body);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gfx_math::{mat4, Vec3};

    #[test]
    fn test_add_get_remove() {
        let mut world = World::new();
        let key = world.add_entity(Entity::default().with_name("logo"));
        assert_eq!(world.len(), 1);
        assert!(world.get(key).is_some());
        assert_eq!(world.get_by_name("logo").map(|(k, _)| k), Some(key));

        world.remove_entity(key);
        assert!(world.get(key).is_none());
        assert!(world.get_by_name("logo").is_none());
        assert!(world.is_empty());
    }

    #[test]
    fn test_logo_system_order() {
        let world = World::with_logo_systems(Rect::default());
        assert_eq!(
            world.systems(),
            &[LogoSystem::Velocity, LogoSystem::SideReflect, LogoSystem::EntityCollision]
        );
    }

    #[test]
    fn test_update_moves_bodies_and_syncs_model() {
        let mut world = World::with_logo_systems(Rect::default());
        let key = world.add_entity(Entity::new(mat4::IDENTITY).with_velocity([1.0, 0.5]));
        world.update(0.1, 0.1);

        let entity = world.get(key).unwrap();
        let t = mat4::get_translation(entity.model);
        assert!((t.x - 0.1).abs() < 1e-6);
        assert!((t.y - 0.05).abs() < 1e-6);
        assert_eq!(entity.model_view, entity.model);
    }

    #[test]
    fn test_entities_without_bodies_stay_put() {
        let mut world = World::with_logo_systems(Rect::default());
        let model = mat4::translation(0.3, 0.3, 0.0);
        let key = world.add_entity(Entity::new(model));
        world.update(0.5, 0.5);
        assert_eq!(world.get(key).unwrap().model, model);
    }

    #[test]
    fn test_collision_flips_both() {
        let mut world = World::new()
            .with_bounds(Rect::new(-10.0, -10.0, 10.0, 10.0))
            .with_system(LogoSystem::EntityCollision);
        let a = world.add_entity(
            Entity::new(mat4::translation(-0.45, 0.0, 0.0)).with_velocity([1.0, 0.0]),
        );
        let b = world.add_entity(
            Entity::new(mat4::translation(0.45, 0.0, 0.0)).with_velocity([-1.0, 0.0]),
        );
        world.update(0.0, 0.0);

        assert_eq!(world.get(a).unwrap().body.unwrap().velocity, [-1.0, 0.0]);
        assert_eq!(world.get(b).unwrap().body.unwrap().velocity, [1.0, 0.0]);
        let pa = mat4::get_translation(world.get(a).unwrap().model);
        assert_eq!(pa, Vec3::new(-0.45, 0.0, 0.0));
    }
}
