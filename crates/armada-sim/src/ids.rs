//! Conversion between ECS entities and the `EntityId`s used outside the world.

use armada_core::types::EntityId;
use hecs::Entity;

pub fn entity_id(entity: Entity) -> EntityId {
    EntityId(entity.to_bits().get())
}

/// `None` for ids that never came from `entity_id`.
pub fn entity_from_id(id: EntityId) -> Option<Entity> {
    Entity::from_bits(id.0)
}
