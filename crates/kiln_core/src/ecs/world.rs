//! # ECS World
//!
//! The central registry: one entity allocator plus exactly one sparse-set
//! storage per component kind. Kinds are fields, not a runtime map - the
//! compiler resolves every component access to a direct field load.

use super::component::{
    Animation, Collider, CollisionState, Physics, Player, Sprite, Transform,
};
use super::entity::{Entity, EntityAllocator, MAX_ENTITIES};
use super::storage::SparseSet;
use crate::error::EcsResult;

/// The ECS world - owner of every component storage.
///
/// A collaborator spawns an entity, attaches component values, reads and
/// mutates them through queries, and eventually despawns the entity, which
/// removes it from every storage it participated in.
///
/// # Example
///
/// ```rust,ignore
/// let mut world = World::new();
/// let hero = world.spawn();
/// world.add_transform(hero, Transform::default());
/// world.add_player(hero, Player::default());
/// ```
pub struct World {
    /// Issues entity ids, never reuses them.
    allocator: EntityAllocator,

    // =========================================================================
    // Component storages - add new component kinds here, in `Storages`, and
    // in `despawn`
    // =========================================================================
    pub(crate) transforms: SparseSet<Transform>,
    pub(crate) sprites: SparseSet<Sprite>,
    pub(crate) animations: SparseSet<Animation>,
    pub(crate) physics: SparseSet<Physics>,
    pub(crate) colliders: SparseSet<Collider>,
    pub(crate) collision_states: SparseSet<CollisionState>,
    pub(crate) players: SparseSet<Player>,
}

impl World {
    /// Creates an empty world.
    ///
    /// Every sparse index array is allocated up front for the full
    /// [`MAX_ENTITIES`] id space; dense arrays grow on first use.
    #[must_use]
    pub fn new() -> Self {
        tracing::debug!(max_entities = MAX_ENTITIES, "world created");
        Self {
            allocator: EntityAllocator::new(),
            transforms: SparseSet::new(),
            sprites: SparseSet::new(),
            animations: SparseSet::new(),
            physics: SparseSet::new(),
            colliders: SparseSet::new(),
            collision_states: SparseSet::new(),
            players: SparseSet::new(),
        }
    }

    /// Spawns a new entity.
    ///
    /// Returns [`Entity::NULL`] once the id space is exhausted; the null
    /// entity is inert everywhere, so an unchecked caller cannot corrupt
    /// another entity's data with it.
    #[inline]
    pub fn spawn(&mut self) -> Entity {
        self.allocator.allocate()
    }

    /// Fallible twin of [`spawn`](Self::spawn).
    ///
    /// # Errors
    ///
    /// [`crate::EcsError::EntityOverflow`] once the id space is used up.
    #[inline]
    pub fn try_spawn(&mut self) -> EcsResult<Entity> {
        self.allocator.try_allocate()
    }

    /// Number of entity ids issued so far.
    #[inline]
    #[must_use]
    pub const fn issued_entities(&self) -> usize {
        self.allocator.issued()
    }

    /// Removes `entity` from every component storage.
    ///
    /// Removal on a kind the entity never had is a no-op, so no pre-check
    /// is needed. The id itself is never reclaimed.
    pub fn despawn(&mut self, entity: Entity) {
        self.transforms.remove(entity);
        self.sprites.remove(entity);
        self.animations.remove(entity);
        self.physics.remove(entity);
        self.colliders.remove(entity);
        self.collision_states.remove(entity);
        self.players.remove(entity);
    }

    // =========================================================================
    // Transform
    // =========================================================================

    /// Attaches (or overwrites) a transform.
    #[inline]
    pub fn add_transform(&mut self, entity: Entity, transform: Transform) {
        self.transforms.insert(entity, transform);
    }

    /// The entity's transform, if present.
    #[inline]
    #[must_use]
    pub fn get_transform(&self, entity: Entity) -> Option<&Transform> {
        self.transforms.get(entity)
    }

    /// The entity's transform, mutable.
    #[inline]
    pub fn get_transform_mut(&mut self, entity: Entity) -> Option<&mut Transform> {
        self.transforms.get_mut(entity)
    }

    /// Detaches the entity's transform.
    #[inline]
    pub fn remove_transform(&mut self, entity: Entity) {
        self.transforms.remove(entity);
    }

    /// Whether the entity has a transform.
    #[inline]
    #[must_use]
    pub fn has_transform(&self, entity: Entity) -> bool {
        self.transforms.contains(entity)
    }

    // =========================================================================
    // Sprite
    // =========================================================================

    /// Attaches (or overwrites) a sprite.
    #[inline]
    pub fn add_sprite(&mut self, entity: Entity, sprite: Sprite) {
        self.sprites.insert(entity, sprite);
    }

    /// The entity's sprite, if present.
    #[inline]
    #[must_use]
    pub fn get_sprite(&self, entity: Entity) -> Option<&Sprite> {
        self.sprites.get(entity)
    }

    /// The entity's sprite, mutable.
    #[inline]
    pub fn get_sprite_mut(&mut self, entity: Entity) -> Option<&mut Sprite> {
        self.sprites.get_mut(entity)
    }

    /// Detaches the entity's sprite.
    #[inline]
    pub fn remove_sprite(&mut self, entity: Entity) {
        self.sprites.remove(entity);
    }

    /// Whether the entity has a sprite.
    #[inline]
    #[must_use]
    pub fn has_sprite(&self, entity: Entity) -> bool {
        self.sprites.contains(entity)
    }

    // =========================================================================
    // Animation
    // =========================================================================

    /// Attaches (or overwrites) an animation.
    #[inline]
    pub fn add_animation(&mut self, entity: Entity, animation: Animation) {
        self.animations.insert(entity, animation);
    }

    /// The entity's animation, if present.
    #[inline]
    #[must_use]
    pub fn get_animation(&self, entity: Entity) -> Option<&Animation> {
        self.animations.get(entity)
    }

    /// The entity's animation, mutable.
    #[inline]
    pub fn get_animation_mut(&mut self, entity: Entity) -> Option<&mut Animation> {
        self.animations.get_mut(entity)
    }

    /// Detaches the entity's animation.
    #[inline]
    pub fn remove_animation(&mut self, entity: Entity) {
        self.animations.remove(entity);
    }

    /// Whether the entity has an animation.
    #[inline]
    #[must_use]
    pub fn has_animation(&self, entity: Entity) -> bool {
        self.animations.contains(entity)
    }

    // =========================================================================
    // Physics
    // =========================================================================

    /// Attaches (or overwrites) a physics body.
    #[inline]
    pub fn add_physics(&mut self, entity: Entity, physics: Physics) {
        self.physics.insert(entity, physics);
    }

    /// The entity's physics body, if present.
    #[inline]
    #[must_use]
    pub fn get_physics(&self, entity: Entity) -> Option<&Physics> {
        self.physics.get(entity)
    }

    /// The entity's physics body, mutable.
    #[inline]
    pub fn get_physics_mut(&mut self, entity: Entity) -> Option<&mut Physics> {
        self.physics.get_mut(entity)
    }

    /// Detaches the entity's physics body.
    #[inline]
    pub fn remove_physics(&mut self, entity: Entity) {
        self.physics.remove(entity);
    }

    /// Whether the entity has a physics body.
    #[inline]
    #[must_use]
    pub fn has_physics(&self, entity: Entity) -> bool {
        self.physics.contains(entity)
    }

    // =========================================================================
    // Collider
    // =========================================================================

    /// Attaches (or overwrites) a collider.
    #[inline]
    pub fn add_collider(&mut self, entity: Entity, collider: Collider) {
        self.colliders.insert(entity, collider);
    }

    /// The entity's collider, if present.
    #[inline]
    #[must_use]
    pub fn get_collider(&self, entity: Entity) -> Option<&Collider> {
        self.colliders.get(entity)
    }

    /// The entity's collider, mutable.
    #[inline]
    pub fn get_collider_mut(&mut self, entity: Entity) -> Option<&mut Collider> {
        self.colliders.get_mut(entity)
    }

    /// Detaches the entity's collider.
    #[inline]
    pub fn remove_collider(&mut self, entity: Entity) {
        self.colliders.remove(entity);
    }

    /// Whether the entity has a collider.
    #[inline]
    #[must_use]
    pub fn has_collider(&self, entity: Entity) -> bool {
        self.colliders.contains(entity)
    }

    // =========================================================================
    // CollisionState
    // =========================================================================

    /// Attaches (or overwrites) a collision state.
    #[inline]
    pub fn add_collision_state(&mut self, entity: Entity, state: CollisionState) {
        self.collision_states.insert(entity, state);
    }

    /// The entity's collision state, if present.
    #[inline]
    #[must_use]
    pub fn get_collision_state(&self, entity: Entity) -> Option<&CollisionState> {
        self.collision_states.get(entity)
    }

    /// The entity's collision state, mutable.
    #[inline]
    pub fn get_collision_state_mut(&mut self, entity: Entity) -> Option<&mut CollisionState> {
        self.collision_states.get_mut(entity)
    }

    /// Detaches the entity's collision state.
    #[inline]
    pub fn remove_collision_state(&mut self, entity: Entity) {
        self.collision_states.remove(entity);
    }

    /// Whether the entity has a collision state.
    #[inline]
    #[must_use]
    pub fn has_collision_state(&self, entity: Entity) -> bool {
        self.collision_states.contains(entity)
    }

    // =========================================================================
    // Player
    // =========================================================================

    /// Attaches (or overwrites) player attributes.
    #[inline]
    pub fn add_player(&mut self, entity: Entity, player: Player) {
        self.players.insert(entity, player);
    }

    /// The entity's player attributes, if present.
    #[inline]
    #[must_use]
    pub fn get_player(&self, entity: Entity) -> Option<&Player> {
        self.players.get(entity)
    }

    /// The entity's player attributes, mutable.
    #[inline]
    pub fn get_player_mut(&mut self, entity: Entity) -> Option<&mut Player> {
        self.players.get_mut(entity)
    }

    /// Detaches the entity's player attributes.
    #[inline]
    pub fn remove_player(&mut self, entity: Entity) {
        self.players.remove(entity);
    }

    /// Whether the entity has player attributes.
    #[inline]
    #[must_use]
    pub fn has_player(&self, entity: Entity) -> bool {
        self.players.contains(entity)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_shared::Vec2;

    #[test]
    fn test_spawn_issues_distinct_ids() {
        let mut world = World::new();
        let a = world.spawn();
        let b = world.spawn();
        assert!(!a.is_null());
        assert!(!b.is_null());
        assert_ne!(a, b);
        assert_eq!(world.issued_entities(), 2);
    }

    #[test]
    fn test_accessors_forward_to_storage() {
        let mut world = World::new();
        let entity = world.spawn();

        assert!(!world.has_transform(entity));
        world.add_transform(entity, Transform::at(Vec2::new(4.0, 2.0)));
        assert!(world.has_transform(entity));
        assert_eq!(
            world.get_transform(entity).map(|t| t.position),
            Some(Vec2::new(4.0, 2.0))
        );

        if let Some(transform) = world.get_transform_mut(entity) {
            transform.position.x = 7.0;
        }
        assert_eq!(world.get_transform(entity).map(|t| t.position.x), Some(7.0));

        world.remove_transform(entity);
        assert!(!world.has_transform(entity));
    }

    #[test]
    fn test_despawn_removes_every_kind() {
        let mut world = World::new();
        let entity = world.spawn();

        world.add_transform(entity, Transform::default());
        world.add_physics(entity, Physics::default());
        world.add_player(entity, Player::default());

        world.despawn(entity);

        assert!(!world.has_transform(entity));
        assert!(!world.has_sprite(entity));
        assert!(!world.has_animation(entity));
        assert!(!world.has_physics(entity));
        assert!(!world.has_collider(entity));
        assert!(!world.has_collision_state(entity));
        assert!(!world.has_player(entity));
    }

    #[test]
    fn test_despawn_leaves_neighbors_alone() {
        let mut world = World::new();
        let doomed = world.spawn();
        let survivor = world.spawn();

        world.add_player(doomed, Player::default());
        world.add_player(
            survivor,
            Player {
                health: 55.0,
                speed: 120.0,
            },
        );

        world.despawn(doomed);

        assert!(!world.has_player(doomed));
        assert_eq!(world.get_player(survivor).map(|p| p.health), Some(55.0));
    }

    #[test]
    fn test_null_entity_is_inert() {
        let mut world = World::new();

        world.add_transform(Entity::NULL, Transform::default());
        world.add_player(Entity::NULL, Player::default());

        assert!(!world.has_transform(Entity::NULL));
        assert!(!world.has_player(Entity::NULL));
        assert_eq!(world.get_transform(Entity::NULL), None);

        // Despawning it must also be harmless.
        world.despawn(Entity::NULL);
    }
}
