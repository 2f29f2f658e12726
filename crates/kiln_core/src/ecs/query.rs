//! # Query Engine
//!
//! Joins over component kinds: visit every entity owning all of the
//! requested kinds, handing the visitor a mutable reference to each of its
//! component values.
//!
//! ## Ordering
//!
//! Entities are visited in the driving storage's dense order - insertion
//! order modulo swap-removals, not sorted by id. At two kinds the smaller
//! storage drives (ties go to the first-named kind); at three or more the
//! first-named kind always drives and the rest are probed in declared order.
//!
//! ## Safety of mutation
//!
//! A query exclusively borrows the storages it touches, so a visitor cannot
//! structurally mutate any of them - the hazard of swap-removing out from
//! under an in-progress traversal is ruled out at compile time. Mutating the
//! component *values* it receives is the intended use.

use super::component::{
    Animation, Collider, CollisionState, Component, Physics, Player, Sprite, Transform,
};
use super::entity::Entity;
use super::storage::SparseSet;
use super::world::World;

/// Exclusive per-kind borrows of a world's storages.
///
/// Each kind's storage can be claimed exactly once per query; the borrows
/// are handed out disjointly so a join can hold several at the same time.
pub struct Storages<'w> {
    transforms: Option<&'w mut SparseSet<Transform>>,
    sprites: Option<&'w mut SparseSet<Sprite>>,
    animations: Option<&'w mut SparseSet<Animation>>,
    physics: Option<&'w mut SparseSet<Physics>>,
    colliders: Option<&'w mut SparseSet<Collider>>,
    collision_states: Option<&'w mut SparseSet<CollisionState>>,
    players: Option<&'w mut SparseSet<Player>>,
}

/// Component kinds the world has a storage for.
///
/// The impl per kind is the compile-time kind-to-storage table: no `TypeId`
/// lookups, no downcasts, just a direct field move out of [`Storages`].
pub trait Stored: Component {
    /// Takes the kind's storage borrow out of `storages`.
    ///
    /// # Panics
    ///
    /// Panics if the kind was already claimed by the running query, i.e. a
    /// query named the same kind twice.
    fn claim<'w>(storages: &mut Storages<'w>) -> &'w mut SparseSet<Self>;
}

const CLAIMED_TWICE: &str = "a query may not name the same component kind twice";

impl Stored for Transform {
    fn claim<'w>(storages: &mut Storages<'w>) -> &'w mut SparseSet<Self> {
        storages.transforms.take().expect(CLAIMED_TWICE)
    }
}

impl Stored for Sprite {
    fn claim<'w>(storages: &mut Storages<'w>) -> &'w mut SparseSet<Self> {
        storages.sprites.take().expect(CLAIMED_TWICE)
    }
}

impl Stored for Animation {
    fn claim<'w>(storages: &mut Storages<'w>) -> &'w mut SparseSet<Self> {
        storages.animations.take().expect(CLAIMED_TWICE)
    }
}

impl Stored for Physics {
    fn claim<'w>(storages: &mut Storages<'w>) -> &'w mut SparseSet<Self> {
        storages.physics.take().expect(CLAIMED_TWICE)
    }
}

impl Stored for Collider {
    fn claim<'w>(storages: &mut Storages<'w>) -> &'w mut SparseSet<Self> {
        storages.colliders.take().expect(CLAIMED_TWICE)
    }
}

impl Stored for CollisionState {
    fn claim<'w>(storages: &mut Storages<'w>) -> &'w mut SparseSet<Self> {
        storages.collision_states.take().expect(CLAIMED_TWICE)
    }
}

impl Stored for Player {
    fn claim<'w>(storages: &mut Storages<'w>) -> &'w mut SparseSet<Self> {
        storages.players.take().expect(CLAIMED_TWICE)
    }
}

impl World {
    /// Splits the world into claimable per-kind storage borrows.
    pub(crate) fn storages(&mut self) -> Storages<'_> {
        Storages {
            transforms: Some(&mut self.transforms),
            sprites: Some(&mut self.sprites),
            animations: Some(&mut self.animations),
            physics: Some(&mut self.physics),
            colliders: Some(&mut self.colliders),
            collision_states: Some(&mut self.collision_states),
            players: Some(&mut self.players),
        }
    }

    /// Visits every entity owning kind `A`, in dense order.
    ///
    /// No filtering is needed at one kind - the dense array *is* the result
    /// set, which is what makes single-kind iteration a straight cache-warm
    /// sweep.
    pub fn query<A: Stored>(&mut self, mut visitor: impl FnMut(Entity, &mut A)) {
        let mut storages = self.storages();
        let a = A::claim(&mut storages);

        for (entity, value) in a.iter_mut() {
            visitor(entity, value);
        }
    }

    /// Visits every entity owning both `A` and `B`.
    ///
    /// The smaller storage drives the join and the other is probed per
    /// entity, which minimizes probe count when the sets differ in size.
    /// Equal counts drive `A`. The visitor's argument order is always
    /// `(entity, a, b)` no matter which side drives.
    ///
    /// # Panics
    ///
    /// Panics if `A` and `B` are the same kind.
    pub fn query2<A: Stored, B: Stored>(&mut self, mut visitor: impl FnMut(Entity, &mut A, &mut B)) {
        let mut storages = self.storages();
        let a = A::claim(&mut storages);
        let b = B::claim(&mut storages);

        if a.len() <= b.len() {
            let (entities, values) = a.split_mut();
            for (&entity, value_a) in entities.iter().zip(values) {
                if let Some(value_b) = b.get_mut(entity) {
                    visitor(entity, value_a, value_b);
                }
            }
        } else {
            let (entities, values) = b.split_mut();
            for (&entity, value_b) in entities.iter().zip(values) {
                if let Some(value_a) = a.get_mut(entity) {
                    visitor(entity, value_a, value_b);
                }
            }
        }
    }

    /// Visits every entity owning `A`, `B` and `C`.
    ///
    /// `A` drives unconditionally; `B` and `C` are probed in declared order
    /// with a short-circuit on the first miss. (Unlike [`query2`](Self::query2),
    /// no smallest-set selection happens at this arity.)
    ///
    /// # Panics
    ///
    /// Panics if two of the kinds are the same.
    pub fn query3<A: Stored, B: Stored, C: Stored>(
        &mut self,
        mut visitor: impl FnMut(Entity, &mut A, &mut B, &mut C),
    ) {
        let mut storages = self.storages();
        let a = A::claim(&mut storages);
        let b = B::claim(&mut storages);
        let c = C::claim(&mut storages);

        let (entities, values) = a.split_mut();
        for (&entity, value_a) in entities.iter().zip(values) {
            let Some(value_b) = b.get_mut(entity) else {
                continue;
            };
            let Some(value_c) = c.get_mut(entity) else {
                continue;
            };
            visitor(entity, value_a, value_b, value_c);
        }
    }

    /// Visits every entity owning all four kinds. `A` drives; see
    /// [`query3`](Self::query3).
    ///
    /// # Panics
    ///
    /// Panics if two of the kinds are the same.
    pub fn query4<A: Stored, B: Stored, C: Stored, D: Stored>(
        &mut self,
        mut visitor: impl FnMut(Entity, &mut A, &mut B, &mut C, &mut D),
    ) {
        let mut storages = self.storages();
        let a = A::claim(&mut storages);
        let b = B::claim(&mut storages);
        let c = C::claim(&mut storages);
        let d = D::claim(&mut storages);

        let (entities, values) = a.split_mut();
        for (&entity, value_a) in entities.iter().zip(values) {
            let Some(value_b) = b.get_mut(entity) else {
                continue;
            };
            let Some(value_c) = c.get_mut(entity) else {
                continue;
            };
            let Some(value_d) = d.get_mut(entity) else {
                continue;
            };
            visitor(entity, value_a, value_b, value_c, value_d);
        }
    }

    /// Visits every entity owning all five kinds. `A` drives; see
    /// [`query3`](Self::query3).
    ///
    /// # Panics
    ///
    /// Panics if two of the kinds are the same.
    pub fn query5<A: Stored, B: Stored, C: Stored, D: Stored, E: Stored>(
        &mut self,
        mut visitor: impl FnMut(Entity, &mut A, &mut B, &mut C, &mut D, &mut E),
    ) {
        let mut storages = self.storages();
        let a = A::claim(&mut storages);
        let b = B::claim(&mut storages);
        let c = C::claim(&mut storages);
        let d = D::claim(&mut storages);
        let e = E::claim(&mut storages);

        let (entities, values) = a.split_mut();
        for (&entity, value_a) in entities.iter().zip(values) {
            let Some(value_b) = b.get_mut(entity) else {
                continue;
            };
            let Some(value_c) = c.get_mut(entity) else {
                continue;
            };
            let Some(value_d) = d.get_mut(entity) else {
                continue;
            };
            let Some(value_e) = e.get_mut(entity) else {
                continue;
            };
            visitor(entity, value_a, value_b, value_c, value_d, value_e);
        }
    }

    /// Visits every entity owning all six kinds. `A` drives; see
    /// [`query3`](Self::query3).
    ///
    /// # Panics
    ///
    /// Panics if two of the kinds are the same.
    pub fn query6<A: Stored, B: Stored, C: Stored, D: Stored, E: Stored, F: Stored>(
        &mut self,
        mut visitor: impl FnMut(Entity, &mut A, &mut B, &mut C, &mut D, &mut E, &mut F),
    ) {
        let mut storages = self.storages();
        let a = A::claim(&mut storages);
        let b = B::claim(&mut storages);
        let c = C::claim(&mut storages);
        let d = D::claim(&mut storages);
        let e = E::claim(&mut storages);
        let f = F::claim(&mut storages);

        let (entities, values) = a.split_mut();
        for (&entity, value_a) in entities.iter().zip(values) {
            let Some(value_b) = b.get_mut(entity) else {
                continue;
            };
            let Some(value_c) = c.get_mut(entity) else {
                continue;
            };
            let Some(value_d) = d.get_mut(entity) else {
                continue;
            };
            let Some(value_e) = e.get_mut(entity) else {
                continue;
            };
            let Some(value_f) = f.get_mut(entity) else {
                continue;
            };
            visitor(entity, value_a, value_b, value_c, value_d, value_e, value_f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_shared::Vec2;

    /// World with players on `with_player` and physics on `with_physics`.
    fn build(with_player: &[u32], with_physics: &[u32]) -> (World, Vec<Entity>) {
        let mut world = World::new();
        let max = with_player
            .iter()
            .chain(with_physics)
            .copied()
            .max()
            .unwrap_or(0);

        // Spawn enough entities that the listed ids exist.
        let entities: Vec<Entity> = (0..=max).map(|_| world.spawn()).collect();

        for &id in with_player {
            world.add_player(entities[id as usize - 1], Player::default());
        }
        for &id in with_physics {
            world.add_physics(entities[id as usize - 1], Physics::default());
        }
        (world, entities)
    }

    #[test]
    fn test_single_kind_visits_all_in_dense_order() {
        let mut world = World::new();
        let a = world.spawn();
        let b = world.spawn();
        let c = world.spawn();
        world.add_player(a, Player::default());
        world.add_player(b, Player::default());
        world.add_player(c, Player::default());
        world.remove_player(a); // swap-removal: c moves to the front

        let mut seen = Vec::new();
        world.query::<Player>(|entity, _| seen.push(entity));
        assert_eq!(seen, vec![c, b]);
    }

    #[test]
    fn test_two_kind_join_matches_intersection() {
        // Players on {1,2,3}, physics on {2,3,4} -> join is exactly {2,3}.
        let (mut world, entities) = build(&[1, 2, 3], &[2, 3, 4]);

        let mut seen = Vec::new();
        world.query2::<Player, Physics>(|entity, _, _| seen.push(entity));

        seen.sort_by_key(|entity| entity.raw());
        assert_eq!(seen, vec![entities[1], entities[2]]);
    }

    #[test]
    fn test_two_kind_join_is_order_independent() {
        // Same membership, but players is now the larger set: physics drives.
        let (mut world, entities) = build(&[1, 2, 3, 5, 6], &[2, 3, 4]);

        let mut forward = Vec::new();
        world.query2::<Player, Physics>(|entity, _, _| forward.push(entity));

        let mut reversed = Vec::new();
        world.query2::<Physics, Player>(|entity, _, _| reversed.push(entity));

        forward.sort_by_key(|entity| entity.raw());
        reversed.sort_by_key(|entity| entity.raw());
        assert_eq!(forward, vec![entities[1], entities[2]]);
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_two_kind_join_smaller_set_drives() {
        let (mut world, entities) = build(&[1, 2, 3, 5, 6], &[3, 2]);

        // Physics has two members, inserted as [3, 2]; that dense order must
        // be the visit order even though Player was named first.
        let mut seen = Vec::new();
        world.query2::<Player, Physics>(|entity, _, _| seen.push(entity));
        assert_eq!(seen, vec![entities[2], entities[1]]);
    }

    #[test]
    fn test_two_kind_join_tie_drives_first_kind() {
        let (mut world, entities) = build(&[1, 2], &[2, 1]);

        let mut seen = Vec::new();
        world.query2::<Player, Physics>(|entity, _, _| seen.push(entity));
        // Equal counts: the first-named kind's dense order wins.
        assert_eq!(seen, vec![entities[0], entities[1]]);
    }

    #[test]
    fn test_three_kind_join() {
        let mut world = World::new();
        let full = world.spawn();
        let partial = world.spawn();

        world.add_transform(full, Transform::default());
        world.add_physics(full, Physics::default());
        world.add_collider(full, Collider::default());

        world.add_transform(partial, Transform::default());
        world.add_physics(partial, Physics::default());

        let mut seen = Vec::new();
        world.query3::<Transform, Physics, Collider>(|entity, _, _, _| seen.push(entity));
        assert_eq!(seen, vec![full]);
    }

    #[test]
    fn test_six_kind_join() {
        let mut world = World::new();
        let full = world.spawn();
        let near_miss = world.spawn();

        for entity in [full, near_miss] {
            world.add_transform(entity, Transform::default());
            world.add_sprite(entity, Sprite::default());
            world.add_physics(entity, Physics::default());
            world.add_collider(entity, Collider::default());
            world.add_collision_state(entity, CollisionState::default());
        }
        world.add_player(full, Player::default());

        let mut count = 0;
        world.query6::<Transform, Sprite, Physics, Collider, CollisionState, Player>(
            |entity, _, _, _, _, _, _| {
                assert_eq!(entity, full);
                count += 1;
            },
        );
        assert_eq!(count, 1);
    }

    #[test]
    fn test_visitor_mutations_persist() {
        let mut world = World::new();
        let entity = world.spawn();
        world.add_transform(entity, Transform::default());
        world.add_physics(
            entity,
            Physics {
                velocity: Vec2::new(10.0, -5.0),
                ..Physics::default()
            },
        );

        let dt = 0.5;
        world.query2::<Transform, Physics>(|_, transform, physics| {
            transform.position += physics.velocity * dt;
        });

        assert_eq!(
            world.get_transform(entity).map(|t| t.position),
            Some(Vec2::new(5.0, -2.5))
        );
    }

    #[test]
    #[should_panic(expected = "same component kind twice")]
    fn test_duplicate_kind_panics() {
        let mut world = World::new();
        world.query2::<Player, Player>(|_, _, _| {});
    }
}
