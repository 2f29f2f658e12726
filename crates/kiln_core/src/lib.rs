//! # KILN Core Engine
//!
//! Sparse-set Entity Component System (ECS) designed for:
//! - O(1) amortized component add/remove/lookup
//! - Contiguous, cache-friendly iteration over matching entities
//! - Compile-time typed storage access (no runtime type inspection)
//!
//! ## Architecture Rules
//!
//! 1. **No allocation per entity** - component data lives in per-kind dense
//!    arrays, never behind per-entity boxes
//! 2. **Data-oriented design** - components are plain `Pod` values
//! 3. **No dynamic dispatch** - every kind resolves to its storage at
//!    compile time
//!
//! ## Example
//!
//! ```rust,ignore
//! use kiln_core::{Physics, Transform, World};
//!
//! let mut world = World::new();
//! let entity = world.spawn();
//! world.add_transform(entity, Transform::default());
//! world.add_physics(entity, Physics::default());
//!
//! world.query2::<Transform, Physics>(|_entity, transform, physics| {
//!     transform.position += physics.velocity * 0.016;
//! });
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod ecs;
pub mod error;

pub use ecs::{
    Animation, Collider, CollisionState, Component, Entity, EntityAllocator, Physics, Player,
    SparseSet, Sprite, Storages, Stored, Transform, World, MAX_ENTITIES,
};
pub use ecs::{LAYER_DEFAULT, LAYER_ENEMY, LAYER_PLATFORM, LAYER_PLAYER, LAYER_TRIGGER};
pub use error::{EcsError, EcsResult};
