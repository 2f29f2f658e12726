//! # Entity Component System
//!
//! A sparse-set ECS designed for cache-friendly per-frame iteration.
//!
//! ## Design Philosophy
//!
//! - One [`SparseSet`] per component kind, dense arrays with no gaps
//! - Entity ids are plain monotonically increasing integers, never reused
//! - The kind-to-storage mapping resolves at compile time
//! - No dynamic dispatch in hot paths

mod component;
mod entity;
mod query;
mod storage;
mod world;

pub use component::{
    Animation, Collider, CollisionState, Component, Physics, Player, Sprite, Transform,
    LAYER_DEFAULT, LAYER_ENEMY, LAYER_PLATFORM, LAYER_PLAYER, LAYER_TRIGGER,
};
pub use entity::{Entity, EntityAllocator, MAX_ENTITIES};
pub use query::{Storages, Stored};
pub use storage::SparseSet;
pub use world::World;
