//! # Entity Management
//!
//! Entities are lightweight integer handles. They carry no data - every
//! property of a logical object lives in component storages keyed by the
//! entity id.

use bytemuck::{Pod, Zeroable};

use crate::error::{EcsError, EcsResult};

/// Maximum number of entity ids the engine will ever issue.
///
/// This bound is baked into the binary: every sparse index array is sized by
/// it, and [`EntityAllocator`] degrades to returning [`Entity::NULL`] once
/// the id space is used up.
pub const MAX_ENTITIES: usize = 10_000;

/// Unique identifier for an entity.
///
/// Id 0 is reserved as the null entity; valid ids are `1..MAX_ENTITIES`.
/// Ids strictly increase and are never reissued, so a destroyed entity's id
/// stays dead forever.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct Entity(u32);

impl Entity {
    /// The null entity - "no entity".
    ///
    /// Returned by exhausted allocation and permanently absent from every
    /// storage: adds targeting it are dropped, lookups on it miss.
    pub const NULL: Self = Self(0);

    /// Creates an entity from a raw id.
    #[inline]
    #[must_use]
    pub(crate) const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    /// The raw integer id.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Checks whether this is the null entity.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// The id as a sparse-array index.
    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::NULL
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues entity ids.
///
/// A single counter starting at 1. Ids are unique for the lifetime of the
/// allocator; there is no free list and no recycling.
#[derive(Debug)]
pub struct EntityAllocator {
    /// The next id to hand out.
    next: u32,
}

impl EntityAllocator {
    /// Creates an allocator with the full id space available.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Issues the next entity id.
    ///
    /// Returns [`Entity::NULL`] once all `MAX_ENTITIES - 1` ids have been
    /// issued; the counter is left unchanged so every later call also
    /// returns null. Callers must check for null.
    #[inline]
    pub fn allocate(&mut self) -> Entity {
        match self.try_allocate() {
            Ok(entity) => entity,
            Err(_) => {
                tracing::warn!(
                    capacity = MAX_ENTITIES,
                    "entity ids exhausted, returning the null entity"
                );
                Entity::NULL
            }
        }
    }

    /// Fallible twin of [`allocate`](Self::allocate).
    ///
    /// # Errors
    ///
    /// [`EcsError::EntityOverflow`] once the id space is used up.
    #[inline]
    pub fn try_allocate(&mut self) -> EcsResult<Entity> {
        if self.next as usize >= MAX_ENTITIES {
            return Err(EcsError::EntityOverflow {
                capacity: MAX_ENTITIES,
            });
        }
        let entity = Entity::from_raw(self.next);
        self.next += 1;
        Ok(entity)
    }

    /// Number of ids issued so far.
    #[inline]
    #[must_use]
    pub const fn issued(&self) -> usize {
        (self.next - 1) as usize
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}
