//! # Core Error Types
//!
//! All errors the ECS can report.
//!
//! The hot paths (add/remove/get/has/query) never return these - they encode
//! failure in their return values so per-frame code stays branch-light. The
//! `try_` variants surface the same conditions as proper errors for callers
//! that want `?`.

use thiserror::Error;

use crate::ecs::Entity;

/// Errors that can occur in the entity/component store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// The allocator has issued every id up to the entity cap.
    #[error("entity ids exhausted: all {capacity} ids have been issued")]
    EntityOverflow {
        /// The compile-time entity cap.
        capacity: usize,
    },

    /// An entity outside the storable range (null, or at/beyond the cap).
    #[error("entity {0} is outside the storable range")]
    InvalidEntity(Entity),

    /// Dense storage growth could not reserve a larger backing buffer.
    ///
    /// Existing entries are untouched when this is returned.
    #[error("storage growth failed: could not reserve {requested} slots")]
    AllocationFailed {
        /// The capacity the growth step asked for.
        requested: usize,
    },
}

/// Result type for ECS operations.
pub type EcsResult<T> = Result<T, EcsError>;
