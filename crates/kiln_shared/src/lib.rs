//! # KILN Shared
//!
//! Common value types used across the engine.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - Any GPU or window-related crate
//! - Anything that allocates
//!
//! Everything in here is plain old data: `Copy`, `#[repr(C)]`, `Pod`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod math;

pub use math::{Color, Vec2};
