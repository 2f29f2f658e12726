//! # Component System
//!
//! Components are pure data containers with no behavior.
//! They must be Copy and have a fixed layout so the dense storage arrays can
//! relocate them freely.

use bytemuck::{Pod, Zeroable};
use kiln_shared::{Color, Vec2};

use super::entity::Entity;

/// Marker trait for ECS components.
///
/// Components must be:
/// - `Copy`: No heap allocations, bitwise copyable
/// - `Pod`: Plain old data, safe to relocate byte-wise
/// - `Zeroable`: Can be safely zeroed
/// - `Default`: Must have a sensible initial value
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone, Copy, Default, Pod, Zeroable)]
/// #[repr(C)]
/// struct Lifetime {
///     seconds_left: f32,
/// }
///
/// impl Component for Lifetime {
///     const NAME: &'static str = "lifetime";
/// }
/// ```
pub trait Component: Copy + Pod + Zeroable + Default + Send + Sync + 'static {
    /// Short kind name used in diagnostics.
    const NAME: &'static str;
}

// =============================================================================
// Collision layers (bitflags shared by every collider)
// =============================================================================

/// Default collision layer.
pub const LAYER_DEFAULT: u16 = 1 << 0;
/// The player's collision layer.
pub const LAYER_PLAYER: u16 = 1 << 1;
/// Enemy collision layer.
pub const LAYER_ENEMY: u16 = 1 << 2;
/// Platform / level geometry layer.
pub const LAYER_PLATFORM: u16 = 1 << 3;
/// Trigger volumes (overlap events, no resolution).
pub const LAYER_TRIGGER: u16 = 1 << 4;

// =============================================================================
// Component records
// =============================================================================

/// Spatial placement of an entity.
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Transform {
    /// Position in world space.
    pub position: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    /// Uniform scale factor.
    pub scale: f32,
}

impl Component for Transform {
    const NAME: &'static str = "transform";
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: 1.0,
        }
    }
}

impl Transform {
    /// Creates a transform at `position` with no rotation and unit scale.
    #[inline]
    #[must_use]
    pub const fn at(position: Vec2) -> Self {
        Self {
            position,
            rotation: 0.0,
            scale: 1.0,
        }
    }
}

/// Renderable quad attributes.
///
/// The texture is referenced by handle; resolving handles to GPU resources
/// is the renderer's business, not the store's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct Sprite {
    /// Texture handle; 0 means untextured.
    pub texture: u32,
    /// Tint color.
    pub color: Color,
    /// Width in pixels.
    pub width: u8,
    /// Height in pixels.
    pub height: u8,
    /// Padding for a gap-free layout.
    pub _padding: [u8; 2],
}

impl Component for Sprite {
    const NAME: &'static str = "sprite";
}

impl Default for Sprite {
    fn default() -> Self {
        Self {
            texture: 0,
            color: Color::WHITE,
            width: 0,
            height: 0,
            _padding: [0; 2],
        }
    }
}

/// Sprite-sheet playback state.
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Animation {
    /// Sprite-sheet texture handle.
    pub sheet: u32,
    /// Seconds each frame stays on screen.
    pub frame_time: f32,
    /// Seconds accumulated toward the next frame advance.
    pub timer: f32,
    /// Width of one frame in pixels.
    pub frame_width: u8,
    /// Height of one frame in pixels.
    pub frame_height: u8,
    /// Frame currently displayed.
    pub current_frame: u8,
    /// Total frames in the sheet.
    pub total_frames: u8,
    /// Playback flags, see [`Animation::LOOPING`] and [`Animation::PLAYING`].
    pub flags: u32,
}

impl Component for Animation {
    const NAME: &'static str = "animation";
}

impl Animation {
    /// Restart from the first frame when the last one finishes.
    pub const LOOPING: u32 = 1 << 0;
    /// Playback is advancing.
    pub const PLAYING: u32 = 1 << 1;

    /// Whether the animation wraps around at the last frame.
    #[inline]
    #[must_use]
    pub const fn is_looping(self) -> bool {
        self.flags & Self::LOOPING != 0
    }

    /// Whether playback is currently advancing.
    #[inline]
    #[must_use]
    pub const fn is_playing(self) -> bool {
        self.flags & Self::PLAYING != 0
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            sheet: 0,
            frame_time: 0.1,
            timer: 0.0,
            frame_width: 0,
            frame_height: 0,
            current_frame: 0,
            total_frames: 0,
            flags: Self::LOOPING | Self::PLAYING,
        }
    }
}

/// Motion state integrated by the physics step.
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Physics {
    /// Linear velocity, world units per second.
    pub velocity: Vec2,
    /// Linear acceleration, world units per second squared.
    pub acceleration: Vec2,
    /// Multiplier applied to global gravity.
    pub gravity_scale: f32,
    /// Terminal downward speed.
    pub max_fall_speed: f32,
    /// Velocity damping factor per second.
    pub linear_damping: f32,
    /// Behavior flags, see [`Physics::KINEMATIC`].
    pub flags: u32,
}

impl Component for Physics {
    const NAME: &'static str = "physics";
}

impl Physics {
    /// Moved by code, ignores gravity and collision response.
    pub const KINEMATIC: u32 = 1 << 0;

    /// Whether this body is kinematic.
    #[inline]
    #[must_use]
    pub const fn is_kinematic(self) -> bool {
        self.flags & Self::KINEMATIC != 0
    }
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            gravity_scale: 1.0,
            max_fall_speed: 600.0,
            linear_damping: 0.0,
            flags: 0,
        }
    }
}

/// Axis-aligned collision box.
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Collider {
    /// Box extents in world units.
    pub size: Vec2,
    /// Offset of the box center from the entity's transform.
    pub offset: Vec2,
    /// Layer this collider lives on (bitflag).
    pub layer: u16,
    /// Mask of layers this collider reacts to.
    pub collides_with: u16,
    /// Behavior flags, see [`Collider::TRIGGER`] and [`Collider::STATIC`].
    pub flags: u32,
}

impl Component for Collider {
    const NAME: &'static str = "collider";
}

impl Collider {
    /// Reports overlaps but never resolves them.
    pub const TRIGGER: u32 = 1 << 0;
    /// Never moves; skipped by broad-phase pairing against other statics.
    pub const STATIC: u32 = 1 << 1;

    /// Whether this collider only reports overlaps.
    #[inline]
    #[must_use]
    pub const fn is_trigger(self) -> bool {
        self.flags & Self::TRIGGER != 0
    }

    /// Whether this collider never moves.
    #[inline]
    #[must_use]
    pub const fn is_static(self) -> bool {
        self.flags & Self::STATIC != 0
    }
}

impl Default for Collider {
    fn default() -> Self {
        Self {
            size: Vec2::ZERO,
            offset: Vec2::ZERO,
            layer: LAYER_DEFAULT,
            collides_with: 0xFFFF,
            flags: 0,
        }
    }
}

/// Per-frame contact information written by the collision pass.
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct CollisionState {
    /// Surface normal of the ground contact.
    pub ground_normal: Vec2,
    /// Entity stood on, or null when airborne.
    pub ground_entity: Entity,
    /// Contact flags, see the associated constants.
    pub flags: u32,
    /// Seconds since the entity last touched ground (coyote time).
    pub time_since_grounded: f32,
    /// Seconds since the entity last touched a wall.
    pub time_since_wall_touch: f32,
}

impl Component for CollisionState {
    const NAME: &'static str = "collision_state";
}

impl CollisionState {
    /// Standing on something.
    pub const GROUNDED: u32 = 1 << 0;
    /// Head contact.
    pub const TOUCHING_CEILING: u32 = 1 << 1;
    /// Wall contact on the left side.
    pub const TOUCHING_WALL_LEFT: u32 = 1 << 2;
    /// Wall contact on the right side.
    pub const TOUCHING_WALL_RIGHT: u32 = 1 << 3;

    /// Whether the entity is standing on something.
    #[inline]
    #[must_use]
    pub const fn is_grounded(self) -> bool {
        self.flags & Self::GROUNDED != 0
    }

    /// Resets contact info to the airborne baseline.
    ///
    /// Called at the start of each collision pass. The timers survive the
    /// reset - they track time across frames.
    #[inline]
    pub fn clear(&mut self) {
        self.flags = 0;
        self.ground_entity = Entity::NULL;
        self.ground_normal = Vec2::UP;
    }
}

impl Default for CollisionState {
    fn default() -> Self {
        Self {
            ground_normal: Vec2::UP,
            ground_entity: Entity::NULL,
            flags: 0,
            time_since_grounded: 0.0,
            time_since_wall_touch: 0.0,
        }
    }
}

/// Player-controlled gameplay attributes.
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Player {
    /// Hit points.
    pub health: f32,
    /// Ground movement speed, world units per second.
    pub speed: f32,
}

impl Component for Player {
    const NAME: &'static str = "player";
}

impl Default for Player {
    fn default() -> Self {
        Self {
            health: 100.0,
            speed: 200.0,
        }
    }
}
