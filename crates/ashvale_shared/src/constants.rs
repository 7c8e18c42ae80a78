//! # Client Core Tuning Constants
//!
//! Default tuning for movement, interpolation and combat geometry.
//!
//! **CRITICAL:** the server quantizes positions the same way the client
//! does. Changing movement or send-rate values here desyncs every client
//! that does not pick up the same change.

/// Milliseconds between outgoing move intents (10 Hz).
pub const SEND_INTERVAL_MS: f64 = 100.0;

/// Input deadzone - motion below this magnitude is treated as no signal.
///
/// The same threshold gates direction-bucket updates so local and remote
/// entities bucket identically.
pub const INPUT_DEADZONE: f32 = 0.1;

/// Local movement speed in world units per second.
///
/// 4 units per frame at the reference 60 Hz frame rate.
pub const MOVE_SPEED: f32 = 240.0;

/// Per-frame exponential smoothing factor for remote interpolation.
pub const INTERPOLATION_FACTOR: f32 = 0.15;

/// Remote entities closer than this to their server position snap to it.
pub const STOP_EPSILON: f32 = 1.0;

/// Cooldown applied to an attack key with no configured attack speed.
pub const DEFAULT_ATTACK_SPEED_MS: f64 = 500.0;

/// Sword cone: impact center offset along the look direction.
pub const SWORD_CONE_OFFSET: f32 = 32.0;
/// Sword cone: impact radius.
pub const SWORD_CONE_RADIUS: f32 = 32.0;

/// Sword thrust: rectangle length along the look direction.
pub const SWORD_THRUST_LENGTH: f32 = 60.0;
/// Sword thrust: full rectangle width.
pub const SWORD_THRUST_WIDTH: f32 = 24.0;

/// Bow: maximum arrow range along the look ray.
pub const BOW_RANGE: f32 = 300.0;
/// Bow: perpendicular hit margin around the ray.
pub const BOW_LANE_WIDTH: f32 = 20.0;

/// Wand bolt: impact center offset along the look direction.
pub const WAND_BOLT_OFFSET: f32 = 64.0;
/// Wand bolt: impact radius.
pub const WAND_BOLT_RADIUS: f32 = 80.0;

/// Spell nova: radius around the caster.
pub const SPELL_NOVA_RADIUS: f32 = 100.0;

/// Pointer hit-test half width of an entity's visual bounds.
pub const TARGET_HALF_WIDTH: f32 = 16.0;
/// Pointer hit-test half height of an entity's visual bounds.
pub const TARGET_HALF_HEIGHT: f32 = 24.0;

/// Maximum health - deltas are clamped into `0..=MAX_HEALTH`.
pub const MAX_HEALTH: i32 = 100;
