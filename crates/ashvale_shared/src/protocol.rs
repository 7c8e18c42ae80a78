//! Wire payload shapes exchanged with the authoritative server.
//!
//! These are the conceptual message bodies; the transport layer owns the
//! actual encoding and framing. Everything outgoing is advisory - the
//! server validates every intent and the client never determines outcomes.

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// Stable key for one connected participant for the lifetime of their
/// connection. Assigned by the session layer; opaque to the core.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Creates a session id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Equipped weapon class. Discriminants are the wire values.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponType {
    /// Unarmed - attacks are refused.
    #[default]
    None = 0,
    /// Melee: cone, thrust, sweep variants.
    Sword = 1,
    /// Ranged: line-of-fire and locked-target variants.
    Bow = 2,
    /// Arcane bolt: offset area and locked-target variants.
    Wand = 3,
    /// Arcane burst: caster-centered area.
    Spell = 4,
}

impl WeaponType {
    /// Decodes a wire value; unknown values fall back to unarmed.
    #[must_use]
    pub const fn from_wire(value: u8) -> Self {
        match value {
            1 => Self::Sword,
            2 => Self::Bow,
            3 => Self::Wand,
            4 => Self::Spell,
            _ => Self::None,
        }
    }

    /// The animation-key prefix for this weapon.
    #[must_use]
    pub const fn anim_prefix(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Sword => "sword-",
            Self::Bow => "bow-",
            Self::Wand => "wand-",
            Self::Spell => "spell-",
        }
    }

    /// Whether the `(weapon, variant)` pair consumes the pointer lock
    /// instead of searching geometrically.
    #[must_use]
    pub const fn uses_target_lock(self, variant: u8) -> bool {
        matches!((self, variant), (Self::Bow, 2) | (Self::Wand, 2))
    }
}

/// Outgoing "move" intent, emitted at the send interval.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovePayload {
    /// Floor-truncated x position.
    pub x: i32,
    /// Floor-truncated y position.
    pub y: i32,
    /// Current sticky direction bucket name.
    pub direction: String,
    /// Look direction x (unit vector component).
    pub lookx: f32,
    /// Look direction y (unit vector component).
    pub looky: f32,
}

/// Outgoing "attack" intent. Targets are computed client-side and are
/// advisory only; the server re-validates every hit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttackPayload {
    /// Weapon wire value.
    pub weapon_type: u8,
    /// Attack variant within the weapon (1-based).
    pub attack_number: u8,
    /// Floor-truncated impact point.
    pub position: (i32, i32),
    /// Look direction at the moment of the attack.
    pub direction: Vec2,
    /// Session ids of candidate victims, closest-first where ordered.
    pub targets: Vec<SessionId>,
}

/// Authoritative field delta for one entity.
///
/// A closed shape: inbound state is merged field-by-field against this
/// struct, never by blind property copy. `None` means "not replicated in
/// this message", not "reset".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityFields {
    /// Display name.
    pub name: Option<String>,
    /// Authoritative x position.
    pub x: Option<f32>,
    /// Authoritative y position.
    pub y: Option<f32>,
    /// Authoritative health.
    pub hp: Option<i32>,
    /// Aura potency scalar (cosmetic).
    pub potency: Option<f32>,
    /// Equipped weapon wire value.
    pub weapon: Option<u8>,
    /// Sprite/animation set selector.
    pub character_variant: Option<String>,
    /// Replicated look direction x.
    pub lookx: Option<f32>,
    /// Replicated look direction y.
    pub looky: Option<f32>,
}

impl EntityFields {
    /// Convenience for tests and roster construction: a spawn-complete
    /// delta at the given position.
    #[must_use]
    pub fn spawn(name: &str, x: f32, y: f32) -> Self {
        Self {
            name: Some(name.to_string()),
            x: Some(x),
            y: Some(y),
            hp: Some(crate::constants::MAX_HEALTH),
            ..Self::default()
        }
    }
}
