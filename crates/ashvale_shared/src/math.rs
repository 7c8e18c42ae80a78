//! Mathematical types shared across the client core.
//!
//! `Vec2` is the canonical wire representation for positions and look
//! vectors; `Direction` is the discrete 8-sector bucketing used by both
//! animation and the move payload. Bucketing MUST be identical for local
//! and remote entities or their sprites visibly diverge.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::constants::INPUT_DEADZONE;

/// 2D vector - position, velocity, look direction.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component (screen-space, +x is right).
    pub x: f32,
    /// Y component (screen-space, +y is down).
    pub y: f32,
}

impl Vec2 {
    /// Creates a new Vec2.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Dot product.
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Length squared (avoids sqrt).
    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Length.
    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    /// Returns the unit vector, or the zero vector unchanged.
    #[must_use]
    pub fn normalize_or_zero(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            Self::ZERO
        } else {
            Self::new(self.x / len, self.y / len)
        }
    }

    /// Component-wise linear interpolation toward `target`.
    #[must_use]
    pub fn lerp(self, target: Self, t: f32) -> Self {
        Self::new(
            self.x + (target.x - self.x) * t,
            self.y + (target.y - self.y) * t,
        )
    }

    /// Truncates both components toward negative infinity.
    ///
    /// This is the quantization the server applies to replicated
    /// positions; intents use it so both sides agree on integer cells.
    #[must_use]
    pub fn floored(self) -> (i32, i32) {
        (self.x.floor() as i32, self.y.floor() as i32)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// One of 8 compass sectors, 45 degrees each, centered on the cardinals.
///
/// Screen coordinates: angle 0 is +x (right), angles grow toward +y (down).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// `[337.5, 360) ∪ [0, 22.5)`
    Right,
    /// `[22.5, 67.5)`
    DownRight,
    /// `[67.5, 112.5)` - the spawn default.
    #[default]
    Down,
    /// `[112.5, 157.5)`
    DownLeft,
    /// `[157.5, 202.5)`
    Left,
    /// `[202.5, 247.5)`
    UpLeft,
    /// `[247.5, 292.5)`
    Up,
    /// `[292.5, 337.5)`
    UpRight,
}

impl Direction {
    /// Buckets a motion/aim vector into a sector.
    ///
    /// Returns `None` when both components are inside the deadzone -
    /// "no new direction signal" - so callers retain their sticky bucket.
    /// Boundary angles belong to the counter-clockwise-adjacent sector
    /// (closed-open ranges).
    #[must_use]
    pub fn from_vector(dx: f32, dy: f32) -> Option<Self> {
        if dx.abs() < INPUT_DEADZONE && dy.abs() < INPUT_DEADZONE {
            return None;
        }

        let mut angle = dy.atan2(dx).to_degrees();
        if angle < 0.0 {
            angle += 360.0;
        }

        Some(if !(22.5..337.5).contains(&angle) {
            Self::Right
        } else if angle < 67.5 {
            Self::DownRight
        } else if angle < 112.5 {
            Self::Down
        } else if angle < 157.5 {
            Self::DownLeft
        } else if angle < 202.5 {
            Self::Left
        } else if angle < 247.5 {
            Self::UpLeft
        } else if angle < 292.5 {
            Self::Up
        } else {
            Self::UpRight
        })
    }

    /// The wire/animation-key name of the sector.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Right => "right",
            Self::DownRight => "down-right",
            Self::Down => "down",
            Self::DownLeft => "down-left",
            Self::Left => "left",
            Self::UpLeft => "up-left",
            Self::Up => "up",
            Self::UpRight => "up-right",
        }
    }
}
