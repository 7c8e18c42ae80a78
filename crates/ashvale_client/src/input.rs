//! # Input Snapshot
//!
//! The per-frame input value handed to [`crate::GameSession::update`].
//! Re-expressed from engine event callbacks into an explicit snapshot so
//! ordering and idempotence are testable.
//!
//! Analog and digital input both normalize so diagonal movement is never
//! faster than cardinal movement; analog additionally preserves sub-unit
//! magnitudes for slow walking.

use ashvale_shared::math::Vec2;
use ashvale_shared::protocol::WeaponType;

/// Digital 4-direction pad state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DigitalPad {
    /// Up held.
    pub up: bool,
    /// Down held.
    pub down: bool,
    /// Left held.
    pub left: bool,
    /// Right held.
    pub right: bool,
}

/// Everything the core reads from input in one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    /// Raw analog stick vector, if a stick is engaged. Takes priority
    /// over the digital pad.
    pub analog: Option<Vec2>,
    /// Digital pad state.
    pub digital: DigitalPad,
    /// Attack pressed this frame, with the 1-based variant number.
    pub attack: Option<u8>,
    /// Weapon slot selected this frame.
    pub weapon_select: Option<WeaponType>,
    /// World-space pointer click this frame, for target selection.
    pub pointer_click: Option<Vec2>,
}

impl InputSnapshot {
    /// A frame with no input at all.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// A frame holding an analog stick vector.
    #[must_use]
    pub fn analog(dx: f32, dy: f32) -> Self {
        Self {
            analog: Some(Vec2::new(dx, dy)),
            ..Self::default()
        }
    }

    /// A frame pressing the given attack variant.
    #[must_use]
    pub fn attack(variant: u8) -> Self {
        Self {
            attack: Some(variant),
            ..Self::default()
        }
    }

    /// The normalized motion vector for this frame.
    ///
    /// Analog: zero inside `deadzone` (the configured value, see
    /// [`crate::ClientConfig::input_deadzone`]), magnitude clamped to 1
    /// but NOT renormalized below it. Digital: unit length or zero.
    #[must_use]
    pub fn move_axis(&self, deadzone: f32) -> Vec2 {
        if let Some(raw) = self.analog {
            let magnitude = raw.length();
            if magnitude < deadzone {
                return Vec2::ZERO;
            }
            let clamped = magnitude.min(1.0);
            return Vec2::new(raw.x / magnitude * clamped, raw.y / magnitude * clamped);
        }

        let mut dx = 0.0;
        let mut dy = 0.0;
        if self.digital.left {
            dx -= 1.0;
        }
        if self.digital.right {
            dx += 1.0;
        }
        if self.digital.up {
            dy -= 1.0;
        }
        if self.digital.down {
            dy += 1.0;
        }
        Vec2::new(dx, dy).normalize_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ashvale_shared::constants::INPUT_DEADZONE;

    #[test]
    fn test_analog_deadzone() {
        assert_eq!(
            InputSnapshot::analog(0.05, 0.05).move_axis(INPUT_DEADZONE),
            Vec2::ZERO
        );
    }

    #[test]
    fn test_widened_deadzone_swallows_more_input() {
        let input = InputSnapshot::analog(0.5, 0.0);
        assert!(input.move_axis(INPUT_DEADZONE).x > 0.0);
        assert_eq!(input.move_axis(0.9), Vec2::ZERO);
    }

    #[test]
    fn test_analog_preserves_subunit_magnitude() {
        let axis = InputSnapshot::analog(0.5, 0.0).move_axis(INPUT_DEADZONE);
        assert!((axis.x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_analog_clamps_to_unit() {
        let axis = InputSnapshot::analog(3.0, 4.0).move_axis(INPUT_DEADZONE);
        assert!((axis.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_digital_diagonal_is_unit_length() {
        let input = InputSnapshot {
            digital: DigitalPad {
                right: true,
                down: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let axis = input.move_axis(INPUT_DEADZONE);
        assert!((axis.length() - 1.0).abs() < 1e-6);
        assert!(axis.x > 0.0 && axis.y > 0.0);
    }

    #[test]
    fn test_opposed_digital_cancels() {
        let input = InputSnapshot {
            digital: DigitalPad {
                left: true,
                right: true,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(input.move_axis(INPUT_DEADZONE), Vec2::ZERO);
    }
}
