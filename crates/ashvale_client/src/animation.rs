//! # Animation State Machine
//!
//! Composes deterministic animation keys `{action}-{direction}-{variant}`
//! and issues renderer transitions only when the key actually changes.
//!
//! Transition rules:
//! - death is absorbing - a dead entity never animates again
//! - a playing attack suppresses motion/idle transitions until it ends
//! - the direction bucket is sticky on a near-zero motion vector
//!
//! [`play_attack_once`] is the one entry point allowed to override the
//! attack-priority check; it also spawns the weapon's transient effect.

use ashvale_core::registry::EntityRecord;
use ashvale_shared::constants::{
    BOW_RANGE, INPUT_DEADZONE, SPELL_NOVA_RADIUS, WAND_BOLT_OFFSET, WAND_BOLT_RADIUS,
};
use ashvale_shared::math::Direction;
use ashvale_shared::protocol::WeaponType;

use crate::adapters::{RendererAdapter, TransientEffect};

/// Visual length of the thrust trail effect (longer than the hit box).
const THRUST_TRAIL_LENGTH: f32 = 80.0;

/// Composes the animation key for an action/direction/variant triple.
#[must_use]
pub fn animation_key(action: &str, direction: Direction, character_variant: &str) -> String {
    format!("{action}-{}-{character_variant}", direction.as_str())
}

/// Per-frame animation refresh from a motion/aim vector.
///
/// Refreshes the sticky direction bucket, picks `walk` or the
/// weapon-prefixed idle, and plays the key only if it differs from what
/// the renderer reports (idempotent - repeated identical keys are no-ops).
pub fn update_entity<R: RendererAdapter>(
    record: &mut EntityRecord,
    renderer: &mut R,
    dx: f32,
    dy: f32,
) {
    if record.is_dead {
        return;
    }
    let Some(handle) = record.visual else {
        return;
    };

    // A playing attack must finish before motion transitions resume.
    let current = renderer.current_animation_key(handle);
    if current
        .as_deref()
        .is_some_and(|key| key.contains("attack"))
        && renderer.is_animation_playing(handle)
    {
        return;
    }

    if let Some(direction) = Direction::from_vector(dx, dy) {
        record.direction = direction;
    }

    let moving = dx.abs() > INPUT_DEADZONE || dy.abs() > INPUT_DEADZONE;
    let key = if moving {
        animation_key("walk", record.direction, &record.character_variant)
    } else {
        let action = format!("{}idle", record.weapon.anim_prefix());
        animation_key(&action, record.direction, &record.character_variant)
    };

    if current.as_deref() != Some(key.as_str()) {
        renderer.play_animation(handle, &key);
    }
}

/// Plays the attack animation unconditionally and spawns the weapon FX.
///
/// Used for both the local speculative replay and remote attack events.
pub fn play_attack_once<R: RendererAdapter>(
    record: &mut EntityRecord,
    renderer: &mut R,
    weapon: WeaponType,
    variant: u8,
) {
    if record.is_dead || weapon == WeaponType::None {
        return;
    }
    let Some(handle) = record.visual else {
        return;
    };

    let action = format!("{}attack", weapon.anim_prefix());
    let key = animation_key(&action, record.direction, &record.character_variant);
    renderer.play_animation(handle, &key);

    let origin = record.position;
    let look = record.look_direction;
    let effect = match (weapon, variant) {
        (WeaponType::Sword, 2) => Some(TransientEffect::ThrustTrail {
            from: origin,
            to: origin + look * THRUST_TRAIL_LENGTH,
        }),
        (WeaponType::Bow, 1) => Some(TransientEffect::ArrowShot {
            from: origin,
            to: origin + look * BOW_RANGE,
        }),
        (WeaponType::Wand, 1) => Some(TransientEffect::BoltBurst {
            at: origin + look * WAND_BOLT_OFFSET,
            radius: WAND_BOLT_RADIUS,
        }),
        (WeaponType::Spell, 1) => Some(TransientEffect::NovaBurst {
            at: origin,
            radius: SPELL_NOVA_RADIUS,
        }),
        _ => None,
    };
    if let Some(effect) = effect {
        renderer.spawn_transient_effect(effect);
    }
}

/// Issues the terminal death animation. Called once, when a delta first
/// drives health to zero.
pub fn play_death<R: RendererAdapter>(record: &EntityRecord, renderer: &mut R) {
    let Some(handle) = record.visual else {
        return;
    };
    let key = animation_key("death", record.direction, &record.character_variant);
    renderer.play_animation(handle, &key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockRenderer;
    use ashvale_shared::math::Vec2;
    use ashvale_shared::protocol::{EntityFields, SessionId};

    fn record_with_visual(renderer: &mut MockRenderer) -> EntityRecord {
        let fields = EntityFields {
            character_variant: Some("knight".to_string()),
            ..EntityFields::spawn("Test", 0.0, 0.0)
        };
        let mut record = EntityRecord::from_spawn(&fields);
        record.visual = Some(renderer.create_entity_visual(&SessionId::new("t"), &record));
        record
    }

    #[test]
    fn test_identical_key_is_a_no_op() {
        let mut renderer = MockRenderer::new();
        let mut record = record_with_visual(&mut renderer);
        let handle = record.visual.unwrap();

        update_entity(&mut record, &mut renderer, 1.0, 0.0);
        renderer.finish_animation(handle);
        update_entity(&mut record, &mut renderer, 1.0, 0.0);

        assert_eq!(renderer.played_keys(handle), vec!["walk-right-knight"]);
    }

    #[test]
    fn test_sticky_direction_on_stop() {
        let mut renderer = MockRenderer::new();
        let mut record = record_with_visual(&mut renderer);
        let handle = record.visual.unwrap();

        update_entity(&mut record, &mut renderer, 0.0, -1.0);
        renderer.finish_animation(handle);
        update_entity(&mut record, &mut renderer, 0.0, 0.0);

        assert_eq!(record.direction, Direction::Up);
        assert_eq!(
            renderer.played_keys(handle),
            vec!["walk-up-knight", "idle-up-knight"]
        );
    }

    #[test]
    fn test_weapon_prefix_selects_idle_pose() {
        let mut renderer = MockRenderer::new();
        let mut record = record_with_visual(&mut renderer);
        record.weapon = WeaponType::Bow;
        let handle = record.visual.unwrap();

        update_entity(&mut record, &mut renderer, 0.0, 0.0);
        assert_eq!(renderer.played_keys(handle), vec!["bow-idle-down-knight"]);
    }

    #[test]
    fn test_playing_attack_suppresses_motion() {
        let mut renderer = MockRenderer::new();
        let mut record = record_with_visual(&mut renderer);
        record.look_direction = Vec2::new(1.0, 0.0);
        let handle = record.visual.unwrap();

        play_attack_once(&mut record, &mut renderer, WeaponType::Sword, 1);
        update_entity(&mut record, &mut renderer, 1.0, 0.0);
        assert_eq!(
            renderer.played_keys(handle),
            vec!["sword-attack-down-knight"]
        );

        // Once the attack finishes, motion transitions resume.
        renderer.finish_animation(handle);
        update_entity(&mut record, &mut renderer, 1.0, 0.0);
        assert_eq!(
            renderer.played_keys(handle),
            vec!["sword-attack-down-knight", "walk-right-knight"]
        );
    }

    #[test]
    fn test_dead_entity_never_animates() {
        let mut renderer = MockRenderer::new();
        let mut record = record_with_visual(&mut renderer);
        let handle = record.visual.unwrap();
        record.is_dead = true;

        update_entity(&mut record, &mut renderer, 1.0, 0.0);
        play_attack_once(&mut record, &mut renderer, WeaponType::Sword, 1);
        assert!(renderer.played_keys(handle).is_empty());
    }

    #[test]
    fn test_attack_fx_geometry() {
        let mut renderer = MockRenderer::new();
        let mut record = record_with_visual(&mut renderer);
        record.look_direction = Vec2::new(1.0, 0.0);

        play_attack_once(&mut record, &mut renderer, WeaponType::Bow, 1);
        assert_eq!(
            renderer.effects(),
            vec![TransientEffect::ArrowShot {
                from: Vec2::ZERO,
                to: Vec2::new(300.0, 0.0),
            }]
        );
    }
}
