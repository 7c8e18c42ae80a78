//! # Combat Resolution
//!
//! Cooldown gating and weapon/variant attack geometry, computed against
//! the registry snapshot at input time.
//!
//! Every resolved attack produces an advisory intent: targets are what
//! this client believes it hit, the server decides what actually landed.
//! The resolved geometry is also replayed locally as a speculative
//! effect without waiting for acknowledgment.

use std::collections::HashMap;

use ashvale_core::EntityRegistry;
use ashvale_shared::constants::{
    BOW_LANE_WIDTH, BOW_RANGE, SPELL_NOVA_RADIUS, SWORD_CONE_OFFSET, SWORD_CONE_RADIUS,
    SWORD_THRUST_LENGTH, SWORD_THRUST_WIDTH, WAND_BOLT_OFFSET, WAND_BOLT_RADIUS,
};
use ashvale_shared::math::Vec2;
use ashvale_shared::protocol::{SessionId, WeaponType};

/// Earliest-next-use clock per `(weapon, variant)` key.
///
/// Process-local to the controlling client and never reset, only
/// advanced. This is the sole rate-limiting mechanism: inputs arriving
/// before expiry are silently dropped, never queued.
#[derive(Debug, Default)]
pub struct CooldownTable {
    ready_at: HashMap<(u8, u8), f64>,
}

impl CooldownTable {
    /// An empty table; every key is immediately ready.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the key if it is ready, advancing it by `speed_ms`.
    /// Returns whether the attack input was accepted.
    pub fn try_consume(&mut self, weapon: u8, variant: u8, now_ms: f64, speed_ms: f64) -> bool {
        let slot = self.ready_at.entry((weapon, variant)).or_insert(0.0);
        if now_ms < *slot {
            return false;
        }
        *slot = now_ms + speed_ms;
        true
    }

    /// When the key next becomes usable.
    #[must_use]
    pub fn ready_at(&self, weapon: u8, variant: u8) -> f64 {
        self.ready_at.get(&(weapon, variant)).copied().unwrap_or(0.0)
    }
}

/// A fully resolved attack, ready to ship and replay.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedAttack {
    /// World-space impact point (visual + wire).
    pub impact: Vec2,
    /// Advisory victims, deterministic order (closest-first for rays).
    pub targets: Vec<SessionId>,
    /// For locked-target shots: the attacker turns toward the victim.
    pub look_override: Option<Vec2>,
    /// Whether this resolution consumed the pointer lock.
    pub consumed_lock: bool,
}

/// Resolves attack geometry for a weapon/variant pair.
///
/// `None` means the attack is refused for this frame (zero look on a
/// thrust, missing/dead lock target, unknown pair). Candidates exclude
/// self and the dead, and are walked in session-id order.
pub fn resolve_attack(
    weapon: WeaponType,
    variant: u8,
    origin: Vec2,
    look: Vec2,
    registry: &EntityRegistry,
    lock: Option<&SessionId>,
) -> Option<ResolvedAttack> {
    match (weapon, variant) {
        (WeaponType::Sword, 1) => {
            let center = origin + look * SWORD_CONE_OFFSET;
            Some(ResolvedAttack {
                impact: center,
                targets: circle_hits(center, SWORD_CONE_RADIUS, registry),
                look_override: None,
                consumed_lock: false,
            })
        }
        (WeaponType::Sword, 2) => {
            if look == Vec2::ZERO {
                return None;
            }
            Some(ResolvedAttack {
                impact: origin + look * SWORD_THRUST_LENGTH,
                targets: thrust_hits(origin, look, registry),
                look_override: None,
                consumed_lock: false,
            })
        }
        // Sweep is cosmetic-only: an intent with no computed targets.
        (WeaponType::Sword, 3) => Some(ResolvedAttack {
            impact: origin,
            targets: Vec::new(),
            look_override: None,
            consumed_lock: false,
        }),
        (WeaponType::Bow, 1) => {
            let hit = ray_hit(origin, look, registry);
            let impact = hit
                .as_ref()
                .and_then(|id| registry.get(id))
                .map_or(origin + look * BOW_RANGE, |record| record.position);
            Some(ResolvedAttack {
                impact,
                targets: hit.into_iter().collect(),
                look_override: None,
                consumed_lock: false,
            })
        }
        (WeaponType::Bow | WeaponType::Wand, 2) => {
            let id = lock?;
            let record = registry.get(id)?;
            if record.is_dead {
                return None;
            }
            let impact = record.position;
            Some(ResolvedAttack {
                impact,
                targets: vec![id.clone()],
                look_override: Some((impact - origin).normalize_or_zero()),
                consumed_lock: true,
            })
        }
        (WeaponType::Wand, 1) => {
            let center = origin + look * WAND_BOLT_OFFSET;
            Some(ResolvedAttack {
                impact: center,
                targets: circle_hits(center, WAND_BOLT_RADIUS, registry),
                look_override: None,
                consumed_lock: false,
            })
        }
        (WeaponType::Spell, 1) => Some(ResolvedAttack {
            impact: origin,
            targets: circle_hits(origin, SPELL_NOVA_RADIUS, registry),
            look_override: None,
            consumed_lock: false,
        }),
        _ => None,
    }
}

/// Candidate session ids in deterministic order: non-self, non-dead.
fn candidates(registry: &EntityRegistry) -> impl Iterator<Item = SessionId> + '_ {
    registry.session_ids().into_iter().filter(move |id| {
        !registry.is_local(id) && registry.get(id).is_some_and(|record| !record.is_dead)
    })
}

/// Every candidate within `radius` of `center`.
fn circle_hits(center: Vec2, radius: f32, registry: &EntityRegistry) -> Vec<SessionId> {
    candidates(registry)
        .filter(|id| {
            registry
                .get(id)
                .is_some_and(|record| record.position.distance(center) <= radius)
        })
        .collect()
}

/// Oriented-rectangle test for the thrust: each candidate's relative
/// position is rotated into the attack's local frame, where the box is
/// axis-aligned (`0 <= local_x <= length`, `|local_y| <= width / 2`).
fn thrust_hits(origin: Vec2, look: Vec2, registry: &EntityRegistry) -> Vec<SessionId> {
    candidates(registry)
        .filter(|id| {
            let Some(record) = registry.get(id) else {
                return false;
            };
            let delta = record.position - origin;
            // Rotation by -theta, with cos = look.x and sin = look.y.
            let local_x = delta.x * look.x + delta.y * look.y;
            let local_y = delta.y * look.x - delta.x * look.y;
            (0.0..=SWORD_THRUST_LENGTH).contains(&local_x)
                && local_y.abs() <= SWORD_THRUST_WIDTH / 2.0
        })
        .collect()
}

/// Closest candidate along the look ray: positive projection within
/// range, perpendicular distance within the lane width. At most one.
fn ray_hit(origin: Vec2, look: Vec2, registry: &EntityRegistry) -> Option<SessionId> {
    let mut best: Option<(SessionId, f32)> = None;
    for id in candidates(registry) {
        let Some(record) = registry.get(&id) else {
            continue;
        };
        let delta = record.position - origin;
        let projection = delta.dot(look);
        if projection <= 0.0 || projection > BOW_RANGE {
            continue;
        }
        let closest_point = origin + look * projection;
        if record.position.distance(closest_point) > BOW_LANE_WIDTH {
            continue;
        }
        if best.as_ref().map_or(true, |(_, d)| projection < *d) {
            best = Some((id, projection));
        }
    }
    best.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ashvale_shared::protocol::EntityFields;

    fn registry_with(entities: &[(&str, f32, f32)]) -> EntityRegistry {
        let mut registry = EntityRegistry::new();
        registry.set_local_id(SessionId::new("me"));
        registry.upsert(
            &SessionId::new("me"),
            &EntityFields::spawn("Me", 100.0, 100.0),
        );
        for (name, x, y) in entities {
            registry.upsert(&SessionId::new(*name), &EntityFields::spawn(name, *x, *y));
        }
        registry
    }

    #[test]
    fn test_cooldown_accepts_once_per_window() {
        let mut table = CooldownTable::new();
        assert!(table.try_consume(1, 1, 0.0, 500.0));
        assert!(!table.try_consume(1, 1, 250.0, 500.0));
        assert!(!table.try_consume(1, 1, 499.0, 500.0));
        assert!(table.try_consume(1, 1, 500.0, 500.0));
    }

    #[test]
    fn test_cooldown_keys_are_independent() {
        let mut table = CooldownTable::new();
        assert!(table.try_consume(1, 1, 0.0, 500.0));
        assert!(table.try_consume(1, 2, 0.0, 500.0));
        assert!(table.try_consume(2, 1, 0.0, 500.0));
    }

    #[test]
    fn test_sword_cone_hit_and_miss() {
        // Looking +x from (100,100): impact center (132,100), radius 32.
        let registry = registry_with(&[("near", 130.0, 100.0), ("far", 200.0, 100.0)]);
        let resolved = resolve_attack(
            WeaponType::Sword,
            1,
            Vec2::new(100.0, 100.0),
            Vec2::new(1.0, 0.0),
            &registry,
            None,
        )
        .unwrap();
        assert_eq!(resolved.targets, vec![SessionId::new("near")]);
        assert_eq!(resolved.impact, Vec2::new(132.0, 100.0));
    }

    #[test]
    fn test_thrust_rectangle_bounds() {
        // Box is 60 long, 24 wide, looking +x from the origin.
        let registry = registry_with(&[
            ("inside", 30.0, 0.0),
            ("past_tip", 61.0, 0.0),
            ("beside", 30.0, 13.0),
            ("behind", -5.0, 0.0),
        ]);
        let resolved = resolve_attack(
            WeaponType::Sword,
            2,
            Vec2::ZERO,
            Vec2::new(1.0, 0.0),
            &registry,
            None,
        )
        .unwrap();
        assert_eq!(resolved.targets, vec![SessionId::new("inside")]);
    }

    #[test]
    fn test_thrust_rotates_with_look() {
        let registry = registry_with(&[("below", 100.0, 140.0)]);
        let resolved = resolve_attack(
            WeaponType::Sword,
            2,
            Vec2::new(100.0, 100.0),
            Vec2::new(0.0, 1.0),
            &registry,
            None,
        )
        .unwrap();
        assert_eq!(resolved.targets, vec![SessionId::new("below")]);
    }

    #[test]
    fn test_thrust_refuses_zero_look() {
        let registry = registry_with(&[]);
        assert!(resolve_attack(
            WeaponType::Sword,
            2,
            Vec2::ZERO,
            Vec2::ZERO,
            &registry,
            None
        )
        .is_none());
    }

    #[test]
    fn test_ray_picks_closest_only() {
        let registry = registry_with(&[
            ("far", 350.0, 100.0),
            ("mid", 250.0, 105.0),
            ("near", 150.0, 95.0),
        ]);
        let resolved = resolve_attack(
            WeaponType::Bow,
            1,
            Vec2::new(100.0, 100.0),
            Vec2::new(1.0, 0.0),
            &registry,
            None,
        )
        .unwrap();
        // All three are in the lane; only the smallest projection wins.
        assert_eq!(resolved.targets, vec![SessionId::new("near")]);
        assert_eq!(resolved.impact, Vec2::new(150.0, 95.0));
    }

    #[test]
    fn test_ray_miss_terminates_at_max_range() {
        let registry = registry_with(&[("wide", 200.0, 200.0)]);
        let resolved = resolve_attack(
            WeaponType::Bow,
            1,
            Vec2::new(100.0, 100.0),
            Vec2::new(1.0, 0.0),
            &registry,
            None,
        )
        .unwrap();
        assert!(resolved.targets.is_empty());
        assert_eq!(resolved.impact, Vec2::new(400.0, 100.0));
    }

    #[test]
    fn test_ray_ignores_targets_behind() {
        let registry = registry_with(&[("behind", 50.0, 100.0)]);
        let resolved = resolve_attack(
            WeaponType::Bow,
            1,
            Vec2::new(100.0, 100.0),
            Vec2::new(1.0, 0.0),
            &registry,
            None,
        )
        .unwrap();
        assert!(resolved.targets.is_empty());
    }

    #[test]
    fn test_locked_shot_turns_attacker_and_consumes_lock() {
        let registry = registry_with(&[("victim", 100.0, 300.0)]);
        let lock = SessionId::new("victim");
        let resolved = resolve_attack(
            WeaponType::Bow,
            2,
            Vec2::new(100.0, 100.0),
            Vec2::new(1.0, 0.0),
            &registry,
            Some(&lock),
        )
        .unwrap();
        assert_eq!(resolved.targets, vec![lock]);
        assert_eq!(resolved.look_override, Some(Vec2::new(0.0, 1.0)));
        assert!(resolved.consumed_lock);
    }

    #[test]
    fn test_locked_shot_refuses_dead_target() {
        let mut registry = registry_with(&[("victim", 100.0, 300.0)]);
        registry.upsert(
            &SessionId::new("victim"),
            &EntityFields {
                hp: Some(0),
                ..Default::default()
            },
        );
        let lock = SessionId::new("victim");
        assert!(resolve_attack(
            WeaponType::Bow,
            2,
            Vec2::new(100.0, 100.0),
            Vec2::new(1.0, 0.0),
            &registry,
            Some(&lock),
        )
        .is_none());
    }

    #[test]
    fn test_spell_nova_is_caster_centered() {
        let registry = registry_with(&[("close", 150.0, 100.0), ("far", 250.0, 100.0)]);
        let resolved = resolve_attack(
            WeaponType::Spell,
            1,
            Vec2::new(100.0, 100.0),
            Vec2::ZERO,
            &registry,
            None,
        )
        .unwrap();
        assert_eq!(resolved.targets, vec![SessionId::new("close")]);
        assert_eq!(resolved.impact, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_dead_candidates_are_skipped() {
        let mut registry = registry_with(&[("corpse", 130.0, 100.0)]);
        registry.upsert(
            &SessionId::new("corpse"),
            &EntityFields {
                hp: Some(0),
                ..Default::default()
            },
        );
        let resolved = resolve_attack(
            WeaponType::Sword,
            1,
            Vec2::new(100.0, 100.0),
            Vec2::new(1.0, 0.0),
            &registry,
            None,
        )
        .unwrap();
        assert!(resolved.targets.is_empty());
    }

    #[test]
    fn test_sweep_resolves_no_targets_even_at_point_blank() {
        let registry = registry_with(&[("adjacent", 110.0, 100.0)]);
        let resolved = resolve_attack(
            WeaponType::Sword,
            3,
            Vec2::new(100.0, 100.0),
            Vec2::new(1.0, 0.0),
            &registry,
            None,
        )
        .unwrap();
        assert!(resolved.targets.is_empty());
        assert_eq!(resolved.impact, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_unknown_pair_is_refused() {
        let registry = registry_with(&[]);
        assert!(
            resolve_attack(WeaponType::Spell, 3, Vec2::ZERO, Vec2::ZERO, &registry, None).is_none()
        );
        assert!(
            resolve_attack(WeaponType::None, 1, Vec2::ZERO, Vec2::ZERO, &registry, None).is_none()
        );
    }

    #[test]
    fn test_nova_membership_matches_distance_over_sampled_positions() {
        use rand::{Rng, SeedableRng};

        // Hit set must be exactly the candidates within the nova radius.
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x5EED);
        let origin = Vec2::new(100.0, 100.0);
        for _ in 0..200 {
            let mut registry = EntityRegistry::new();
            registry.set_local_id(SessionId::new("me"));
            registry.upsert(
                &SessionId::new("me"),
                &EntityFields::spawn("Me", origin.x, origin.y),
            );
            let mut expected = Vec::new();
            for n in 0..8 {
                let x: f32 = rng.gen_range(-100.0..300.0);
                let y: f32 = rng.gen_range(-100.0..300.0);
                let id = SessionId::new(format!("e{n}"));
                registry.upsert(&id, &EntityFields::spawn(id.as_str(), x, y));
                if Vec2::new(x, y).distance(origin) <= SPELL_NOVA_RADIUS {
                    expected.push(id);
                }
            }
            let resolved =
                resolve_attack(WeaponType::Spell, 1, origin, Vec2::ZERO, &registry, None).unwrap();
            assert_eq!(resolved.targets, expected);
        }
    }
}
