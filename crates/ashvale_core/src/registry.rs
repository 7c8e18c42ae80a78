//! # Entity Registry
//!
//! Owns the `EntityRecord` per session and applies the authoritative
//! write rules. The registry itself performs no renderer calls; the
//! session orchestrator reacts to `MergeOutcome` and to `remove` returns
//! so asset lifecycle stays behind the adapter boundary.

use std::collections::HashMap;

use ashvale_shared::constants::MAX_HEALTH;
use ashvale_shared::math::{Direction, Vec2};
use ashvale_shared::protocol::{EntityFields, SessionId, WeaponType};

/// Opaque renderer asset handle, issued by the renderer adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VisualHandle(pub u64);

/// One connected participant as this client sees them.
#[derive(Clone, Debug)]
pub struct EntityRecord {
    /// Locally rendered position. Advanced by prediction (local entity)
    /// or interpolation (remote entities); may differ from authoritative.
    pub position: Vec2,
    /// Last authoritative position. Interpolation target for remote
    /// entities; drift reference for the local entity.
    pub server_position: Vec2,
    /// Unit look vector. Locally computed for self, replicated for remote.
    pub look_direction: Vec2,
    /// Authoritative health, `0..=MAX_HEALTH`.
    pub health: i32,
    /// Aura potency scalar. Authoritative, cosmetic-affecting only.
    pub potency: f32,
    /// Equipped weapon.
    pub weapon: WeaponType,
    /// Sprite/animation set selector.
    pub character_variant: String,
    /// Sticky direction bucket; retained while motion is near-zero.
    pub direction: Direction,
    /// Terminal death flag - monotonic true for the record's lifetime.
    pub is_dead: bool,
    /// Derived motion flag, meaningful for remote entities only.
    pub is_moving: bool,
    /// Display name.
    pub display_name: String,
    /// Renderer asset, if the adapter produced one. A record without a
    /// handle is skipped by per-frame visual updates, never an error.
    pub visual: Option<VisualHandle>,
}

impl EntityRecord {
    /// Builds a fresh record from spawn fields. Position and
    /// `server_position` start equal; the direction bucket starts Down.
    #[must_use]
    pub fn from_spawn(fields: &EntityFields) -> Self {
        let position = Vec2::new(fields.x.unwrap_or(0.0), fields.y.unwrap_or(0.0));
        Self {
            position,
            server_position: position,
            look_direction: Vec2::ZERO,
            health: fields.hp.unwrap_or(MAX_HEALTH).clamp(0, MAX_HEALTH),
            potency: fields.potency.unwrap_or(0.0),
            weapon: fields.weapon.map(WeaponType::from_wire).unwrap_or_default(),
            character_variant: fields.character_variant.clone().unwrap_or_default(),
            direction: Direction::default(),
            is_dead: fields.hp.is_some_and(|hp| hp <= 0),
            is_moving: false,
            display_name: fields.name.clone().unwrap_or_default(),
            visual: None,
        }
    }

    /// Merges an authoritative delta into this record.
    ///
    /// Position fields land on `server_position` only. Look fields are
    /// skipped for the local entity (its look is locally computed).
    /// Returns whether this merge killed the entity.
    fn merge(&mut self, fields: &EntityFields, is_local: bool) -> bool {
        if let Some(name) = &fields.name {
            self.display_name.clone_from(name);
        }
        if let Some(x) = fields.x {
            self.server_position.x = x;
        }
        if let Some(y) = fields.y {
            self.server_position.y = y;
        }
        if let Some(potency) = fields.potency {
            self.potency = potency;
        }
        if let Some(weapon) = fields.weapon {
            self.weapon = WeaponType::from_wire(weapon);
        }
        if let Some(variant) = &fields.character_variant {
            self.character_variant.clone_from(variant);
        }
        if !is_local {
            if let (Some(lookx), Some(looky)) = (fields.lookx, fields.looky) {
                self.look_direction = Vec2::new(lookx, looky).normalize_or_zero();
            }
        }

        let mut died = false;
        if let Some(hp) = fields.hp {
            self.health = hp.clamp(0, MAX_HEALTH);
            if self.health <= 0 && !self.is_dead {
                self.is_dead = true;
                died = true;
            }
        }
        died
    }
}

/// What an `upsert` did to the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MergeOutcome {
    /// A new record was created (renderer assets should be instantiated).
    pub created: bool,
    /// This merge drove the entity's health to zero for the first time.
    pub died: bool,
}

/// Per-session entity records, keyed by session identifier.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    records: HashMap<SessionId, EntityRecord>,
    local_id: Option<SessionId>,
}

impl EntityRegistry {
    /// Creates an empty registry with no local identity yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares which session id is this client. Set once at join.
    pub fn set_local_id(&mut self, id: SessionId) {
        self.local_id = Some(id);
    }

    /// The local session id, if the session has joined.
    #[must_use]
    pub fn local_id(&self) -> Option<&SessionId> {
        self.local_id.as_ref()
    }

    /// Whether the given id is our own.
    #[must_use]
    pub fn is_local(&self, id: &SessionId) -> bool {
        self.local_id.as_ref() == Some(id)
    }

    /// Creates or merges a record. Idempotent: an unknown id creates, a
    /// known id merges under the authoritative write rules.
    pub fn upsert(&mut self, id: &SessionId, fields: &EntityFields) -> MergeOutcome {
        let is_local = self.is_local(id);
        match self.records.get_mut(id) {
            Some(record) => MergeOutcome {
                created: false,
                died: record.merge(fields, is_local),
            },
            None => {
                let record = EntityRecord::from_spawn(fields);
                let died = record.is_dead;
                self.records.insert(id.clone(), record);
                MergeOutcome { created: true, died }
            }
        }
    }

    /// Removes a record, returning it so the caller can release renderer
    /// assets and clear dangling references (target lock, camera follow).
    pub fn remove(&mut self, id: &SessionId) -> Option<EntityRecord> {
        self.records.remove(id)
    }

    /// Read access to one record.
    #[must_use]
    pub fn get(&self, id: &SessionId) -> Option<&EntityRecord> {
        self.records.get(id)
    }

    /// Write access to one record.
    pub fn get_mut(&mut self, id: &SessionId) -> Option<&mut EntityRecord> {
        self.records.get_mut(id)
    }

    /// The local entity's record, if present.
    #[must_use]
    pub fn local(&self) -> Option<&EntityRecord> {
        self.local_id.as_ref().and_then(|id| self.records.get(id))
    }

    /// Mutable access to the local entity's record.
    pub fn local_mut(&mut self) -> Option<&mut EntityRecord> {
        let id = self.local_id.clone()?;
        self.records.get_mut(&id)
    }

    /// Iterates all records.
    pub fn iter(&self) -> impl Iterator<Item = (&SessionId, &EntityRecord)> {
        self.records.iter()
    }

    /// Session ids currently present. Sorted for deterministic iteration
    /// when callers mutate while walking.
    #[must_use]
    pub fn session_ids(&self) -> Vec<SessionId> {
        let mut ids: Vec<SessionId> = self.records.keys().cloned().collect();
        ids.sort_by(|a, b| a.0.cmp(&b.0));
        ids
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> SessionId {
        SessionId::new(s)
    }

    #[test]
    fn test_upsert_creates_then_merges() {
        let mut registry = EntityRegistry::new();
        let outcome = registry.upsert(&id("a"), &EntityFields::spawn("Ash", 10.0, 20.0));
        assert!(outcome.created && !outcome.died);

        let outcome = registry.upsert(
            &id("a"),
            &EntityFields {
                hp: Some(55),
                ..Default::default()
            },
        );
        assert!(!outcome.created);
        assert_eq!(registry.get(&id("a")).unwrap().health, 55);
    }

    #[test]
    fn test_delta_writes_server_position_not_position() {
        let mut registry = EntityRegistry::new();
        registry.upsert(&id("a"), &EntityFields::spawn("Ash", 10.0, 20.0));

        registry.upsert(
            &id("a"),
            &EntityFields {
                x: Some(300.0),
                y: Some(400.0),
                ..Default::default()
            },
        );
        let record = registry.get(&id("a")).unwrap();
        assert_eq!(record.server_position, Vec2::new(300.0, 400.0));
        // Rendered position does not jump; interpolation owns it.
        assert_eq!(record.position, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_death_is_monotonic() {
        let mut registry = EntityRegistry::new();
        registry.upsert(&id("a"), &EntityFields::spawn("Ash", 0.0, 0.0));

        let outcome = registry.upsert(
            &id("a"),
            &EntityFields {
                hp: Some(0),
                ..Default::default()
            },
        );
        assert!(outcome.died);

        // A later positive hp delta does not resurrect.
        let outcome = registry.upsert(
            &id("a"),
            &EntityFields {
                hp: Some(80),
                ..Default::default()
            },
        );
        assert!(!outcome.died);
        assert!(registry.get(&id("a")).unwrap().is_dead);
    }

    #[test]
    fn test_local_look_is_not_overwritten_by_delta() {
        let mut registry = EntityRegistry::new();
        registry.set_local_id(id("me"));
        registry.upsert(&id("me"), &EntityFields::spawn("Me", 0.0, 0.0));
        registry.local_mut().unwrap().look_direction = Vec2::new(1.0, 0.0);

        registry.upsert(
            &id("me"),
            &EntityFields {
                lookx: Some(0.0),
                looky: Some(1.0),
                ..Default::default()
            },
        );
        assert_eq!(
            registry.local().unwrap().look_direction,
            Vec2::new(1.0, 0.0)
        );

        // Remote entities do take the replicated look.
        registry.upsert(&id("them"), &EntityFields::spawn("Them", 0.0, 0.0));
        registry.upsert(
            &id("them"),
            &EntityFields {
                lookx: Some(0.0),
                looky: Some(1.0),
                ..Default::default()
            },
        );
        assert_eq!(
            registry.get(&id("them")).unwrap().look_direction,
            Vec2::new(0.0, 1.0)
        );
    }

    #[test]
    fn test_remove_returns_record() {
        let mut registry = EntityRegistry::new();
        registry.upsert(&id("a"), &EntityFields::spawn("Ash", 1.0, 2.0));
        let record = registry.remove(&id("a")).unwrap();
        assert_eq!(record.display_name, "Ash");
        assert!(registry.is_empty());
        assert!(registry.remove(&id("a")).is_none());
    }
}
