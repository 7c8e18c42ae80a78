//! # Target Selection
//!
//! Pointer-click target lock for the locked-target attack variants.
//!
//! A click hit-tests fixed visual bounds around every non-self, non-dead
//! entity; the first spatial match becomes the active target and a miss
//! clears it. The lock is revalidated every frame and cleared the moment
//! any check fails - a stale lock is never silently retried against a
//! fallback.

use ashvale_core::EntityRegistry;
use ashvale_shared::constants::{TARGET_HALF_HEIGHT, TARGET_HALF_WIDTH};
use ashvale_shared::math::Vec2;
use ashvale_shared::protocol::{SessionId, WeaponType};

/// The active combat target, if any.
#[derive(Debug, Default)]
pub struct TargetSelector {
    current: Option<SessionId>,
}

impl TargetSelector {
    /// No target selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The locked session id, if one survives validation.
    #[must_use]
    pub fn current(&self) -> Option<&SessionId> {
        self.current.as_ref()
    }

    /// Drops the lock.
    pub fn clear(&mut self) {
        if let Some(id) = self.current.take() {
            tracing::debug!(target_id = %id, "target cleared");
        }
    }

    /// Handles a world-space pointer click. The first non-self, non-dead
    /// entity whose bounds contain the point becomes the target; a miss
    /// clears the current one. Candidates are walked in session-id order
    /// so ties resolve deterministically.
    pub fn select_at(&mut self, point: Vec2, registry: &EntityRegistry) {
        for id in registry.session_ids() {
            if registry.is_local(&id) {
                continue;
            }
            let Some(record) = registry.get(&id) else {
                continue;
            };
            if record.is_dead || record.visual.is_none() {
                continue;
            }
            let delta = point - record.position;
            if delta.x.abs() <= TARGET_HALF_WIDTH && delta.y.abs() <= TARGET_HALF_HEIGHT {
                tracing::debug!(target_id = %id, "target selected");
                self.current = Some(id);
                return;
            }
        }
        self.clear();
    }

    /// Must be called whenever an entity leaves the registry so a
    /// dangling lock is cleared within the same update.
    pub fn on_entity_removed(&mut self, id: &SessionId) {
        if self.current.as_ref() == Some(id) {
            self.clear();
        }
    }

    /// Per-frame revalidation: the target must still exist, be alive and
    /// visible, and the holder's weapon must have a locked-target
    /// variant at all. Clears on any failure.
    pub fn revalidate(&mut self, registry: &EntityRegistry, holder_weapon: WeaponType) {
        let Some(id) = self.current.as_ref() else {
            return;
        };
        let valid = matches!(holder_weapon, WeaponType::Bow | WeaponType::Wand)
            && registry
                .get(id)
                .is_some_and(|record| !record.is_dead && record.visual.is_some());
        if !valid {
            self.clear();
        }
    }
}
