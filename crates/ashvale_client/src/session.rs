//! # Game Session
//!
//! The orchestrator that connects the registry, the systems and the
//! injected adapters - the client-side counterpart of a server tick
//! loop. All state is touched from exactly two call sites:
//! [`GameSession::update`] (per frame) and [`GameSession::handle_event`]
//! (per inbound message), each running to completion. Apply-then-render
//! ordering per tick; no locks required.

use ashvale_core::{EntityRegistry, MergeOutcome};
use ashvale_shared::events::ServerEvent;
use ashvale_shared::math::{Direction, Vec2};
use ashvale_shared::protocol::{AttackPayload, EntityFields, SessionId, WeaponType};

use crate::adapters::{NetworkAdapter, RendererAdapter};
use crate::animation;
use crate::combat::{resolve_attack, CooldownTable};
use crate::config::ClientConfig;
use crate::input::InputSnapshot;
use crate::targeting::TargetSelector;

/// The integrated client core.
///
/// Generic over the renderer and network adapters so the whole session
/// is testable with mocks and embeddable under any engine.
pub struct GameSession<R: RendererAdapter, N: NetworkAdapter> {
    /// Tuning values.
    pub(crate) config: ClientConfig,
    /// Client-visible world state.
    pub(crate) registry: EntityRegistry,
    /// Injected renderer boundary - PRIVATE, commands only.
    pub(crate) renderer: R,
    /// Injected network boundary - PRIVATE, intents only.
    pub(crate) network: N,
    /// Active pointer target.
    pub(crate) target: TargetSelector,
    /// Attack rate limiting.
    pub(crate) cooldowns: CooldownTable,
    /// Monotonic session clock, milliseconds.
    pub(crate) clock_ms: f64,
    /// Move-intent throttle accumulator.
    pub(crate) send_timer_ms: f64,
}

impl<R: RendererAdapter, N: NetworkAdapter> GameSession<R, N> {
    /// Creates a session around the injected adapters.
    pub fn new(config: ClientConfig, renderer: R, network: N) -> Self {
        Self {
            config,
            registry: EntityRegistry::new(),
            renderer,
            network,
            target: TargetSelector::new(),
            cooldowns: CooldownTable::new(),
            clock_ms: 0.0,
            send_timer_ms: 0.0,
        }
    }

    /// Read access to the registry.
    #[must_use]
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Read access to the renderer adapter.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Write access to the renderer adapter (animation completion is
    /// reported through it).
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Read access to the network adapter.
    #[must_use]
    pub fn network(&self) -> &N {
        &self.network
    }

    /// The active pointer target.
    #[must_use]
    pub fn current_target(&self) -> Option<&SessionId> {
        self.target.current()
    }

    /// The monotonic session clock in milliseconds.
    #[must_use]
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    /// One frame of the client core.
    ///
    /// Order per tick: weapon switch, pointer targeting, movement
    /// (prediction + interpolation + animation), attack input, target
    /// revalidation. Short-circuits entirely until the session has
    /// joined and the local entity exists.
    pub fn update(&mut self, dt_ms: f64, input: &InputSnapshot) {
        self.clock_ms += dt_ms;

        if !self.bind_local_identity() || self.registry.local().is_none() {
            return;
        }

        if let Some(weapon) = input.weapon_select {
            self.switch_weapon(weapon);
        }
        if let Some(point) = input.pointer_click {
            self.target.select_at(point, &self.registry);
        }

        self.update_movement(dt_ms, input);

        if let Some(variant) = input.attack {
            self.try_attack(variant);
        }

        let holder_weapon = self
            .registry
            .local()
            .map(|record| record.weapon)
            .unwrap_or_default();
        self.target.revalidate(&self.registry, holder_weapon);
    }

    /// Applies one inbound server message atomically.
    pub fn handle_event(&mut self, event: ServerEvent) {
        self.bind_local_identity();

        match event {
            ServerEvent::RosterSnapshot { entities } => {
                for (session_id, fields) in entities {
                    self.spawn_or_merge(&session_id, &fields);
                }
            }
            ServerEvent::EntityJoined { session_id, fields } => {
                self.spawn_or_merge(&session_id, &fields);
            }
            ServerEvent::EntityDelta { session_id, fields } => {
                self.spawn_or_merge(&session_id, &fields);
            }
            ServerEvent::EntityLeft { session_id } => {
                self.remove_entity(&session_id);
            }
            ServerEvent::RemoteAttack {
                session_id,
                payload,
            } => {
                self.replay_remote_attack(&session_id, &payload);
            }
        }
    }

    /// Adopts the session id once the network layer has one. Returns
    /// whether an identity is bound.
    fn bind_local_identity(&mut self) -> bool {
        if self.registry.local_id().is_some() {
            return true;
        }
        match self.network.local_session_id() {
            Some(id) => {
                tracing::info!(session_id = %id, "session joined");
                self.registry.set_local_id(id);
                true
            }
            None => false,
        }
    }

    /// Upserts a record, instantiating renderer assets on creation and
    /// issuing the death animation when a delta kills the entity.
    fn spawn_or_merge(&mut self, session_id: &SessionId, fields: &EntityFields) {
        let MergeOutcome { created, died } = self.registry.upsert(session_id, fields);

        if created {
            let is_local = self.registry.is_local(session_id);
            if let Some(record) = self.registry.get_mut(session_id) {
                let handle = self.renderer.create_entity_visual(session_id, record);
                record.visual = Some(handle);
                self.renderer
                    .set_position(handle, record.position.x, record.position.y);
                if is_local {
                    self.renderer.camera_follow(handle);
                }
            }
            tracing::info!(session_id = %session_id, local = is_local, "entity joined");
        }

        if died {
            tracing::info!(session_id = %session_id, "entity died");
            if let Some(record) = self.registry.get(session_id) {
                animation::play_death(record, &mut self.renderer);
            }
        }
    }

    /// Destroys a departed entity's record, assets and dangling lock.
    fn remove_entity(&mut self, session_id: &SessionId) {
        let Some(record) = self.registry.remove(session_id) else {
            return;
        };
        if let Some(handle) = record.visual {
            self.renderer.destroy_entity_visual(handle);
        }
        self.target.on_entity_removed(session_id);
        tracing::info!(session_id = %session_id, "entity left");
    }

    /// Replays another client's attack for our view of them.
    ///
    /// Our own broadcast is dropped here: the acting client already
    /// played its speculative effect and must not re-trigger it.
    fn replay_remote_attack(&mut self, session_id: &SessionId, payload: &AttackPayload) {
        if self.registry.is_local(session_id) {
            return;
        }
        let weapon = WeaponType::from_wire(payload.weapon_type);
        let Some(record) = self.registry.get_mut(session_id) else {
            tracing::warn!(session_id = %session_id, "attack event for unknown entity ignored");
            return;
        };

        record.weapon = weapon;
        let look = payload.direction.normalize_or_zero();
        if look != Vec2::ZERO {
            record.look_direction = look;
            if let Some(direction) = Direction::from_vector(look.x, look.y) {
                record.direction = direction;
            }
        }
        animation::play_attack_once(record, &mut self.renderer, weapon, payload.attack_number);
    }

    /// Equips a weapon locally and announces the switch.
    fn switch_weapon(&mut self, weapon: WeaponType) {
        let Some(record) = self.registry.local_mut() else {
            return;
        };
        if record.weapon == weapon {
            return;
        }
        record.weapon = weapon;
        tracing::debug!(weapon = ?weapon, "weapon switched");
        self.network.send_weapon_change(weapon);
    }

    /// Attempts an attack input: cooldown gate, geometry resolution,
    /// intent send, speculative local replay. Refusals are silent -
    /// absence of effect is the only failure surface.
    fn try_attack(&mut self, variant: u8) {
        let (weapon, origin, look) = match self.registry.local() {
            Some(record) if !record.is_dead => {
                (record.weapon, record.position, record.look_direction)
            }
            _ => return,
        };
        if weapon == WeaponType::None {
            tracing::debug!("attack refused: unarmed");
            return;
        }

        // The gate is consumed even if resolution refuses below; mashing
        // an invalid attack does not bank a free swing.
        let speed_ms = self.config.attack_speed(weapon as u8, variant);
        if !self
            .cooldowns
            .try_consume(weapon as u8, variant, self.clock_ms, speed_ms)
        {
            return;
        }

        let lock = self.target.current().cloned();
        let Some(resolved) =
            resolve_attack(weapon, variant, origin, look, &self.registry, lock.as_ref())
        else {
            // Stale lock: cleared, never retried against a fallback.
            if weapon.uses_target_lock(variant) {
                self.target.clear();
            }
            tracing::debug!(weapon = ?weapon, variant, "attack refused");
            return;
        };

        if let Some(new_look) = resolved.look_override {
            if let Some(record) = self.registry.local_mut() {
                record.look_direction = new_look;
                if let Some(direction) = Direction::from_vector(new_look.x, new_look.y) {
                    record.direction = direction;
                }
            }
        }
        if resolved.consumed_lock {
            self.target.clear();
        }

        let look_now = self
            .registry
            .local()
            .map_or(look, |record| record.look_direction);
        let payload = AttackPayload {
            weapon_type: weapon as u8,
            attack_number: variant,
            position: resolved.impact.floored(),
            direction: look_now,
            targets: resolved.targets,
        };
        tracing::debug!(
            weapon = ?weapon,
            variant,
            targets = payload.targets.len(),
            "attack sent"
        );
        self.network.send_attack(payload);

        // Speculative replay: animation + FX before any acknowledgment.
        if let Some(record) = self.registry.local_mut() {
            animation::play_attack_once(record, &mut self.renderer, weapon, variant);
        }
    }
}
