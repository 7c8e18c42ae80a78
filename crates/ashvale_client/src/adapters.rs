//! # Adapter Boundaries
//!
//! Traits the embedding application implements so the core's decisions
//! (which animation key, which effect, which intent) stay expressible and
//! testable without a graphics engine or a socket present.
//!
//! The core never touches engine sprite objects or room connections
//! directly; it only talks to these two traits. Mock implementations for
//! the test suite live at the bottom of this module.

use ashvale_core::registry::{EntityRecord, VisualHandle};
use ashvale_shared::math::Vec2;
use ashvale_shared::protocol::{AttackPayload, MovePayload, SessionId, WeaponType};

/// A weapon-specific transient visual, fire-and-forget.
///
/// These carry the resolved world-space geometry so the renderer does not
/// need to re-derive it.
#[derive(Clone, Debug, PartialEq)]
pub enum TransientEffect {
    /// Sword thrust trail: a bright line from the attacker outward.
    ThrustTrail {
        /// Line start (attacker position).
        from: Vec2,
        /// Line end.
        to: Vec2,
    },
    /// Bow shot: an arrow sprite tweened along the fire line.
    ArrowShot {
        /// Arrow origin.
        from: Vec2,
        /// Arrow terminal point.
        to: Vec2,
    },
    /// Wand bolt: an expanding ring at the impact center.
    BoltBurst {
        /// Impact center.
        at: Vec2,
        /// Final ring radius.
        radius: f32,
    },
    /// Spell nova: an expanding aura around the caster.
    NovaBurst {
        /// Caster position.
        at: Vec2,
        /// Final aura radius.
        radius: f32,
    },
}

/// Interface to the rendering engine.
///
/// The embedding application implements this; the core issues commands
/// and reads back only the currently playing animation key.
pub trait RendererAdapter {
    /// Instantiates renderer assets for a newly observed entity.
    fn create_entity_visual(&mut self, session_id: &SessionId, record: &EntityRecord)
        -> VisualHandle;

    /// Releases an entity's renderer assets.
    fn destroy_entity_visual(&mut self, handle: VisualHandle);

    /// Moves an entity's visual to a world position.
    fn set_position(&mut self, handle: VisualHandle, x: f32, y: f32);

    /// Starts (or restarts) the animation with the given key.
    fn play_animation(&mut self, handle: VisualHandle, key: &str);

    /// The key currently playing on this visual, if any.
    fn current_animation_key(&self, handle: VisualHandle) -> Option<String>;

    /// Whether the current animation is still in flight. Play-once
    /// animations report `false` after their last frame.
    fn is_animation_playing(&self, handle: VisualHandle) -> bool;

    /// Spawns a transient weapon effect. Not state-bearing.
    fn spawn_transient_effect(&mut self, effect: TransientEffect);

    /// Attaches the camera to a visual (the local entity).
    fn camera_follow(&mut self, handle: VisualHandle);
}

/// Interface to the network/session layer.
///
/// Outbound sends are fire-and-forget; a stale intent is still sent and
/// the server rejects it. Inbound traffic arrives separately as
/// [`ashvale_shared::ServerEvent`] values.
pub trait NetworkAdapter {
    /// Our session id, `None` until the room join completes.
    fn local_session_id(&self) -> Option<SessionId>;

    /// Sends a move intent.
    fn send_move(&mut self, payload: MovePayload);

    /// Sends an attack intent.
    fn send_attack(&mut self, payload: AttackPayload);

    /// Announces a weapon switch.
    fn send_weapon_change(&mut self, weapon: WeaponType);
}

// ============================================================================
// MOCK IMPLEMENTATIONS (For Testing)
// ============================================================================

/// One recorded renderer command, for assertions.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderCommand {
    /// `create_entity_visual` was called.
    CreateVisual {
        /// Entity session id.
        session_id: SessionId,
        /// Assigned handle.
        handle: VisualHandle,
    },
    /// `destroy_entity_visual` was called.
    DestroyVisual {
        /// Released handle.
        handle: VisualHandle,
    },
    /// `play_animation` was called.
    PlayAnimation {
        /// Target handle.
        handle: VisualHandle,
        /// Animation key.
        key: String,
    },
    /// `spawn_transient_effect` was called.
    SpawnEffect {
        /// The effect.
        effect: TransientEffect,
    },
    /// `camera_follow` was called.
    CameraFollow {
        /// Followed handle.
        handle: VisualHandle,
    },
}

/// Mock renderer that records every command for inspection.
#[derive(Debug, Default)]
pub struct MockRenderer {
    next_handle: u64,
    commands: Vec<RenderCommand>,
    current_anim: std::collections::HashMap<VisualHandle, String>,
    playing: std::collections::HashMap<VisualHandle, bool>,
    positions: std::collections::HashMap<VisualHandle, Vec2>,
}

impl MockRenderer {
    /// Creates an empty mock renderer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands recorded so far.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Recorded `play_animation` keys for one handle, in order.
    #[must_use]
    pub fn played_keys(&self, handle: VisualHandle) -> Vec<String> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                RenderCommand::PlayAnimation { handle: h, key } if *h == handle => {
                    Some(key.clone())
                }
                _ => None,
            })
            .collect()
    }

    /// Recorded transient effects, in order.
    #[must_use]
    pub fn effects(&self) -> Vec<TransientEffect> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                RenderCommand::SpawnEffect { effect } => Some(effect.clone()),
                _ => None,
            })
            .collect()
    }

    /// Last position set for one handle.
    #[must_use]
    pub fn position(&self, handle: VisualHandle) -> Option<Vec2> {
        self.positions.get(&handle).copied()
    }

    /// Marks a play-once animation as finished.
    pub fn finish_animation(&mut self, handle: VisualHandle) {
        self.playing.insert(handle, false);
    }
}

impl RendererAdapter for MockRenderer {
    fn create_entity_visual(
        &mut self,
        session_id: &SessionId,
        record: &EntityRecord,
    ) -> VisualHandle {
        self.next_handle += 1;
        let handle = VisualHandle(self.next_handle);
        self.positions.insert(handle, record.position);
        self.commands.push(RenderCommand::CreateVisual {
            session_id: session_id.clone(),
            handle,
        });
        handle
    }

    fn destroy_entity_visual(&mut self, handle: VisualHandle) {
        self.current_anim.remove(&handle);
        self.playing.remove(&handle);
        self.positions.remove(&handle);
        self.commands.push(RenderCommand::DestroyVisual { handle });
    }

    fn set_position(&mut self, handle: VisualHandle, x: f32, y: f32) {
        self.positions.insert(handle, Vec2::new(x, y));
    }

    fn play_animation(&mut self, handle: VisualHandle, key: &str) {
        self.current_anim.insert(handle, key.to_string());
        self.playing.insert(handle, true);
        self.commands.push(RenderCommand::PlayAnimation {
            handle,
            key: key.to_string(),
        });
    }

    fn current_animation_key(&self, handle: VisualHandle) -> Option<String> {
        self.current_anim.get(&handle).cloned()
    }

    fn is_animation_playing(&self, handle: VisualHandle) -> bool {
        self.playing.get(&handle).copied().unwrap_or(false)
    }

    fn spawn_transient_effect(&mut self, effect: TransientEffect) {
        self.commands.push(RenderCommand::SpawnEffect { effect });
    }

    fn camera_follow(&mut self, handle: VisualHandle) {
        self.commands.push(RenderCommand::CameraFollow { handle });
    }
}

/// Mock network that records every outgoing payload.
#[derive(Debug, Default)]
pub struct MockNetwork {
    local: Option<SessionId>,
    /// Recorded move intents, in send order.
    pub moves: Vec<MovePayload>,
    /// Recorded attack intents, in send order.
    pub attacks: Vec<AttackPayload>,
    /// Recorded weapon switches, in send order.
    pub weapon_changes: Vec<WeaponType>,
}

impl MockNetwork {
    /// A joined session with the given local id.
    #[must_use]
    pub fn joined(local: &str) -> Self {
        Self {
            local: Some(SessionId::new(local)),
            ..Self::default()
        }
    }

    /// A session that has not joined yet (`local_session_id` is `None`).
    #[must_use]
    pub fn offline() -> Self {
        Self::default()
    }
}

impl NetworkAdapter for MockNetwork {
    fn local_session_id(&self) -> Option<SessionId> {
        self.local.clone()
    }

    fn send_move(&mut self, payload: MovePayload) {
        self.moves.push(payload);
    }

    fn send_attack(&mut self, payload: AttackPayload) {
        self.attacks.push(payload);
    }

    fn send_weapon_change(&mut self, weapon: WeaponType) {
        self.weapon_changes.push(weapon);
    }
}
