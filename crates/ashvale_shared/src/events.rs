//! Inbound events delivered by the network/session adapter.
//!
//! The transport layer decodes room traffic into these and hands them to
//! the session one at a time. Each event is applied atomically - a frame
//! never renders a half-applied delta.

use serde::{Deserialize, Serialize};

use crate::protocol::{AttackPayload, EntityFields, SessionId};

/// One decoded server-to-client message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ServerEvent {
    /// Full roster at join time: every entity already in the room.
    RosterSnapshot {
        /// Per-entity spawn fields, local entity included.
        entities: Vec<(SessionId, EntityFields)>,
    },
    /// A participant entered the room after us.
    EntityJoined {
        /// Their session id.
        session_id: SessionId,
        /// Their spawn fields.
        fields: EntityFields,
    },
    /// Authoritative state delta for one entity.
    EntityDelta {
        /// Whose state changed.
        session_id: SessionId,
        /// The changed fields.
        fields: EntityFields,
    },
    /// A participant left the room.
    EntityLeft {
        /// Their session id.
        session_id: SessionId,
    },
    /// The server re-broadcast an attack another client performed.
    ///
    /// Events carrying our own session id are dropped at this boundary:
    /// the acting client already played its speculative effect.
    RemoteAttack {
        /// The attacker.
        session_id: SessionId,
        /// The attack as the server relayed it.
        payload: AttackPayload,
    },
}
