//! # ASHVALE Shared
//!
//! Common types used by the client core and whatever carries its bytes.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - a rendering engine
//! - a transport implementation
//! - anything with a main loop
//!
//! The client core, the transport layer and the test suite all read these
//! types; they have to stay exactly as dumb as they look.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod events;
pub mod math;
pub mod protocol;

pub use events::ServerEvent;
pub use math::{Direction, Vec2};
pub use protocol::{AttackPayload, EntityFields, MovePayload, SessionId, WeaponType};
