//! # ASHVALE Core - The Entity Registry
//!
//! Client-visible world state, one record per connected session.
//!
//! ## Architecture Rules
//!
//! 1. **Authoritative fields flow through `upsert` only** - inbound deltas
//!    are merged against the closed `EntityFields` shape, never copied
//!    blindly onto a record.
//! 2. **`server_position` is the network's write target** - `position` is
//!    advanced by prediction/interpolation, not by messages (creation is
//!    the one exception).
//! 3. **Death is terminal** - once a record is dead it stays dead for its
//!    lifetime; there is no resurrection transition in this core.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod registry;

pub use registry::{EntityRecord, EntityRegistry, MergeOutcome, VisualHandle};
