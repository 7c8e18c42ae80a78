//! # ASHVALE Client Core
//!
//! Real-time entity synchronization and combat resolution for a top-down
//! multiplayer action game.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       GAME SESSION                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐        │
//! │  │ Movement     │  │ Combat       │  │ Animation    │        │
//! │  │ (Predict)    │  │ (Geometry)   │  │ (Keys/FX)    │        │
//! │  └──────┬───────┘  └──────┬───────┘  └──────┬───────┘        │
//! │         │                 │                 │                │
//! │         └────────────┬────┴─────────────────┘                │
//! │                      │                                       │
//! │          ┌───────────▼───────────┐                           │
//! │          │    Entity Registry    │◄── inbound server events  │
//! │          │    (local truth)      │                           │
//! │          └───────────┬───────────┘                           │
//! │                      │                                       │
//! │        RendererAdapter / NetworkAdapter (injected)           │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Authority Model
//!
//! ```text
//! CLIENT                              SERVER
//!   |                                   |
//!   |--- Intent: "I moved / I hit X" -->|
//!   |                                   | <- Server validates
//!   |<-- Authoritative state deltas ----|
//!   |                                   |
//! ```
//!
//! The client predicts for responsiveness and replays attacks as
//! speculative effects, but the server is the sole source of truth for
//! health, position correction and attack validity. Every outgoing
//! intent is advisory.
//!
//! ## Concurrency
//!
//! Single-threaded cooperative scheduling: all state is touched from the
//! per-frame [`GameSession::update`] tick and from
//! [`GameSession::handle_event`], each of which runs to completion.
//! Sends are fire-and-forget; there is no retry and no cancellation.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod animation;
pub mod combat;
pub mod config;
pub mod input;
pub mod movement;
pub mod session;
pub mod targeting;

pub use adapters::{
    MockNetwork, MockRenderer, NetworkAdapter, RenderCommand, RendererAdapter, TransientEffect,
};
pub use combat::CooldownTable;
pub use config::{ClientConfig, ConfigError};
pub use input::{DigitalPad, InputSnapshot};
pub use session::GameSession;
pub use targeting::TargetSelector;
