//! # Client Configuration
//!
//! Tuning values for movement, interpolation and attack pacing. Defaults
//! carry the canonical constants; a TOML override can adjust them per
//! deployment. Attack speeds are keyed `"<weapon>-<variant>"`, the same
//! key scheme the cooldown table uses at runtime.
//!
//! ```toml
//! send_interval_ms = 100.0
//! interpolation_factor = 0.15
//!
//! [attack_speeds]
//! "1-1" = 400.0
//! "2-1" = 700.0
//! ```

use std::collections::HashMap;

use serde::Deserialize;

use ashvale_shared::constants::{
    DEFAULT_ATTACK_SPEED_MS, INPUT_DEADZONE, INTERPOLATION_FACTOR, MOVE_SPEED, SEND_INTERVAL_MS,
    STOP_EPSILON,
};

/// Configuration failures. The only fallible path in this core; runtime
/// game operations absorb their failures locally instead.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML text did not parse.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    /// An `attack_speeds` key was not `"<weapon>-<variant>"`.
    #[error("invalid attack speed key {0:?}, expected \"<weapon>-<variant>\"")]
    InvalidAttackKey(String),
}

/// Client core tuning.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Milliseconds between outgoing move intents.
    pub send_interval_ms: f64,
    /// Local movement speed, world units per second.
    pub move_speed: f32,
    /// Per-frame exponential smoothing factor for remote interpolation.
    pub interpolation_factor: f32,
    /// Snap distance for remote interpolation.
    pub stop_epsilon: f32,
    /// Analog movement deadzone. Direction bucketing keeps the shared
    /// constant so local and remote entities bucket identically.
    pub input_deadzone: f32,
    /// Cooldown per `(weapon, variant)` in milliseconds.
    attack_speeds: HashMap<(u8, u8), f64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            send_interval_ms: SEND_INTERVAL_MS,
            move_speed: MOVE_SPEED,
            interpolation_factor: INTERPOLATION_FACTOR,
            stop_epsilon: STOP_EPSILON,
            input_deadzone: INPUT_DEADZONE,
            attack_speeds: HashMap::new(),
        }
    }
}

/// On-disk shape; every field optional so partial overrides work.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    send_interval_ms: Option<f64>,
    move_speed: Option<f32>,
    interpolation_factor: Option<f32>,
    stop_epsilon: Option<f32>,
    input_deadzone: Option<f32>,
    #[serde(default)]
    attack_speeds: HashMap<String, f64>,
}

impl ClientConfig {
    /// Parses a TOML override on top of the defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(text)?;
        let mut config = Self::default();

        if let Some(v) = raw.send_interval_ms {
            config.send_interval_ms = v;
        }
        if let Some(v) = raw.move_speed {
            config.move_speed = v;
        }
        if let Some(v) = raw.interpolation_factor {
            config.interpolation_factor = v;
        }
        if let Some(v) = raw.stop_epsilon {
            config.stop_epsilon = v;
        }
        if let Some(v) = raw.input_deadzone {
            config.input_deadzone = v;
        }
        for (key, speed_ms) in raw.attack_speeds {
            config.attack_speeds.insert(parse_attack_key(&key)?, speed_ms);
        }
        Ok(config)
    }

    /// Sets one attack speed programmatically.
    pub fn set_attack_speed(&mut self, weapon: u8, variant: u8, speed_ms: f64) {
        self.attack_speeds.insert((weapon, variant), speed_ms);
    }

    /// Cooldown for an attack key; 500 ms when unconfigured.
    #[must_use]
    pub fn attack_speed(&self, weapon: u8, variant: u8) -> f64 {
        self.attack_speeds
            .get(&(weapon, variant))
            .copied()
            .unwrap_or(DEFAULT_ATTACK_SPEED_MS)
    }
}

fn parse_attack_key(key: &str) -> Result<(u8, u8), ConfigError> {
    let bad = || ConfigError::InvalidAttackKey(key.to_string());
    let (weapon, variant) = key.split_once('-').ok_or_else(bad)?;
    Ok((
        weapon.parse().map_err(|_| bad())?,
        variant.parse().map_err(|_| bad())?,
    ))
}
