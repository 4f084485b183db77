// Game tunables and their optional overrides from the host page.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::Position;

/// Id of the optional `<script type="application/json">` element carrying overrides.
pub const CONFIG_ELEMENT_ID: &str = "game-config";
/// Upper bound on money markers; each one is scanned every frame.
pub const MAX_COLLECTIBLES: usize = 10_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Tunables for a single game. Every field falls back to its default when absent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Where the player spawns and the money is scattered around.
    pub start: Position,
    /// Meters moved per held direction per frame.
    pub step_meters: f64,
    pub pickup_radius_meters: f64,
    pub collectible_count: usize,
    /// Half the side of the square the money is scattered in.
    pub spawn_radius_meters: f64,
    /// Two presses closer than this are a double tap.
    pub double_tap_ms: f64,
    pub swing_duration_ms: f64,
    pub pixels_per_meter: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            start: Position::new(51.505, -0.09),
            step_meters: 0.2,
            pickup_radius_meters: 10.0,
            collectible_count: 10,
            spawn_radius_meters: 200.0,
            double_tap_ms: 300.0,
            swing_duration_ms: 300.0,
            pixels_per_meter: 4.0,
        }
    }
}

impl GameConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });
        let finite = [
            ("start.lat", self.start.lat),
            ("start.lng", self.start.lng),
            ("step_meters", self.step_meters),
            ("pickup_radius_meters", self.pickup_radius_meters),
            ("spawn_radius_meters", self.spawn_radius_meters),
            ("double_tap_ms", self.double_tap_ms),
            ("swing_duration_ms", self.swing_duration_ms),
            ("pixels_per_meter", self.pixels_per_meter),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return invalid(field, "must be a finite number");
            }
        }
        if self.start.lat <= -90.0 || self.start.lat >= 90.0 {
            return invalid("start.lat", "must be strictly between -90 and 90");
        }
        if self.step_meters <= 0.0 {
            return invalid("step_meters", "must be positive");
        }
        if self.pickup_radius_meters <= 0.0 {
            return invalid("pickup_radius_meters", "must be positive");
        }
        if self.pixels_per_meter <= 0.0 {
            return invalid("pixels_per_meter", "must be positive");
        }
        if self.collectible_count > MAX_COLLECTIBLES {
            return invalid("collectible_count", "must be at most 10000");
        }
        if self.spawn_radius_meters < 0.0 {
            return invalid("spawn_radius_meters", "must not be negative");
        }
        if self.double_tap_ms < 0.0 {
            return invalid("double_tap_ms", "must not be negative");
        }
        if self.swing_duration_ms < 0.0 {
            return invalid("swing_duration_ms", "must not be negative");
        }
        Ok(())
    }

    /// Reads overrides from the host page, falling back to defaults on any problem.
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|win| win.document())
            .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        let Some(raw) = raw else {
            return Self::default();
        };
        if raw.trim().is_empty() {
            return Self::default();
        }
        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("ignoring game config: {err}");
                Self::default()
            }
        }
    }
}
