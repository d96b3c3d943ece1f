//! Gallery Configuration
//!
//! Everything needed to stand up a walk: the room, where the player
//! appears and the controller tuning. `Default` returns the canonical
//! gallery; a JSON file can override any subset of it.
//!
//! ```json
//! {
//!   "room": { "height": 200.0 },
//!   "spawn": { "position": [0.0, 1.8, 0.0], "yaw": 0.0 },
//!   "controller": { "walk_speed": 20.0 }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use crate::player::config::{ConfigError, ControllerConfig, SpawnPoint};
use crate::world::RoomBounds;

/// Top-level configuration for a gallery walk.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub room: RoomBounds,
    pub spawn: SpawnPoint,
    pub controller: ControllerConfig,
}

impl GalleryConfig {
    /// Parse and validate a config from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&text)?;
        log::info!("loaded gallery config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load `path` if given, otherwise the defaults. A file that fails to
    /// load is logged and replaced by the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("{err}; using default gallery config");
                Self::default()
            }
        }
    }

    /// Pretty JSON, suitable for writing a starter config.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let dimensions = [
            ("room.width", self.room.width),
            ("room.length", self.room.length),
            ("room.height", self.room.height),
            ("room.wall_thickness", self.room.wall_thickness),
            ("room.floor_thickness", self.room.floor_thickness),
        ];
        for (field, value) in dimensions {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    value,
                    reason: "must be positive",
                });
            }
        }

        if !self.spawn.position.is_finite() || !self.spawn.yaw.is_finite() {
            return Err(ConfigError::Invalid {
                field: "spawn",
                value: f32::NAN,
                reason: "must be finite",
            });
        }
        if !self.room.contains(self.spawn.position) {
            return Err(ConfigError::Invalid {
                field: "spawn.position",
                value: self.spawn.position.y,
                reason: "must lie inside the room",
            });
        }

        self.controller.validate()
    }
}
