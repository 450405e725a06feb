//! Game rules configuration resource.
//!
//! Tuning constants for the snake and its platforms, loaded from an INI file.
//! Defaults are safe to start with; any key missing from the file keeps its
//! default value.
//!
//! # Configuration File Format
//!
//! ```ini
//! [snake]
//! initial_speed = 16.0
//! initial_segments = 3
//! segment_width = 8.0
//! segment_height = 8.0
//!
//! [rules]
//! speed_multiplier = 1.5
//! game_over_delay = 2.0
//! death_spin_min = 90.0
//! death_spin_max = 720.0
//!
//! [sim]
//! seed = 42
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;
use thiserror::Error;

/// Default safe values for startup
const DEFAULT_INITIAL_SPEED: f32 = 16.0;
const DEFAULT_INITIAL_SEGMENTS: u32 = 3;
const DEFAULT_SEGMENT_SIZE: f32 = 8.0;
const DEFAULT_SPEED_MULTIPLIER: f32 = 1.5;
const DEFAULT_GAME_OVER_DELAY: f32 = 2.0;
const DEFAULT_DEATH_SPIN_MIN: f32 = 90.0;
const DEFAULT_DEATH_SPIN_MAX: f32 = 720.0;
const DEFAULT_SEED: u64 = 42;
const DEFAULT_CONFIG_PATH: &str = "./snake.ini";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config file {path}: {reason}")]
    Load { path: PathBuf, reason: String },
    #[error("invalid value for [{section}] {key}: {reason}")]
    Value {
        section: &'static str,
        key: &'static str,
        reason: String,
    },
}

/// Game rules configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Speed of a freshly spawned snake, world units per second.
    pub initial_speed: f32,
    /// Body pieces behind the head when the scene does not say otherwise.
    pub initial_segments: u32,
    /// Size of the bounds of a grown body piece.
    pub segment_width: f32,
    pub segment_height: f32,
    /// Factor applied to the velocity by a speed platform.
    pub speed_multiplier: f32,
    /// Seconds between a wall hit and the game-over action.
    pub game_over_delay: f32,
    /// Range of the random spin pieces get when the snake dies, in degrees/s.
    pub death_spin_min: f32,
    pub death_spin_max: f32,
    /// Seed for [`SimRng`](crate::resources::rng::SimRng).
    pub seed: u64,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            initial_speed: DEFAULT_INITIAL_SPEED,
            initial_segments: DEFAULT_INITIAL_SEGMENTS,
            segment_width: DEFAULT_SEGMENT_SIZE,
            segment_height: DEFAULT_SEGMENT_SIZE,
            speed_multiplier: DEFAULT_SPEED_MULTIPLIER,
            game_over_delay: DEFAULT_GAME_OVER_DELAY,
            death_spin_min: DEFAULT_DEATH_SPIN_MIN,
            death_spin_max: DEFAULT_DEATH_SPIN_MAX,
            seed: DEFAULT_SEED,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file at `config_path`.
    ///
    /// Missing values retain their current (default) values.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut ini = Ini::new();
        ini.load(&self.config_path).map_err(|reason| ConfigError::Load {
            path: self.config_path.clone(),
            reason,
        })?;
        self.apply(&ini)?;
        info!(
            "Loaded config from {:?}: speed={} x{}, segments={}, game_over_delay={}",
            self.config_path,
            self.initial_speed,
            self.speed_multiplier,
            self.initial_segments,
            self.game_over_delay
        );
        Ok(())
    }

    /// Apply INI text on top of the current values.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let mut ini = Ini::new();
        ini.read(text.to_string())
            .map_err(|reason| ConfigError::Load {
                path: PathBuf::from("<string>"),
                reason,
            })?;
        self.apply(&ini)
    }

    fn apply(&mut self, ini: &Ini) -> Result<(), ConfigError> {
        // [snake] section
        read_f32(ini, "snake", "initial_speed", &mut self.initial_speed)?;
        if let Some(n) = ini
            .getuint("snake", "initial_segments")
            .map_err(|reason| ConfigError::Value {
                section: "snake",
                key: "initial_segments",
                reason,
            })?
        {
            self.initial_segments = n as u32;
        }
        read_f32(ini, "snake", "segment_width", &mut self.segment_width)?;
        read_f32(ini, "snake", "segment_height", &mut self.segment_height)?;

        // [rules] section
        read_f32(ini, "rules", "speed_multiplier", &mut self.speed_multiplier)?;
        read_f32(ini, "rules", "game_over_delay", &mut self.game_over_delay)?;
        read_f32(ini, "rules", "death_spin_min", &mut self.death_spin_min)?;
        read_f32(ini, "rules", "death_spin_max", &mut self.death_spin_max)?;

        // [sim] section
        if let Some(seed) = ini.getuint("sim", "seed").map_err(|reason| ConfigError::Value {
            section: "sim",
            key: "seed",
            reason,
        })? {
            self.seed = seed;
        }
        Ok(())
    }
}

fn read_f32(
    ini: &Ini,
    section: &'static str,
    key: &'static str,
    target: &mut f32,
) -> Result<(), ConfigError> {
    let value = ini.getfloat(section, key).map_err(|reason| ConfigError::Value {
        section,
        key,
        reason,
    })?;
    if let Some(value) = value {
        *target = value as f32;
    }
    Ok(())
}
