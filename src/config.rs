//! Window geometry and runtime settings.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;

pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 600;
pub const GRID_SIZE: u32 = 20;
pub const GRID_WIDTH: u32 = WIDTH / GRID_SIZE;
pub const GRID_HEIGHT: u32 = HEIGHT / GRID_SIZE;

/// Points awarded per food before the multiplier is applied.
pub const FOOD_POINTS: u32 = 10;

/// Number of entries kept in the high-score file.
pub const LEDGER_SIZE: usize = 5;

/// Which of the two game flavours to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Plain snake at a fixed frame rate.
    Classic,
    /// Particles, power-ups, dynamic speed and color cycling.
    #[default]
    Neon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub variant: Variant,
    pub autoplay: bool,
    pub particles: bool,
    pub power_ups: bool,
    pub dynamic_speed: bool,
    pub color_cycle: bool,
    /// Fixed frame rate used when `dynamic_speed` is off.
    pub fps: u32,
    pub base_fps: u32,
    pub max_fps: u32,
    pub power_up_chance: f64,
    /// Frames a power-up stays on the board before it despawns.
    pub power_up_lifetime: u32,
    /// Frames an activated effect lasts.
    pub power_up_duration: u32,
    pub particle_count: usize,
    pub high_score_path: PathBuf,
    pub music_path: PathBuf,
    pub music_volume: f32,
    pub play_music: bool,
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::neon()
    }
}

impl Settings {
    pub fn classic() -> Self {
        Self {
            variant: Variant::Classic,
            particles: false,
            power_ups: false,
            dynamic_speed: false,
            color_cycle: false,
            ..Self::neon()
        }
    }

    pub fn neon() -> Self {
        Self {
            variant: Variant::Neon,
            autoplay: false,
            particles: true,
            power_ups: true,
            dynamic_speed: true,
            color_cycle: true,
            fps: 15,
            base_fps: 8,
            max_fps: 25,
            power_up_chance: 0.3,
            power_up_lifetime: 120,
            power_up_duration: 90,
            particle_count: 12,
            high_score_path: PathBuf::from("highscore.txt"),
            music_path: Path::new("assets").join("bg_music.mp3"),
            music_volume: 0.2,
            play_music: false,
            seed: None,
        }
    }

    /// Preset for a variant with every toggle at that variant's default.
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Classic => Self::classic(),
            Variant::Neon => Self::neon(),
        }
    }

    /// Reads a JSON settings file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parses settings; fields absent from the document come from the
    /// preset of the declared variant.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let raw: serde_json::Value = serde_json::from_str(text)?;
        let variant = match raw.get("variant") {
            Some(v) => serde_json::from_value(v.clone())?,
            None => Variant::default(),
        };
        let mut merged = serde_json::to_value(Self::for_variant(variant))?;
        if let (Some(base), serde_json::Value::Object(over)) = (merged.as_object_mut(), raw) {
            for (k, v) in over {
                base.insert(k, v);
            }
        }
        let settings: Settings = serde_json::from_value(merged)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_fps == 0 || self.fps == 0 {
            return Err(ConfigError::Invalid("frame rates must be positive".into()));
        }
        if self.max_fps < self.base_fps {
            return Err(ConfigError::Invalid(format!(
                "max_fps ({}) is below base_fps ({})",
                self.max_fps, self.base_fps
            )));
        }
        if !(0.0..=1.0).contains(&self.power_up_chance) {
            return Err(ConfigError::Invalid("power_up_chance must be within 0..=1".into()));
        }
        Ok(())
    }
}
