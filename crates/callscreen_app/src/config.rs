//! Callscreen configuration file handling

use anyhow::{Context, Result};
use callscreen_animation::SpringConfig;
use callscreen_gesture::ControllerConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "callscreen.toml";

/// Top-level configuration (callscreen.toml)
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct CallscreenConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub slider: SliderConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Where theme state is persisted
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".callscreen")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "warn,callscreen=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

/// Swipe-to-answer tuning
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SliderConfig {
    #[serde(default = "default_track_width")]
    pub track_width: f32,
    #[serde(default = "default_commit_threshold")]
    pub commit_threshold: f32,
    #[serde(default = "default_commit_duration")]
    pub commit_duration_ms: u32,
}

fn default_track_width() -> f32 {
    callscreen_gesture::controller::TRACK_WIDTH
}

fn default_commit_threshold() -> f32 {
    callscreen_gesture::controller::COMMIT_THRESHOLD
}

fn default_commit_duration() -> u32 {
    callscreen_gesture::controller::COMMIT_DURATION_MS
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            track_width: default_track_width(),
            commit_threshold: default_commit_threshold(),
            commit_duration_ms: default_commit_duration(),
        }
    }
}

/// Fake frame clock used by `simulate-swipe` and `animate`
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SimulationConfig {
    #[serde(default = "default_fps")]
    pub fps: u32,
}

fn default_fps() -> u32 {
    60
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { fps: default_fps() }
    }
}

impl SimulationConfig {
    pub fn frame_ms(&self) -> f32 {
        1000.0 / self.fps.max(1) as f32
    }
}

impl CallscreenConfig {
    /// Load from `path`, or from `callscreen.toml` in the working directory
    ///
    /// An explicit path must exist. Without one, a missing file means
    /// defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) if path.is_dir() => path.join(CONFIG_FILE),
            Some(path) => path.to_path_buf(),
            None => {
                let local = PathBuf::from(CONFIG_FILE);
                if !local.exists() {
                    tracing::debug!("no {} found, using defaults", CONFIG_FILE);
                    return Ok(Self::default());
                }
                local
            }
        };

        if !config_path.exists() {
            anyhow::bail!("No config found at {}", config_path.display());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: CallscreenConfig = toml::from_str(content)?;
        if config.slider.track_width <= 0.0 || config.slider.commit_threshold < 0.0 {
            anyhow::bail!("slider track width and commit threshold must be positive");
        }
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            track_width: self.slider.track_width,
            commit_threshold: self.slider.commit_threshold,
            commit_duration_ms: self.slider.commit_duration_ms,
            snap_back: SpringConfig::default(),
        }
    }
}
