//! Application configuration
//!
//! Stored as RON. A missing file yields the defaults; a file that exists but
//! does not parse is an error.

use std::path::{Path, PathBuf};

use arp_core::{SessionConfig, VariantDescriptor, Viewer};
use serde::{Deserialize, Serialize};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "arp.ron";

/// Screen and camera of the simulated device
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: f32,
    pub height: f32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 1080.0,
            height: 1920.0,
            fov_degrees: 60.0,
        }
    }
}

impl DisplayConfig {
    /// A viewer at the origin with this display's projection
    pub fn viewer(&self) -> Viewer {
        let mut viewer = Viewer::new(self.width, self.height);
        viewer.set_fov_degrees(self.fov_degrees);
        viewer
    }
}

/// Screenshot output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CaptureConfig {
    pub directory: PathBuf,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("Screenshots"),
        }
    }
}

/// Transient on-screen messages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NoticeConfig {
    /// Seconds a notice stays visible
    pub lifetime: f64,
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self { lifetime: 2.0 }
    }
}

/// Frame loop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FrameConfig {
    pub frames_per_second: f64,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            frames_per_second: 60.0,
        }
    }
}

impl FrameConfig {
    /// Seconds per frame
    pub fn frame_time(&self) -> f64 {
        1.0 / self.frames_per_second.max(1.0)
    }
}

/// Built-in catalog: the three primitive shapes at a fifth of their size
pub fn default_catalog() -> Vec<VariantDescriptor> {
    vec![
        VariantDescriptor::unit("Cube"),
        VariantDescriptor::unit("Sphere"),
        VariantDescriptor::unit("Cylinder").with_bounds([-0.5, -1.0, -0.5], [0.5, 1.0, 0.5]),
    ]
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default = "default_catalog")]
    pub catalog: Vec<VariantDescriptor>,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub notices: NoticeConfig,
    #[serde(default)]
    pub frame: FrameConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            catalog: default_catalog(),
            display: DisplayConfig::default(),
            capture: CaptureConfig::default(),
            notices: NoticeConfig::default(),
            frame: FrameConfig::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Loads and saves [`AppConfig`] at a fixed path
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
    config: AppConfig,
}

impl ConfigManager {
    /// Read the configuration at `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(Self {
                path,
                config: AppConfig::default(),
            });
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config: AppConfig = ron::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(Self { path, config })
    }

    /// Write the current configuration back to its path
    pub fn save(&self) -> Result<(), ConfigError> {
        let content = ron::ser::to_string_pretty(&self.config, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
            }
        }
        std::fs::write(&self.path, content).map_err(|e| ConfigError::Io(e.to_string()))?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut AppConfig {
        &mut self.config
    }
}
