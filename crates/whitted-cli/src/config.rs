//! TOML configuration.
//!
//! Every key is optional; missing keys fall back to the built-in defaults.
//!
//! ```toml
//! antialias = true
//! texture = "textures/earth.bmp"
//!
//! [plane]
//! resolution = 500
//!
//! [trace]
//! max_depth = 5
//! background = [0.0, 0.0, 0.0]
//!
//! [[trace.lights]]
//! position = [-10.0, 40.0, -3.0]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use whitted_raytrace::RenderSettings;

/// Default location of the earth texture.
pub const DEFAULT_TEXTURE: &str = "textures/earth.bmp";

/// Contents of a configuration file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Image for the textured sphere.
    pub texture: PathBuf,
    /// Camera and shading parameters.
    #[serde(flatten)]
    pub render: RenderSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            texture: PathBuf::from(DEFAULT_TEXTURE),
            render: RenderSettings::default(),
        }
    }
}

impl Config {
    /// Parse configuration text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.render.validate()?;
        Ok(config)
    }

    /// Read a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid config {}", path.display()))
    }
}
