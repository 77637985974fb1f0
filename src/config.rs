//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`SOLAR_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Animation clock configuration
    #[serde(default)]
    pub animation: AnimationConfig,
    /// Body table configuration
    #[serde(default)]
    pub system: SystemConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`SOLAR_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // SOLAR_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("SOLAR_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Systeme Solaire".to_string(),
            width: 600,
            height: 360,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
///
/// The camera is fixed; these only set where it is and what it sees.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Distance from the star
    pub distance: f32,
    /// Tilt of the orbital plane towards the viewer, in degrees
    pub tilt: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 8.0,
            tilt: 15.0,
            fov: 60.0,
            near: 1.0,
            far: 30.0,
        }
    }
}

/// Animation clock configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Simulated hours per rendered frame
    pub time_step_hours: f32,
    /// Start with the clock running
    pub start_running: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            time_step_hours: solar_core::DEFAULT_TIME_STEP_HOURS,
            start_running: true,
        }
    }
}

/// Body table configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Path to a RON body table; empty uses the built-in table
    pub path: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            path: "scenes/solar_system.ron".to_string(),
        }
    }
}

/// Which pipeline draws the bodies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderVariant {
    /// Flat-colored wire spheres
    #[default]
    Wireframe,
    /// Lit spheres with bitmap textures
    Textured,
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Pipeline used to draw the bodies
    pub variant: RenderVariant,
    /// Background color [r, g, b, a]
    pub background_color: [f32; 4],
    /// Directory texture paths are relative to
    pub texture_dir: String,
    /// Light position in world space [x, y, z]
    pub light_position: [f32; 3],
    /// Ambient light strength
    pub ambient_strength: f32,
    /// Diffuse light strength
    pub diffuse_strength: f32,
    /// Specular light strength
    pub specular_strength: f32,
    /// Specular exponent
    pub shininess: f32,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            variant: RenderVariant::Wireframe,
            background_color: [0.0, 0.0, 0.0, 1.0],
            texture_dir: "textures".to_string(),
            light_position: [0.0, 0.0, 0.0],
            ambient_strength: 0.15,
            diffuse_strength: 1.0,
            specular_strength: 0.3,
            shininess: 16.0,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
