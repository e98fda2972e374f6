//! # Unified Configuration
//!
//! Configuration for the loader, logging and the consumer application. Every
//! section has defaults, so a config file only needs the keys it changes.
//!
//! ```toml
//! [engine]
//! log_level = "debug"
//!
//! [assets]
//! assets_dir = "objs"
//! color_policy = "name_override"
//! default_model = "earth_1111.obj"
//!
//! [viewer]
//! clear_color = "ccffffff"
//! ```

use serde::{Serialize, Deserialize};

use crate::config::{Config, ConfigError};
use crate::foundation::color::parse_hex_rgba;

/// How a material definition becomes a vertex color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorPolicy {
    /// Ignore `Kd` values and color by material name (`grass`, `earth`, gray)
    #[default]
    NameOverride,
    /// Use the material's `Kd` value, gray when it has none
    Diffuse,
}

/// # Engine Configuration
///
/// Process-wide behaviour, currently just logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level filter (`error`, `warn`, `info`, `debug`, `trace`, `off`)
    pub log_level: String,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.log_level
            .parse::<log::LevelFilter>()
            .map(|_| ())
            .map_err(|_| ConfigError::Invalid(format!("unknown log level '{}'", self.log_level)))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Asset Configuration
///
/// Where meshes and material libraries live and how materials are colored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Base directory both OBJ and MTL names are resolved against
    pub assets_dir: String,
    /// Material color rule
    pub color_policy: ColorPolicy,
    /// Model loaded when none is requested explicitly
    pub default_model: String,
}

impl AssetConfig {
    /// Create a new asset configuration
    pub fn new() -> Self {
        Self {
            assets_dir: "objs".to_string(),
            color_policy: ColorPolicy::default(),
            default_model: "earth_1111.obj".to_string(),
        }
    }

    /// Set assets directory
    pub fn with_assets_dir(mut self, dir: impl Into<String>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    /// Set the material color policy
    pub fn with_color_policy(mut self, policy: ColorPolicy) -> Self {
        self.color_policy = policy;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.assets_dir.is_empty() {
            return Err(ConfigError::Invalid("assets_dir cannot be empty".to_string()));
        }
        if self.default_model.is_empty() {
            return Err(ConfigError::Invalid("default_model cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Viewer Configuration
///
/// Settings handed to whatever draws the mesh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Background color as `RRGGBBAA` hex
    pub clear_color: String,
}

impl ViewerConfig {
    /// Clear color as normalized RGBA
    pub fn clear_color_rgba(&self) -> Result<[f32; 4], ConfigError> {
        parse_hex_rgba(&self.clear_color)
            .map_err(|e| ConfigError::Invalid(format!("clear_color: {e}")))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.clear_color_rgba().map(|_| ())
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            clear_color: "ccffffff".to_string(),
        }
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration applications load from disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Asset system configuration
    pub assets: AssetConfig,
    /// Viewer configuration
    pub viewer: ViewerConfig,
}

impl ApplicationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.assets.validate()?;
        self.viewer.validate()?;
        Ok(())
    }
}

impl Config for ApplicationConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApplicationConfig::default();
        assert_eq!(config.engine.log_level, "info");
        assert_eq!(config.assets.assets_dir, "objs");
        assert_eq!(config.assets.color_policy, ColorPolicy::NameOverride);
        assert_eq!(config.assets.default_model, "earth_1111.obj");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ApplicationConfig = toml::from_str(
            r#"
[assets]
color_policy = "diffuse"
"#,
        )
        .unwrap();

        assert_eq!(config.assets.color_policy, ColorPolicy::Diffuse);
        assert_eq!(config.assets.assets_dir, "objs");
        assert_eq!(config.viewer.clear_color, "ccffffff");
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("obj_mesh_{}_{name}", std::process::id()))
    }

    #[test]
    fn test_toml_file_round_trip() {
        let config = ApplicationConfig {
            engine: EngineConfig::new().with_log_level("debug"),
            assets: AssetConfig::new()
                .with_assets_dir("assets/meshes")
                .with_color_policy(ColorPolicy::Diffuse),
            viewer: ViewerConfig::default(),
        };
        let path = temp_path("round_trip.toml");

        config.save_to_file(&path).unwrap();
        let loaded = ApplicationConfig::load_from_file(&path);
        std::fs::remove_file(&path).unwrap();

        let loaded = loaded.unwrap();
        assert_eq!(loaded.engine.log_level, "debug");
        assert_eq!(loaded.assets.assets_dir, "assets/meshes");
        assert_eq!(loaded.assets.color_policy, ColorPolicy::Diffuse);
        assert_eq!(loaded.viewer.clear_color, "ccffffff");
    }

    #[test]
    fn test_ron_file_round_trip() {
        let mut config = ApplicationConfig::default();
        config.viewer.clear_color = "102030ff".to_string();
        let path = temp_path("round_trip.ron");

        config.save_to_file(&path).unwrap();
        let loaded = ApplicationConfig::load_from_file(&path);
        std::fs::remove_file(&path).unwrap();

        let loaded = loaded.unwrap();
        assert_eq!(loaded.assets.color_policy, ColorPolicy::NameOverride);
        assert_eq!(loaded.assets.default_model, "earth_1111.obj");
        assert_eq!(loaded.viewer.clear_color, "102030ff");
    }

    #[test]
    fn test_load_missing_file() {
        let result = ApplicationConfig::load_from_file(temp_path("does_not_exist.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_unsupported_extension() {
        let result = ApplicationConfig::load_from_file(temp_path("config.json"));
        assert!(result.is_err());
        assert!(matches!(
            ApplicationConfig::default().save_to_file(temp_path("config.json")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_load_bundled_inspector_config() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../mesh_inspect.toml");
        let config = ApplicationConfig::load_from_file(path).unwrap();

        assert_eq!(config.engine.log_level, "info");
        assert_eq!(config.assets.assets_dir, "objs");
        assert_eq!(config.assets.color_policy, ColorPolicy::NameOverride);
        assert_eq!(config.assets.default_model, "earth_1111.obj");
        assert_eq!(config.viewer.clear_color, "ccffffff");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_errors() {
        let mut config = ApplicationConfig::default();
        config.engine.log_level = "loud".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ApplicationConfig::default();
        config.viewer.clear_color = "fff".to_string();
        assert!(config.validate().is_err());

        let config = AssetConfig::new().with_assets_dir("");
        assert!(config.validate().is_err());
    }
}
