//! Configuration file handling for nightsky.
//!
//! Settings live in `config.toml` under the platform config directory
//! (`~/.config/nightsky` on Linux). `NIGHTSKY_CONFIG` points at an explicit
//! file instead. Every field is optional; missing ones take their defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use nightsky_core::{ConfigValueError, StarfieldConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "NIGHTSKY_CONFIG";

const CONFIG_FILE_NAME: &str = "config.toml";

/// Largest accepted `cell_width`/`cell_height`, in pixels.
pub const MAX_CELL_SIZE: u32 = 1024;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access config file: {0}")]
    Io(#[from] io::Error),

    #[error("invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("could not determine a config directory for this platform")]
    NoConfigDir,

    #[error(transparent)]
    InvalidValue(#[from] ConfigValueError),

    #[error("display.{0} must be greater than zero")]
    ZeroDisplayValue(&'static str),

    #[error("display.{name} is {value}, at most {MAX_CELL_SIZE} is allowed")]
    CellTooLarge { name: &'static str, value: u32 },
}

/// Terminal rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Target frames per second.
    pub fps: u32,
    /// Pixels covered by one terminal cell horizontally.
    pub cell_width: u32,
    /// Pixels covered by one terminal cell vertically.
    pub cell_height: u32,
    /// Show the parallax nebula behind the stars.
    pub nebula: bool,
    /// Fixed RNG seed for a reproducible sky.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            cell_width: 8,
            cell_height: 16,
            nebula: true,
            seed: None,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `NIGHTSKY_LOG` is unset.
    pub level: String,
    /// Directory for the log file; defaults to the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub starfield: StarfieldConfig,
    pub display: DisplayConfig,
    pub log: LogConfig,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "nightsky")
}

/// Platform data directory, used for logs.
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().to_path_buf())
}

impl Config {
    /// Location of the config file, honoring `NIGHTSKY_CONFIG`.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Self::resolve_path(std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
    }

    fn resolve_path(explicit: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
        if let Some(path) = explicit {
            return Ok(path);
        }
        project_dirs()
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                let config = Self::from_toml(&contents)?;
                info!(path = %path.display(), "loaded config");
                Ok(config)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Load from `path`, writing the defaults there first if no file exists
    /// yet.
    pub fn load_or_init(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            info!(path = %path.display(), "wrote default config");
            return Ok(config);
        }
        Self::load_from(path)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.starfield.validate()?;
        if self.display.fps == 0 {
            return Err(ConfigError::ZeroDisplayValue("fps"));
        }
        for (name, value) in [
            ("cell_width", self.display.cell_width),
            ("cell_height", self.display.cell_height),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroDisplayValue(name));
            }
            if value > MAX_CELL_SIZE {
                return Err(ConfigError::CellTooLarge { name, value });
            }
        }
        Ok(())
    }

    /// Write the config as pretty TOML, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.starfield, StarfieldConfig::default());
        assert_eq!(config.display.fps, 30);
        assert_eq!((config.display.cell_width, config.display.cell_height), (8, 16));
        assert!(config.display.nebula);
        assert_eq!(config.display.seed, None);
        assert_eq!(config.log.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config = Config::from_toml(
            r#"
            [starfield]
            star_count = 80

            [display]
            seed = 1234
            "#,
        )
        .unwrap();
        assert_eq!(config.starfield.star_count, 80);
        assert_eq!(config.starfield.max_shooting_stars, 2);
        assert_eq!(config.display.seed, Some(1234));
        assert_eq!(config.display.fps, 30);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = Config::default();
        config.starfield.spawn_probability = 0.02;
        config.display.nebula = false;
        config.display.seed = Some(99);
        config.log.directory = Some(dir.path().join("logs"));
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[starfield\nstar_count = ").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            Config::from_toml("[starfield]\nspawn_probability = 2.0"),
            Err(ConfigError::InvalidValue(_))
        ));
        assert!(matches!(
            Config::from_toml("[display]\nfps = 0"),
            Err(ConfigError::ZeroDisplayValue("fps"))
        ));
        assert!(matches!(
            Config::from_toml("[display]\ncell_width = 0"),
            Err(ConfigError::ZeroDisplayValue("cell_width"))
        ));
    }

    #[test]
    fn test_load_or_init_writes_defaults_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nightsky").join("config.toml");

        let config = Config::load_or_init(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());

        fs::write(&path, "[starfield]\nstar_count = 12\n").unwrap();
        let reloaded = Config::load_or_init(&path).unwrap();
        assert_eq!(reloaded.starfield.star_count, 12);
    }

    #[test]
    fn test_oversized_cells_rejected() {
        assert!(matches!(
            Config::from_toml("[display]\ncell_width = 4294967295"),
            Err(ConfigError::CellTooLarge { name: "cell_width", value: u32::MAX })
        ));
        assert!(matches!(
            Config::from_toml("[display]\ncell_height = 1025"),
            Err(ConfigError::CellTooLarge { name: "cell_height", value: 1025 })
        ));
        assert!(Config::from_toml("[display]\ncell_height = 1024").is_ok());
    }

    #[test]
    fn test_explicit_path_wins() {
        let explicit = PathBuf::from("/tmp/custom-nightsky.toml");
        assert_eq!(
            Config::resolve_path(Some(explicit.clone())).unwrap(),
            explicit
        );
    }
}
