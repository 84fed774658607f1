use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{Coordinate, PermissionState, FALLBACK_COORDINATE};

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub output: OutputFormat,
    pub reports_file: Option<PathBuf>,
    #[serde(default = "default_fallback")]
    pub fallback: Coordinate,
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Scene,
    Staticmap,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DeviceConfig {
    #[serde(default = "default_permission")]
    pub permission: PermissionState,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub delay_ms: Option<u64>,
    /// Position requests time out instead of returning the fix.
    #[serde(default)]
    pub timeout: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            permission: default_permission(),
            latitude: None,
            longitude: None,
            delay_ms: None,
            timeout: false,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct RenderConfig {
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_pin_radius")]
    pub pin_radius_m: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            style: default_style(),
            width: default_width(),
            height: default_height(),
            pin_radius_m: default_pin_radius(),
        }
    }
}

fn default_title() -> String {
    "HimPath".to_string()
}

fn default_fallback() -> Coordinate {
    FALLBACK_COORDINATE
}

fn default_permission() -> PermissionState {
    PermissionState::Undetermined
}

fn default_style() -> String {
    "osm".to_string()
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    1200
}

fn default_pin_radius() -> f64 {
    1500.0
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new("."), std::env::var_os("HIMPATH_CONFIG").map(PathBuf::from))
    }

    /// `override_path` wins; otherwise `himpath.toml`, then `himpath.example.toml`, in `dir`.
    fn load_from(dir: &Path, override_path: Option<PathBuf>) -> anyhow::Result<Self> {
        if let Some(path) = override_path {
            return Self::from_path(path);
        }

        let local = dir.join("himpath.toml");
        let example = dir.join("himpath.example.toml");
        let path = if local.exists() {
            local
        } else if example.exists() {
            example
        } else {
            return Err(anyhow::anyhow!("Configuration file not found. Please create himpath.toml or provide himpath.example.toml."));
        };

        Self::from_path(path)
    }

    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e))?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(toml: &str) -> anyhow::Result<Config> {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(toml.as_bytes()).unwrap();
        Config::from_path(file.path())
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.title, "HimPath");
        assert_eq!(config.output, OutputFormat::Scene);
        assert_eq!(config.fallback, FALLBACK_COORDINATE);
        assert_eq!(config.device.permission, PermissionState::Undetermined);
        assert!(config.reports_file.is_none());
        assert_eq!(config.render.width, 800);
    }

    #[test]
    fn sections_override_defaults() {
        let config = parse(
            r#"
            output = "staticmap"
            reports_file = "reports.json"

            [fallback]
            latitude = 32.2396
            longitude = 77.1887

            [device]
            permission = "denied"
            delay_ms = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.output, OutputFormat::Staticmap);
        assert_eq!(config.reports_file, Some(PathBuf::from("reports.json")));
        assert_eq!(config.fallback, Coordinate::new(32.2396, 77.1887).unwrap());
        assert_eq!(config.device.permission, PermissionState::Denied);
        assert_eq!(config.device.delay_ms, Some(10));
    }

    #[test]
    fn out_of_range_fallback_is_rejected() {
        let err = parse("[fallback]\nlatitude = 91.0\nlongitude = 0.0\n");
        assert!(err.is_err());
    }

    #[test]
    fn override_path_wins_over_local_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("himpath.toml"), "title = \"local\"").unwrap();
        let elsewhere = dir.path().join("custom.toml");
        fs::write(&elsewhere, "title = \"custom\"").unwrap();

        let config = Config::load_from(dir.path(), Some(elsewhere)).unwrap();
        assert_eq!(config.title, "custom");
    }

    #[test]
    fn local_file_preferred_then_example() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("himpath.example.toml"), "title = \"example\"").unwrap();
        assert_eq!(Config::load_from(dir.path(), None).unwrap().title, "example");

        fs::write(dir.path().join("himpath.toml"), "title = \"local\"").unwrap();
        assert_eq!(Config::load_from(dir.path(), None).unwrap().title, "local");
    }

    #[test]
    fn missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(dir.path(), None).unwrap_err();
        assert!(err.to_string().starts_with("Configuration file not found"));
    }

    #[test]
    fn example_config_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("himpath.example.toml");
        let config = Config::from_path(path).unwrap();
        assert_eq!(config.device.permission, PermissionState::Granted);
    }
}
