use crate::fs::{FileSystem, default_fs};
use crate::layout::LayoutSettings;
use crate::model::{LayoutDirection, SHOW_ALL_LEVEL, SizeMode};
use crate::session::FitViewOptions;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = ".jsonmap.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub view: ViewConfig,
    pub layout: LayoutSettings,
    pub fit_view: FitViewOptions,
    pub server: ServerConfig,
}

/// Initial view state for a freshly opened document.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    pub direction: LayoutDirection,
    pub size_mode: SizeMode,
    pub level: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    view: Option<RawView>,
    layout: Option<RawLayout>,
    fit_view: Option<RawFitView>,
    server: Option<RawServer>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawView {
    direction: Option<String>,
    size_mode: Option<String>,
    level: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLayout {
    safety_margin: Option<f64>,
    margin: Option<f64>,
    compact_separation: Option<f64>,
    medium_separation: Option<f64>,
    expanded_separation: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFitView {
    padding: Option<f64>,
    max_zoom: Option<f64>,
    duration_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawServer {
    port: Option<u16>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            direction: LayoutDirection::default(),
            size_mode: SizeMode::default(),
            level: SHOW_ALL_LEVEL,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

impl Config {
    /// Load `.jsonmap.toml` from `dir`, falling back to defaults when absent.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        Self::load_with_fs(dir, default_fs())
    }

    pub fn load_with_fs(dir: &Path, fs: &dyn FileSystem) -> Result<Self, ConfigError> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if !fs.exists(&config_path) {
            return Ok(Self::default());
        }

        let content = fs.read_to_string(&config_path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;
        let defaults = Self::default();

        let view = match raw.view {
            Some(v) => ViewConfig {
                direction: parse_field("view.direction", v.direction)?
                    .unwrap_or(defaults.view.direction),
                size_mode: parse_field("view.size_mode", v.size_mode)?
                    .unwrap_or(defaults.view.size_mode),
                level: v.level.unwrap_or(defaults.view.level),
            },
            None => defaults.view,
        };

        let layout = match raw.layout {
            Some(l) => {
                let d = &defaults.layout;
                LayoutSettings {
                    safety_margin: non_negative("layout.safety_margin", l.safety_margin)?
                        .unwrap_or(d.safety_margin),
                    margin: non_negative("layout.margin", l.margin)?.unwrap_or(d.margin),
                    compact_separation: positive("layout.compact_separation", l.compact_separation)?
                        .unwrap_or(d.compact_separation),
                    medium_separation: positive("layout.medium_separation", l.medium_separation)?
                        .unwrap_or(d.medium_separation),
                    expanded_separation: positive(
                        "layout.expanded_separation",
                        l.expanded_separation,
                    )?
                    .unwrap_or(d.expanded_separation),
                }
            }
            None => defaults.layout,
        };

        let fit_view = match raw.fit_view {
            Some(f) => {
                let padding = non_negative("fit_view.padding", f.padding)?;
                if padding.is_some_and(|p| p >= 1.0) {
                    return Err(invalid("fit_view.padding", "must be below 1.0"));
                }
                FitViewOptions {
                    padding: padding.unwrap_or(defaults.fit_view.padding),
                    max_zoom: positive("fit_view.max_zoom", f.max_zoom)?
                        .unwrap_or(defaults.fit_view.max_zoom),
                    duration_ms: f.duration_ms.unwrap_or(defaults.fit_view.duration_ms),
                }
            }
            None => defaults.fit_view,
        };

        let server = match raw.server {
            Some(s) => ServerConfig {
                port: s.port.unwrap_or(defaults.server.port),
            },
            None => defaults.server,
        };

        Ok(Self {
            view,
            layout,
            fit_view,
            server,
        })
    }
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        message: message.into(),
    }
}

fn parse_field<T>(key: &str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr<Err = String>,
{
    value
        .map(|v| v.parse::<T>().map_err(|e| invalid(key, e)))
        .transpose()
}

fn non_negative(key: &str, value: Option<f64>) -> Result<Option<f64>, ConfigError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(invalid(key, "must be a finite number >= 0")),
        other => Ok(other),
    }
}

fn positive(key: &str, value: Option<f64>) -> Result<Option<f64>, ConfigError> {
    match value {
        Some(v) if !v.is_finite() || v <= 0.0 => Err(invalid(key, "must be a finite number > 0")),
        other => Ok(other),
    }
}

/// Commented starter file written by `jsonmap init`.
pub fn generate_config_template() -> String {
    r#"# jsonmap configuration

[view]
# Flow of the diagram: "lr" (left to right) or "tb" (top to bottom)
direction = "lr"
# Node footprint: "compact", "medium" or "expanded"
size_mode = "medium"
# Deepest level shown when a document opens (root = 0, 999 shows everything)
level = 999

[layout]
# Padding added around every node before spacing
safety_margin = 15.0
# Offset of the drawing from the canvas origin
margin = 50.0
# Base gap between nodes for each size mode
compact_separation = 40.0
medium_separation = 60.0
expanded_separation = 80.0

[fit_view]
padding = 0.2
max_zoom = 1.5
duration_ms = 200

[server]
port = 3000
"#
    .to_string()
}
