use derive_more::{AsRef, Deref, Display, From, Into};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::path::{Path, PathBuf};
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TrackType {
    /// Continuous track, one tick per degree.
    Plain,
    #[default]
    Notch,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MarkerType {
    #[default]
    Led,
    Neon,
    Dot,
    Line,
    /// No built-in marker styling; `marker_style` is used as-is.
    Custom,
}

/// Any color CSS accepts (`#509eec`, `black`, `rgb(80, 158, 236)`).
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct CssColor(String);

crate::css_string_newtype!(CssColor);

/// A CSS length such as `8px`.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct CssLength(String);

crate::css_string_newtype!(CssLength);

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct KnobConfig {
    pub size: f64,
    pub num_ticks: u32,
    pub degrees: f64,
    pub min: f64,
    pub max: f64,
    pub default_value: f64,
    pub first_active: bool,
    pub track_type: TrackType,
    pub track_color: CssColor,
    pub track_background: CssColor,
    pub marker_type: MarkerType,
    pub marker_style: Option<String>,
    pub outcircle: bool,
    pub outcircle_size: CssLength,
    pub class_name: Option<String>,
}

impl Default for KnobConfig {
    fn default() -> Self {
        Self {
            size: 100.0,
            num_ticks: 25,
            degrees: 260.0,
            min: 1.0,
            max: 100.0,
            default_value: 0.0,
            first_active: false,
            track_type: TrackType::Notch,
            track_color: CssColor::from("#509eec"),
            track_background: CssColor::from("black"),
            marker_type: MarkerType::Led,
            marker_style: None,
            outcircle: true,
            outcircle_size: CssLength::from("8px"),
            class_name: None,
        }
    }
}

impl KnobConfig {
    #[must_use]
    pub fn size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn num_ticks(mut self, num_ticks: u32) -> Self {
        self.num_ticks = num_ticks;
        self
    }

    #[must_use]
    pub fn degrees(mut self, degrees: f64) -> Self {
        self.degrees = degrees;
        self
    }

    #[must_use]
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    #[must_use]
    pub fn default_value(mut self, default_value: f64) -> Self {
        self.default_value = default_value;
        self
    }

    #[must_use]
    pub fn first_active(mut self, first_active: bool) -> Self {
        self.first_active = first_active;
        self
    }

    #[must_use]
    pub fn track_type(mut self, track_type: TrackType) -> Self {
        self.track_type = track_type;
        self
    }

    #[must_use]
    pub fn track_colors(mut self, active: impl Into<String>, background: impl Into<String>) -> Self {
        self.track_color = CssColor::new(active);
        self.track_background = CssColor::new(background);
        self
    }

    #[must_use]
    pub fn marker(mut self, marker_type: MarkerType, style: Option<String>) -> Self {
        self.marker_type = marker_type;
        self.marker_style = style;
        self
    }

    #[must_use]
    pub fn outcircle(mut self, outcircle: bool, size: impl Into<String>) -> Self {
        self.outcircle = outcircle;
        self.outcircle_size = CssLength::new(size);
        self
    }

    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn validate(&self) -> Result<(), InvalidConfig> {
        for (field, value) in [
            ("size", self.size),
            ("degrees", self.degrees),
            ("min", self.min),
            ("max", self.max),
            ("default_value", self.default_value),
        ] {
            if !value.is_finite() {
                return Err(InvalidConfig::NotFinite { field, value });
            }
        }

        if self.size <= 0.0 {
            return Err(InvalidConfig::InvalidSize(self.size));
        }
        if !(0.0..=360.0).contains(&self.degrees) {
            return Err(InvalidConfig::InvalidDegrees(self.degrees));
        }
        if self.max <= self.min {
            return Err(InvalidConfig::EmptyRange {
                min: self.min,
                max: self.max,
            });
        }

        Ok(())
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// True when `other` only differs in `default_value`, so a running knob
    /// can follow it without being rebuilt.
    pub fn same_except_default(&self, other: &Self) -> bool {
        let other = Self {
            default_value: self.default_value,
            ..other.clone()
        };
        *self == other
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] InvalidConfig),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidConfig {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("size must be positive, got {0}")]
    InvalidSize(f64),
    #[error("degrees must be within [0, 360], got {0}")]
    InvalidDegrees(f64),
    #[error("max ({max}) must be greater than min ({min})")]
    EmptyRange { min: f64, max: f64 },
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "knob", "knob").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<KnobConfig, ConfigError> {
    load_config_from(&get_config_path()?)
}

pub fn load_config_from(path: &Path) -> Result<KnobConfig, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("KNOB"))
        .build()?;

    let config: KnobConfig = s.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

pub fn load_or_default() -> KnobConfig {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default knob configuration: {}", e);
            KnobConfig::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

fn watch_dir(
    dir: &Path,
    bridge_tx: Sender<notify::Result<notify::Event>>,
) -> Result<RecommendedWatcher, ConfigError> {
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

/// Sends `ConfigReload` whenever the config file is created, modified or removed.
pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(Path::to_path_buf) else {
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    // dropping the watcher stops the notifications
    let _watcher = match watch_dir(&config_dir, bridge_tx) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to watch config directory: {}", e);
            return;
        }
    };

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
