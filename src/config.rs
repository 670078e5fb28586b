// shaderdude
// copyright zipxing@hotmail.com 2022～2025

//! Command line and TOML configuration.
//!
//! The command line names the shader and the input images; everything else
//! comes from an optional TOML file and falls back to defaults.

use crate::error::ViewerError;
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::LevelFilter;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 720,
            height: 480,
            title: "shaderdude".to_string(),
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    /// also write the log to this file
    pub file: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// reload and resize checks run every this many frames
    pub poll_frames: u64,
    /// uniforms starting with this get a GUI control
    pub control_prefix: String,
    pub show_panel: bool,
    pub window: WindowConfig,
    pub log: LogConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            poll_frames: 5,
            control_prefix: "ctl_".to_string(),
            show_panel: true,
            window: WindowConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl ViewerConfig {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, ViewerError> {
        let text = fs::read_to_string(path).map_err(|source| ViewerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text).map_err(|source| ViewerError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ViewerError> {
        if self.poll_frames == 0 {
            return Err(ViewerError::ConfigValue(
                "poll_frames must be at least 1".to_string(),
            ));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ViewerError::ConfigValue(
                "window size must be non-zero".to_string(),
            ));
        }
        self.log_level()?;
        Ok(())
    }

    pub fn log_level(&self) -> Result<LevelFilter, ViewerError> {
        LevelFilter::from_str(&self.log.level)
            .map_err(|_| ViewerError::ConfigValue(format!("unknown log level '{}'", self.log.level)))
    }
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub shader: PathBuf,
    pub textures: Vec<PathBuf>,
    pub config: Option<PathBuf>,
    pub log_level: Option<String>,
}

pub fn command() -> Command {
    Command::new("shaderdude")
        .about("Live-reloading fragment shader viewer")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("shader")
                .help("Fragment shader file defining mainImage()")
                .required(true),
        )
        .arg(
            Arg::new("textures")
                .help("Images bound as iChannel0, iChannel1, ...")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("log_level")
                .short('l')
                .long("log-level")
                .help("off, error, warn, info, debug or trace"),
        )
}

impl Args {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            shader: m
                .get_one::<String>("shader")
                .map(PathBuf::from)
                .unwrap_or_default(),
            textures: m
                .get_many::<String>("textures")
                .map(|v| v.map(PathBuf::from).collect())
                .unwrap_or_default(),
            config: m.get_one::<String>("config").map(PathBuf::from),
            log_level: m.get_one::<String>("log_level").cloned(),
        }
    }

    /// Parse the process arguments; exits with a usage error on failure
    pub fn parse() -> Self {
        Self::from_matches(&command().get_matches())
    }

    /// Config file (or defaults) with command line overrides applied
    pub fn load_config(&self) -> Result<ViewerConfig, ViewerError> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::load(path)?,
            None => ViewerConfig::default(),
        };
        if let Some(level) = &self.log_level {
            config.log.level = level.clone();
            config.validate()?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = ViewerConfig::default();
        assert_eq!(c.poll_frames, 5);
        assert_eq!(c.control_prefix, "ctl_");
        assert_eq!((c.window.width, c.window.height), (720, 480));
        assert_eq!(c.log_level().unwrap(), LevelFilter::Info);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let c = ViewerConfig::from_toml(
            r#"
            poll_frames = 3
            [window]
            width = 1280
            [log]
            level = "debug"
            file = "log/shaderdude.log"
            "#,
        )
        .unwrap();
        assert_eq!(c.poll_frames, 3);
        assert_eq!(c.window.width, 1280);
        assert_eq!(c.window.height, 480);
        assert_eq!(c.control_prefix, "ctl_");
        assert_eq!(c.log.file.as_deref(), Some("log/shaderdude.log"));
        assert_eq!(c.log_level().unwrap(), LevelFilter::Debug);
    }

    #[test]
    fn test_demo_config_matches_defaults() {
        let c = ViewerConfig::from_toml(include_str!("../demos/shaderdude.toml")).unwrap();
        assert_eq!(c, ViewerConfig::default());
    }

    #[test]
    fn test_invalid_values() {
        let c = ViewerConfig::from_toml("poll_frames = 0").unwrap();
        assert!(matches!(c.validate(), Err(ViewerError::ConfigValue(_))));
        let c = ViewerConfig::from_toml("[log]\nlevel = \"loud\"").unwrap();
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_args() {
        let m = command()
            .try_get_matches_from(["shaderdude", "wave.glsl", "a.png", "b.jpg", "-l", "warn"])
            .unwrap();
        let args = Args::from_matches(&m);
        assert_eq!(args.shader, PathBuf::from("wave.glsl"));
        assert_eq!(
            args.textures,
            vec![PathBuf::from("a.png"), PathBuf::from("b.jpg")]
        );
        assert_eq!(args.config, None);
        let config = args.load_config().unwrap();
        assert_eq!(config.log_level().unwrap(), LevelFilter::Warn);
    }

    #[test]
    fn test_shader_is_required() {
        assert!(command().try_get_matches_from(["shaderdude"]).is_err());
    }
}
