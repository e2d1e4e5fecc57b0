//! Demo settings, read from an optional JSON file.

use std::path::{Path, PathBuf};

use glam::Vec4;
use log::LevelFilter;
use serde::Deserialize;

use crate::error::{Error, Result};

const LOCAL_CONFIG: &str = "res/config.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub shader: PathBuf,
    pub log_level: String,
    pub clear_color: [f32; 4],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Hello World".to_string(),
            width: 640,
            height: 480,
            vsync: true,
            shader: PathBuf::from("res/shaders/Basic.shader"),
            log_level: "info".to_string(),
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl Config {
    pub fn parse(s: &str, path: &Path) -> Result<Self> {
        let config: Config = serde_json::from_str(s).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.level_filter().map_err(|reason| Error::Config {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Loads `explicit` if given, otherwise the first config file found in
    /// `res/` or the user's config directory, otherwise the defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let user = dirs::config_dir().map(|dir| dir.join("glquad").join("config.json"));
        let found = std::iter::once(PathBuf::from(LOCAL_CONFIG))
            .chain(user)
            .find(|path| path.is_file());
        match found {
            Some(path) => Ok((Self::load(&path)?, Some(path))),
            None => Ok((Self::default(), None)),
        }
    }

    pub fn level_filter(&self) -> std::result::Result<LevelFilter, String> {
        self.log_level
            .parse()
            .map_err(|_| format!("unknown log level `{}`", self.log_level))
    }

    pub fn clear_color(&self) -> Vec4 {
        Vec4::from_array(self.clear_color)
    }
}
