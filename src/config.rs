use crate::error::{Error, Result};
use crate::grid::Grid;
use log::LevelFilter;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH: &str = "snake.json";

// the starting snake needs four cells in a row plus room to turn
const MIN_GRID_WIDTH: i32 = 6;
const MIN_GRID_HEIGHT: i32 = 3;
const MAX_GRID_WIDTH: i32 = 200;
const MAX_GRID_HEIGHT: i32 = 200;
const MAX_CELL_SIZE: i32 = 128;
const MAX_WINDOW_SCALE: i32 = 8;

/// Startup settings, read from `snake.json`. Every field is optional.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grid_width: i32,
    pub grid_height: i32,
    /// Logical pixels per cell.
    pub cell_size: i32,
    /// Initial window size is the logical board size times this.
    pub window_scale: i32,
    pub window_title: String,
    pub assets_dir: PathBuf,
    pub volume: f32,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            cell_size: 16,
            window_scale: 2,
            window_title: "Snake Game".to_owned(),
            assets_dir: PathBuf::from("assets"),
            volume: 1.0,
            log_file: PathBuf::from("snake.log"),
            log_level: "info".to_owned(),
        }
    }
}

impl Config {
    /// A missing file gives the defaults; an unreadable or malformed one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(Error::ConfigRead { path: path.to_owned(), source }),
        };
        Self::parse(&text).map_err(|source| Error::ConfigParse { path: path.to_owned(), source })
    }

    pub fn parse(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Self>(text).map(Self::sanitized)
    }

    fn sanitized(mut self) -> Self {
        self.grid_width = self.grid_width.clamp(MIN_GRID_WIDTH, MAX_GRID_WIDTH);
        self.grid_height = self.grid_height.clamp(MIN_GRID_HEIGHT, MAX_GRID_HEIGHT);
        self.cell_size = self.cell_size.clamp(1, MAX_CELL_SIZE);
        self.window_scale = self.window_scale.clamp(1, MAX_WINDOW_SCALE);
        self.volume = self.volume.clamp(0.0, 1.0);
        self
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height)
    }

    pub fn window_size(&self) -> (i32, i32) {
        let scale = self.cell_size.saturating_mul(self.window_scale);
        (self.grid_width.saturating_mul(scale), self.grid_height.saturating_mul(scale))
    }

    /// Unknown level names fall back to `Info`.
    pub fn log_level(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(Config::parse("{}").unwrap(), Config::default());
    }

    #[test]
    fn partial_override() {
        let config = Config::parse(r#"{ "grid_width": 30, "window_title": "Sssnake" }"#).unwrap();
        assert_eq!(config.grid(), Grid::new(30, 20));
        assert_eq!(config.window_title, "Sssnake");
        assert_eq!(config.cell_size, 16);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config =
            Config::parse(r#"{ "grid_width": 2, "grid_height": -4, "volume": 3.5, "cell_size": 0 }"#)
                .unwrap();
        assert_eq!(config.grid(), Grid::new(MIN_GRID_WIDTH, MIN_GRID_HEIGHT));
        assert_eq!(config.volume, 1.0);
        assert_eq!(config.cell_size, 1);

        let config = Config::parse(
            r#"{ "grid_width": 50000, "grid_height": 50000, "cell_size": 4096, "window_scale": 99 }"#,
        )
        .unwrap();
        assert_eq!(config.grid(), Grid::new(MAX_GRID_WIDTH, MAX_GRID_HEIGHT));
        assert_eq!(config.grid().cell_count(), 40_000);
        assert_eq!(config.cell_size, MAX_CELL_SIZE);
        assert_eq!(config.window_scale, MAX_WINDOW_SCALE);
        let (width, height) = config.window_size();
        assert_eq!((width, height), (204_800, 204_800));
    }

    #[test]
    fn hand_built_config_never_overflows_the_window() {
        let config = Config { grid_width: i32::MAX, cell_size: i32::MAX, ..Config::default() };
        assert_eq!(config.window_size().0, i32::MAX);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Config::parse("{ grid_width: 20").is_err());
        assert!(Config::parse(r#"{ "grid_width": "wide" }"#).is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = Config::load(Path::new("definitely/not/here.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn reference_window_size() {
        assert_eq!(Config::default().window_size(), (640, 640));
    }

    #[test]
    fn log_level_names() {
        let mut config = Config::default();
        assert_eq!(config.log_level(), LevelFilter::Info);
        config.log_level = "debug".to_owned();
        assert_eq!(config.log_level(), LevelFilter::Debug);
        config.log_level = "chatty".to_owned();
        assert_eq!(config.log_level(), LevelFilter::Info);
    }
}
