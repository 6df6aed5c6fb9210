use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const MIN_GRID_COLS: u32 = 2;
pub const MAX_GRID_COLS: u32 = 8;

/// Per-user window settings. Grid contents are never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub last_pos: Option<(f32, f32)>,
    #[serde(default)]
    pub last_size: Option<(f32, f32)>,
    #[serde(default = "default_grid_cols")]
    pub grid_cols: u32,
    #[serde(default = "default_icon_size")]
    pub icon_size: u32,
    /// Directory holding `installedApps.json` and `otherApps.json` to use
    /// instead of the bundled copies.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_icon_size() -> u32 {
    56
}

fn default_grid_cols() -> u32 {
    4
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            last_pos: None,
            last_size: None,
            grid_cols: default_grid_cols(),
            icon_size: default_icon_size(),
            data_dir: None,
        }
    }
}

impl AppConfig {
    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "apps_grid", "apps_grid")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn load() -> Self {
        match Self::config_dir() {
            Some(dir) => Self::load_from(&dir),
            None => Self::default(),
        }
    }

    pub fn save(&self) {
        if let Some(dir) = Self::config_dir() {
            self.save_to(&dir);
        }
    }

    fn load_from(config_dir: &Path) -> Self {
        let config_path = config_dir.join("config.json");
        if config_path.exists() {
            if let Ok(file) = std::fs::File::open(&config_path) {
                match serde_json::from_reader::<_, Self>(file) {
                    Ok(config) => return config.sanitized(),
                    Err(err) => warn!("Failed to parse config, using default: {err}"),
                }
            }
        }
        Self::default()
    }

    fn save_to(&self, config_dir: &Path) {
        if let Err(err) = std::fs::create_dir_all(config_dir) {
            warn!("Failed to create config dir {}: {err}", config_dir.display());
            return;
        }
        let config_path = config_dir.join("config.json");
        match std::fs::File::create(&config_path) {
            Ok(file) => {
                if let Err(err) = serde_json::to_writer_pretty(file, self) {
                    warn!("Failed to write config: {err}");
                }
            }
            Err(err) => warn!("Failed to create {}: {err}", config_path.display()),
        }
    }

    fn sanitized(mut self) -> Self {
        self.grid_cols = self.grid_cols.clamp(MIN_GRID_COLS, MAX_GRID_COLS);
        self.icon_size = self.icon_size.clamp(24, 128);
        self
    }
}
