use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that relocates every directory under a single base (portable mode).
pub const BASE_DIR_ENV: &str = "ALBUMTRACKER_BASE_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("toml error: {0}")]
  Toml(#[from] toml::de::Error),
  #[error("directories error: could not determine home directory")]
  Directories,
  #[error("other: {0}")]
  Other(String),
}

#[derive(Debug, Clone)]
pub struct AlbumTrackerPaths {
  pub base_dir: PathBuf,
  pub config_dir: PathBuf,
  pub data_dir: PathBuf,
  pub cache_dir: PathBuf,
}

impl AlbumTrackerPaths {
  /// Resolves the platform directories, or the `ALBUMTRACKER_BASE_DIR` layout
  /// when that variable is set, and creates them.
  pub fn detect() -> Result<Self, ConfigError> {
    if let Ok(env_base) = std::env::var(BASE_DIR_ENV) {
      return Self::from_base(env_base);
    }

    let proj_dirs =
      ProjectDirs::from("com", "albumtracker", "albumtracker").ok_or(ConfigError::Directories)?;
    let paths = Self {
      base_dir: proj_dirs.config_dir().to_path_buf(),
      config_dir: proj_dirs.config_dir().to_path_buf(),
      data_dir: proj_dirs.data_dir().to_path_buf(),
      cache_dir: proj_dirs.cache_dir().to_path_buf(),
    };
    paths.create_dirs()?;
    Ok(paths)
  }

  /// Portable layout: `config/`, `data/` and `cache/` below `base`.
  pub fn from_base(base: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let base = base.as_ref();
    let paths = Self {
      base_dir: base.to_path_buf(),
      config_dir: base.join("config"),
      data_dir: base.join("data"),
      cache_dir: base.join("cache"),
    };
    paths.create_dirs()?;
    Ok(paths)
  }

  fn create_dirs(&self) -> Result<(), ConfigError> {
    std::fs::create_dir_all(&self.config_dir)?;
    std::fs::create_dir_all(&self.data_dir)?;
    std::fs::create_dir_all(&self.cache_dir)?;
    Ok(())
  }

  pub fn config_file(&self) -> PathBuf {
    self.config_dir.join("albumtracker.toml")
  }
}
