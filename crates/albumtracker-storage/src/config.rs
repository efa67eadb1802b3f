use albumtracker_config::{AlbumTrackerPaths, ConfigBackend, ConfigError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const SECTION: &str = "storage";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StorageConfig {
  pub db_path: PathBuf,
  pub journal_mode: Option<String>,
}

/// Shape of the `[storage]` section on disk; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StorageSection {
  db_path: Option<PathBuf>,
  journal_mode: Option<String>,
}

impl StorageConfig {
  pub fn default_for(paths: &AlbumTrackerPaths) -> Self {
    StorageConfig {
      db_path: paths.data_dir.join("albumtracker.db"),
      journal_mode: Some("WAL".to_string()),
    }
  }

  /// Loads `[storage]`, filling gaps with defaults, and writes the result back
  /// so the file always documents the effective settings.
  pub fn load<B: ConfigBackend>(backend: &B, paths: &AlbumTrackerPaths) -> Result<Self, ConfigError> {
    let section: StorageSection = backend.load_section_or_default(SECTION)?;
    let defaults = Self::default_for(paths);

    let cfg = StorageConfig {
      db_path: section.db_path.unwrap_or(defaults.db_path),
      journal_mode: section.journal_mode.or(defaults.journal_mode),
    };
    cfg.save(backend)?;
    Ok(cfg)
  }

  pub fn save<B: ConfigBackend>(&self, backend: &B) -> Result<(), ConfigError> {
    backend.save_section(SECTION, self)
  }
}
