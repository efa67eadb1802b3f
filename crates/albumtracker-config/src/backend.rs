use crate::io::atomic_write_str;
use crate::paths::{AlbumTrackerPaths, ConfigError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

/// Writes go through toml_edit so comments and layout of the file survive.
use toml_edit::{DocumentMut, Item};

/// Section-oriented access to the configuration file.
pub trait ConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError>;

  /// Like [`ConfigBackend::load_section`], but a missing file or section yields `T::default()`.
  fn load_section_or_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default;

  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError>;
}

pub struct TomlConfigBackend {
  path: PathBuf,
}

impl TomlConfigBackend {
  pub fn new(paths: &AlbumTrackerPaths) -> Self {
    Self { path: paths.config_file() }
  }

  /// Backend bound to an explicit file instead of the detected config dir.
  pub fn with_file(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &PathBuf {
    &self.path
  }

  fn read_table(&self) -> Result<Option<toml::Table>, ConfigError> {
    let content = match fs::read_to_string(&self.path) {
      Ok(c) => c,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
      Err(e) => return Err(e.into()),
    };
    Ok(Some(toml::from_str(&content)?))
  }
}

fn decode_section<T: DeserializeOwned>(section: &str, value: &toml::Value) -> Result<T, ConfigError> {
  value
    .clone()
    .try_into()
    .map_err(|e| ConfigError::Other(format!("decode section [{section}]: {e}")))
}

impl ConfigBackend for TomlConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError> {
    let table = self.read_table()?.ok_or_else(|| {
      ConfigError::Other(format!("config file {:?} does not exist", self.path))
    })?;

    let value = table
      .get(section)
      .ok_or_else(|| ConfigError::Other(format!("missing section [{section}] in {:?}", self.path)))?;

    decode_section(section, value)
  }

  fn load_section_or_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default,
  {
    let Some(table) = self.read_table()? else {
      debug!(path = ?self.path, section, "no config file, using defaults");
      return Ok(T::default());
    };

    let Some(value) = table.get(section) else {
      return Ok(T::default());
    };

    decode_section(section, value)
  }

  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError> {
    // Current document, or an empty one on first write.
    let mut doc: DocumentMut = match fs::read_to_string(&self.path) {
      Ok(content) => content
        .parse::<DocumentMut>()
        .map_err(|e| ConfigError::Other(format!("parse toml_edit doc: {e}")))?,
      Err(e) if e.kind() == ErrorKind::NotFound => DocumentMut::new(),
      Err(e) => return Err(e.into()),
    };

    // The section serializes as a headerless table ("a = 1\nb = 2\n").
    let section_str = toml::to_string(value)
      .map_err(|e| ConfigError::Other(format!("encode section [{section}]: {e}")))?;

    let section_item: Item = section_str
      .parse::<DocumentMut>()
      .map_err(|e| ConfigError::Other(format!("parse section as doc: {e}")))?
      .into_item();

    doc[section] = section_item;

    atomic_write_str(&self.path, &doc.to_string())?;
    debug!(path = ?self.path, section, "config section saved");

    Ok(())
  }
}
