use crate::backend::ConfigBackend;
use crate::paths::ConfigError;
use serde::{Deserialize, Serialize};

/// Presentation preferences, stored in the `[ui]` section.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
  pub dark_mode: bool,
}

impl UiConfig {
  const SECTION: &'static str = "ui";

  pub fn load_from<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    backend.load_section_or_default(Self::SECTION)
  }

  pub fn save_to<B: ConfigBackend>(&self, backend: &B) -> Result<(), ConfigError> {
    backend.save_section(Self::SECTION, self)
  }
}
