mod backend;
mod io;
mod model;
mod paths;

pub use backend::{ConfigBackend, TomlConfigBackend};
pub use io::atomic_write_str;
pub use model::UiConfig;
pub use paths::{AlbumTrackerPaths, BASE_DIR_ENV, ConfigError};
