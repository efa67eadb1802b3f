mod commands;
mod dto;
mod format;

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, level_filters::LevelFilter};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use albumtracker_config::{AlbumTrackerPaths, TomlConfigBackend};
use albumtracker_core::domain::{AlbumId, ConditionIndex};
use albumtracker_core::services::AlbumService;
use albumtracker_storage::SqliteAlbumStore;
use albumtracker_storage::config::StorageConfig;

pub use commands::execute;

#[derive(Parser, Debug)]
#[command(name = "albumtracker", version, about = "Keep track of the albums you own")]
pub struct CliArgs {
  /// Use this SQLite file instead of the one from the config file.
  #[arg(long, global = true)]
  pub db: Option<PathBuf>,

  /// Print machine readable JSON instead of text.
  #[arg(long, global = true)]
  pub json: bool,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
  /// List albums sorted by artist.
  List {
    /// Only show artists containing this text (case-insensitive).
    #[arg(short, long, default_value = "")]
    search: String,
  },

  /// Add a new album.
  Add {
    artist: String,
    title: String,
    /// Catalog index or name, e.g. `0`, `purchased`, `burnt`.
    #[arg(short, long, default_value = "purchased")]
    condition: ConditionIndex,
  },

  /// Change fields of an existing album. Omitted fields are kept.
  Edit {
    id: AlbumId,
    #[arg(long)]
    artist: Option<String>,
    #[arg(long)]
    title: Option<String>,
    #[arg(short, long)]
    condition: Option<ConditionIndex>,
  },

  /// Delete one album by id.
  Delete { id: AlbumId },

  /// Delete albums by their position in a (filtered) listing.
  DeleteAt {
    /// The search term the positions refer to, as passed to `list`.
    #[arg(short, long, default_value = "")]
    search: String,
    #[arg(required = true)]
    positions: Vec<usize>,
  },

  /// Show album counts.
  Stats,

  /// Show or change the colour scheme preference.
  Theme {
    #[arg(value_enum)]
    action: Option<ThemeAction>,
  },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
  Toggle,
  Dark,
  Light,
}

/// Installs the stderr log subscriber. Verbosity comes from `LOG_LEVEL`.
pub fn init_logging() {
  let _ = tracing_subscriber::registry()
    .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
    .with(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var("LOG_LEVEL")
        .from_env_lossy(),
    )
    .try_init();
}

/// Composition root: resolves config, opens the store and runs one command.
pub fn run(args: CliArgs) -> anyhow::Result<()> {
  let paths = AlbumTrackerPaths::detect().context("resolving application directories")?;
  let backend = TomlConfigBackend::new(&paths);

  let store = match &args.db {
    Some(path) => SqliteAlbumStore::open_path(path, Some("WAL"))
      .with_context(|| format!("opening database {}", path.display()))?,
    None => {
      let cfg = StorageConfig::load(&backend, &paths).context("loading [storage] config")?;
      SqliteAlbumStore::new_from_config(&cfg)
        .with_context(|| format!("opening database {}", cfg.db_path.display()))?
    }
  };
  debug!(command = ?args.command, "running command");

  let service = AlbumService::new(store);
  let mut out = io::stdout().lock();
  execute(&args.command, &service, &backend, args.json, &mut out)
}
