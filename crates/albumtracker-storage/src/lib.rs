pub mod config;
pub mod models;
pub mod schema;

use std::cell::RefCell;
use std::path::Path;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use albumtracker_config::ConfigError;
use albumtracker_core::domain::{Album, AlbumId, ConditionIndex};
use albumtracker_core::ports::{AlbumRepository, RepoError};

use crate::config::StorageConfig;
use crate::models::{AlbumRow, NewAlbumRow};

const EMBEDDED_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(Debug, Error)]
pub enum StorageError {
  #[error("database connection failed: {0}")]
  Connection(#[from] diesel::ConnectionError),

  #[error("database error: {0}")]
  Database(#[from] diesel::result::Error),

  #[error("schema setup failed: {0}")]
  Migration(String),

  #[error("unsupported journal mode: {0}")]
  JournalMode(String),

  #[error("config error: {0}")]
  Config(#[from] ConfigError),
}

/// SQLite-backed album store.
///
/// Holds a single connection, so it is meant to be owned by one thread and
/// every write is visible to the next read.
pub struct SqliteAlbumStore {
  conn: RefCell<SqliteConnection>,
}

impl SqliteAlbumStore {
  /// Opens (or creates) the database at `database_url` and brings the schema up.
  pub fn open(database_url: &str, journal_mode: Option<&str>) -> Result<Self, StorageError> {
    let mut conn = SqliteConnection::establish(database_url)?;
    initialize_database(&mut conn, journal_mode)?;

    let applied = conn
      .run_pending_migrations(EMBEDDED_MIGRATIONS)
      .map_err(|e| StorageError::Migration(e.to_string()))?;
    if !applied.is_empty() {
      info!(count = applied.len(), database_url, "applied schema migrations");
    }

    Ok(Self { conn: RefCell::new(conn) })
  }

  pub fn open_path(path: &Path, journal_mode: Option<&str>) -> Result<Self, StorageError> {
    Self::open(&path.to_string_lossy(), journal_mode)
  }

  /// Private, non-persistent database. Used by tests and dry runs.
  pub fn open_in_memory() -> Result<Self, StorageError> {
    Self::open(":memory:", None)
  }

  pub fn new_from_config(cfg: &StorageConfig) -> Result<Self, StorageError> {
    if let Some(parent) = cfg.db_path.parent() {
      std::fs::create_dir_all(parent).map_err(ConfigError::from)?;
    }
    debug!(path = ?cfg.db_path, "opening album database");
    Self::open_path(&cfg.db_path, cfg.journal_mode.as_deref())
  }
}

fn initialize_database(
  conn: &mut SqliteConnection,
  journal_mode: Option<&str>,
) -> Result<(), StorageError> {
  // The busy timeout guards against another process briefly holding the file.
  conn.batch_execute("PRAGMA busy_timeout = 5000; PRAGMA encoding = 'UTF-8';")?;

  if let Some(mode) = journal_mode {
    if mode.is_empty() || !mode.chars().all(|c| c.is_ascii_alphabetic()) {
      return Err(StorageError::JournalMode(mode.to_string()));
    }
    conn.batch_execute(&format!("PRAGMA journal_mode = {mode};"))?;
  }

  Ok(())
}

fn repo_error(err: diesel::result::Error) -> RepoError {
  match err {
    diesel::result::Error::NotFound => RepoError::NotFound,
    err => RepoError::Storage(err.to_string()),
  }
}

fn condition_to_sql(condition: ConditionIndex) -> i32 {
  // The catalog is tiny; every index fits.
  condition.get() as i32
}

fn album_to_new_row(album: &Album) -> NewAlbumRow<'_> {
  NewAlbumRow {
    uid: album.id.to_string(),
    artist_name: &album.artist_name,
    album_title: &album.album_title,
    condition_index: condition_to_sql(album.condition),
  }
}

fn row_to_album(row: AlbumRow) -> Result<Album, RepoError> {
  let uuid = Uuid::parse_str(&row.uid)
    .map_err(|e| RepoError::Corrupt(format!("row {}: invalid uid {:?}: {e}", row.row_id, row.uid)))?;

  let condition = usize::try_from(row.condition_index)
    .ok()
    .and_then(ConditionIndex::new)
    .ok_or_else(|| {
      RepoError::Corrupt(format!("row {}: unknown condition index {}", row.row_id, row.condition_index))
    })?;

  Ok(Album {
    id: AlbumId::from_uuid(uuid),
    artist_name: row.artist_name,
    album_title: row.album_title,
    condition,
  })
}

impl AlbumRepository for SqliteAlbumStore {
  fn insert(&self, album: &Album) -> Result<(), RepoError> {
    use crate::schema::albums::dsl::*;

    let new_row = album_to_new_row(album);
    let mut conn = self.conn.borrow_mut();

    diesel::insert_into(albums).values(&new_row).execute(&mut *conn).map_err(repo_error)?;

    Ok(())
  }

  fn update(&self, album: &Album) -> Result<(), RepoError> {
    use crate::schema::albums::dsl::*;

    let mut conn = self.conn.borrow_mut();

    let affected = diesel::update(albums.filter(uid.eq(album.id.to_string())))
      .set((
        artist_name.eq(&album.artist_name),
        album_title.eq(&album.album_title),
        condition_index.eq(condition_to_sql(album.condition)),
        updated_at.eq(diesel::dsl::sql::<Text>("CURRENT_TIMESTAMP")),
      ))
      .execute(&mut *conn)
      .map_err(repo_error)?;

    if affected == 0 {
      return Err(RepoError::NotFound);
    }
    Ok(())
  }

  fn delete(&self, album_id: AlbumId) -> Result<bool, RepoError> {
    use crate::schema::albums::dsl::*;

    let mut conn = self.conn.borrow_mut();

    let affected = diesel::delete(albums.filter(uid.eq(album_id.to_string())))
      .execute(&mut *conn)
      .map_err(repo_error)?;

    Ok(affected > 0)
  }

  fn delete_many(&self, ids: &[AlbumId]) -> Result<usize, RepoError> {
    use crate::schema::albums::dsl::*;

    if ids.is_empty() {
      return Ok(0);
    }

    let uids: Vec<String> = ids.iter().map(ToString::to_string).collect();
    let mut conn = self.conn.borrow_mut();

    conn
      .transaction(|conn| diesel::delete(albums.filter(uid.eq_any(&uids))).execute(conn))
      .map_err(repo_error)
  }

  fn find(&self, album_id: AlbumId) -> Result<Option<Album>, RepoError> {
    use crate::schema::albums::dsl::*;

    let mut conn = self.conn.borrow_mut();

    let row_opt = albums
      .filter(uid.eq(album_id.to_string()))
      .select(AlbumRow::as_select())
      .first(&mut *conn)
      .optional()
      .map_err(repo_error)?;

    row_opt.map(row_to_album).transpose()
  }

  fn list_by_artist(&self) -> Result<Vec<Album>, RepoError> {
    use crate::schema::albums::dsl::*;

    let mut conn = self.conn.borrow_mut();

    let rows = albums
      .order((artist_name.asc(), row_id.asc()))
      .select(AlbumRow::as_select())
      .load(&mut *conn)
      .map_err(repo_error)?;

    rows.into_iter().map(row_to_album).collect()
  }

  fn count_by_condition(&self) -> Result<Vec<(ConditionIndex, usize)>, RepoError> {
    use crate::schema::albums::dsl::*;
    use diesel::dsl::count_star;

    let mut conn = self.conn.borrow_mut();

    let rows: Vec<(i32, i64)> = albums
      .group_by(condition_index)
      .select((condition_index, count_star()))
      .load(&mut *conn)
      .map_err(repo_error)?;

    rows
      .into_iter()
      .map(|(index, count)| -> Result<_, RepoError> {
        let condition = usize::try_from(index).ok().and_then(ConditionIndex::new).ok_or_else(|| {
          RepoError::Corrupt(format!("unknown condition index {index}"))
        })?;
        Ok((condition, usize::try_from(count).unwrap_or(0)))
      })
      .collect()
  }
}
