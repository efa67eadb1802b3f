use crate::domain::{Album, AlbumId, ConditionIndex};

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
  #[error("entity not found")]
  NotFound,
  #[error("corrupt record: {0}")]
  Corrupt(String),
  #[error("storage error: {0}")]
  Storage(String),
}

/// Persistence port holding the canonical set of albums.
///
/// Every mutating call is durable once it returns: a read issued afterwards
/// observes the change. Single-record operations are atomic.
pub trait AlbumRepository {
  fn insert(&self, album: &Album) -> Result<(), RepoError>;

  /// Overwrites all fields of an existing album. `RepoError::NotFound` if absent.
  fn update(&self, album: &Album) -> Result<(), RepoError>;

  /// Returns whether a record was actually removed.
  fn delete(&self, id: AlbumId) -> Result<bool, RepoError>;

  /// Removes all given records as one unit. Returns the number removed.
  fn delete_many(&self, ids: &[AlbumId]) -> Result<usize, RepoError>;

  fn find(&self, id: AlbumId) -> Result<Option<Album>, RepoError>;

  /// All albums ordered ascending by artist name, ties in insertion order.
  fn list_by_artist(&self) -> Result<Vec<Album>, RepoError>;

  /// Number of albums per condition. Conditions without albums may be omitted.
  fn count_by_condition(&self) -> Result<Vec<(ConditionIndex, usize)>, RepoError>;
}
