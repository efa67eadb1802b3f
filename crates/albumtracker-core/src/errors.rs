use thiserror::Error;

use crate::ports::RepoError;

/// Rejected input when creating an album.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("artist name must not be empty")]
  EmptyArtistName,

  #[error("album title must not be empty")]
  EmptyAlbumTitle,
}

/// Core error for album operations.
///
/// Upper layers (the CLI) map this into user messages or logs.
#[derive(Debug, Error)]
pub enum CoreError {
  #[error("invalid album: {0}")]
  Validation(#[from] ValidationError),

  #[error("repository error: {0}")]
  Repository(String),

  #[error("album not found")]
  NotFound,

  #[error("position {position} is out of range for a view of {len} albums")]
  PositionOutOfRange { position: usize, len: usize },
}

impl From<RepoError> for CoreError {
  fn from(err: RepoError) -> Self {
    match err {
      RepoError::NotFound => CoreError::NotFound,
      err => CoreError::Repository(err.to_string()),
    }
  }
}
