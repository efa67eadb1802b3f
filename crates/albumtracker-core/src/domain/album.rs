use crate::domain::condition::ConditionIndex;
use crate::domain::ids::AlbumId;
use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};

/// A single album copy tracked in the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
  /// Identity assigned at creation.
  pub id: AlbumId,

  pub artist_name: String,

  pub album_title: String,

  /// How this copy was acquired.
  pub condition: ConditionIndex,
}

impl Album {
  /// Creates a new album with a fresh identity.
  ///
  /// Both text fields must be non-empty. The check runs on the raw values:
  /// `" "` is accepted.
  pub fn new(
    artist_name: impl Into<String>,
    album_title: impl Into<String>,
    condition: ConditionIndex,
  ) -> Result<Self, ValidationError> {
    let artist_name = artist_name.into();
    let album_title = album_title.into();

    if artist_name.is_empty() {
      return Err(ValidationError::EmptyArtistName);
    }
    if album_title.is_empty() {
      return Err(ValidationError::EmptyAlbumTitle);
    }

    Ok(Self { id: AlbumId::new(), artist_name, album_title, condition })
  }

  /// Case-insensitive substring match on the artist name.
  pub fn artist_matches(&self, search_term: &str) -> bool {
    self.artist_name.to_lowercase().contains(&search_term.to_lowercase())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rejects_empty_artist() {
    let err = Album::new("", "X", ConditionIndex::PURCHASED).unwrap_err();
    assert_eq!(err, ValidationError::EmptyArtistName);
  }

  #[test]
  fn rejects_empty_title() {
    let err = Album::new("X", "", ConditionIndex::PURCHASED).unwrap_err();
    assert_eq!(err, ValidationError::EmptyAlbumTitle);
  }

  #[test]
  fn whitespace_is_not_trimmed() {
    let album = Album::new(" ", " ", ConditionIndex::BURNT).unwrap();
    assert_eq!(album.artist_name, " ");
  }

  #[test]
  fn artist_match_ignores_case() {
    let album = Album::new("Radiohead", "Kid A", ConditionIndex::BURNT).unwrap();
    assert!(album.artist_matches("rad"));
    assert!(album.artist_matches("HEAD"));
    assert!(!album.artist_matches("beck"));
  }
}
