use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Stable identity of an [`Album`](crate::domain::Album).
///
/// Generated once (UUID v4) when the record is created and never reused,
/// even after the record is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlbumId(Uuid);

impl AlbumId {
  /// Generates a new unique identifier.
  pub fn new() -> Self {
    AlbumId(Uuid::new_v4())
  }

  /// Builds an `AlbumId` from an existing `Uuid`.
  pub fn from_uuid(u: Uuid) -> Self {
    AlbumId(u)
  }

  /// Returns the inner `Uuid`.
  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl Default for AlbumId {
  fn default() -> Self {
    Self::new()
  }
}

impl From<Uuid> for AlbumId {
  fn from(u: Uuid) -> Self {
    AlbumId(u)
  }
}

impl From<AlbumId> for Uuid {
  fn from(id: AlbumId) -> Self {
    id.0
  }
}

impl FromStr for AlbumId {
  type Err = uuid::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Uuid::parse_str(s).map(AlbumId)
  }
}

impl fmt::Display for AlbumId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}
