use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::domain::{Album, AlbumId, AlbumStatistics, ConditionIndex};
use crate::errors::CoreError;
use crate::ports::AlbumRepository;

/// State handed to the presentation layer after each query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumListSnapshot {
  /// Search term the albums were filtered with (empty means unfiltered).
  pub search_term: String,
  /// Albums to display, sorted by artist name.
  pub albums: Vec<Album>,
  /// True when the whole collection is empty, not only the filtered view.
  pub library_is_empty: bool,
}

/// Sorting, filtering, validation and aggregation of albums on top of a repository.
pub struct AlbumService<R>
where
  R: AlbumRepository,
{
  repo: R,
}

impl<R> AlbumService<R>
where
  R: AlbumRepository,
{
  pub fn new(repo: R) -> Self {
    Self { repo }
  }

  pub fn repository(&self) -> &R {
    &self.repo
  }

  // -------- QUERY (read) --------

  /// Albums sorted by artist name, optionally narrowed to artists containing
  /// `search_term` (case-insensitive). An empty term returns everything.
  pub fn list_albums(&self, search_term: &str) -> Result<Vec<Album>, CoreError> {
    let albums = self.repo.list_by_artist()?;

    if search_term.is_empty() {
      return Ok(albums);
    }

    Ok(albums.into_iter().filter(|a| a.artist_matches(search_term)).collect())
  }

  pub fn snapshot(&self, search_term: &str) -> Result<AlbumListSnapshot, CoreError> {
    let all = self.repo.list_by_artist()?;
    let library_is_empty = all.is_empty();

    let albums = if search_term.is_empty() {
      all
    } else {
      all.into_iter().filter(|a| a.artist_matches(search_term)).collect()
    };

    Ok(AlbumListSnapshot { search_term: search_term.to_owned(), albums, library_is_empty })
  }

  pub fn find_album(&self, id: AlbumId) -> Result<Album, CoreError> {
    self.repo.find(id)?.ok_or(CoreError::NotFound)
  }

  /// Counts are recomputed from the store on every call.
  pub fn compute_statistics(&self) -> Result<AlbumStatistics, CoreError> {
    let counts = self.repo.count_by_condition()?;
    Ok(AlbumStatistics::from_counts(counts))
  }

  // -------- COMMAND (write) --------

  /// Validates and stores a new album. Nothing is stored if validation fails.
  pub fn create_album(
    &self,
    artist_name: &str,
    album_title: &str,
    condition: ConditionIndex,
  ) -> Result<Album, CoreError> {
    let album = Album::new(artist_name, album_title, condition)?;
    self.repo.insert(&album)?;

    debug!(id = %album.id, artist = %album.artist_name, "album created");
    Ok(album)
  }

  /// Overwrites the album's fields in place and persists them.
  ///
  /// Unlike [`Self::create_album`] the text fields are not checked for emptiness.
  pub fn update_album(
    &self,
    album: &mut Album,
    artist_name: &str,
    album_title: &str,
    condition: ConditionIndex,
  ) -> Result<(), CoreError> {
    let mut updated = album.clone();
    updated.artist_name = artist_name.to_owned();
    updated.album_title = album_title.to_owned();
    updated.condition = condition;

    self.repo.update(&updated)?;
    *album = updated;

    debug!(id = %album.id, "album updated");
    Ok(())
  }

  /// Removes the album. Deleting an already removed album does nothing.
  pub fn delete_album(&self, album: &Album) -> Result<(), CoreError> {
    if self.repo.delete(album.id)? {
      debug!(id = %album.id, "album deleted");
    } else {
      debug!(id = %album.id, "album already absent, nothing deleted");
    }
    Ok(())
  }

  /// Removes the albums at `positions` of `view`.
  ///
  /// `view` must be the exact (possibly filtered) sequence the positions were
  /// taken from. All positions are checked before anything is removed.
  pub fn delete_albums_at(&self, view: &[Album], positions: &[usize]) -> Result<usize, CoreError> {
    let positions: BTreeSet<usize> = positions.iter().copied().collect();

    if let Some(&position) = positions.iter().find(|&&p| p >= view.len()) {
      return Err(CoreError::PositionOutOfRange { position, len: view.len() });
    }

    let ids: Vec<AlbumId> = positions.into_iter().map(|p| view[p].id).collect();
    let removed = self.repo.delete_many(&ids)?;

    debug!(requested = ids.len(), removed, "albums deleted from view");
    Ok(removed)
  }
}

#[cfg(test)]
mod tests {
  use std::cell::{Cell, RefCell};

  use super::*;
  use crate::errors::ValidationError;
  use crate::ports::RepoError;

  /// Insertion-ordered in-memory store. Sorting is stable, so equal artist
  /// names keep their insertion order like the SQLite store does.
  #[derive(Default)]
  struct MemoryRepo {
    albums: RefCell<Vec<Album>>,
    fail_writes: Cell<bool>,
  }

  impl MemoryRepo {
    fn check_writable(&self) -> Result<(), RepoError> {
      if self.fail_writes.get() {
        return Err(RepoError::Storage("disk full".into()));
      }
      Ok(())
    }
  }

  impl AlbumRepository for MemoryRepo {
    fn insert(&self, album: &Album) -> Result<(), RepoError> {
      self.check_writable()?;
      self.albums.borrow_mut().push(album.clone());
      Ok(())
    }

    fn update(&self, album: &Album) -> Result<(), RepoError> {
      self.check_writable()?;
      let mut albums = self.albums.borrow_mut();
      let slot = albums.iter_mut().find(|a| a.id == album.id).ok_or(RepoError::NotFound)?;
      *slot = album.clone();
      Ok(())
    }

    fn delete(&self, id: AlbumId) -> Result<bool, RepoError> {
      self.check_writable()?;
      let mut albums = self.albums.borrow_mut();
      let before = albums.len();
      albums.retain(|a| a.id != id);
      Ok(albums.len() != before)
    }

    fn delete_many(&self, ids: &[AlbumId]) -> Result<usize, RepoError> {
      self.check_writable()?;
      let mut albums = self.albums.borrow_mut();
      let before = albums.len();
      albums.retain(|a| !ids.contains(&a.id));
      Ok(before - albums.len())
    }

    fn find(&self, id: AlbumId) -> Result<Option<Album>, RepoError> {
      Ok(self.albums.borrow().iter().find(|a| a.id == id).cloned())
    }

    fn list_by_artist(&self) -> Result<Vec<Album>, RepoError> {
      let mut albums = self.albums.borrow().clone();
      albums.sort_by(|a, b| a.artist_name.cmp(&b.artist_name));
      Ok(albums)
    }

    fn count_by_condition(&self) -> Result<Vec<(ConditionIndex, usize)>, RepoError> {
      let albums = self.albums.borrow();
      Ok(
        ConditionIndex::all()
          .map(|c| (c, albums.iter().filter(|a| a.condition == c).count()))
          .filter(|(_, n)| *n > 0)
          .collect(),
      )
    }
  }

  fn service() -> AlbumService<MemoryRepo> {
    AlbumService::new(MemoryRepo::default())
  }

  fn seed_scenario(service: &AlbumService<MemoryRepo>) {
    service.create_album("Radiohead", "OK Computer", ConditionIndex::PURCHASED).unwrap();
    service.create_album("Radiohead", "Kid A", ConditionIndex::BURNT).unwrap();
    service.create_album("Beck", "Odelay", ConditionIndex::PURCHASED).unwrap();
  }

  #[test]
  fn scenario_search_and_statistics() {
    let service = service();
    seed_scenario(&service);

    let found = service.list_albums("rad").unwrap();
    let titles: Vec<_> = found.iter().map(|a| a.album_title.as_str()).collect();
    assert_eq!(titles, ["OK Computer", "Kid A"]);

    let stats = service.compute_statistics().unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.purchased(), 2);
    assert_eq!(stats.burnt(), 1);
  }

  #[test]
  fn unfiltered_list_is_sorted_by_artist() {
    let service = service();
    for artist in ["Wilco", "Air", "Pavement", "Beck", "Air"] {
      service.create_album(artist, "Title", ConditionIndex::PURCHASED).unwrap();
    }

    let albums = service.list_albums("").unwrap();
    assert_eq!(albums.len(), 5);
    assert!(albums.windows(2).all(|w| w[0].artist_name <= w[1].artist_name));
  }

  #[test]
  fn filtered_list_is_an_ordered_subsequence() {
    let service = service();
    for artist in ["The Beatles", "beach house", "Bonobo", "Aphex Twin", "BEACH BOYS"] {
      service.create_album(artist, "Title", ConditionIndex::PURCHASED).unwrap();
    }

    let all = service.list_albums("").unwrap();
    let filtered = service.list_albums("bEa").unwrap();

    let expected: Vec<_> = all.iter().filter(|a| a.artist_matches("bea")).cloned().collect();
    assert_eq!(filtered, expected);
    assert_eq!(filtered.len(), 3);
  }

  #[test]
  fn create_rejects_empty_text_and_stores_nothing() {
    let service = service();

    assert!(matches!(
      service.create_album("", "X", ConditionIndex::PURCHASED),
      Err(CoreError::Validation(ValidationError::EmptyArtistName))
    ));
    assert!(matches!(
      service.create_album("X", "", ConditionIndex::PURCHASED),
      Err(CoreError::Validation(ValidationError::EmptyAlbumTitle))
    ));
    assert!(service.list_albums("").unwrap().is_empty());

    let created = service.create_album("Artist", "Title", ConditionIndex::BURNT).unwrap();
    assert_eq!(service.list_albums("").unwrap(), vec![created]);
  }

  #[test]
  fn update_allows_empty_text() {
    let service = service();
    let mut album = service.create_album("Beck", "Odelay", ConditionIndex::PURCHASED).unwrap();

    service.update_album(&mut album, "", "", ConditionIndex::BURNT).unwrap();

    assert_eq!(album.artist_name, "");
    assert_eq!(album.condition, ConditionIndex::BURNT);
    assert_eq!(service.find_album(album.id).unwrap(), album);
  }

  #[test]
  fn failed_update_leaves_record_untouched() {
    let service = service();
    let mut album = service.create_album("Beck", "Odelay", ConditionIndex::PURCHASED).unwrap();
    service.repository().fail_writes.set(true);

    let err = service.update_album(&mut album, "Bjork", "Post", ConditionIndex::BURNT).unwrap_err();

    assert!(matches!(err, CoreError::Repository(_)));
    assert_eq!(album.artist_name, "Beck");
    assert_eq!(service.find_album(album.id).unwrap().album_title, "Odelay");
  }

  #[test]
  fn update_of_deleted_album_is_not_found() {
    let service = service();
    let mut album = service.create_album("Beck", "Odelay", ConditionIndex::PURCHASED).unwrap();
    service.delete_album(&album).unwrap();

    let err = service.update_album(&mut album, "Beck", "Sea Change", ConditionIndex::PURCHASED);
    assert!(matches!(err, Err(CoreError::NotFound)));
  }

  #[test]
  fn deleted_album_disappears_and_second_delete_is_noop() {
    let service = service();
    seed_scenario(&service);
    let victim = service.list_albums("beck").unwrap().remove(0);

    service.delete_album(&victim).unwrap();
    service.delete_album(&victim).unwrap();

    let remaining = service.list_albums("").unwrap();
    assert!(remaining.iter().all(|a| a.id != victim.id));
    assert_eq!(remaining.len(), 2);
    assert!(matches!(service.find_album(victim.id), Err(CoreError::NotFound)));
  }

  #[test]
  fn delete_at_resolves_positions_against_filtered_view() {
    let service = service();
    seed_scenario(&service);

    // Full list: Beck, Radiohead (OK Computer), Radiohead (Kid A).
    // In the filtered view position 0 is "OK Computer", not "Odelay".
    let view = service.list_albums("radio").unwrap();
    let removed = service.delete_albums_at(&view, &[0, 0]).unwrap();

    assert_eq!(removed, 1);
    let titles: Vec<_> =
      service.list_albums("").unwrap().into_iter().map(|a| a.album_title).collect();
    assert_eq!(titles, ["Odelay", "Kid A"]);
  }

  #[test]
  fn delete_at_with_bad_position_removes_nothing() {
    let service = service();
    seed_scenario(&service);
    let view = service.list_albums("").unwrap();

    let err = service.delete_albums_at(&view, &[0, 3]).unwrap_err();

    assert!(matches!(err, CoreError::PositionOutOfRange { position: 3, len: 3 }));
    assert_eq!(service.list_albums("").unwrap().len(), 3);
  }

  #[test]
  fn statistics_follow_mutations() {
    let service = service();
    for _ in 0..3 {
      service.create_album("A", "T", ConditionIndex::PURCHASED).unwrap();
    }
    for _ in 0..2 {
      service.create_album("B", "T", ConditionIndex::BURNT).unwrap();
    }

    let stats = service.compute_statistics().unwrap();
    assert_eq!((stats.total, stats.purchased(), stats.burnt()), (5, 3, 2));

    let mut first = service.list_albums("").unwrap().remove(0);
    service.update_album(&mut first, "A", "T", ConditionIndex::BURNT).unwrap();

    let stats = service.compute_statistics().unwrap();
    assert_eq!((stats.total, stats.purchased(), stats.burnt()), (5, 2, 3));
  }

  #[test]
  fn snapshot_distinguishes_empty_library_from_empty_result() {
    let service = service();
    assert!(service.snapshot("").unwrap().library_is_empty);

    seed_scenario(&service);
    let snapshot = service.snapshot("zappa").unwrap();
    assert!(snapshot.albums.is_empty());
    assert!(!snapshot.library_is_empty);
    assert_eq!(snapshot.search_term, "zappa");
  }

  #[test]
  fn store_failure_on_create_propagates() {
    let service = service();
    service.repository().fail_writes.set(true);

    let err = service.create_album("Beck", "Odelay", ConditionIndex::PURCHASED).unwrap_err();
    assert!(matches!(err, CoreError::Repository(msg) if msg.contains("disk full")));
  }
}
