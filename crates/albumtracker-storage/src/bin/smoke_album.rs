use albumtracker_core::domain::ConditionIndex;
use albumtracker_core::services::AlbumService;
use albumtracker_storage::SqliteAlbumStore;

fn main() {
  // adjust the path if you want to inspect the file afterwards
  let store = SqliteAlbumStore::open("albumtracker-smoke.db", Some("WAL")).expect("failed to open database");
  let service = AlbumService::new(store);

  let album = service
    .create_album("Smoke Test Artist", "Smoke Test Album", ConditionIndex::BURNT)
    .expect("failed to save album");

  println!("Saved album with id = {}", album.id);

  let loaded = service.find_album(album.id).expect("failed to load album");
  println!("Loaded from DB: {loaded:?}");

  let stats = service.compute_statistics().expect("failed to count albums");
  println!("Stats: {stats:?}");

  service.delete_album(&loaded).expect("failed to delete album");
}
