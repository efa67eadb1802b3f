fn main() {
  // Update embedded migrations after the SQL files included by `embed_migrations!()` changed.
  println!("cargo:rerun-if-changed=migrations");
}
