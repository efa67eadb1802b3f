use crate::schema::albums;

use diesel::prelude::*;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = albums)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AlbumRow {
  pub row_id: i32,
  pub uid: String,
  pub artist_name: String,
  pub album_title: String,
  pub condition_index: i32,
  pub created_at: String,
  pub updated_at: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = albums)]
pub struct NewAlbumRow<'a> {
  pub uid: String,
  pub artist_name: &'a str,
  pub album_title: &'a str,
  pub condition_index: i32,
}
