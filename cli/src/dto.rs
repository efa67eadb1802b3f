use albumtracker_core::domain::{Album, AlbumStatistics, ConditionIndex};
use albumtracker_core::services::AlbumListSnapshot;
use serde::Serialize;

/// JSON shape of an album: the condition is spelled out next to its index.
#[derive(Debug, Serialize)]
pub struct AlbumDto {
  pub position: usize,
  pub id: String,
  pub artist_name: String,
  pub album_title: String,
  pub condition_index: usize,
  pub condition: &'static str,
}

impl AlbumDto {
  pub fn new(position: usize, album: &Album) -> Self {
    AlbumDto {
      position,
      id: album.id.to_string(),
      artist_name: album.artist_name.clone(),
      album_title: album.album_title.clone(),
      condition_index: album.condition.get(),
      condition: album.condition.condition().name,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct ListDto {
  pub search_term: String,
  pub library_is_empty: bool,
  pub albums: Vec<AlbumDto>,
}

impl From<&AlbumListSnapshot> for ListDto {
  fn from(snapshot: &AlbumListSnapshot) -> Self {
    ListDto {
      search_term: snapshot.search_term.clone(),
      library_is_empty: snapshot.library_is_empty,
      albums: snapshot.albums.iter().enumerate().map(|(i, a)| AlbumDto::new(i, a)).collect(),
    }
  }
}

#[derive(Debug, Serialize)]
pub struct ConditionCountDto {
  pub condition_index: usize,
  pub condition: &'static str,
  pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct StatisticsDto {
  pub total: usize,
  pub by_condition: Vec<ConditionCountDto>,
}

impl From<&AlbumStatistics> for StatisticsDto {
  fn from(stats: &AlbumStatistics) -> Self {
    StatisticsDto {
      total: stats.total,
      by_condition: ConditionIndex::all()
        .map(|c| ConditionCountDto {
          condition_index: c.get(),
          condition: c.condition().name,
          count: stats.count(c),
        })
        .collect(),
    }
  }
}
