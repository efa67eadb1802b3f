use std::io::Write;

use anyhow::Context;
use tracing::info;

use albumtracker_config::{ConfigBackend, UiConfig};
use albumtracker_core::domain::ConditionIndex;
use albumtracker_core::ports::AlbumRepository;
use albumtracker_core::services::AlbumService;

use crate::dto::{AlbumDto, ListDto, StatisticsDto};
use crate::format::{album_table, with_commas};
use crate::{Command, ThemeAction};

/// Runs one command against an already wired service and writes the result to `out`.
pub fn execute<R, B, W>(
  command: &Command,
  service: &AlbumService<R>,
  backend: &B,
  json: bool,
  out: &mut W,
) -> anyhow::Result<()>
where
  R: AlbumRepository,
  B: ConfigBackend,
  W: Write,
{
  match command {
    Command::List { search } => {
      let snapshot = service.snapshot(search)?;

      if json {
        serde_json::to_writer_pretty(&mut *out, &ListDto::from(&snapshot))?;
        writeln!(out)?;
      } else if snapshot.library_is_empty {
        writeln!(out, "No Albums")?;
        writeln!(out, "Start adding albums to see your list.")?;
      } else if snapshot.albums.is_empty() {
        writeln!(out, "No albums match \"{search}\".")?;
      } else {
        write!(out, "{}", album_table(&snapshot.albums))?;
      }
    }

    Command::Add { artist, title, condition } => {
      let album = service.create_album(artist, title, *condition)?;
      info!(id = %album.id, "added album");

      if json {
        serde_json::to_writer_pretty(&mut *out, &AlbumDto::new(0, &album))?;
        writeln!(out)?;
      } else {
        writeln!(out, "Added {} - {} ({}) [{}]", album.artist_name, album.album_title, album.condition, album.id)?;
      }
    }

    Command::Edit { id, artist, title, condition } => {
      let mut album = service.find_album(*id).with_context(|| format!("album {id}"))?;

      let artist = artist.clone().unwrap_or_else(|| album.artist_name.clone());
      let title = title.clone().unwrap_or_else(|| album.album_title.clone());
      let condition = condition.unwrap_or(album.condition);

      service.update_album(&mut album, &artist, &title, condition)?;

      if json {
        serde_json::to_writer_pretty(&mut *out, &AlbumDto::new(0, &album))?;
        writeln!(out)?;
      } else {
        writeln!(out, "Updated {} - {} ({})", album.artist_name, album.album_title, album.condition)?;
      }
    }

    Command::Delete { id } => {
      let album = service.find_album(*id).with_context(|| format!("album {id}"))?;
      service.delete_album(&album)?;
      writeln!(out, "Deleted {} - {}", album.artist_name, album.album_title)?;
    }

    Command::DeleteAt { search, positions } => {
      let view = service.list_albums(search)?;
      let removed = service.delete_albums_at(&view, positions)?;
      writeln!(out, "Deleted {removed} album(s)")?;
    }

    Command::Stats => {
      let stats = service.compute_statistics()?;

      if json {
        serde_json::to_writer_pretty(&mut *out, &StatisticsDto::from(&stats))?;
        writeln!(out)?;
      } else {
        let mut rows = vec![("Albums".to_string(), stats.total)];
        rows.extend(
          ConditionIndex::all().map(|c| (format!("{} Albums", c.condition().name), stats.count(c))),
        );
        let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

        writeln!(out, "Counts:")?;
        for (label, count) in rows {
          writeln!(out, "  {label:<width$}  {}", with_commas(count))?;
        }
      }
    }

    Command::Theme { action } => {
      let mut ui = UiConfig::load_from(backend).context("loading [ui] config")?;

      if let Some(action) = action {
        ui.dark_mode = match action {
          ThemeAction::Toggle => !ui.dark_mode,
          ThemeAction::Dark => true,
          ThemeAction::Light => false,
        };
        ui.save_to(backend).context("saving [ui] config")?;
      }

      writeln!(out, "{}", if ui.dark_mode { "dark" } else { "light" })?;
    }
  }

  Ok(())
}
