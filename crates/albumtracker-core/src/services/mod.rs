pub mod album_service;

pub use album_service::{AlbumListSnapshot, AlbumService};
