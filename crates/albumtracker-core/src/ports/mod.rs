pub mod album_repository;

pub use album_repository::{AlbumRepository, RepoError};
