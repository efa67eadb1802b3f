pub mod album;
pub mod condition;
pub mod ids;
pub mod statistics;

pub use album::Album;
pub use condition::{CONDITION_CATALOG, Condition, ConditionIndex};
pub use ids::AlbumId;
pub use statistics::AlbumStatistics;
