use crate::domain::condition::ConditionIndex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate counts over the whole collection.
///
/// `by_condition` holds an entry for every catalog condition, zero included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumStatistics {
  pub total: usize,
  pub by_condition: BTreeMap<ConditionIndex, usize>,
}

impl AlbumStatistics {
  /// Builds statistics from per-condition counts. Missing conditions count as zero.
  pub fn from_counts(counts: impl IntoIterator<Item = (ConditionIndex, usize)>) -> Self {
    let mut by_condition: BTreeMap<ConditionIndex, usize> =
      ConditionIndex::all().map(|c| (c, 0)).collect();

    for (condition, count) in counts {
      *by_condition.entry(condition).or_default() += count;
    }

    let total = by_condition.values().sum();
    Self { total, by_condition }
  }

  pub fn count(&self, condition: ConditionIndex) -> usize {
    self.by_condition.get(&condition).copied().unwrap_or(0)
  }

  pub fn purchased(&self) -> usize {
    self.count(ConditionIndex::PURCHASED)
  }

  pub fn burnt(&self) -> usize {
    self.count(ConditionIndex::BURNT)
  }
}
