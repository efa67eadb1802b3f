use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// An entry of the condition catalog: how a copy of an album was acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Condition {
  /// Stable lowercase identifier, usable in config files and on the command line.
  pub id: &'static str,
  /// Human readable label.
  pub name: &'static str,
}

/// Fixed, ordered catalog of conditions. Albums reference entries by position.
///
/// Entries are never removed, so an index that is valid once stays valid.
pub const CONDITION_CATALOG: [Condition; 2] = [
  Condition { id: "purchased", name: "Purchased" },
  Condition { id: "burnt", name: "Burnt" },
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown condition: {0}")]
pub struct UnknownCondition(pub String);

/// Index into [`CONDITION_CATALOG`].
///
/// Can only be constructed for an existing entry, so every album always
/// refers to a valid condition.
#[derive(
  Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "usize", into = "usize")]
pub struct ConditionIndex(usize);

impl ConditionIndex {
  pub const PURCHASED: ConditionIndex = ConditionIndex(0);
  pub const BURNT: ConditionIndex = ConditionIndex(1);

  /// Returns `None` if `index` is outside the catalog.
  pub fn new(index: usize) -> Option<Self> {
    (index < CONDITION_CATALOG.len()).then_some(ConditionIndex(index))
  }

  pub fn get(self) -> usize {
    self.0
  }

  pub fn condition(self) -> &'static Condition {
    &CONDITION_CATALOG[self.0]
  }

  /// All catalog indices, in catalog order.
  pub fn all() -> impl Iterator<Item = ConditionIndex> {
    (0..CONDITION_CATALOG.len()).map(ConditionIndex)
  }
}

impl TryFrom<usize> for ConditionIndex {
  type Error = UnknownCondition;

  fn try_from(index: usize) -> Result<Self, Self::Error> {
    ConditionIndex::new(index).ok_or_else(|| UnknownCondition(index.to_string()))
  }
}

impl From<ConditionIndex> for usize {
  fn from(index: ConditionIndex) -> Self {
    index.0
  }
}

impl FromStr for ConditionIndex {
  type Err = UnknownCondition;

  /// Accepts either a catalog position (`"1"`) or an entry's id/name,
  /// compared case-insensitively after trimming (`"Burnt"`, `"burnt"`).
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let normalized = s.trim().to_lowercase();

    if let Ok(index) = normalized.parse::<usize>() {
      return ConditionIndex::try_from(index);
    }

    CONDITION_CATALOG
      .iter()
      .position(|c| c.id == normalized || c.name.to_lowercase() == normalized)
      .map(ConditionIndex)
      .ok_or_else(|| UnknownCondition(s.to_string()))
  }
}

impl fmt::Display for ConditionIndex {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.condition().name)
  }
}
