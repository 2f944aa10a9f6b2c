use serde::{Deserialize, Serialize};

use crate::{error::Precondition, range::IntRange};

/// One selectable outcome. `weight` is relative to the other options in the
/// same slice; `probability` is accepted as an alias when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeightedOption {
    pub id: String,
    #[serde(alias = "probability")]
    pub weight: u64,
}

impl WeightedOption {
    pub fn new(id: impl Into<String>, weight: u64) -> Self {
        Self {
            id: id.into(),
            weight,
        }
    }
}

pub fn total_weight(options: &[WeightedOption]) -> Result<u64, Precondition> {
    options.iter().try_fold(0u64, |acc, o| {
        acc.checked_add(o.weight).ok_or(Precondition::WeightOverflow)
    })
}

/// Bounds of the single roll a selection consumes: `[0, total - 1]`.
pub fn selection_range(options: &[WeightedOption]) -> Result<IntRange, Precondition> {
    let total = total_weight(options)?;
    if total == 0 {
        return Err(Precondition::ZeroTotalWeight);
    }
    let max = i64::try_from(total - 1).map_err(|_| Precondition::WeightOverflow)?;
    IntRange::new(0, max)
}

/// Walks `options` in order, adding each weight before comparing, and returns
/// the first option whose running total exceeds `r`. Zero-weight options are
/// never chosen. `None` when `r` is not below the total weight.
pub fn select_by_value(options: &[WeightedOption], r: u64) -> Option<&WeightedOption> {
    let mut acc = 0u64;
    for option in options {
        acc = acc.saturating_add(option.weight);
        if r < acc {
            return Some(option);
        }
    }
    None
}
