//! Per-stage item counts.

use serde::Serialize;

use super::{GtdStage, WorkItem};

/// Number of items in each stage, in [`GtdStage::ALL`] order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StageCounts {
    counts: Vec<(GtdStage, usize)>,
}

impl StageCounts {
    /// Counts items by their effective stage.
    pub fn from_items(items: &[WorkItem]) -> Self {
        let counts = GtdStage::ALL
            .into_iter()
            .map(|stage| {
                let n = items
                    .iter()
                    .filter(|item| item.effective_stage() == stage)
                    .count();
                (stage, n)
            })
            .collect();
        Self { counts }
    }

    /// Count for one stage.
    pub fn get(&self, stage: GtdStage) -> usize {
        self.counts
            .iter()
            .find(|(s, _)| *s == stage)
            .map_or(0, |(_, n)| *n)
    }

    /// Total number of items counted.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    /// Iterate over `(stage, count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (GtdStage, usize)> + '_ {
        self.counts.iter().copied()
    }
}
