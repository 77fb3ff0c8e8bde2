//! Merging per-file results into pass totals.

use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

use super::classify::LogLevel;
use super::types::{ErrorTypeCounts, FileAnalysis, LevelCounts};

/// Adds every count in `partial` into `total`, creating absent keys.
///
/// Plain integer addition over maps: associative and commutative, so any
/// permutation or grouping of partials folds to the same total.
pub fn merge_counts<K>(total: &mut HashMap<K, u64>, partial: &HashMap<K, u64>)
where
    K: Eq + Hash + Copy,
{
    for (key, value) in partial {
        *total.entry(*key).or_insert(0) += value;
    }
}

/// Totals accumulated over one pass. Mutated by exactly one caller at a
/// time: the pass folds finished results in on a single thread.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Aggregate {
    pub levels: LevelCounts,
    pub error_types: ErrorTypeCounts,
}

impl Aggregate {
    /// Fold one per-file result into the totals.
    pub fn absorb(&mut self, report: &FileAnalysis) {
        merge_counts(&mut self.levels, &report.levels);
        merge_counts(&mut self.error_types, &report.error_types);
    }

    pub fn level(&self, level: LogLevel) -> u64 {
        self.levels.get(&level).copied().unwrap_or(0)
    }

    pub fn total_lines(&self) -> u64 {
        self.levels.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(LogLevel, u64)]) -> LevelCounts {
        pairs.iter().copied().collect()
    }

    #[test]
    fn merge_creates_and_adds_keys() {
        let mut total = counts(&[(LogLevel::Info, 2)]);
        let partial = counts(&[(LogLevel::Info, 3), (LogLevel::Warn, 1)]);

        merge_counts(&mut total, &partial);
        assert_eq!(total[&LogLevel::Info], 5);
        assert_eq!(total[&LogLevel::Warn], 1);
    }

    #[test]
    fn merge_with_empty_partial_is_identity() {
        let mut total = counts(&[(LogLevel::Error, 4)]);
        merge_counts(&mut total, &LevelCounts::new());
        assert_eq!(total, counts(&[(LogLevel::Error, 4)]));
    }

    #[test]
    fn folding_any_permutation_yields_same_total() {
        let partials = vec![
            counts(&[(LogLevel::Info, 1), (LogLevel::Warn, 2)]),
            counts(&[(LogLevel::Info, 3)]),
            counts(&[(LogLevel::Error, 5), (LogLevel::Warn, 1)]),
            LevelCounts::new(),
        ];

        let mut forward = LevelCounts::new();
        for partial in &partials {
            merge_counts(&mut forward, partial);
        }

        let mut backward = LevelCounts::new();
        for partial in partials.iter().rev() {
            merge_counts(&mut backward, partial);
        }

        assert_eq!(forward, backward);
        assert_eq!(forward[&LogLevel::Info], 4);
        assert_eq!(forward[&LogLevel::Warn], 3);
        assert_eq!(forward[&LogLevel::Error], 5);
    }

    #[test]
    fn absorbing_empty_result_leaves_totals_unchanged() {
        let mut aggregate = Aggregate::default();
        aggregate.levels.insert(LogLevel::Info, 7);

        aggregate.absorb(&FileAnalysis::default());
        assert_eq!(aggregate.level(LogLevel::Info), 7);
        assert_eq!(aggregate.total_lines(), 7);
    }

    #[test]
    fn absorb_covers_both_mappings() {
        let mut report = FileAnalysis::default();
        report.levels.insert(LogLevel::Error, 2);
        report.error_types.insert("SQLException", 1);

        let mut aggregate = Aggregate::default();
        aggregate.absorb(&report);
        aggregate.absorb(&report);

        assert_eq!(aggregate.level(LogLevel::Error), 4);
        assert_eq!(aggregate.error_types["SQLException"], 2);
    }
}
