use crate::constants::{DEFAULT_EXCLUDED_UNITS, DEFAULT_MIN_FREQUENCY};
use crate::kana::{Category, classify};
use crate::table::{FrequencyEntry, RankedInventory};

use log::warn;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// 最小頻度しきい値（2gram側のみに適用）
    pub min_frequency: u64,
    /// Placeholder and punctuation glyphs dropped from the unigram table
    pub excluded_units: HashSet<String>,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            min_frequency: DEFAULT_MIN_FREQUENCY,
            excluded_units: DEFAULT_EXCLUDED_UNITS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// What the merger dropped, for logging. Nothing in here is fatal.
#[derive(Debug, Clone, Default)]
pub struct MergeReport {
    /// Unigrams in the exclusion set
    pub excluded: usize,
    /// Small-kana unigrams reserved for digraph tails
    pub reserved_small_kana: usize,
    /// Digraph rows outside the contracted categories (or not order 2)
    pub uncontracted: usize,
    /// Contracted digraphs below the frequency threshold
    pub below_threshold: usize,
    /// Units seen twice; the first-processed occurrence won
    pub conflicts: Vec<String>,
}

/// Merges a unigram table and a digraph table into a deduplicated,
/// filtered, rank-ordered inventory.
///
/// Unigrams are processed first, so on a duplicate unit the unigram
/// table wins and the digraph row is reported as a conflict.
pub fn merge_tables(
    unigrams: &[FrequencyEntry],
    digraphs: &[FrequencyEntry],
    opts: &MergeOptions,
) -> (RankedInventory, MergeReport) {
    let mut report = MergeReport::default();
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged: Vec<FrequencyEntry> = Vec::with_capacity(unigrams.len() + digraphs.len());

    for entry in unigrams {
        if opts.excluded_units.contains(&entry.unit) {
            report.excluded += 1;
            continue;
        }
        if classify(&entry.unit) == Category::SmallKanaUnigram {
            report.reserved_small_kana += 1;
            continue;
        }
        push_unique(entry, &mut seen, &mut merged, &mut report);
    }

    for entry in digraphs {
        if entry.order != 2 || !classify(&entry.unit).is_contracted_digraph() {
            report.uncontracted += 1;
            continue;
        }
        if entry.count < opts.min_frequency {
            report.below_threshold += 1;
            continue;
        }
        push_unique(entry, &mut seen, &mut merged, &mut report);
    }

    (RankedInventory::from_entries(merged), report)
}

fn push_unique(
    entry: &FrequencyEntry,
    seen: &mut HashSet<String>,
    merged: &mut Vec<FrequencyEntry>,
    report: &mut MergeReport,
) {
    if seen.insert(entry.unit.clone()) {
        merged.push(entry.clone());
    } else {
        warn!("duplicate unit '{}' dropped (first occurrence wins)", entry.unit);
        report.conflicts.push(entry.unit.clone());
    }
}
