use crate::constants::{DEFAULT_SUPPLEMENTAL_UNITS, DEFAULT_TARGET_SIZE};
use crate::error::{KanaFreqError, Result};
use crate::kana::{Category, classify};
use crate::table::{FrequencyEntry, RankedInventory};

use log::info;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct ComposeOptions {
    /// Exact number of units the final inventory must contain
    pub target_size: usize,
    /// Zero-frequency units added even though the corpus never produced
    /// them standalone (小書き単体をレイアウトに残すため)
    pub supplemental_units: Vec<String>,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            target_size: DEFAULT_TARGET_SIZE,
            supplemental_units: DEFAULT_SUPPLEMENTAL_UNITS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Pool sizes of a composition run, for logging and validation.
#[derive(Debug, Clone, Default)]
pub struct ComposeReport {
    /// n1: unigrams carried over from the merged inventory
    pub unigrams: usize,
    /// n2: supplemental zero-frequency units actually added
    pub supplemental: usize,
    /// n3: yoon digraphs, included unconditionally
    pub yoon: usize,
    /// Slots filled from the optional digraph pool
    pub residual: usize,
    /// Size of the optional digraph pool
    pub optional_pool: usize,
}

/// Composes an inventory of exactly `target_size` units from the merged
/// inventory.
///
/// Quota pools: all unigrams (P1), supplemental zero-count units not in
/// the corpus (P2), all yoon digraphs (P3), and the remaining
/// contracted digraphs ranked by count (P4), of which only the top
/// `target_size - (n1 + n2 + n3)` are taken.
///
/// # Errors
/// [`KanaFreqError::Config`] if the residual is negative or exceeds the
/// optional pool; the target size is unreachable either way.
pub fn compose(
    merged: &RankedInventory,
    opts: &ComposeOptions,
) -> Result<(RankedInventory, ComposeReport)> {
    let mut unigrams: Vec<FrequencyEntry> = Vec::new();
    let mut yoon: Vec<FrequencyEntry> = Vec::new();
    let mut optional: Vec<FrequencyEntry> = Vec::new();

    // merged is already in rank order, so each pool inherits it
    for entry in merged.iter() {
        match classify(&entry.unit) {
            Category::Yoon => yoon.push(entry.clone()),
            cat if cat.is_contracted_digraph() => optional.push(entry.clone()),
            _ => unigrams.push(entry.clone()),
        }
    }

    let present: HashSet<&str> = merged.iter().map(|e| e.unit.as_str()).collect();
    let supplemental: Vec<FrequencyEntry> = opts
        .supplemental_units
        .iter()
        .filter(|u| !present.contains(u.as_str()))
        .map(|u| FrequencyEntry::new(u.clone(), 0))
        .collect();

    let base = unigrams.len() + supplemental.len() + yoon.len();
    let report = ComposeReport {
        unigrams: unigrams.len(),
        supplemental: supplemental.len(),
        yoon: yoon.len(),
        residual: opts.target_size.saturating_sub(base),
        optional_pool: optional.len(),
    };

    if base > opts.target_size {
        return Err(KanaFreqError::Config(format!(
            "target size {} is below the quota floor {} ({} unigrams + {} supplemental + {} yoon)",
            opts.target_size, base, report.unigrams, report.supplemental, report.yoon
        )));
    }
    let residual = opts.target_size - base;
    if residual > optional.len() {
        return Err(KanaFreqError::Config(format!(
            "residual {} exceeds the optional digraph pool of {}",
            residual,
            optional.len()
        )));
    }

    info!(
        "composing {} units: {} unigrams + {} supplemental + {} yoon + {} of {} optional digraphs",
        opts.target_size,
        report.unigrams,
        report.supplemental,
        report.yoon,
        residual,
        optional.len()
    );

    let mut all = unigrams;
    all.extend(supplemental);
    all.extend(yoon);
    all.extend(optional.into_iter().take(residual));

    let inventory = RankedInventory::from_entries(all);
    debug_assert_eq!(inventory.len(), opts.target_size);
    Ok((inventory, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::{MergeOptions, merge_tables};

    fn merged(unigrams: &[(u64, &str)], digraphs: &[(u64, &str)]) -> RankedInventory {
        let u: Vec<FrequencyEntry> = unigrams
            .iter()
            .map(|&(c, s)| FrequencyEntry::new(s, c))
            .collect();
        let d: Vec<FrequencyEntry> = digraphs
            .iter()
            .map(|&(c, s)| FrequencyEntry::new(s, c))
            .collect();
        let (inv, _) = merge_tables(
            &u,
            &d,
            &MergeOptions {
                min_frequency: 1,
                excluded_units: Default::default(),
            },
        );
        inv
    }

    #[test]
    fn test_exact_target_size_with_residual() {
        // n1=2, n2=1, n3=1, T=6 -> residual 2 of the optional pool
        let inv = merged(
            &[(100, "い"), (90, "か")],
            &[
                (80, "きゃ"), // yoon
                (70, "ティ"),
                (60, "ふぁ"),
                (50, "ファ"),
                (40, "くゎ"),
            ],
        );
        let opts = ComposeOptions {
            target_size: 6,
            supplemental_units: vec!["ぁ".to_string()],
        };

        let (result, report) = compose(&inv, &opts).unwrap();
        assert_eq!(result.len(), 6);
        assert_eq!(report.unigrams, 2);
        assert_eq!(report.supplemental, 1);
        assert_eq!(report.yoon, 1);
        assert_eq!(report.residual, 2);
        assert_eq!(report.optional_pool, 4);

        // exactly the top 2 of the optional pool made it in
        let units: Vec<&str> = result.iter().map(|e| e.unit.as_str()).collect();
        assert!(units.contains(&"ティ"));
        assert!(units.contains(&"ふぁ"));
        assert!(!units.contains(&"ファ"));
        assert!(!units.contains(&"くゎ"));
    }

    #[test]
    fn test_positive_counts_precede_zero_counts() {
        let inv = merged(&[(10, "い"), (0, "ん")], &[(5, "きゃ"), (3, "ティ")]);
        let opts = ComposeOptions {
            target_size: 5,
            supplemental_units: vec!["ぁ".to_string()],
        };

        let (result, _) = compose(&inv, &opts).unwrap();
        let counts: Vec<u64> = result.iter().map(|e| e.count).collect();
        let first_zero = counts.iter().position(|&c| c == 0).unwrap();
        assert!(counts[..first_zero].iter().all(|&c| c > 0));
        assert!(counts[first_zero..].iter().all(|&c| c == 0));
    }

    #[test]
    fn test_supplement_already_present_not_duplicated() {
        let inv = merged(&[(10, "い")], &[(5, "きゃ")]);
        let opts = ComposeOptions {
            target_size: 3,
            // "い" already in the corpus, only "ぁ" is new
            supplemental_units: vec!["い".to_string(), "ぁ".to_string()],
        };

        let (result, report) = compose(&inv, &opts).unwrap();
        assert_eq!(report.supplemental, 1);
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_negative_residual_is_config_error() {
        let inv = merged(&[(10, "い"), (9, "か"), (8, "す")], &[]);
        let opts = ComposeOptions {
            target_size: 2,
            supplemental_units: vec![],
        };
        assert!(matches!(compose(&inv, &opts), Err(KanaFreqError::Config(_))));
    }

    #[test]
    fn test_oversized_residual_is_config_error() {
        let inv = merged(&[(10, "い")], &[(5, "ティ")]);
        let opts = ComposeOptions {
            target_size: 10,
            supplemental_units: vec![],
        };
        assert!(matches!(compose(&inv, &opts), Err(KanaFreqError::Config(_))));
    }

    #[test]
    fn test_yoon_included_even_below_optional_ranks() {
        // a low-count yoon digraph is unconditional; a higher-count
        // small-vowel digraph still competes for residual slots
        let inv = merged(&[(100, "い")], &[(2, "きゃ"), (90, "ティ"), (80, "ふぁ")]);
        let opts = ComposeOptions {
            target_size: 3,
            supplemental_units: vec![],
        };

        let (result, report) = compose(&inv, &opts).unwrap();
        let units: Vec<&str> = result.iter().map(|e| e.unit.as_str()).collect();
        assert!(units.contains(&"きゃ"));
        assert!(units.contains(&"ティ"));
        assert!(!units.contains(&"ふぁ"));
        assert_eq!(report.residual, 1);
    }

    #[test]
    fn test_order_field_in_output() {
        let inv = merged(&[(10, "い")], &[(5, "きゃ")]);
        let opts = ComposeOptions {
            target_size: 3,
            supplemental_units: vec!["ぁ".to_string()],
        };
        let (result, _) = compose(&inv, &opts).unwrap();
        for entry in result.iter() {
            assert_eq!(entry.order as usize, entry.unit.chars().count());
        }
    }
}
