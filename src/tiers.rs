use crate::error::{KanaFreqError, Result};
use crate::kana::{Category, classify};
use crate::table::{FrequencyEntry, RankedInventory};

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// One placement tier of the downstream layout: a capacity-bounded,
/// cost-weighted bucket (e.g. a key layer reachable at a given typing
/// cost). Tables are ordered lowest cost first.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct TierSpec {
    pub capacity: usize,
    pub weight: f64,
}

/// A filled tier. Members are a contiguous rank-order slice of the
/// inventory; `members.len() <= capacity`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tier {
    pub index: usize,
    pub capacity: usize,
    pub weight: f64,
    pub members: Vec<FrequencyEntry>,
}

/// Derived per-tier statistics. Recomputed on demand, never cached:
/// validation and reporting only.
#[derive(Debug, Clone, Serialize)]
pub struct TierStats {
    pub members: usize,
    pub min_count: u64,
    pub max_count: u64,
    pub mean_count: f64,
    pub total_count: u64,
    pub by_category: Vec<(String, usize)>,
}

impl Tier {
    pub fn stats(&self) -> TierStats {
        let counts: Vec<u64> = self.members.iter().map(|e| e.count).collect();
        let total: u64 = counts.iter().sum();
        let mean = if counts.is_empty() {
            0.0
        } else {
            total as f64 / counts.len() as f64
        };

        let by_category = Category::iter()
            .map(|cat| {
                let n = self
                    .members
                    .iter()
                    .filter(|e| classify(&e.unit) == cat)
                    .count();
                (cat.to_string(), n)
            })
            .filter(|(_, n)| *n > 0)
            .collect();

        TierStats {
            members: self.members.len(),
            min_count: counts.iter().copied().min().unwrap_or(0),
            max_count: counts.iter().copied().max().unwrap_or(0),
            mean_count: mean,
            total_count: total,
            by_category,
        }
    }
}

/// Partitions the inventory across the tier table in rank order: tier 0
/// takes the first `capacity_0` entries, tier 1 the next `capacity_1`,
/// and so on. Trailing tiers may be under-filled.
///
/// Pairing the highest-count entries with the lowest-weight tiers
/// minimizes the total weighted cost for the fixed capacity partition
/// (rearrangement inequality).
///
/// # Errors
/// [`KanaFreqError::Config`] for an empty tier table, a non-positive
/// weight, or an inventory longer than the total capacity (the composer
/// should have prevented that; it is never silently truncated).
pub fn allocate(inventory: &RankedInventory, specs: &[TierSpec]) -> Result<Vec<Tier>> {
    if specs.is_empty() {
        return Err(KanaFreqError::Config("tier table is empty".to_string()));
    }
    for (i, spec) in specs.iter().enumerate() {
        if spec.weight <= 0.0 {
            return Err(KanaFreqError::Config(format!(
                "tier {} has non-positive weight {}",
                i, spec.weight
            )));
        }
    }

    let total_capacity: usize = specs.iter().map(|s| s.capacity).sum();
    if inventory.len() > total_capacity {
        return Err(KanaFreqError::Config(format!(
            "inventory of {} units exceeds total tier capacity {}",
            inventory.len(),
            total_capacity
        )));
    }

    let entries = inventory.entries();
    let mut tiers = Vec::with_capacity(specs.len());
    let mut offset = 0;

    for (index, spec) in specs.iter().enumerate() {
        let end = (offset + spec.capacity).min(entries.len());
        tiers.push(Tier {
            index,
            capacity: spec.capacity,
            weight: spec.weight,
            members: entries[offset..end].to_vec(),
        });
        offset = end;
    }

    Ok(tiers)
}

/// Total weighted typing cost `Σ_i weight_i · Σ_{e in tier i} count`.
pub fn weighted_cost(tiers: &[Tier]) -> f64 {
    tiers
        .iter()
        .map(|t| t.weight * t.members.iter().map(|e| e.count).sum::<u64>() as f64)
        .sum()
}
