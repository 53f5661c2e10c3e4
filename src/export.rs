use crate::error::{KanaFreqError, Result};
use crate::table::RankedInventory;
use crate::tiers::{Tier, TierStats, weighted_cost};

use chrono::Local;
use csv::WriterBuilder;
use itertools::Itertools;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes `contents` to `path` through a temp file in the destination
/// directory; the target is only ever replaced by a complete file.
fn persist_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(contents)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| KanaFreqError::WriteFile {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

/// Writes the inventory as a 3-column tab-separated file
/// (`count \t unit \t order`), rows in rank order.
pub fn write_inventory_file(inventory: &RankedInventory, path: &Path) -> Result<()> {
    let mut buf = Vec::new();
    {
        let mut wtr = WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(&mut buf);

        for entry in inventory.iter() {
            wtr.write_record([
                entry.count.to_string().as_str(),
                entry.unit.as_str(),
                entry.order.to_string().as_str(),
            ])?;
        }
        wtr.flush()?;
    }

    persist_atomically(path, &buf)
}

/// Renders the unit strings in rank order as a Rust string-slice
/// constant, wrapped at `per_line` units per line. The downstream
/// layout crate compiles this file in as its default frequency list.
pub fn render_static_array(name: &str, inventory: &RankedInventory, per_line: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "// Generated by kana_freq on {} - do not edit.\n",
        Local::now().format("%Y-%m-%d")
    ));
    out.push_str(&format!("pub const {}: &[&str] = &[\n", name));
    for chunk in &inventory.iter().chunks(per_line) {
        let line = chunk.map(|e| format!("\"{}\"", e.unit)).join(", ");
        out.push_str(&format!("    {},\n", line));
    }
    out.push_str("];\n");
    out
}

pub fn write_static_array(
    inventory: &RankedInventory,
    name: &str,
    per_line: usize,
    path: &Path,
) -> Result<()> {
    let rendered = render_static_array(name, inventory, per_line);
    persist_atomically(path, rendered.as_bytes())
}

#[derive(Debug, Serialize)]
struct TierReport {
    index: usize,
    capacity: usize,
    weight: f64,
    units: Vec<String>,
    stats: TierStats,
}

#[derive(Debug, Serialize)]
struct AllocationReport {
    total_units: usize,
    total_weighted_cost: f64,
    tiers: Vec<TierReport>,
}

/// Writes the per-tier statistics as a JSON report. Validation and
/// reporting only; nothing downstream consumes this.
pub fn write_allocation_report(tiers: &[Tier], path: &Path) -> Result<()> {
    let report = AllocationReport {
        total_units: tiers.iter().map(|t| t.members.len()).sum(),
        total_weighted_cost: weighted_cost(tiers),
        tiers: tiers
            .iter()
            .map(|t| TierReport {
                index: t.index,
                capacity: t.capacity,
                weight: t.weight,
                units: t.members.iter().map(|e| e.unit.clone()).collect(),
                stats: t.stats(),
            })
            .collect(),
    };

    let json = serde_json::to_vec_pretty(&report)?;
    persist_atomically(path, &json)
}
