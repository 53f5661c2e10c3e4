use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use kana_freq::constants::{DEFAULT_TIER_CAPACITIES, DEFAULT_TIER_WEIGHTS};
use kana_freq::export::write_allocation_report;
use kana_freq::table::{RankedInventory, read_freq_table};
use kana_freq::tiers::{TierSpec, allocate, weighted_cost};

#[derive(Parser)]
#[command(author, version, about = "Partition a ranked inventory across placement tiers", long_about = None)]
struct Args {
    /// Ranked inventory (count \t unit \t order)
    #[arg(short, long)]
    input: PathBuf,

    /// Per-tier statistics report output path (JSON)
    #[arg(short, long)]
    report: PathBuf,

    /// Comma-separated tier capacities, lowest typing cost first
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_TIER_CAPACITIES)]
    capacity: Vec<usize>,

    /// Comma-separated tier weights, one per capacity
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_TIER_WEIGHTS)]
    weight: Vec<f64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.capacity.len() != args.weight.len() {
        bail!(
            "{} capacities but {} weights",
            args.capacity.len(),
            args.weight.len()
        );
    }
    let specs: Vec<TierSpec> = args
        .capacity
        .iter()
        .zip(args.weight.iter())
        .map(|(&capacity, &weight)| TierSpec { capacity, weight })
        .collect();

    let (entries, parse_report) = read_freq_table(&args.input).context("reading inventory")?;
    info!(
        "read {} rows ({} skipped)",
        parse_report.rows_kept,
        parse_report.rows_skipped()
    );
    let inventory = RankedInventory::from_entries(entries);

    let tiers = allocate(&inventory, &specs).context("allocate stage")?;
    for tier in &tiers {
        let stats = tier.stats();
        info!(
            "tier {} (weight {}): {}/{} units, counts {} - {}, mean {:.0}, total {}",
            tier.index,
            tier.weight,
            stats.members,
            tier.capacity,
            stats.min_count,
            stats.max_count,
            stats.mean_count,
            stats.total_count
        );
    }
    info!("total weighted cost: {:.1}", weighted_cost(&tiers));

    write_allocation_report(&tiers, &args.report).context("writing report")?;
    info!("wrote {}", args.report.display());
    Ok(())
}
