use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;

use kana_freq::constants::{DEFAULT_EXCLUDED_UNITS, DEFAULT_MIN_FREQUENCY};
use kana_freq::export::write_inventory_file;
use kana_freq::merge::{MergeOptions, merge_tables};
use kana_freq::table::read_freq_table;

#[derive(Parser)]
#[command(author, version, about = "Merge unigram and digraph tables into a ranked inventory", long_about = None)]
struct Args {
    /// Unigram table (count \t unit [\t order])
    #[arg(long)]
    unigrams: PathBuf,

    /// Digraph table in the same format
    #[arg(long)]
    digraphs: PathBuf,

    /// Ranked inventory output path
    #[arg(short, long)]
    output: PathBuf,

    /// Minimum digraph frequency
    #[arg(long, default_value_t = DEFAULT_MIN_FREQUENCY)]
    min_frequency: u64,

    /// Comma-separated units to exclude (defaults to the placeholder
    /// and punctuation glyphs)
    #[arg(long, value_delimiter = ',')]
    exclude: Option<Vec<String>>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let (unigrams, unigram_report) =
        read_freq_table(&args.unigrams).context("reading unigram table")?;
    let (digraphs, digraph_report) =
        read_freq_table(&args.digraphs).context("reading digraph table")?;
    info!(
        "read {} unigram rows ({} skipped), {} digraph rows ({} skipped)",
        unigram_report.rows_kept,
        unigram_report.rows_skipped(),
        digraph_report.rows_kept,
        digraph_report.rows_skipped()
    );

    let opts = MergeOptions {
        min_frequency: args.min_frequency,
        excluded_units: args
            .exclude
            .unwrap_or_else(|| DEFAULT_EXCLUDED_UNITS.iter().map(|s| s.to_string()).collect())
            .into_iter()
            .collect(),
    };

    let (inventory, report) = merge_tables(&unigrams, &digraphs, &opts);
    info!(
        "merged {} units ({} excluded, {} reserved, {} uncontracted, {} below threshold)",
        inventory.len(),
        report.excluded,
        report.reserved_small_kana,
        report.uncontracted,
        report.below_threshold
    );
    if !report.conflicts.is_empty() {
        warn!("{} duplicate units resolved first-wins", report.conflicts.len());
    }

    write_inventory_file(&inventory, &args.output).context("writing inventory")?;
    info!("wrote {}", args.output.display());
    Ok(())
}
