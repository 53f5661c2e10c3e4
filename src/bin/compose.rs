use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use kana_freq::compose::{ComposeOptions, compose};
use kana_freq::constants::{
    ARTIFACT_CONST_NAME, ARTIFACT_UNITS_PER_LINE, DEFAULT_SUPPLEMENTAL_UNITS, DEFAULT_TARGET_SIZE,
};
use kana_freq::export::{write_inventory_file, write_static_array};
use kana_freq::table::{RankedInventory, read_freq_table};

#[derive(Parser)]
#[command(author, version, about = "Compose an exact-size inventory from a merged frequency list", long_about = None)]
struct Args {
    /// Merged ranked inventory (count \t unit \t order)
    #[arg(short, long)]
    input: PathBuf,

    /// Composed inventory output path
    #[arg(short, long)]
    output: PathBuf,

    /// Exact number of units to select
    #[arg(long, default_value_t = DEFAULT_TARGET_SIZE)]
    target_size: usize,

    /// Comma-separated zero-frequency units to add (defaults to the
    /// small vowel kana)
    #[arg(long, value_delimiter = ',')]
    supplement: Option<Vec<String>>,

    /// Also render the rank-order unit array to this path
    #[arg(long)]
    artifact: Option<PathBuf>,

    /// Constant name used in the rendered artifact
    #[arg(long, default_value = ARTIFACT_CONST_NAME)]
    const_name: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let (entries, report) = read_freq_table(&args.input).context("reading merged inventory")?;
    info!(
        "read {} rows ({} skipped)",
        report.rows_kept,
        report.rows_skipped()
    );
    let merged = RankedInventory::from_entries(entries);

    let opts = ComposeOptions {
        target_size: args.target_size,
        supplemental_units: args.supplement.unwrap_or_else(|| {
            DEFAULT_SUPPLEMENTAL_UNITS
                .iter()
                .map(|s| s.to_string())
                .collect()
        }),
    };

    let (inventory, compose_report) = compose(&merged, &opts).context("compose stage")?;
    info!(
        "composed {} units: {} unigrams + {} supplemental + {} yoon + {} of {} optional",
        inventory.len(),
        compose_report.unigrams,
        compose_report.supplemental,
        compose_report.yoon,
        compose_report.residual,
        compose_report.optional_pool
    );

    write_inventory_file(&inventory, &args.output).context("writing inventory")?;
    info!("wrote {}", args.output.display());

    if let Some(artifact) = &args.artifact {
        write_static_array(&inventory, &args.const_name, ARTIFACT_UNITS_PER_LINE, artifact)
            .context("writing artifact")?;
        info!("wrote {}", artifact.display());
    }

    Ok(())
}
