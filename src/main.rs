use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use kana_freq::config::Config;
use kana_freq::export::{write_allocation_report, write_inventory_file, write_static_array};
use kana_freq::table::{ParseReport, read_freq_table};
use kana_freq::{allocate, compose, merge_tables, weighted_cost};

#[derive(Parser)]
#[command(author, version, about = "Curate a kana frequency inventory and placement tiers", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    config: PathBuf,
}

fn log_parse_report(name: &str, report: &ParseReport) {
    info!(
        "{}: {} rows read, {} kept, {} skipped",
        name,
        report.rows_read,
        report.rows_kept,
        report.rows_skipped()
    );
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = Config::load_from_file(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;

    // 1gram / 拗音2gram テーブル読み込み
    let (unigrams, unigram_report) =
        read_freq_table(&config.input.unigram_table).context("reading unigram table")?;
    log_parse_report("unigram table", &unigram_report);

    let (digraphs, digraph_report) =
        read_freq_table(&config.input.digraph_table).context("reading digraph table")?;
    log_parse_report("digraph table", &digraph_report);

    // マージ・フィルタリング
    let (merged, merge_report) = merge_tables(&unigrams, &digraphs, &config.merge_options());
    info!(
        "merged inventory: {} units ({} excluded, {} reserved, {} uncontracted, {} below threshold, {} conflicts)",
        merged.len(),
        merge_report.excluded,
        merge_report.reserved_small_kana,
        merge_report.uncontracted,
        merge_report.below_threshold,
        merge_report.conflicts.len()
    );

    // 目標サイズへの合成
    let (inventory, compose_report) =
        compose(&merged, &config.compose_options()).context("compose stage")?;
    info!(
        "composed {} units (residual {} of {} optional digraphs)",
        inventory.len(),
        compose_report.residual,
        compose_report.optional_pool
    );

    // 層割り当て
    let tiers = allocate(&inventory, &config.tiers).context("allocate stage")?;
    for tier in &tiers {
        let stats = tier.stats();
        info!(
            "tier {} (weight {}): {}/{} units, counts {} - {}, total {}",
            tier.index,
            tier.weight,
            stats.members,
            tier.capacity,
            stats.min_count,
            stats.max_count,
            stats.total_count
        );
    }
    info!("total weighted cost: {:.1}", weighted_cost(&tiers));

    // 出力（すべてアトミック書き込み）
    write_inventory_file(&inventory, &config.output.inventory).context("writing inventory")?;
    info!("wrote {}", config.output.inventory.display());

    write_static_array(
        &inventory,
        &config.output.artifact_const,
        config.output.units_per_line,
        &config.output.artifact,
    )
    .context("writing artifact")?;
    info!("wrote {}", config.output.artifact.display());

    write_allocation_report(&tiers, &config.output.report).context("writing report")?;
    info!("wrote {}", config.output.report.display());

    Ok(())
}
