pub mod compose;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod kana;
pub mod merge;
pub mod table;
pub mod tiers;

pub use compose::{ComposeOptions, ComposeReport, compose};
pub use config::Config;
pub use error::{KanaFreqError, Result};
pub use export::{write_allocation_report, write_inventory_file, write_static_array};
pub use kana::{Category, classify};
pub use merge::{MergeOptions, MergeReport, merge_tables};
pub use table::{FrequencyEntry, ParseReport, RankedInventory, read_freq_table};
pub use tiers::{Tier, TierSpec, TierStats, allocate, weighted_cost};
