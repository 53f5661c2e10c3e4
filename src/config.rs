use crate::compose::ComposeOptions;
use crate::constants::{
    ARTIFACT_CONST_NAME, ARTIFACT_UNITS_PER_LINE, DEFAULT_EXCLUDED_UNITS, DEFAULT_MIN_FREQUENCY,
    DEFAULT_SUPPLEMENTAL_UNITS, DEFAULT_TARGET_SIZE, DEFAULT_TIER_CAPACITIES, DEFAULT_TIER_WEIGHTS,
};
use crate::error::{KanaFreqError, Result};
use crate::merge::MergeOptions;
use crate::tiers::TierSpec;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// メイン設定構造体
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub compose: ComposeConfig,
    #[serde(default = "default_tiers")]
    pub tiers: Vec<TierSpec>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    /// 1gramテーブル（count\tunit[\torder]）
    pub unigram_table: PathBuf,
    /// 拗音2gramテーブル
    pub digraph_table: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Ranked-inventory TSV consumed by downstream tooling
    pub inventory: PathBuf,
    /// Generated Rust constant compiled into the layout crate
    pub artifact: PathBuf,
    /// Per-tier statistics report (JSON)
    pub report: PathBuf,
    #[serde(default = "default_artifact_const")]
    pub artifact_const: String,
    #[serde(default = "default_units_per_line")]
    pub units_per_line: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilterConfig {
    #[serde(default = "default_min_frequency")]
    pub min_frequency: u64,
    #[serde(default = "default_excluded_units")]
    pub excluded_units: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ComposeConfig {
    #[serde(default = "default_target_size")]
    pub target_size: usize,
    #[serde(default = "default_supplemental_units")]
    pub supplemental_units: Vec<String>,
}

fn default_artifact_const() -> String {
    ARTIFACT_CONST_NAME.to_string()
}

fn default_units_per_line() -> usize {
    ARTIFACT_UNITS_PER_LINE
}

fn default_min_frequency() -> u64 {
    DEFAULT_MIN_FREQUENCY
}

fn default_excluded_units() -> Vec<String> {
    DEFAULT_EXCLUDED_UNITS.iter().map(|s| s.to_string()).collect()
}

fn default_target_size() -> usize {
    DEFAULT_TARGET_SIZE
}

fn default_supplemental_units() -> Vec<String> {
    DEFAULT_SUPPLEMENTAL_UNITS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_tiers() -> Vec<TierSpec> {
    DEFAULT_TIER_CAPACITIES
        .iter()
        .zip(DEFAULT_TIER_WEIGHTS.iter())
        .map(|(&capacity, &weight)| TierSpec { capacity, weight })
        .collect()
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_frequency: default_min_frequency(),
            excluded_units: default_excluded_units(),
        }
    }
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            target_size: default_target_size(),
            supplemental_units: default_supplemental_units(),
        }
    }
}

impl Config {
    /// 設定ファイルから読み込み
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            KanaFreqError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            KanaFreqError::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// 設定の検証
    pub fn validate(&self) -> Result<()> {
        if self.compose.target_size == 0 {
            return Err(KanaFreqError::Config(
                "target_size must be greater than 0".to_string(),
            ));
        }

        if self.tiers.is_empty() {
            return Err(KanaFreqError::Config("tier table is empty".to_string()));
        }
        for (i, tier) in self.tiers.iter().enumerate() {
            if tier.weight <= 0.0 {
                return Err(KanaFreqError::Config(format!(
                    "tier {} has non-positive weight {}",
                    i, tier.weight
                )));
            }
        }

        let total_capacity: usize = self.tiers.iter().map(|t| t.capacity).sum();
        if total_capacity < self.compose.target_size {
            return Err(KanaFreqError::Config(format!(
                "total tier capacity {} cannot hold target size {}",
                total_capacity, self.compose.target_size
            )));
        }

        if self.output.units_per_line == 0 {
            return Err(KanaFreqError::Config(
                "units_per_line must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            min_frequency: self.filter.min_frequency,
            excluded_units: self.filter.excluded_units.iter().cloned().collect(),
        }
    }

    pub fn compose_options(&self) -> ComposeOptions {
        ComposeOptions {
            target_size: self.compose.target_size,
            supplemental_units: self.compose.supplemental_units.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn minimal_toml() -> String {
        r#"
[input]
unigram_table = "data/1gram.txt"
digraph_table = "data/2gram.txt"

[output]
inventory = "out/final_freq.txt"
artifact = "out/hiragana_freq.rs"
report = "out/tiers.json"
"#
        .to_string()
    }

    #[test]
    fn test_load_minimal_config_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(minimal_toml().as_bytes()).unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.filter.min_frequency, DEFAULT_MIN_FREQUENCY);
        assert_eq!(config.compose.target_size, DEFAULT_TARGET_SIZE);
        assert_eq!(config.tiers.len(), DEFAULT_TIER_CAPACITIES.len());
        assert_eq!(config.output.artifact_const, ARTIFACT_CONST_NAME);
        assert_eq!(
            config.filter.excluded_units,
            vec!["〓", "、", "。", "；", "・"]
        );
    }

    #[test]
    fn test_default_tier_table_holds_default_target() {
        let total: usize = default_tiers().iter().map(|t| t.capacity).sum();
        assert!(total >= DEFAULT_TARGET_SIZE);
    }

    #[test]
    fn test_explicit_tier_table() {
        let mut file = NamedTempFile::new().unwrap();
        let toml = format!(
            "{}\n[compose]\ntarget_size = 4\n\n[[tiers]]\ncapacity = 2\nweight = 1.0\n\n[[tiers]]\ncapacity = 2\nweight = 2.0\n",
            minimal_toml()
        );
        file.write_all(toml.as_bytes()).unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.tiers.len(), 2);
        assert_eq!(config.compose.target_size, 4);
    }

    #[test]
    fn test_validate_rejects_zero_target() {
        let mut file = NamedTempFile::new().unwrap();
        let toml = format!("{}\n[compose]\ntarget_size = 0\n", minimal_toml());
        file.write_all(toml.as_bytes()).unwrap();
        assert!(Config::load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_weight() {
        let mut file = NamedTempFile::new().unwrap();
        let toml = format!(
            "{}\n[compose]\ntarget_size = 1\n\n[[tiers]]\ncapacity = 5\nweight = 0.0\n",
            minimal_toml()
        );
        file.write_all(toml.as_bytes()).unwrap();
        assert!(Config::load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_validate_rejects_undersized_tier_table() {
        let mut file = NamedTempFile::new().unwrap();
        let toml = format!(
            "{}\n[compose]\ntarget_size = 10\n\n[[tiers]]\ncapacity = 4\nweight = 1.0\n",
            minimal_toml()
        );
        file.write_all(toml.as_bytes()).unwrap();
        assert!(Config::load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::load_from_file(Path::new("no_such_config.toml"));
        assert!(matches!(result, Err(KanaFreqError::Config(_))));
    }
}
