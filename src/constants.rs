/// Kana marker sets (second-codepoint tests for contracted digraphs)
pub const SMALL_HIRAGANA: &str = "ぁぃぅぇぉゃゅょゎ";
pub const SMALL_KATAKANA: &str = "ァィゥェォヵヶャュョヮ";
pub const YOON_MARKERS: &str = "ゃゅょ";
pub const SMALL_A_MARKERS: &str = "ぁぃぅぇぉ";
pub const SMALL_WA_MARKERS: &str = "ゎ";
pub const KATAKANA_YOON_MARKERS: &str = "ャュョ";
pub const KATAKANA_SMALL_MARKERS: &str = "ァィゥェォヮ";

/// Filter settings
pub const DEFAULT_MIN_FREQUENCY: u64 = 5;
pub const DEFAULT_EXCLUDED_UNITS: &[&str] = &["〓", "、", "。", "；", "・"]; // 〓 = newline placeholder

/// Composition settings
pub const DEFAULT_TARGET_SIZE: usize = 136;
pub const DEFAULT_SUPPLEMENTAL_UNITS: &[&str] = &["ぁ", "ぃ", "ぅ", "ぇ", "ぉ"];

/// Placement tier table, lowest typing cost first
pub const DEFAULT_TIER_CAPACITIES: [usize; 5] = [24, 28, 28, 28, 28];
pub const DEFAULT_TIER_WEIGHTS: [f64; 5] = [1.0, 2.0, 2.0, 2.3, 2.3];

/// Generated artifact settings
pub const ARTIFACT_CONST_NAME: &str = "HIRAGANA_FREQ_DEFAULT";
pub const ARTIFACT_UNITS_PER_LINE: usize = 10;
