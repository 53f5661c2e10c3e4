use crate::constants::{
    KATAKANA_SMALL_MARKERS, KATAKANA_YOON_MARKERS, SMALL_A_MARKERS, SMALL_HIRAGANA,
    SMALL_KATAKANA, SMALL_WA_MARKERS, YOON_MARKERS,
};
use strum_macros::{Display, EnumIter};

/// Classification of an input unit (1 or 2 codepoints).
///
/// Digraph categories describe the second codepoint of a two-codepoint
/// unit; the five contracted categories together form the set of
/// digraphs that are typed as one indivisible unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Category {
    /// Ordinary single kana or other single codepoint
    PlainUnigram,
    /// Small kana on its own (ぁ, ゃ, ァ, ...) - reserved for digraph tails
    SmallKanaUnigram,
    /// や行拗音 (second codepoint ゃゅょ)
    Yoon,
    /// 小書きあ行 (second codepoint ぁぃぅぇぉ)
    SmallA,
    /// 小書きわ (second codepoint ゎ)
    SmallWa,
    /// カタカナ拗音 (second codepoint ャュョ)
    KatakanaYoon,
    /// 小書きカタカナ (second codepoint ァィゥェォヮ)
    SmallKatakana,
    /// Anything else (empty, 3+ codepoints, non-contracted digraphs)
    Other,
}

impl Category {
    /// True for the digraph categories whose second codepoint marks a
    /// phonetic contraction. Only these digraphs survive filtering.
    pub fn is_contracted_digraph(self) -> bool {
        matches!(
            self,
            Category::Yoon
                | Category::SmallA
                | Category::SmallWa
                | Category::KatakanaYoon
                | Category::SmallKatakana
        )
    }
}

/// Small kana test used for the unigram reservation rule.
///
/// Note ヵ and ヶ count as small kana here although no digraph category
/// claims them; a digraph ending in either stays `Other`.
pub fn is_small_kana(c: char) -> bool {
    SMALL_HIRAGANA.contains(c) || SMALL_KATAKANA.contains(c)
}

/// Classifies a unit by codepoint count and, for digraphs, its second
/// codepoint only. Total and pure; marker sets are static constants.
pub fn classify(unit: &str) -> Category {
    let mut chars = unit.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(c), None, _) => {
            if is_small_kana(c) {
                Category::SmallKanaUnigram
            } else {
                Category::PlainUnigram
            }
        }
        (Some(_), Some(second), None) => classify_second(second),
        _ => Category::Other,
    }
}

fn classify_second(second: char) -> Category {
    if YOON_MARKERS.contains(second) {
        Category::Yoon
    } else if SMALL_A_MARKERS.contains(second) {
        Category::SmallA
    } else if SMALL_WA_MARKERS.contains(second) {
        Category::SmallWa
    } else if KATAKANA_YOON_MARKERS.contains(second) {
        Category::KatakanaYoon
    } else if KATAKANA_SMALL_MARKERS.contains(second) {
        Category::SmallKatakana
    } else {
        Category::Other
    }
}
