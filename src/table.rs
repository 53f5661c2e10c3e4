use crate::error::{KanaFreqError, Result};

use csv::{ReaderBuilder, StringRecord, Trim};
use log::warn;
use std::io::Read;
use std::path::Path;

/// One row of a frequency table: a 1- or 2-codepoint unit with its
/// corpus count. `order` always equals the unit's codepoint count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyEntry {
    pub unit: String,
    pub count: u64,
    pub order: u8,
}

impl FrequencyEntry {
    pub fn new(unit: impl Into<String>, count: u64) -> Self {
        let unit = unit.into();
        let order = unit.chars().count() as u8;
        Self { unit, count, order }
    }
}

/// Frequency entries in rank order.
///
/// Invariants: units are unique; every entry with `count > 0` precedes
/// every entry with `count == 0`; within each group entries descend by
/// `count`, ties broken lexicographically by unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedInventory {
    entries: Vec<FrequencyEntry>,
}

impl RankedInventory {
    /// Sorts the given entries into rank order. Uniqueness is the
    /// caller's responsibility (the merger deduplicates before ranking).
    pub fn from_entries(mut entries: Vec<FrequencyEntry>) -> Self {
        entries.sort_by(|a, b| {
            (a.count == 0)
                .cmp(&(b.count == 0))
                .then_with(|| b.count.cmp(&a.count))
                .then_with(|| a.unit.cmp(&b.unit))
        });
        Self { entries }
    }

    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FrequencyEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<FrequencyEntry> {
        self.entries
    }
}

/// Why a row was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowIssue {
    MissingFields { got: usize },
    EmptyUnit,
    InvalidCount { value: String },
    OrderMismatch { declared: String },
}

impl std::fmt::Display for RowIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowIssue::MissingFields { got } => {
                write!(f, "expected at least 2 fields, got {}", got)
            }
            RowIssue::EmptyUnit => write!(f, "empty unit field"),
            RowIssue::InvalidCount { value } => write!(f, "invalid count '{}'", value),
            RowIssue::OrderMismatch { declared } => {
                write!(f, "order field '{}' does not match unit length", declared)
            }
        }
    }
}

/// Per-run record of what the reader saw. Malformed rows are collected
/// here instead of aborting the stage.
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub issues: Vec<(usize, RowIssue)>,
}

impl ParseReport {
    pub fn rows_skipped(&self) -> usize {
        self.issues.len()
    }
}

/// Reads a tab-separated frequency table (`count \t unit [\t order]`).
///
/// Blank lines are ignored. Malformed rows are skipped with a warning
/// and recorded in the returned [`ParseReport`]; only stream-level
/// failures are errors.
///
/// # Errors
/// Returns [`KanaFreqError::MissingInput`] if the file does not exist,
/// otherwise I/O or CSV stream errors.
pub fn read_freq_table<P: AsRef<Path>>(path: P) -> Result<(Vec<FrequencyEntry>, ParseReport)> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(KanaFreqError::MissingInput {
            path: path.to_path_buf(),
        });
    }
    let file = std::fs::File::open(path)?;
    read_freq_from_reader(file)
}

pub fn read_freq_from_reader<R: Read>(reader: R) -> Result<(Vec<FrequencyEntry>, ParseReport)> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .trim(Trim::All)
        .flexible(true) // rows may or may not carry the order field
        .from_reader(reader);

    let mut entries = Vec::new();
    let mut report = ParseReport::default();

    for (i, result) in rdr.records().enumerate() {
        let rec = result?;
        let row = i + 1;

        if rec.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        report.rows_read += 1;

        match parse_record(&rec) {
            Ok(entry) => {
                report.rows_kept += 1;
                entries.push(entry);
            }
            Err(issue) => {
                warn!("skipping row {}: {}", row, issue);
                report.issues.push((row, issue));
            }
        }
    }

    Ok((entries, report))
}

fn parse_record(rec: &StringRecord) -> std::result::Result<FrequencyEntry, RowIssue> {
    if rec.len() < 2 {
        return Err(RowIssue::MissingFields { got: rec.len() });
    }

    let count_str = rec.get(0).unwrap_or("").trim();
    let unit = rec.get(1).unwrap_or("").trim();

    if unit.is_empty() {
        return Err(RowIssue::EmptyUnit);
    }

    let count: u64 = count_str.parse().map_err(|_| RowIssue::InvalidCount {
        value: count_str.to_string(),
    })?;

    let entry = FrequencyEntry::new(unit, count);

    // A present order field is informational but must agree with the unit.
    if let Some(declared) = rec.get(2).map(str::trim)
        && !declared.is_empty()
        && declared.parse::<u8>() != Ok(entry.order)
    {
        return Err(RowIssue::OrderMismatch {
            declared: declared.to_string(),
        });
    }

    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_two_and_three_column_rows() {
        let data = "1200\tい\n800\tきゃ\t2\n";
        let (entries, report) = read_freq_from_reader(data.as_bytes()).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], FrequencyEntry::new("い", 1200));
        assert_eq!(entries[1].order, 2);
        assert_eq!(report.rows_read, 2);
        assert_eq!(report.rows_kept, 2);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_blank_lines_ignored() {
        let data = "10\tあ\n\n\n5\tか\n";
        let (entries, report) = read_freq_from_reader(data.as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(report.rows_read, 2);
    }

    #[test]
    fn test_malformed_rows_skipped_not_fatal() {
        let data = "10\tあ\nabc\tか\n7\n8\t\n3\tきゃ\t9\n5\tん\n";
        let (entries, report) = read_freq_from_reader(data.as_bytes()).unwrap();

        let units: Vec<&str> = entries.iter().map(|e| e.unit.as_str()).collect();
        assert_eq!(units, ["あ", "ん"]);
        assert_eq!(report.rows_skipped(), 4);
        assert_eq!(report.issues[0].1, RowIssue::InvalidCount { value: "abc".into() });
        assert_eq!(report.issues[1].1, RowIssue::MissingFields { got: 1 });
        assert_eq!(report.issues[2].1, RowIssue::EmptyUnit);
        assert_eq!(report.issues[3].1, RowIssue::OrderMismatch { declared: "9".into() });
    }

    #[test]
    fn test_missing_input_file() {
        let result = read_freq_table("no_such_table.txt");
        assert!(matches!(
            result,
            Err(KanaFreqError::MissingInput { .. })
        ));
    }

    #[test]
    fn test_entry_order_matches_codepoints() {
        assert_eq!(FrequencyEntry::new("あ", 1).order, 1);
        assert_eq!(FrequencyEntry::new("きゃ", 1).order, 2);
    }

    #[test]
    fn test_rank_order() {
        let inv = RankedInventory::from_entries(vec![
            FrequencyEntry::new("ぃ", 0),
            FrequencyEntry::new("か", 50),
            FrequencyEntry::new("ぁ", 0),
            FrequencyEntry::new("い", 100),
            FrequencyEntry::new("あ", 50),
        ]);
        let units: Vec<&str> = inv.iter().map(|e| e.unit.as_str()).collect();
        // positive counts descending (ties lexicographic), zeros last
        assert_eq!(units, ["い", "あ", "か", "ぁ", "ぃ"]);
    }
}
