// Batting dataset: record types, the shared table, and the load/clean pipeline.

pub mod cache;
pub mod clean;
pub mod loader;

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::stats::{Metric, StatValue};
pub use clean::{CleanError, HighestScore};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("source file not found: {path}")]
    MissingSource { path: PathBuf },

    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error(transparent)]
    Parse(#[from] CleanError),

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Raw rows (as read from the season files)
// ---------------------------------------------------------------------------

/// One row of a season file before cleaning. `HS` and `Avg` keep their raw
/// text because the files mark unbeaten scores with `*` and undefined
/// averages with `-`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawBattingRecord {
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(skip)]
    pub year: u16,
    #[serde(rename = "POS")]
    pub position: u32,
    #[serde(rename = "Mat", default)]
    pub matches: u32,
    #[serde(rename = "Inns")]
    pub innings: u32,
    #[serde(rename = "NO")]
    pub not_outs: u32,
    #[serde(rename = "Runs")]
    pub runs: u32,
    #[serde(rename = "HS")]
    pub highest_score: String,
    #[serde(rename = "Avg")]
    pub average: String,
    #[serde(rename = "BF")]
    pub balls_faced: u32,
    #[serde(rename = "SR")]
    pub strike_rate: f64,
    #[serde(rename = "100")]
    pub hundreds: u32,
    #[serde(rename = "50")]
    pub fifties: u32,
    #[serde(rename = "4s")]
    pub fours: u32,
    #[serde(rename = "6s")]
    pub sixes: u32,
}

/// All raw rows of every configured season, in load order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub rows: Vec<RawBattingRecord>,
}

// ---------------------------------------------------------------------------
// Cleaned records
// ---------------------------------------------------------------------------

/// One player's batting for one season (one team stint).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattingRecord {
    pub player: String,
    pub year: u16,
    pub position: u32,
    pub matches: u32,
    pub innings: u32,
    pub not_outs: u32,
    pub runs: u32,
    pub highest_score: u32,
    /// Whether the highest score was an unbeaten innings.
    pub not_out_at_highest: bool,
    /// `None` when the source had no valid average (no dismissals).
    pub average: Option<f64>,
    pub balls_faced: u32,
    pub strike_rate: f64,
    pub hundreds: u32,
    pub fifties: u32,
    pub fours: u32,
    pub sixes: u32,
}

impl BattingRecord {
    /// Read one metric from this row.
    pub fn value(&self, metric: Metric) -> StatValue {
        let count = |v: u32| StatValue::Count(u64::from(v));
        match metric {
            Metric::Position => count(self.position),
            Metric::Matches => count(self.matches),
            Metric::Innings => count(self.innings),
            Metric::NotOuts => count(self.not_outs),
            Metric::Runs => count(self.runs),
            Metric::HighestScore => count(self.highest_score),
            Metric::Average => self.average.map_or(StatValue::Missing, StatValue::Rate),
            Metric::BallsFaced => count(self.balls_faced),
            Metric::StrikeRate => StatValue::Rate(self.strike_rate),
            Metric::Hundreds => count(self.hundreds),
            Metric::Fifties => count(self.fifties),
            Metric::Fours => count(self.fours),
            Metric::Sixes => count(self.sixes),
            Metric::Year => StatValue::Count(u64::from(self.year)),
        }
    }

    /// The `"*"` / `""` flag shown next to the highest score.
    pub fn not_out_marker(&self) -> &'static str {
        if self.not_out_at_highest {
            "*"
        } else {
            ""
        }
    }

    /// Re-encode this row the way the season files spell it.
    pub fn to_raw(&self) -> RawBattingRecord {
        let highest = HighestScore {
            runs: self.highest_score,
            not_out: self.not_out_at_highest,
        };
        RawBattingRecord {
            player: self.player.clone(),
            year: self.year,
            position: self.position,
            matches: self.matches,
            innings: self.innings,
            not_outs: self.not_outs,
            runs: self.runs,
            highest_score: highest.to_string(),
            average: clean::format_average(self.average),
            balls_faced: self.balls_faced,
            strike_rate: self.strike_rate,
            hundreds: self.hundreds,
            fifties: self.fifties,
            fours: self.fours,
            sixes: self.sixes,
        }
    }
}

// ---------------------------------------------------------------------------
// BattingTable
// ---------------------------------------------------------------------------

/// The cleaned, in-memory session table. Row order is load order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BattingTable {
    records: Vec<BattingRecord>,
}

impl BattingTable {
    pub fn new(records: Vec<BattingRecord>) -> Self {
        BattingTable { records }
    }

    pub fn records(&self) -> &[BattingRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BattingRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Copy of the rows matching `pred`, order preserved.
    pub fn filtered<F>(&self, mut pred: F) -> BattingTable
    where
        F: FnMut(&BattingRecord) -> bool,
    {
        self.records.iter().filter(|r| pred(r)).cloned().collect()
    }

    /// Distinct seasons present, ascending.
    pub fn years(&self) -> Vec<u16> {
        let mut years: Vec<u16> = self
            .records
            .iter()
            .map(|r| r.year)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        years.sort_unstable();
        years
    }

    pub fn to_raw(&self) -> RawTable {
        RawTable {
            rows: self.records.iter().map(BattingRecord::to_raw).collect(),
        }
    }
}

impl FromIterator<BattingRecord> for BattingTable {
    fn from_iter<I: IntoIterator<Item = BattingRecord>>(iter: I) -> Self {
        BattingTable::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a BattingTable {
    type Item = &'a BattingRecord;
    type IntoIter = std::slice::Iter<'a, BattingRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ---------------------------------------------------------------------------
// Test support
// ---------------------------------------------------------------------------

/// Build a record with every stat zeroed; tests fill in what they need.
#[cfg(test)]
pub(crate) fn record(player: &str, year: u16) -> BattingRecord {
    BattingRecord {
        player: player.to_string(),
        year,
        position: 0,
        matches: 0,
        innings: 0,
        not_outs: 0,
        runs: 0,
        highest_score: 0,
        not_out_at_highest: false,
        average: None,
        balls_faced: 0,
        strike_rate: 0.0,
        hundreds: 0,
        fifties: 0,
        fours: 0,
        sixes: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_reads_each_metric() {
        let mut r = record("Virat Kohli", 2016);
        r.runs = 973;
        r.highest_score = 113;
        r.average = Some(81.08);
        r.strike_rate = 152.03;
        r.sixes = 38;

        assert_eq!(r.value(Metric::Runs), StatValue::Count(973));
        assert_eq!(r.value(Metric::HighestScore), StatValue::Count(113));
        assert_eq!(r.value(Metric::Average), StatValue::Rate(81.08));
        assert_eq!(r.value(Metric::StrikeRate), StatValue::Rate(152.03));
        assert_eq!(r.value(Metric::Sixes), StatValue::Count(38));
        assert_eq!(r.value(Metric::Year), StatValue::Count(2016));
    }

    #[test]
    fn missing_average_reads_as_missing() {
        let r = record("Tail Ender", 2020);
        assert_eq!(r.value(Metric::Average), StatValue::Missing);
    }

    #[test]
    fn not_out_marker_values() {
        let mut r = record("A", 2017);
        assert_eq!(r.not_out_marker(), "");
        r.not_out_at_highest = true;
        assert_eq!(r.not_out_marker(), "*");
    }

    #[test]
    fn years_are_distinct_and_sorted() {
        let table: BattingTable = [
            record("A", 2018),
            record("B", 2016),
            record("C", 2018),
            record("D", 2017),
        ]
        .into_iter()
        .collect();
        assert_eq!(table.years(), vec![2016, 2017, 2018]);
    }

    #[test]
    fn to_raw_encodes_markers() {
        let mut r = record("A", 2017);
        r.highest_score = 75;
        r.not_out_at_highest = true;
        let raw = r.to_raw();
        assert_eq!(raw.highest_score, "75*");
        assert_eq!(raw.average, "-");
    }
}
