// Aggregation engine: metric model, reductions, leaderboards and ranking.

pub mod aggregate;
pub mod rank;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatsError {
    #[error("unknown metric `{0}`")]
    UnknownMetric(String),

    #[error("unknown aggregation `{0}` (expected `sum` or `max`)")]
    UnknownAgg(String),

    #[error("metric `{0}` cannot be summed across appearances")]
    NotSummable(Metric),

    #[error("none of the requested columns exist: {0:?}")]
    NoMatchingColumns(Vec<String>),

    #[error("no rows for player(s) {0}")]
    PlayerNotFound(String),

    #[error("no player names match `{0}`")]
    NoSearchMatches(String),

    #[error("the batting table is empty")]
    EmptyTable,
}

impl StatsError {
    /// True for the errors a caller is expected to recover from by falling
    /// back to a default player or query.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StatsError::PlayerNotFound(_) | StatsError::NoSearchMatches(_)
        )
    }
}

// ---------------------------------------------------------------------------
// Metric
// ---------------------------------------------------------------------------

/// A numeric column of the batting table, named as in the source files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Metric {
    #[serde(rename = "POS")]
    Position,
    #[serde(rename = "Mat")]
    Matches,
    #[serde(rename = "Inns")]
    Innings,
    #[serde(rename = "NO")]
    NotOuts,
    #[serde(rename = "Runs")]
    Runs,
    #[serde(rename = "HS")]
    HighestScore,
    #[serde(rename = "Avg")]
    Average,
    #[serde(rename = "BF")]
    BallsFaced,
    #[serde(rename = "SR")]
    StrikeRate,
    #[serde(rename = "100")]
    Hundreds,
    #[serde(rename = "50")]
    Fifties,
    #[serde(rename = "4s")]
    Fours,
    #[serde(rename = "6s")]
    Sixes,
    #[serde(rename = "Year")]
    Year,
}

impl Metric {
    pub const ALL: [Metric; 14] = [
        Metric::Position,
        Metric::Matches,
        Metric::Innings,
        Metric::NotOuts,
        Metric::Runs,
        Metric::HighestScore,
        Metric::Average,
        Metric::BallsFaced,
        Metric::StrikeRate,
        Metric::Hundreds,
        Metric::Fifties,
        Metric::Fours,
        Metric::Sixes,
        Metric::Year,
    ];

    /// Column name used in the source files and in result labels.
    pub fn column_name(self) -> &'static str {
        match self {
            Metric::Position => "POS",
            Metric::Matches => "Mat",
            Metric::Innings => "Inns",
            Metric::NotOuts => "NO",
            Metric::Runs => "Runs",
            Metric::HighestScore => "HS",
            Metric::Average => "Avg",
            Metric::BallsFaced => "BF",
            Metric::StrikeRate => "SR",
            Metric::Hundreds => "100",
            Metric::Fifties => "50",
            Metric::Fours => "4s",
            Metric::Sixes => "6s",
            Metric::Year => "Year",
        }
    }

    /// Counting stats that add up across a player's appearances.
    ///
    /// Everything else (position, highest score, rates, year) only
    /// supports extremum reductions or recomputation from the sums.
    pub fn is_summable(self) -> bool {
        matches!(
            self,
            Metric::Matches
                | Metric::Innings
                | Metric::NotOuts
                | Metric::Runs
                | Metric::BallsFaced
                | Metric::Hundreds
                | Metric::Fifties
                | Metric::Fours
                | Metric::Sixes
        )
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for Metric {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Metric::ALL
            .into_iter()
            .find(|m| m.column_name() == name)
            .ok_or_else(|| StatsError::UnknownMetric(name.to_string()))
    }
}

/// Parse a list of metric names, failing on the first unknown one.
pub fn parse_metrics<S: AsRef<str>>(names: &[S]) -> Result<Vec<Metric>, StatsError> {
    names.iter().map(|n| n.as_ref().parse()).collect()
}

// ---------------------------------------------------------------------------
// Agg
// ---------------------------------------------------------------------------

/// Reduction applied when several rows collapse into one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Agg {
    Sum,
    Max,
}

impl FromStr for Agg {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" => Ok(Agg::Sum),
            "max" => Ok(Agg::Max),
            other => Err(StatsError::UnknownAgg(other.to_string())),
        }
    }
}

impl fmt::Display for Agg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Agg::Sum => f.write_str("sum"),
            Agg::Max => f.write_str("max"),
        }
    }
}

/// Reject a reduction that the summable/non-summable partition forbids.
pub(crate) fn check_agg(metric: Metric, agg: Agg) -> Result<(), StatsError> {
    if agg == Agg::Sum && !metric.is_summable() {
        return Err(StatsError::NotSummable(metric));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// StatValue
// ---------------------------------------------------------------------------

/// A single metric value: an integer count, a floating-point rate, or
/// explicitly missing (never coerced to zero).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Count(u64),
    Rate(f64),
    Missing,
}

impl StatValue {
    pub fn as_f64(self) -> Option<f64> {
        match self {
            StatValue::Count(c) => Some(c as f64),
            StatValue::Rate(r) => Some(r),
            StatValue::Missing => None,
        }
    }

    pub fn as_count(self) -> Option<u64> {
        match self {
            StatValue::Count(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_missing(self) -> bool {
        matches!(self, StatValue::Missing)
    }

    /// Descending order with `Missing` sorted after every present value.
    pub fn cmp_desc(&self, other: &StatValue) -> Ordering {
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => b.total_cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Count(c) => write!(f, "{c}"),
            StatValue::Rate(r) => write!(f, "{r:.2}"),
            StatValue::Missing => f.write_str("-"),
        }
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `numerator / denominator * scale` rounded to two places, or `Missing`
/// when the denominator is zero.
pub fn ratio(numerator: u64, denominator: u64, scale: f64) -> StatValue {
    if denominator == 0 {
        return StatValue::Missing;
    }
    StatValue::Rate(round2(numerator as f64 / denominator as f64 * scale))
}

/// Running reduction over a stream of `StatValue`s.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Accumulator {
    agg: Agg,
    value: StatValue,
}

impl Accumulator {
    pub(crate) fn new(agg: Agg) -> Self {
        let value = match agg {
            Agg::Sum => StatValue::Count(0),
            Agg::Max => StatValue::Missing,
        };
        Accumulator { agg, value }
    }

    pub(crate) fn push(&mut self, next: StatValue) {
        self.value = match (self.agg, self.value, next) {
            (_, acc, StatValue::Missing) => acc,
            (Agg::Sum, StatValue::Count(a), StatValue::Count(b)) => StatValue::Count(a + b),
            // Sums are only requested over counting metrics (see `check_agg`).
            (Agg::Sum, acc, _) => acc,
            (Agg::Max, StatValue::Missing, v) => v,
            (Agg::Max, acc, v) => {
                if v.cmp_desc(&acc) == Ordering::Less {
                    v
                } else {
                    acc
                }
            }
        };
    }

    pub(crate) fn finish(self) -> StatValue {
        self.value
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
