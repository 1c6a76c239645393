// Single-player views: career totals, rank history, per-season breakdown.

use std::collections::BTreeMap;

use serde::Serialize;

use super::filter_player;
use crate::dataset::{BattingRecord, BattingTable};
use crate::stats::rank::rank;
use crate::stats::{ratio, Accumulator, Agg, Metric, StatValue, StatsError};

/// One player's aggregated line, metrics in request order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareerSummary {
    pub player: String,
    pub values: Vec<(Metric, StatValue)>,
}

impl CareerSummary {
    pub fn get(&self, metric: Metric) -> Option<StatValue> {
        self.values
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, v)| *v)
    }
}

/// Reduce `metric` over `rows`: summable metrics are summed, `Avg` and `SR`
/// are recomputed from the summed counts, everything else takes its max.
fn reduce_rows(rows: &[&BattingRecord], metric: Metric) -> StatValue {
    let sum = |m: Metric| -> u64 {
        rows.iter()
            .filter_map(|r| r.value(m).as_count())
            .sum()
    };
    match metric {
        Metric::Average => {
            let dismissals = sum(Metric::Innings).saturating_sub(sum(Metric::NotOuts));
            ratio(sum(Metric::Runs), dismissals, 1.0)
        }
        Metric::StrikeRate => ratio(sum(Metric::Runs), sum(Metric::BallsFaced), 100.0),
        m => {
            let agg = if m.is_summable() { Agg::Sum } else { Agg::Max };
            let mut acc = Accumulator::new(agg);
            for r in rows {
                acc.push(r.value(m));
            }
            acc.finish()
        }
    }
}

/// Career line for `player`.
///
/// `Avg = round(Runs / (Inns - NO), 2)` and `SR = round(Runs / BF * 100, 2)`
/// are derived from the career totals; a zero denominator yields `Missing`.
pub fn aggregate_player_career(
    table: &BattingTable,
    player: &str,
    metrics: &[Metric],
) -> Result<CareerSummary, StatsError> {
    let subset = filter_player(table, player)?;
    let rows: Vec<&BattingRecord> = subset.iter().collect();

    let mut values: Vec<(Metric, StatValue)> = Vec::with_capacity(metrics.len());
    for &metric in metrics {
        if values.iter().any(|(m, _)| *m == metric) {
            continue;
        }
        values.push((metric, reduce_rows(&rows, metric)));
    }
    Ok(CareerSummary {
        player: player.to_string(),
        values,
    })
}

/// Where a player stands on a metric's per-season dense ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankInfo {
    /// The player's most recent season.
    pub latest_year: u16,
    pub latest_rank: Option<u32>,
    /// Best (lowest) rank across seasons, with the first season achieving it.
    pub best: Option<(u32, u16)>,
}

/// Rank in the player's latest season plus their best rank ever.
pub fn current_rank_info(
    table: &BattingTable,
    player: &str,
    metric: Metric,
) -> Result<RankInfo, StatsError> {
    let ranked: Vec<_> = rank(table, metric)
        .into_iter()
        .filter(|r| r.record.player == player)
        .collect();
    let Some(latest_year) = ranked.iter().map(|r| r.record.year).max() else {
        return Err(StatsError::PlayerNotFound(format!("`{player}`")));
    };

    let latest_rank = ranked
        .iter()
        .find(|r| r.record.year == latest_year)
        .and_then(|r| r.rank);

    let mut best: Option<(u32, u16)> = None;
    for r in &ranked {
        let Some(rank) = r.rank else { continue };
        if best.map_or(true, |(b, _)| rank < b) {
            best = Some((rank, r.record.year));
        }
    }

    Ok(RankInfo {
        latest_year,
        latest_rank,
        best,
    })
}

/// A player's value for one season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonValue {
    pub year: u16,
    pub value: StatValue,
}

/// Per-season values of `metric` for `player`, ascending by year.
///
/// Multiple stints in a season collapse the same way a career does.
pub fn season_breakdown(
    table: &BattingTable,
    player: &str,
    metric: Metric,
) -> Result<Vec<SeasonValue>, StatsError> {
    let subset = filter_player(table, player)?;
    let mut by_year: BTreeMap<u16, Vec<&BattingRecord>> = BTreeMap::new();
    for r in &subset {
        by_year.entry(r.year).or_default().push(r);
    }
    Ok(by_year
        .into_iter()
        .map(|(year, rows)| SeasonValue {
            year,
            value: reduce_rows(&rows, metric),
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
