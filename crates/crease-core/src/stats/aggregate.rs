// Season and whole-table aggregates: current year, leaderboards, totals.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use super::{check_agg, Accumulator, Agg, Metric, StatValue, StatsError};
use crate::dataset::BattingTable;

/// A player's reduced value for one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerTotal {
    pub player: String,
    pub value: StatValue,
}

/// A labelled headline figure such as `"Total 6s"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelledStat {
    pub label: String,
    pub value: StatValue,
}

/// Latest season present in the table.
pub fn current_year(table: &BattingTable) -> Result<u16, StatsError> {
    table
        .iter()
        .map(|r| r.year)
        .max()
        .ok_or(StatsError::EmptyTable)
}

/// Rows of `year`, or of the latest season when `year` is `None`.
pub fn subset_for_year(
    table: &BattingTable,
    year: Option<u16>,
) -> Result<BattingTable, StatsError> {
    let year = match year {
        Some(y) => y,
        None => current_year(table)?,
    };
    Ok(table.filtered(|r| r.year == year))
}

/// Group rows by player (first-appearance order) and reduce `metric`.
pub(crate) fn group_by_player(table: &BattingTable, metric: Metric, agg: Agg) -> Vec<PlayerTotal> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Accumulator)> = Vec::new();
    for r in table {
        let slot = *index.entry(r.player.as_str()).or_insert_with(|| {
            groups.push((r.player.as_str(), Accumulator::new(agg)));
            groups.len() - 1
        });
        groups[slot].1.push(r.value(metric));
    }
    groups
        .into_iter()
        .map(|(player, acc)| PlayerTotal {
            player: player.to_string(),
            value: acc.finish(),
        })
        .collect()
}

/// Current-season leaderboard for `metric`, highest first.
///
/// The sort is stable, so tied players keep the order in which they first
/// appear in the table.
pub fn aggregate_by_player(
    table: &BattingTable,
    metric: Metric,
    agg: Agg,
) -> Result<Vec<PlayerTotal>, StatsError> {
    check_agg(metric, agg)?;
    let season = subset_for_year(table, None)?;
    let mut totals = group_by_player(&season, metric, agg);
    totals.sort_by(|a, b| a.value.cmp_desc(&b.value));
    Ok(totals)
}

/// The first `n` names of the current-season leaderboard.
///
/// Returns exactly `min(n, players)` names.
pub fn top_players(
    table: &BattingTable,
    n: usize,
    metric: Metric,
    agg: Agg,
) -> Result<Vec<String>, StatsError> {
    Ok(aggregate_by_player(table, metric, agg)?
        .into_iter()
        .take(n)
        .map(|t| t.player)
        .collect())
}

/// Reduce `metric` over every row of the table (all seasons).
pub fn aggregate_metric(
    table: &BattingTable,
    metric: Metric,
    agg: Agg,
) -> Result<StatValue, StatsError> {
    check_agg(metric, agg)?;
    let mut acc = Accumulator::new(agg);
    for r in table {
        acc.push(r.value(metric));
    }
    Ok(acc.finish())
}

/// Number of distinct players across all seasons.
pub fn total_capped_players(table: &BattingTable) -> usize {
    table
        .iter()
        .map(|r| r.player.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Headline figures for the requested metrics.
///
/// Summable metrics become `"Total {metric}"` in request order. `HS` and
/// `SR` add their maxima at the end; other non-summable metrics are skipped.
pub fn aggregate_metrics(table: &BattingTable, metrics: &[Metric]) -> Vec<LabelledStat> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    for &metric in metrics {
        if !metric.is_summable() || !seen.insert(metric) {
            continue;
        }
        let mut acc = Accumulator::new(Agg::Sum);
        for r in table {
            acc.push(r.value(metric));
        }
        out.push(LabelledStat {
            label: format!("Total {metric}"),
            value: acc.finish(),
        });
    }

    let extremes = [
        (Metric::HighestScore, "Highest Individual Score"),
        (Metric::StrikeRate, "Highest Strike Rate"),
    ];
    for (metric, label) in extremes {
        if !metrics.contains(&metric) {
            continue;
        }
        let mut acc = Accumulator::new(Agg::Max);
        for r in table {
            acc.push(r.value(metric));
        }
        out.push(LabelledStat {
            label: label.to_string(),
            value: acc.finish(),
        });
    }
    out
}

/// Current-season run-scorers keyed by 1-based position.
pub fn top_batters_as_ranked_map(
    table: &BattingTable,
    n: usize,
) -> Result<BTreeMap<usize, String>, StatsError> {
    Ok(top_players(table, n, Metric::Runs, Agg::Sum)?
        .into_iter()
        .enumerate()
        .map(|(idx, name)| (idx + 1, name))
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
