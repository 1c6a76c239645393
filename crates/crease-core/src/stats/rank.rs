// Dense per-season ranking.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{Metric, StatValue};
use crate::dataset::{BattingRecord, BattingTable};

/// A row together with its dense rank within its season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRecord {
    pub record: BattingRecord,
    /// `None` when the row has no value for the ranked metric.
    pub rank: Option<u32>,
}

/// Dense ranks for `values`, highest first. Ties share a rank and the next
/// distinct value gets the following integer.
pub fn dense_rank_desc(values: &[StatValue]) -> Vec<Option<u32>> {
    let mut distinct: Vec<f64> = values.iter().filter_map(|v| v.as_f64()).collect();
    distinct.sort_by(|a, b| b.total_cmp(a));
    distinct.dedup();

    values
        .iter()
        .map(|v| {
            let x = v.as_f64()?;
            let pos = distinct.partition_point(|d| *d > x);
            Some(pos as u32 + 1)
        })
        .collect()
}

/// Copy of the table with a `Rank` per row, computed within each `Year` on
/// `metric` descending. Row order is preserved.
pub fn rank(table: &BattingTable, metric: Metric) -> Vec<RankedRecord> {
    let mut by_year: BTreeMap<u16, Vec<usize>> = BTreeMap::new();
    for (idx, r) in table.iter().enumerate() {
        by_year.entry(r.year).or_default().push(idx);
    }

    let records = table.records();
    let mut ranks: Vec<Option<u32>> = vec![None; records.len()];
    for indices in by_year.values() {
        let values: Vec<StatValue> = indices.iter().map(|&i| records[i].value(metric)).collect();
        for (&i, r) in indices.iter().zip(dense_rank_desc(&values)) {
            ranks[i] = r;
        }
    }

    records
        .iter()
        .cloned()
        .zip(ranks)
        .map(|(record, rank)| RankedRecord { record, rank })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
