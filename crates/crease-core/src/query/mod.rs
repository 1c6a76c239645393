// Query layer: player filters, column projection, careers and name search.

pub mod career;
pub mod search;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::dataset::{BattingRecord, BattingTable};
use crate::stats::{Metric, StatValue, StatsError};

// ---------------------------------------------------------------------------
// Player filter
// ---------------------------------------------------------------------------

/// Which player(s) a filter keeps.
#[derive(Debug, Clone, Copy)]
pub enum PlayerSelector<'a> {
    /// Exact name match.
    One(&'a str),
    /// Membership in a list of names.
    Many(&'a [String]),
}

impl PlayerSelector<'_> {
    fn matches(&self, name: &str) -> bool {
        match self {
            PlayerSelector::One(n) => *n == name,
            PlayerSelector::Many(names) => names.iter().any(|n| n == name),
        }
    }
}

impl fmt::Display for PlayerSelector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerSelector::One(n) => write!(f, "`{n}`"),
            PlayerSelector::Many(names) => write!(f, "{names:?}"),
        }
    }
}

impl<'a> From<&'a str> for PlayerSelector<'a> {
    fn from(name: &'a str) -> Self {
        PlayerSelector::One(name)
    }
}

impl<'a> From<&'a [String]> for PlayerSelector<'a> {
    fn from(names: &'a [String]) -> Self {
        PlayerSelector::Many(names)
    }
}

/// Rows belonging to the selected player(s).
pub fn filter_player<'a>(
    table: &BattingTable,
    selector: impl Into<PlayerSelector<'a>>,
) -> Result<BattingTable, StatsError> {
    let selector = selector.into();
    let subset = table.filtered(|r| selector.matches(&r.player));
    if subset.is_empty() {
        return Err(StatsError::PlayerNotFound(selector.to_string()));
    }
    Ok(subset)
}

// ---------------------------------------------------------------------------
// Column projection
// ---------------------------------------------------------------------------

/// Label of the unbeaten-highest-score flag column.
pub const NOT_OUT_AT_HIGHEST: &str = "remained NO during HS";

/// A selectable column of the batting table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Player,
    NotOutAtHighest,
    Metric(Metric),
}

impl Column {
    pub fn name(self) -> &'static str {
        match self {
            Column::Player => "Player",
            Column::NotOutAtHighest => NOT_OUT_AT_HIGHEST,
            Column::Metric(m) => m.column_name(),
        }
    }

    fn cell(self, record: &BattingRecord) -> Cell {
        match self {
            Column::Player => Cell::Text(record.player.clone()),
            Column::NotOutAtHighest => Cell::Text(record.not_out_marker().to_string()),
            Column::Metric(m) => Cell::Stat(record.value(m)),
        }
    }
}

impl FromStr for Column {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Player" => Ok(Column::Player),
            NOT_OUT_AT_HIGHEST => Ok(Column::NotOutAtHighest),
            other => other.parse::<Metric>().map(Column::Metric),
        }
    }
}

impl Serialize for Column {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// One cell of a projected table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Stat(StatValue),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(t) => f.write_str(t),
            Cell::Stat(v) => write!(f, "{v}"),
        }
    }
}

/// A table projected onto a subset of columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnView {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Cell>>,
}

impl ColumnView {
    /// Cells of the named column, if it was selected.
    pub fn column(&self, column: Column) -> Option<Vec<&Cell>> {
        let idx = self.columns.iter().position(|c| *c == column)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }
}

/// Project to the requested columns that exist, in request order.
pub fn select_columns<S: AsRef<str>>(
    table: &BattingTable,
    names: &[S],
) -> Result<ColumnView, StatsError> {
    let mut columns: Vec<Column> = Vec::new();
    for name in names {
        if let Ok(column) = name.as_ref().parse::<Column>() {
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
    }
    if columns.is_empty() {
        return Err(StatsError::NoMatchingColumns(
            names.iter().map(|n| n.as_ref().to_string()).collect(),
        ));
    }

    let rows = table
        .iter()
        .map(|r| columns.iter().map(|c| c.cell(r)).collect())
        .collect();
    Ok(ColumnView { columns, rows })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
