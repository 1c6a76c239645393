// Repairs for the two malformed season-file columns.
//
// `HS` carries a trailing `*` when the highest score was unbeaten, and `Avg`
// holds `-` when a player was never dismissed. Both repairs run over every
// row; the first bad value aborts the batch.

use std::fmt;

use tracing::{debug, info};

use super::{BattingRecord, BattingTable, RawBattingRecord, RawTable};

/// Marker appended to an unbeaten highest score.
pub const NOT_OUT_MARKER: char = '*';

/// Placeholder the files use for an undefined average.
pub const MISSING_AVERAGE: &str = "-";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CleanError {
    #[error("invalid HS value `{value}` for {player} ({year})")]
    HighestScore {
        player: String,
        year: u16,
        value: String,
    },

    #[error("invalid Avg value `{value}` for {player} ({year})")]
    Average {
        player: String,
        year: u16,
        value: String,
    },
}

/// A cell that failed to convert during cleaning.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid cell value `{0}`")]
pub struct InvalidCell(pub String);

/// A highest score split into its numeric part and the unbeaten flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighestScore {
    pub runs: u32,
    pub not_out: bool,
}

impl fmt::Display for HighestScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.not_out {
            write!(f, "{}{}", self.runs, NOT_OUT_MARKER)
        } else {
            write!(f, "{}", self.runs)
        }
    }
}

/// Split a raw `HS` cell such as `"75*"` or `"112"`. The numeric part must
/// be a non-negative integer.
pub fn parse_highest_score(raw: &str) -> Result<HighestScore, InvalidCell> {
    let trimmed = raw.trim();
    let (digits, not_out) = match trimmed.strip_suffix(NOT_OUT_MARKER) {
        Some(rest) => (rest.trim_end(), true),
        None => (trimmed, false),
    };
    let runs = digits
        .parse::<u32>()
        .map_err(|_| InvalidCell(raw.to_string()))?;
    Ok(HighestScore { runs, not_out })
}

/// Convert a raw `Avg` cell: `None` for the placeholder, otherwise a finite
/// float.
pub fn parse_average(raw: &str) -> Result<Option<f64>, InvalidCell> {
    let trimmed = raw.trim();
    if trimmed == MISSING_AVERAGE {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(InvalidCell(raw.to_string())),
    }
}

/// Inverse of [`parse_average`].
pub fn format_average(average: Option<f64>) -> String {
    match average {
        Some(v) => v.to_string(),
        None => MISSING_AVERAGE.to_string(),
    }
}

fn clean_row(raw: RawBattingRecord) -> Result<BattingRecord, CleanError> {
    let Ok(hs) = parse_highest_score(&raw.highest_score) else {
        return Err(CleanError::HighestScore {
            player: raw.player,
            year: raw.year,
            value: raw.highest_score,
        });
    };
    let Ok(average) = parse_average(&raw.average) else {
        return Err(CleanError::Average {
            player: raw.player,
            year: raw.year,
            value: raw.average,
        });
    };

    Ok(BattingRecord {
        player: raw.player,
        year: raw.year,
        position: raw.position,
        matches: raw.matches,
        innings: raw.innings,
        not_outs: raw.not_outs,
        runs: raw.runs,
        highest_score: hs.runs,
        not_out_at_highest: hs.not_out,
        average,
        balls_faced: raw.balls_faced,
        strike_rate: raw.strike_rate,
        hundreds: raw.hundreds,
        fifties: raw.fifties,
        fours: raw.fours,
        sixes: raw.sixes,
    })
}

/// Apply both column repairs to every row of the raw table.
pub fn clean(raw: RawTable) -> Result<BattingTable, CleanError> {
    info!("cleaning {} rows (HS, Avg)", raw.rows.len());
    let records = raw
        .rows
        .into_iter()
        .map(clean_row)
        .collect::<Result<Vec<_>, _>>()?;

    let unbeaten = records.iter().filter(|r| r.not_out_at_highest).count();
    let no_average = records.iter().filter(|r| r.average.is_none()).count();
    debug!(unbeaten, no_average, "cleaning complete");

    Ok(BattingTable::new(records))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
