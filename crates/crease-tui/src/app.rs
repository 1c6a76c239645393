// Dashboard model: everything the terminal UI and the `summary` command show.
//
// The model holds the shared table handed out by the dataset cache and
// derives the overview and the selected player's report from it. All core
// calls are synchronous; the UI loop calls into the model between frames.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crease_core::config::DashboardConfig;
use crease_core::dataset::cache::DatasetCache;
use crease_core::dataset::loader::SeasonSource;
use crease_core::dataset::{BattingTable, DatasetError};
use crease_core::query::career::{
    aggregate_player_career, current_rank_info, season_breakdown, CareerSummary, RankInfo,
    SeasonValue,
};
use crease_core::query::search::search_player_names;
use crease_core::stats::aggregate::{
    aggregate_metric, aggregate_metrics, top_batters_as_ranked_map, total_capped_players,
    LabelledStat,
};
use crease_core::stats::{Agg, Metric, StatValue, StatsError};

use crate::protocol::UserCommand;

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

/// Whole-dataset headline figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub title: String,
    /// First and last season loaded.
    pub seasons: (u16, u16),
    /// Current-season run leaders keyed by position.
    pub top_batters: BTreeMap<usize, String>,
    pub total_runs: StatValue,
    pub capped_players: usize,
    pub records: Vec<LabelledStat>,
}

impl Overview {
    pub fn build(table: &BattingTable, config: &DashboardConfig) -> Result<Self, StatsError> {
        let years = table.years();
        let (Some(&first), Some(&last)) = (years.first(), years.last()) else {
            return Err(StatsError::EmptyTable);
        };
        Ok(Overview {
            title: config.title.clone(),
            seasons: (first, last),
            top_batters: top_batters_as_ranked_map(table, config.top_n)?,
            total_runs: aggregate_metric(table, Metric::Runs, Agg::Sum)?,
            capped_players: total_capped_players(table),
            records: aggregate_metrics(table, &config.overview_metrics),
        })
    }

    pub fn season_span(&self) -> String {
        let (first, last) = self.seasons;
        if first == last {
            first.to_string()
        } else {
            format!("{first} - {last}")
        }
    }

    /// Plain-text rendering used by `crease summary`.
    pub fn to_text(&self) -> String {
        let mut out = format!("{} ({})\n\n", self.title, self.season_span());
        out.push_str("Top Batters\n");
        for (pos, name) in &self.top_batters {
            out.push_str(&format!("  {pos}. {name}\n"));
        }
        out.push_str(&format!(
            "\nTotal Runs:      {}\n",
            format_stat_thousands(self.total_runs)
        ));
        out.push_str(&format!("Capped Players:  {}\n", self.capped_players));
        if !self.records.is_empty() {
            out.push_str("\nRecords\n");
            for stat in &self.records {
                out.push_str(&format!("  {}: {}\n", stat.label, format_stat_thousands(stat.value)));
            }
        }
        out
    }
}

/// `1234567` -> `"1,234,567"`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Counts get thousands separators; rates and missing values use their
/// normal display.
pub fn format_stat_thousands(value: StatValue) -> String {
    match value {
        StatValue::Count(n) => format_thousands(n),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Player report
// ---------------------------------------------------------------------------

/// Everything the main panel shows for the selected player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerReport {
    pub career: CareerSummary,
    pub metric: Metric,
    pub rank: RankInfo,
    pub seasons: Vec<SeasonValue>,
}

impl PlayerReport {
    pub fn build(
        table: &BattingTable,
        player: &str,
        metrics: &[Metric],
        metric: Metric,
    ) -> Result<Self, StatsError> {
        Ok(PlayerReport {
            career: aggregate_player_career(table, player, metrics)?,
            metric,
            rank: current_rank_info(table, player, metric)?,
            seasons: season_breakdown(table, player, metric)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Metrics offered by `m`/`M`: the configured player metrics, with the
/// default metric first if it is not among them.
fn metric_choices(config: &DashboardConfig) -> Vec<Metric> {
    let mut choices = config.player_metrics.clone();
    if !choices.contains(&config.default_metric) {
        choices.insert(0, config.default_metric);
    }
    choices
}

/// Error raised by dashboard actions.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Stats(#[from] StatsError),
}

pub struct Dashboard<S> {
    cache: DatasetCache<S>,
    config: DashboardConfig,
    table: Arc<BattingTable>,
    overview: Overview,
    metrics: Vec<Metric>,
    metric_idx: usize,
    query: String,
    results: Vec<String>,
    selected: usize,
    notice: Option<String>,
    report: Option<PlayerReport>,
}

impl<S: SeasonSource> Dashboard<S> {
    /// Load the dataset through `cache` and run the default search.
    pub fn new(mut cache: DatasetCache<S>, config: DashboardConfig) -> Result<Self, DashboardError> {
        let table = cache.get()?;
        let overview = Overview::build(&table, &config)?;
        let metrics = metric_choices(&config);
        let metric_idx = metrics
            .iter()
            .position(|m| *m == config.default_metric)
            .unwrap_or(0);
        let query = config.default_search.clone();

        let mut dashboard = Dashboard {
            cache,
            config,
            table,
            overview,
            metrics,
            metric_idx,
            query: String::new(),
            results: Vec::new(),
            selected: 0,
            notice: None,
            report: None,
        };
        dashboard.search(&query);
        Ok(dashboard)
    }

    pub fn overview(&self) -> &Overview {
        &self.overview
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn table(&self) -> &BattingTable {
        &self.table
    }

    /// The query whose results are listed.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[String] {
        &self.results
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_player(&self) -> Option<&str> {
        self.results.get(self.selected).map(String::as_str)
    }

    pub fn metric(&self) -> Metric {
        self.metrics[self.metric_idx]
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn report(&self) -> Option<&PlayerReport> {
        self.report.as_ref()
    }

    /// Apply one command. Returns `false` once the user asked to quit.
    pub fn apply(&mut self, command: UserCommand) -> Result<bool, DashboardError> {
        match command {
            UserCommand::Search(query) => self.search(&query),
            UserCommand::SelectNext => self.move_selection(1),
            UserCommand::SelectPrev => self.move_selection(-1),
            UserCommand::NextMetric => self.cycle_metric(1),
            UserCommand::PrevMetric => self.cycle_metric(-1),
            UserCommand::Refresh => self.refresh()?,
            UserCommand::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Search player names. A query matching nobody falls back to the
    /// configured default search and sets a notice.
    pub fn search(&mut self, query: &str) {
        self.notice = None;
        match search_player_names(&self.table, query) {
            Ok(names) => {
                self.query = query.to_string();
                self.results = names;
            }
            Err(e) => {
                let fallback = self.config.default_search.clone();
                warn!("search {query:?} failed ({e}); falling back to {fallback:?}");
                self.notice = Some(format!(
                    "No players match \"{query}\"; showing \"{fallback}\""
                ));
                self.query = fallback.clone();
                self.results = search_player_names(&self.table, &fallback).unwrap_or_default();
            }
        }
        self.selected = 0;
        self.rebuild_report();
    }

    fn move_selection(&mut self, delta: isize) {
        if self.results.is_empty() {
            return;
        }
        let last = self.results.len() - 1;
        let next = self.selected.saturating_add_signed(delta).min(last);
        if next != self.selected {
            self.selected = next;
            self.rebuild_report();
        }
    }

    fn cycle_metric(&mut self, delta: isize) {
        let len = self.metrics.len() as isize;
        self.metric_idx = (self.metric_idx as isize + delta).rem_euclid(len) as usize;
        self.rebuild_report();
    }

    /// Reload the season files. On failure the previous table stays on screen.
    pub fn refresh(&mut self) -> Result<(), DashboardError> {
        let table = self.cache.refresh()?;
        let overview = Overview::build(&table, &self.config)?;
        info!("dashboard refreshed: {} rows", table.len());
        self.table = table;
        self.overview = overview;
        let query = self.query.clone();
        self.search(&query);
        Ok(())
    }

    fn rebuild_report(&mut self) {
        self.report = self.selected_player().and_then(|player| {
            PlayerReport::build(&self.table, player, &self.config.player_metrics, self.metric())
                .map_err(|e| warn!("no report for {player}: {e}"))
                .ok()
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
