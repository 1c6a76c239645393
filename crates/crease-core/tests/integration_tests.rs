// Integration tests for the batting-stats core.
//
// These load the fixture season files from disk through the same path the
// dashboard uses (config -> FsSource -> DatasetCache) and check the
// aggregation and query layers against hand-computed figures.

use std::fs;
use std::path::{Path, PathBuf};

use crease_core::config::{self, DataSource, CONFIG_FILE};
use crease_core::dataset::cache::DatasetCache;
use crease_core::dataset::loader::{load_table, FsSource};
use crease_core::dataset::{BattingTable, DatasetError};
use crease_core::query::career::{aggregate_player_career, current_rank_info, season_breakdown};
use crease_core::query::search::search_player_names;
use crease_core::query::{filter_player, select_columns, Column};
use crease_core::stats::aggregate::{
    aggregate_by_player, aggregate_metric, aggregate_metrics, current_year,
    top_batters_as_ranked_map, top_players, total_capped_players,
};
use crease_core::stats::rank::rank;
use crease_core::stats::{Agg, Metric, StatValue, StatsError};

// ===========================================================================
// Test helpers
// ===========================================================================

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture_source() -> DataSource {
    DataSource {
        dir: fixtures_dir(),
        file_prefix: "BATTING STATS - IPL_".into(),
        extension: "csv".into(),
        years: vec![2021, 2022],
    }
}

fn fixture_table() -> BattingTable {
    let data = fixture_source();
    let years = data.years.clone();
    load_table(&FsSource::new(data), &years).expect("fixtures should load")
}

// ===========================================================================
// Loading
// ===========================================================================

#[test]
fn loads_all_fixture_seasons_tagged_by_year() {
    let table = fixture_table();
    assert_eq!(table.len(), 13);
    assert_eq!(table.years(), vec![2021, 2022]);
    assert_eq!(table.records()[0].player, "Ruturaj Gaikwad");
    assert_eq!(table.records()[0].year, 2021);
    assert_eq!(table.records()[6].player, "Jos Buttler");
    assert_eq!(table.records()[6].year, 2022);
}

#[test]
fn fixture_markers_are_cleaned() {
    let table = fixture_table();
    let gaikwad = &table.records()[0];
    assert_eq!(gaikwad.highest_score, 101);
    assert!(gaikwad.not_out_at_highest);

    let umran = filter_player(&table, "Umran Malik").unwrap();
    assert_eq!(umran.records()[0].average, None);
    assert_eq!(umran.records()[0].value(Metric::Average), StatValue::Missing);
}

#[test]
fn missing_season_file_fails_whole_load() {
    let mut data = fixture_source();
    data.years = vec![2021, 2030];
    let years = data.years.clone();
    let err = load_table(&FsSource::new(data), &years).unwrap_err();
    match err {
        DatasetError::MissingSource { path } => {
            assert!(path.ends_with("BATTING STATS - IPL_2030.csv"));
        }
        other => panic!("expected MissingSource, got {other:?}"),
    }
}

#[test]
fn cache_loads_fixtures_once_until_refresh() {
    let data = fixture_source();
    let years = data.years.clone();
    let mut cache = DatasetCache::new(FsSource::new(data), years);

    let first = cache.get().unwrap();
    let second = cache.get().unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(cache.load_count(), 1);

    let refreshed = cache.refresh().unwrap();
    assert_eq!(cache.load_count(), 2);
    assert_eq!(*refreshed, *first);
}

// ===========================================================================
// Aggregation
// ===========================================================================

#[test]
fn overview_figures_from_fixtures() {
    let table = fixture_table();
    assert_eq!(current_year(&table).unwrap(), 2022);
    assert_eq!(total_capped_players(&table), 11);
    assert_eq!(
        aggregate_metric(&table, Metric::Runs, Agg::Sum).unwrap(),
        StatValue::Count(6710)
    );

    let top = top_batters_as_ranked_map(&table, 3).unwrap();
    let names: Vec<&str> = top.values().map(String::as_str).collect();
    assert_eq!(names, vec!["Jos Buttler", "KL Rahul", "Quinton de Kock"]);
    assert_eq!(top.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test]
fn headline_metrics_from_fixtures() {
    let table = fixture_table();
    let stats = aggregate_metrics(
        &table,
        &[Metric::Sixes, Metric::Hundreds, Metric::Fifties, Metric::HighestScore],
    );
    let got: Vec<(&str, StatValue)> = stats.iter().map(|s| (s.label.as_str(), s.value)).collect();
    assert_eq!(
        got,
        vec![
            ("Total 6s", StatValue::Count(251)),
            ("Total 100", StatValue::Count(8)),
            ("Total 50", StatValue::Count(49)),
            ("Highest Individual Score", StatValue::Count(140)),
        ]
    );
}

#[test]
fn leaderboard_only_covers_current_season() {
    let table = fixture_table();
    let board = aggregate_by_player(&table, Metric::Runs, Agg::Sum).unwrap();
    assert_eq!(board.len(), 7);
    assert!(board.iter().all(|t| t.player != "Ruturaj Gaikwad"));
    assert_eq!(board.last().unwrap().player, "Umran Malik");

    let names = top_players(&table, 50, Metric::Sixes, Agg::Sum).unwrap();
    assert_eq!(names.len(), 7);
    assert_eq!(names[0], "Jos Buttler");
}

#[test]
fn summing_highest_score_is_rejected() {
    let table = fixture_table();
    assert_eq!(
        aggregate_metric(&table, Metric::HighestScore, Agg::Sum).unwrap_err(),
        StatsError::NotSummable(Metric::HighestScore)
    );
}

#[test]
fn ranks_are_per_season() {
    let table = fixture_table();
    let ranked = rank(&table, Metric::Runs);
    let rahul: Vec<(u16, Option<u32>)> = ranked
        .iter()
        .filter(|r| r.record.player == "KL Rahul")
        .map(|r| (r.record.year, r.rank))
        .collect();
    assert_eq!(rahul, vec![(2021, Some(3)), (2022, Some(2))]);
}

// ===========================================================================
// Queries
// ===========================================================================

#[test]
fn kohli_career_from_fixtures() {
    let table = fixture_table();
    let career = aggregate_player_career(
        &table,
        "Virat Kohli",
        &[Metric::Innings, Metric::NotOuts, Metric::Runs, Metric::Average, Metric::StrikeRate],
    )
    .unwrap();
    assert_eq!(career.get(Metric::Innings), Some(StatValue::Count(31)));
    assert_eq!(career.get(Metric::NotOuts), Some(StatValue::Count(2)));
    assert_eq!(career.get(Metric::Runs), Some(StatValue::Count(746)));
    assert_eq!(career.get(Metric::Average), Some(StatValue::Rate(25.72)));
    assert_eq!(career.get(Metric::StrikeRate), Some(StatValue::Rate(117.3)));
}

#[test]
fn rank_info_and_breakdown_from_fixtures() {
    let table = fixture_table();
    let info = current_rank_info(&table, "KL Rahul", Metric::Runs).unwrap();
    assert_eq!(info.latest_year, 2022);
    assert_eq!(info.latest_rank, Some(2));
    assert_eq!(info.best, Some((2, 2022)));

    let seasons = season_breakdown(&table, "KL Rahul", Metric::Runs).unwrap();
    let got: Vec<(u16, StatValue)> = seasons.iter().map(|s| (s.year, s.value)).collect();
    assert_eq!(got, vec![(2021, StatValue::Count(626)), (2022, StatValue::Count(616))]);
}

#[test]
fn search_then_career_flow() {
    let table = fixture_table();
    let names = search_player_names(&table, "koh").unwrap();
    assert_eq!(names, vec!["Virat Kohli"]);
    assert!(aggregate_player_career(&table, &names[0], &[Metric::Runs]).is_ok());

    let err = search_player_names(&table, "zzz").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn projection_over_fixtures() {
    let table = fixture_table();
    let view = select_columns(&table, &["Player", "HS", "remained NO during HS", "Wkts"]).unwrap();
    assert_eq!(view.columns.len(), 3);
    assert_eq!(view.rows.len(), 13);
    let flags = view.column(Column::NotOutAtHighest).unwrap();
    assert_eq!(flags[0].to_string(), "*");
    assert_eq!(flags[3].to_string(), "");
}

// ===========================================================================
// Config
// ===========================================================================

#[test]
fn config_from_copied_defaults_drives_loading() {
    let tmp = std::env::temp_dir().join("crease_integration_config");
    let _ = fs::remove_dir_all(&tmp);
    fs::create_dir_all(tmp.join("defaults")).unwrap();

    let text = format!(
        r##"
[data]
dir = "{}"
file_prefix = "BATTING STATS - IPL_"
extension = "csv"
years = [2021, 2022]

[dashboard]
title = "Fixture"
top_n = 2
default_search = "kohli"
overview_metrics = ["Runs"]
player_metrics = ["Runs", "SR"]
default_metric = "Runs"
chart_color = "green"
"##,
        fixtures_dir().display().to_string().replace('\\', "/")
    );
    fs::write(tmp.join("defaults").join(CONFIG_FILE), text).unwrap();

    let copied = config::ensure_config_files(&tmp).unwrap();
    assert_eq!(copied.len(), 1);
    let cfg = config::load_config_from(&tmp).unwrap();
    assert_eq!(cfg.dashboard.top_n, 2);

    let years = cfg.data.years.clone();
    let mut cache = DatasetCache::new(FsSource::new(cfg.data.rooted_at(&tmp)), years);
    let table = cache.get().unwrap();
    let top = top_players(&table, cfg.dashboard.top_n, Metric::Runs, Agg::Sum).unwrap();
    assert_eq!(top, vec!["Jos Buttler", "KL Rahul"]);

    let _ = fs::remove_dir_all(&tmp);
}
