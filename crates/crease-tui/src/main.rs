// crease entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Build the dataset cache and the dashboard model (first load)
// 4. Either print the summary or run the TUI until the user quits

use crease_core::config;
use crease_core::dataset::cache::DatasetCache;
use crease_core::dataset::loader::FsSource;
use crease_tui::app::Dashboard;
use crease_tui::tui::{self, ViewState};

use anyhow::Context;
use tracing::info;

const USAGE: &str = "usage: crease [summary [--json]]";

/// What the command line asked for.
#[derive(Debug, PartialEq, Eq)]
enum Mode {
    Dashboard,
    Summary { json: bool },
}

fn parse_args(args: &[String]) -> anyhow::Result<Mode> {
    match args {
        [] => Ok(Mode::Dashboard),
        [cmd] if cmd == "summary" => Ok(Mode::Summary { json: false }),
        [cmd, flag] if cmd == "summary" && flag == "--json" => Ok(Mode::Summary { json: true }),
        _ => anyhow::bail!("unrecognized arguments {args:?}\n{USAGE}"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mode = parse_args(&args)?;

    // 1. Initialize tracing
    init_tracing()?;
    info!("crease starting up ({mode:?})");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: {} seasons from {}",
        config.data.years.len(),
        config.data.dir.display()
    );
    let chart_color =
        tui::parse_color(&config.dashboard.chart_color).context("invalid dashboard config")?;

    // 3. Dataset cache and dashboard model
    let years = config.data.years.clone();
    let cache = DatasetCache::new(FsSource::new(config.data), years);
    let dashboard =
        Dashboard::new(cache, config.dashboard).context("failed to load batting statistics")?;
    info!("{} rows loaded", dashboard.table().len());

    // 4. Summary or TUI
    match mode {
        Mode::Summary { json: false } => print!("{}", dashboard.overview().to_text()),
        Mode::Summary { json: true } => {
            let text = serde_json::to_string_pretty(dashboard.overview())
                .context("failed to serialize summary")?;
            println!("{text}");
        }
        Mode::Dashboard => {
            tui::run(dashboard, ViewState::with_chart_color(chart_color))
                .await
                .context("dashboard error")?;
        }
    }

    info!("crease shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("crease.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("crease=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_starts_dashboard() {
        assert_eq!(parse_args(&[]).unwrap(), Mode::Dashboard);
    }

    #[test]
    fn summary_modes() {
        assert_eq!(
            parse_args(&args(&["summary"])).unwrap(),
            Mode::Summary { json: false }
        );
        assert_eq!(
            parse_args(&args(&["summary", "--json"])).unwrap(),
            Mode::Summary { json: true }
        );
    }

    #[test]
    fn unknown_arguments_rejected() {
        assert!(parse_args(&args(&["dashboard"])).is_err());
        assert!(parse_args(&args(&["summary", "--yaml"])).is_err());
    }
}
