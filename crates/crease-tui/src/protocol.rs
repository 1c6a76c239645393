// Commands flowing from the terminal UI into the dashboard model.

/// Actions the user can request from the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Run a player-name search.
    Search(String),
    /// Move the player selection down one row.
    SelectNext,
    /// Move the player selection up one row.
    SelectPrev,
    /// Cycle the selected metric forward.
    NextMetric,
    /// Cycle the selected metric backward.
    PrevMetric,
    /// Reload the season files from disk.
    Refresh,
    Quit,
}
