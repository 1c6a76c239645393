// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------------------+
// | Header (1 row)                                               |
// +-------------------+-------------------+----------------------+
// | Top Batters       | Overall           | Records       (8 rows)|
// +-------------------+------------------------------------------+
// | Sidebar (30%)     | Main panel (70%)                         |
// | +- Search (3) ---+| +- Career (5) ----------------------------+|
// | +- Players ------+| +- Rank (4) ------------------------------+|
// | +- Metric (3) ---+| +- Chart (fill) --------------------------+|
// +-------------------+------------------------------------------+
// | Help Bar (1 row)                                             |
// +--------------------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Title, season span and notices.
    pub header: Rect,
    pub top_batters: Rect,
    pub overall: Rect,
    pub records: Rect,
    /// Search input box.
    pub search: Rect,
    /// Matching player names.
    pub players: Rect,
    /// Currently selected metric.
    pub metric: Rect,
    /// Career table for the selected player.
    pub career: Rect,
    pub rank: Rect,
    /// Per-season bar chart.
    pub chart: Rect,
    /// Keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the dashboard layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(8), // overview row
            Constraint::Min(12),   // sidebar + main
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let overview = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(40),
        ])
        .split(vertical[1]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(vertical[2]);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(middle[0]);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(4),
            Constraint::Min(3),
        ])
        .split(middle[1]);

    AppLayout {
        header: vertical[0],
        top_batters: overview[0],
        overall: overview[1],
        records: overview[2],
        search: sidebar[0],
        players: sidebar[1],
        metric: sidebar[2],
        career: main[0],
        rank: main[1],
        chart: main[2],
        help_bar: vertical[3],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
