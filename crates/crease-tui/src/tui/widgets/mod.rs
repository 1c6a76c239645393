// TUI widget modules for each dashboard panel.

pub mod career;
pub mod chart;
pub mod overview;
pub mod players;
pub mod status_bar;
