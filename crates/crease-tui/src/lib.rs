// Library root: the dashboard model and terminal UI, exposed so the binary
// and tests share one API.

pub mod app;
pub mod protocol;
pub mod tui;
