// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` for input and status text; everything else it
// draws comes from the `Dashboard` model. Key presses become `UserCommand`s
// applied to the model synchronously, and the frame re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::str::FromStr;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::{Stream, StreamExt};
use ratatui::backend::Backend;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};
use tracing::{info, warn};

use crease_core::dataset::loader::SeasonSource;

use crate::app::Dashboard;
use crate::protocol::UserCommand;
use layout::{build_layout, AppLayout};

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state: the search box and transient status text.
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Whether keystrokes go to the search box.
    pub search_mode: bool,
    /// Text typed into the search box so far.
    pub search_text: String,
    /// Last action outcome shown in the header (refresh result, errors).
    pub status: Option<String>,
    /// Bar colour of the per-season chart.
    pub chart_color: Color,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            search_mode: false,
            search_text: String::new(),
            status: None,
            chart_color: Color::Green,
        }
    }
}

impl ViewState {
    pub fn with_chart_color(chart_color: Color) -> Self {
        ViewState {
            chart_color,
            ..ViewState::default()
        }
    }
}

/// Parse a configured colour: a name (`"green"`) or `#RRGGBB`.
pub fn parse_color(value: &str) -> anyhow::Result<Color> {
    Color::from_str(value.trim())
        .map_err(|_| anyhow::anyhow!("invalid colour `{value}` for dashboard.chart_color"))
}

// ---------------------------------------------------------------------------
// Command application
// ---------------------------------------------------------------------------

/// Apply a command to the dashboard. Returns `false` when the loop should
/// exit. Failures are reported in the header instead of ending the session.
pub fn apply_command<S: SeasonSource>(
    dashboard: &mut Dashboard<S>,
    view_state: &mut ViewState,
    command: UserCommand,
) -> bool {
    let is_refresh = command == UserCommand::Refresh;
    match dashboard.apply(command) {
        Ok(keep_running) => {
            if is_refresh {
                view_state.status = Some("Dataset reloaded".into());
            }
            keep_running
        }
        Err(e) => {
            warn!("dashboard command failed: {e}");
            view_state.status = Some(format!("Error: {e}"));
            true
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
pub fn render_frame<S: SeasonSource>(frame: &mut Frame, state: &ViewState, dashboard: &Dashboard<S>) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.header, state, dashboard);
    widgets::overview::render(frame, &layout, dashboard.overview());
    widgets::players::render(frame, &layout, state, dashboard);
    widgets::career::render(frame, &layout, dashboard.report());
    widgets::chart::render(frame, layout.chart, dashboard.report(), state.chart_color);
    render_help_bar(frame, &layout, state);
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let text = if state.search_mode {
        " Enter:Search | Esc:Cancel | Backspace:Delete"
    } else {
        " q:Quit | /:Search | j/k:Select | m/M:Metric | r:Refresh"
    };
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop until the user quits.
///
/// Initializes the terminal, installs a panic hook that restores it, then
/// drives `event_loop` with crossterm's event stream.
pub async fn run<S: SeasonSource>(
    mut dashboard: Dashboard<S>,
    mut view_state: ViewState,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let result = event_loop(
        &mut terminal,
        &mut dashboard,
        &mut view_state,
        EventStream::new(),
    )
    .await;

    ratatui::restore();
    result
}

/// Select over terminal events and render ticks (~30 fps) until a quit
/// command arrives or the event stream ends.
pub async fn event_loop<B, E, S>(
    terminal: &mut Terminal<B>,
    dashboard: &mut Dashboard<S>,
    view_state: &mut ViewState,
    mut events: E,
) -> anyhow::Result<()>
where
    B: Backend,
    E: Stream<Item = std::io::Result<Event>> + Unpin,
    S: SeasonSource,
{
    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(command) = input::handle_key(key_event, view_state) {
                            if !apply_command(dashboard, view_state, command) {
                                info!("quit requested");
                                return Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse and resize events; the next tick redraws
                    }
                    Some(Err(e)) => {
                        return Err(anyhow::Error::from(e).context("terminal input error"));
                    }
                    None => return Ok(()),
                }
            }

            _ = render_tick.tick() => {
                terminal
                    .draw(|frame| render_frame(frame, view_state, dashboard))
                    .map_err(|e| anyhow::anyhow!("failed to draw frame: {e}"))?;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
