// Header line: dashboard title, season span, and the latest notice.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crease_core::dataset::loader::SeasonSource;

use crate::app::Dashboard;
use crate::tui::ViewState;

/// Render the header into the given area.
///
/// Layout: [title] [season span] | [status or search notice]
pub fn render<S: SeasonSource>(
    frame: &mut Frame,
    area: Rect,
    state: &ViewState,
    dashboard: &Dashboard<S>,
) {
    let overview = dashboard.overview();
    let mut spans = vec![
        Span::styled(
            format!(" {} ", overview.title),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("({})", overview.season_span()),
            Style::default().fg(Color::Gray),
        ),
    ];

    if let Some((text, color)) = message(state, dashboard.notice()) {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(text.to_string(), Style::default().fg(color)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// The message to show after the title. A status from the last command
/// wins over the search notice.
pub fn message<'a>(state: &'a ViewState, notice: Option<&'a str>) -> Option<(&'a str, Color)> {
    match (state.status.as_deref(), notice) {
        (Some(status), _) if status.starts_with("Error") => Some((status, Color::Red)),
        (Some(status), _) => Some((status, Color::Green)),
        (None, Some(notice)) => Some((notice, Color::Yellow)),
        (None, None) => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
