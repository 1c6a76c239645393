// Sidebar: search box, matching players, selected metric.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crease_core::dataset::loader::SeasonSource;

use crate::app::Dashboard;
use crate::tui::input::MAX_SEARCH_LEN;
use crate::tui::layout::AppLayout;
use crate::tui::ViewState;

pub fn render<S: SeasonSource>(
    frame: &mut Frame,
    layout: &AppLayout,
    state: &ViewState,
    dashboard: &Dashboard<S>,
) {
    let search_style = if state.search_mode {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    frame.render_widget(
        Paragraph::new(search_line(state, dashboard.query())).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(search_style)
                .title("Search"),
        ),
        layout.search,
    );

    let items: Vec<ListItem> = dashboard
        .results()
        .iter()
        .map(|name| ListItem::new(name.clone()))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Players ({})", dashboard.results().len())),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");
    let mut list_state = ListState::default().with_selected(
        (!dashboard.results().is_empty()).then_some(dashboard.selected_index()),
    );
    frame.render_stateful_widget(list, layout.players, &mut list_state);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" ", Style::default()),
            Span::styled(
                dashboard.metric().to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL).title("Metric (m/M)")),
        layout.metric,
    );
}

/// Text inside the search box: the live input while typing, otherwise the
/// query whose results are listed.
pub fn search_line(state: &ViewState, query: &str) -> Line<'static> {
    if state.search_mode {
        Line::from(vec![
            Span::raw(format!(" {}", state.search_text)),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
            Span::styled(
                format!(
                    "  {}/{}",
                    state.search_text.chars().count(),
                    MAX_SEARCH_LEN
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ])
    } else {
        Line::from(vec![
            Span::raw(format!(" {query}")),
            Span::styled("  (/ to search)", Style::default().fg(Color::DarkGray)),
        ])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
