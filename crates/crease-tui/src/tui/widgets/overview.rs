// Overview row: current-season leaders, overall figures, records.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{format_stat_thousands, format_thousands, Overview};
use crate::tui::layout::AppLayout;

pub fn render(frame: &mut Frame, layout: &AppLayout, overview: &Overview) {
    let (_, current) = overview.seasons;
    frame.render_widget(
        Paragraph::new(top_batter_lines(overview)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Top Batters {current}")),
        ),
        layout.top_batters,
    );
    frame.render_widget(
        Paragraph::new(overall_lines(overview))
            .block(Block::default().borders(Borders::ALL).title("Overall")),
        layout.overall,
    );
    frame.render_widget(
        Paragraph::new(record_lines(overview))
            .block(Block::default().borders(Borders::ALL).title("Records")),
        layout.records,
    );
}

fn top_batter_lines(overview: &Overview) -> Vec<Line<'static>> {
    if overview.top_batters.is_empty() {
        return vec![Line::from(Span::styled(
            " No batters this season",
            Style::default().fg(Color::DarkGray),
        ))];
    }
    overview
        .top_batters
        .iter()
        .map(|(pos, name)| {
            let style = if *pos == 1 {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(vec![
                Span::styled(format!(" {pos}. "), Style::default().fg(Color::Gray)),
                Span::styled(name.clone(), style),
            ])
        })
        .collect()
}

fn label_value(label: String, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {label}: "), Style::default().fg(Color::Gray)),
        Span::styled(
            value,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

fn overall_lines(overview: &Overview) -> Vec<Line<'static>> {
    vec![
        label_value("Total Runs".into(), format_stat_thousands(overview.total_runs)),
        label_value(
            "Capped Players".into(),
            format_thousands(overview.capped_players as u64),
        ),
        label_value("Seasons".into(), overview.season_span()),
    ]
}

fn record_lines(overview: &Overview) -> Vec<Line<'static>> {
    overview
        .records
        .iter()
        .map(|stat| label_value(stat.label.clone(), format_stat_thousands(stat.value)))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
