// Career table and rank summary for the selected player.

use ratatui::layout::Constraint;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::app::{format_stat_thousands, PlayerReport};
use crate::tui::layout::AppLayout;

pub fn render(frame: &mut Frame, layout: &AppLayout, report: Option<&PlayerReport>) {
    let Some(report) = report else {
        let empty = Paragraph::new(" No player selected")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("Career"));
        frame.render_widget(empty, layout.career);
        frame.render_widget(
            Block::default().borders(Borders::ALL).title("Rank"),
            layout.rank,
        );
        return;
    };

    let values = &report.career.values;
    let header = Row::new(
        values
            .iter()
            .map(|(metric, _)| Cell::from(metric.to_string()))
            .collect::<Vec<_>>(),
    )
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );
    let row = Row::new(
        values
            .iter()
            .map(|(_, value)| Cell::from(format_stat_thousands(*value)))
            .collect::<Vec<_>>(),
    );
    let widths = vec![Constraint::Min(6); values.len()];
    let table = Table::new(vec![row], widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Career: {}", report.career.player)),
    );
    frame.render_widget(table, layout.career);

    frame.render_widget(
        Paragraph::new(rank_lines(report)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Rank by {}", report.metric)),
        ),
        layout.rank,
    );
}

fn ordinal(rank: u32) -> String {
    let suffix = match (rank % 10, rank % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{rank}{suffix}")
}

pub fn rank_lines(report: &PlayerReport) -> Vec<Line<'static>> {
    let rank = &report.rank;
    let latest = match rank.latest_rank {
        Some(r) => ordinal(r),
        None => "unranked".to_string(),
    };
    let best = match rank.best {
        Some((r, year)) => format!("{} ({year})", ordinal(r)),
        None => "-".to_string(),
    };
    let label = Style::default().fg(Color::Gray);
    let value = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    vec![
        Line::from(vec![
            Span::styled(format!(" {}: ", rank.latest_year), label),
            Span::styled(latest, value),
        ]),
        Line::from(vec![
            Span::styled(" Best:  ", label),
            Span::styled(best, value),
        ]),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
