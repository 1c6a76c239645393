// Per-season bar chart of the selected metric.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph};
use ratatui::Frame;

use crease_core::query::career::SeasonValue;
use crease_core::stats::StatValue;

use crate::app::PlayerReport;

/// Rates are charted at two-decimal resolution.
const RATE_SCALE: f64 = 100.0;

pub fn render(frame: &mut Frame, area: Rect, report: Option<&PlayerReport>, color: Color) {
    let Some(report) = report else {
        frame.render_widget(Block::default().borders(Borders::ALL).title("Seasons"), area);
        return;
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{} by Season", report.metric));

    if report.seasons.is_empty() {
        frame.render_widget(Paragraph::new(" No seasons").block(block), area);
        return;
    }

    let bars = build_bars(&report.seasons, color);
    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(6)
        .bar_gap(2)
        .bar_style(Style::default().fg(color))
        .value_style(
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(chart, area);
}

/// Bar height for a value; missing values draw as an empty bar.
pub fn bar_height(value: StatValue) -> u64 {
    match value {
        StatValue::Count(n) => n,
        StatValue::Rate(r) if r > 0.0 => (r * RATE_SCALE).round() as u64,
        StatValue::Rate(_) | StatValue::Missing => 0,
    }
}

pub fn build_bars(seasons: &[SeasonValue], color: Color) -> Vec<Bar<'static>> {
    seasons
        .iter()
        .map(|s| {
            Bar::default()
                .value(bar_height(s.value))
                .text_value(s.value.to_string())
                .label(Line::from(s.year.to_string()))
                .style(Style::default().fg(color))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
