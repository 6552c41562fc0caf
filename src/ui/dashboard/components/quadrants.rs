//! Dashboard quadrant grid
//!
//! Renders the four box panels in a 2x2 grid

use super::super::state::{DashboardState, QuadrantPanel};
use super::super::utils::format_compact_timestamp;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

pub fn render_quadrants(f: &mut Frame, area: Rect, state: &DashboardState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (row, row_area) in rows.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row_area);
        for (column, cell) in cells.iter().enumerate() {
            let slot = row * 2 + column;
            render_quadrant(f, *cell, slot, &state.quadrants[slot]);
        }
    }
}

/// Render one quadrant; stale readings get a thick red border.
fn render_quadrant(f: &mut Frame, area: Rect, slot: usize, panel: &QuadrantPanel) {
    let Some(view) = &panel.view else {
        let block = Block::default()
            .title(format!("QUADRANT {}", slot + 1))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::uniform(1));
        let waiting = Paragraph::new("No readings yet")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(waiting, area);
        return;
    };

    let (border_type, border_color) = if view.alert {
        (BorderType::Thick, Color::LightRed)
    } else {
        (BorderType::Rounded, Color::Cyan)
    };

    let mut lines = vec![Line::from(Span::styled(
        view.parameter.clone(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ))];
    if let Some(status) = &view.status {
        lines.push(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::LightBlue),
        )));
    }
    let staleness_color = if view.alert {
        Color::LightRed
    } else {
        Color::Green
    };
    lines.push(Line::from(Span::styled(
        view.staleness.clone(),
        Style::default().fg(staleness_color),
    )));
    if let Some(updated_at) = &panel.updated_at {
        lines.push(Line::from(Span::styled(
            format!("updated {}", format_compact_timestamp(updated_at)),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let block = Block::default()
        .title(view.title.clone())
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color))
        .padding(Padding::uniform(1));

    let widget = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(widget, area);
}
