//! Dashboard header component
//!
//! Renders the title and the field position gauge

use super::super::state::DashboardState;
use super::super::utils::format_compact_timestamp;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

/// Render header with title and current field position.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let version = env!("CARGO_PKG_VERSION");
    let alerts = state.alert_count();
    let title_text = if alerts > 0 {
        format!("QUADRANT DASH v{} - {} STALE", version, alerts)
    } else {
        format!("QUADRANT DASH v{}", version)
    };
    let title_color = if alerts > 0 {
        Color::LightRed
    } else {
        Color::Cyan
    };

    let title = Paragraph::new(title_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(title_color)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    // Gauge shows where the current field sits in the cycle
    let (label, percent) = match &state.current_field {
        Some(field) if state.field_count > 0 => {
            let position = state.field_index + 1;
            let percent = (position * 100 / state.field_count).min(100) as u16;
            let refreshed = state
                .last_refresh
                .as_deref()
                .map(format_compact_timestamp)
                .unwrap_or_default();
            (
                format!(
                    "FIELD {} of {}: {}  {}",
                    position, state.field_count, field, refreshed
                ),
                percent,
            )
        }
        _ => {
            // Sweep while waiting for the first render
            let percent = ((state.tick % 20) as f64 / 20.0 * 100.0) as u16;
            ("WAITING - Discovering fields".to_string(), percent)
        }
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
        )
        .percent(percent)
        .label(label);

    f.render_widget(gauge, header_chunks[1]);
}
