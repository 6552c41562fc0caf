//! Dashboard footer component
//!
//! Renders key bindings, the polled data source and uptime

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Render footer with navigation keys.
pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let uptime = state.start_time.elapsed().as_secs();
    let footer_text = format!(
        "[<-/->] Field | [R] Refresh | [Q] Quit | {} | Up {}h {:02}m {:02}s",
        state.endpoints.base_url,
        uptime / 3600,
        (uptime % 3600) / 60,
        uptime % 60
    );

    let footer = Paragraph::new(footer_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}
