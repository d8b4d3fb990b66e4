use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Paragraph;

/// Static disclosure menu, nothing here talks to the network or persists.
pub(super) fn draw(frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Profile")
        .border_style(Style::default().fg(Color::Cyan));

    let divider = "─".repeat(area.width.saturating_sub(2) as usize);
    let lines = vec![
        Line::from(vec![
            Span::styled("(A) ", Style::default().fg(Color::Cyan)),
            Span::styled("Admin", Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(Span::styled("admin@dev.com", Style::default().fg(Color::DarkGray))),
        Line::from(divider.clone()),
        Line::from("My Profile"),
        Line::from("Settings"),
        Line::from("My Dashboard"),
        Line::from("Activity Stats"),
        Line::from(divider),
        Line::from("Dark Mode"),
        Line::from("Help & Support"),
        Line::from("Logout"),
        Line::from(Span::styled(
            "Esc or click outside to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
