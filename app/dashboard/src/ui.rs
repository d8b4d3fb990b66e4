use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::app::View;

mod overview;
mod profile;
mod projects;
mod stats;

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    draw_top_bar(frame, chunks[0], app);
    match app.view {
        View::Overview => overview::draw(frame, chunks[1], app),
        View::Projects => projects::draw(frame, chunks[1], app),
        View::Stats => stats::draw(frame, chunks[1], app),
    }
    draw_footer(frame, chunks[2], app);

    if app.profile_open {
        profile::draw(frame, profile_menu_area(frame.area()));
    }
}

/// Anchored below the top bar on the right edge, the mouse handler uses the
/// same rect to detect clicks outside the menu.
pub fn profile_menu_area(area: Rect) -> Rect {
    let width = area.width.min(34);
    let height = area.height.saturating_sub(3).min(14);
    Rect::new(area.width.saturating_sub(width), area.y + 3, width, height)
}

fn draw_top_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled("DevPulse Dashboard", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
    ];
    for view in [View::Overview, View::Projects, View::Stats] {
        let style = if view == app.view {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", view.label()), style));
    }
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        format!("[{}]", app.state.time_range.label()),
        Style::default().fg(Color::Yellow),
    ));
    if app.store(app.view).loading() {
        spans.push(Span::styled("  loading...", Style::default().fg(Color::DarkGray)));
    }
    let paragraph = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(paragraph, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let hints = if app.search_editing {
        "type to search | Enter keep | Esc clear"
    } else {
        match app.view {
            View::Overview => "q quit | Tab views | t time range | / search | g gauge project | o profile | r refresh",
            View::Projects => "q quit | Tab views | f project filter | Up/Down scroll | o profile | r refresh",
            View::Stats => "q quit | Tab views | o profile | r refresh",
        }
    };
    let paragraph = Paragraph::new(hints).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

pub(crate) fn kpi_card(frame: &mut Frame, area: Rect, label: &str, value: String, color: Color) {
    let block = Block::default().borders(Borders::ALL).border_style(Style::default().fg(color));
    let lines = vec![
        Line::from(Span::styled(label.to_string(), Style::default().fg(color))),
        Line::from(Span::styled(value, Style::default().add_modifier(Modifier::BOLD))),
    ];
    let paragraph = Paragraph::new(lines).block(block).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

pub(crate) fn centered_note(frame: &mut Frame, area: Rect, text: &str) {
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
