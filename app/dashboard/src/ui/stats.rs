use ratatui::Frame;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;

use crate::aggregate;
use crate::app::App;
use crate::app::View;
use crate::event::DevEvent;
use crate::ui;

pub(super) fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let store = app.store(View::Stats);
    if store.loading() && store.events().is_empty() {
        ui::centered_note(frame, area, "Loading stats...");
        return;
    }

    // overall numbers, never narrowed by the overview filters
    let events: Vec<&DevEvent> = store.events().iter().collect();
    let overview = aggregate::overview(&events);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(4), Constraint::Length(2)])
        .split(area);

    let heading = vec![
        Line::from(Span::styled("Stats & Insights", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(
            "Overall numbers across all projects.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(heading), chunks[0]);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(chunks[1]);
    ui::kpi_card(frame, cards[0], "Events", overview.total_events.to_string(), Color::Blue);
    ui::kpi_card(frame, cards[1], "Projects", overview.unique_projects.to_string(), Color::Green);
    ui::kpi_card(frame, cards[2], "Developers", overview.unique_developers.to_string(), Color::Yellow);
    ui::kpi_card(frame, cards[3], "Build failures", overview.failed_count.to_string(), Color::Magenta);

    let summary = format!(
        "Build successes: {}. Failures: {}. Total events: {}.",
        overview.success_count, overview.failed_count, overview.total_events
    );
    frame.render_widget(Paragraph::new(summary), chunks[2]);
}
