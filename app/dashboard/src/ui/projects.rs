use ratatui::Frame;
use ratatui::layout::Constraint;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Cell;
use ratatui::widgets::Row;
use ratatui::widgets::Table;

use crate::app::App;
use crate::app::View;
use crate::event::DevEvent;
use crate::ui;

pub(super) fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let store = app.store(View::Projects);
    if store.loading() && store.events().is_empty() {
        ui::centered_note(frame, area, "Loading project events...");
        return;
    }

    let events = app.project_events();
    let filter_label = app.project_filter.as_deref().unwrap_or("All projects");
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Project Dashboard | {filter_label} | {} events", events.len()));

    let header = Row::new(["ID", "Developer", "Action", "Project", "Timestamp", "Metadata"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows = events.iter().skip(app.table_scroll).map(|event| row(event));
    let widths = [
        Constraint::Length(6),
        Constraint::Length(14),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(20),
        Constraint::Min(10),
    ];
    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

fn row<'a>(event: &'a DevEvent) -> Row<'a> {
    let action_color = if event.is_success() {
        Color::Green
    } else if event.is_failed() {
        Color::LightRed
    } else {
        Color::Gray
    };
    Row::new(vec![
        Cell::from(event.id.to_string()),
        Cell::from(event.developer.as_str()),
        Cell::from(Span::styled(
            event.action.as_str(),
            Style::default().fg(action_color),
        )),
        Cell::from(event.project()),
        Cell::from(event.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()),
        Cell::from(event.metadata.as_deref().unwrap_or_default()),
    ])
}
