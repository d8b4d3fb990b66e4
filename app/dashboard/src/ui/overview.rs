use ratatui::Frame;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::symbols::Marker;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Axis;
use ratatui::widgets::Bar;
use ratatui::widgets::BarChart;
use ratatui::widgets::BarGroup;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Chart;
use ratatui::widgets::Dataset;
use ratatui::widgets::Gauge;
use ratatui::widgets::GraphType;
use ratatui::widgets::Paragraph;

use crate::aggregate::DailyCount;
use crate::aggregate::DashboardView;
use crate::aggregate::GaugeScope;
use crate::aggregate::ProjectStat;
use crate::app::App;
use crate::app::View;
use crate::event::DevEvent;
use crate::ui;

pub(super) fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let store = app.store(View::Overview);
    if store.loading() && store.events().is_empty() {
        ui::centered_note(frame, area, "Loading dashboard...");
        return;
    }

    let view = app.dashboard();
    let banner_height = u16::from(!app.state.search_query.is_empty());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(banner_height),
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Min(8),
        ])
        .split(area);

    draw_greeting(frame, chunks[0]);
    if banner_height > 0 {
        draw_search_banner(frame, chunks[1], app, view.overview.total_events);
    }
    draw_kpi_row(frame, chunks[2], &view);
    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .split(chunks[3]);
    draw_chart(frame, middle[0], &view.series);
    draw_gauge(frame, middle[1], &view, &app.state.gauge_scope);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(chunks[4]);
    draw_performance(frame, bottom[0], &view.project_stats);
    draw_recent(frame, bottom[1], &view.recent);
}

fn draw_greeting(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled("Hello Admin! ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            "Measure how fast your dev builds are improving over time.",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_search_banner(frame: &mut Frame, area: Rect, app: &App, matches: usize) {
    let plural = if matches == 1 { "" } else { "s" };
    let line = Line::from(vec![
        Span::styled(
            format!("Found {matches} event{plural} matching \"{}\"", app.state.search_query),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled("  (Esc in search mode clears)", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_kpi_row(frame: &mut Frame, area: Rect, view: &DashboardView) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);
    ui::kpi_card(frame, cards[0], "Users", view.overview.unique_developers.to_string(), Color::Blue);
    ui::kpi_card(frame, cards[1], "Events", view.overview.total_events.to_string(), Color::Green);
    ui::kpi_card(frame, cards[2], "Holidays", view.overview.holiday_count.to_string(), Color::Yellow);
    ui::kpi_card(frame, cards[3], "Reports", view.overview.report_count.to_string(), Color::Magenta);
}

fn draw_chart(frame: &mut Frame, area: Rect, series: &[DailyCount]) {
    let block = Block::default().borders(Borders::ALL).title("Events over time");
    if series.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        ui::centered_note(frame, inner, "No events to display");
        return;
    }

    let success: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(index, day)| (index as f64, day.success as f64))
        .collect();
    let failed: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(index, day)| (index as f64, day.failed as f64))
        .collect();
    let max = series
        .iter()
        .map(|day| day.success.max(day.failed))
        .max()
        .unwrap_or(0)
        .max(1);

    let datasets = vec![
        Dataset::default()
            .name("Success")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(&success),
        Dataset::default()
            .name("Failed")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::LightRed))
            .data(&failed),
    ];
    let first = series[0].date.format("%b %-d").to_string();
    let last = series[series.len() - 1].date.format("%b %-d").to_string();
    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, (series.len().saturating_sub(1)).max(1) as f64])
                .labels(vec![first, last]),
        )
        .y_axis(
            Axis::default()
                .bounds([0.0, max as f64])
                .labels(vec!["0".to_string(), max.to_string()]),
        );
    frame.render_widget(chart, area);
}

fn draw_gauge(frame: &mut Frame, area: Rect, view: &DashboardView, scope: &GaugeScope) {
    let block = Block::default().borders(Borders::ALL).title("Success rate | Last 7 days");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 4 {
        return;
    }
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);
    frame.render_widget(
        Paragraph::new(format!("Project: {}", scope.label())).style(Style::default().fg(Color::Cyan)),
        rows[0],
    );
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green))
        .percent(u16::try_from(view.gauge.weekly_rate).unwrap_or(100))
        .label(format!("{}%", view.gauge.weekly_rate));
    frame.render_widget(gauge, rows[1]);
    frame.render_widget(
        Paragraph::new(format!("{} builds this week", view.gauge.weekly_builds)),
        rows[2],
    );
    frame.render_widget(
        Paragraph::new(format!("All-time: {}%", view.gauge.all_time_rate))
            .style(Style::default().fg(Color::DarkGray)),
        rows[3],
    );
}

fn draw_performance(frame: &mut Frame, area: Rect, stats: &[ProjectStat]) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Performance statistics | All-time");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if stats.is_empty() {
        ui::centered_note(frame, inner, "No events yet.");
        return;
    }
    for (index, stat) in stats.iter().take(inner.height as usize).enumerate() {
        let row = Rect::new(inner.x, inner.y + index as u16, inner.width, 1);
        let pct = stat.success_pct();
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Green).bg(Color::DarkGray))
            .percent(u16::try_from(pct).unwrap_or(100))
            .label(format!("{} | {pct}% success", stat.project));
        frame.render_widget(gauge, row);
    }
}

fn draw_recent(frame: &mut Frame, area: Rect, recent: &[&DevEvent]) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Recent activity | Last 10 builds");
    if recent.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        ui::centered_note(frame, inner, "No events in selected range.");
        return;
    }
    let bars: Vec<Bar> = recent
        .iter()
        .map(|event| {
            // success bars are drawn taller than failures
            let (value, color) = if event.is_success() {
                (2, Color::Green)
            } else {
                (1, Color::LightRed)
            };
            Bar::default()
                .value(value)
                .label(Line::from(event.timestamp.format("%b %-d").to_string()))
                .text_value(truncated(event.project(), 8))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        })
        .collect();
    let chart = BarChart::default()
        .block(block)
        .bar_width(9)
        .bar_gap(1)
        .max(2)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

fn truncated(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        value.to_string()
    } else {
        let head: String = value.chars().take(max.saturating_sub(1)).collect();
        format!("{head}~")
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn truncated_keeps_short_names() {
        assert_eq!(super::truncated("api", 8), "api");
        assert_eq!(super::truncated("exactly8", 8), "exactly8");
    }

    #[test]
    fn truncated_marks_long_names() {
        assert_eq!(super::truncated("payment-gateway", 8), "payment~");
    }
}
