use std::collections::BTreeMap;
use std::collections::HashSet;

use chrono::DateTime;
use chrono::Days;
use chrono::NaiveDate;
use chrono::TimeZone;
use chrono::Utc;
use indexmap::IndexMap;
use serde::Serialize;

use crate::event::DevEvent;
use crate::event::TimeRange;

pub const RECENT_ACTIVITY_LIMIT: usize = 10;

/// Filter state owned by the UI, passed into the aggregation as plain data.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewState {
    pub search_query: String,
    pub time_range: TimeRange,
    pub gauge_scope: GaugeScope,
}

/// Project narrowing for the success-rate gauge, independent of the search filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum GaugeScope {
    #[default]
    All,
    Project(String),
}

impl GaugeScope {
    pub fn label(&self) -> &str {
        match self {
            GaugeScope::All => "All projects",
            GaugeScope::Project(name) => name,
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Overview {
    pub total_events: usize,
    pub unique_developers: usize,
    pub unique_projects: usize,
    pub success_count: usize,
    pub failed_count: usize,
    pub success_rate: u32,
    pub report_count: usize,
    pub holiday_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectStat {
    pub project: String,
    pub success: usize,
    pub failed: usize,
}

impl ProjectStat {
    pub fn success_pct(&self) -> u32 {
        // zero denominator counts as one build, displays 0%
        percentage(self.success, (self.success + self.failed).max(1))
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct GaugeSummary {
    pub weekly_rate: u32,
    pub weekly_builds: usize,
    pub all_time_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub success: usize,
    pub failed: usize,
}

/// Everything the overview screen renders, derived from scratch on every draw.
pub struct DashboardView<'a> {
    pub overview: Overview,
    pub project_stats: Vec<ProjectStat>,
    pub gauge: GaugeSummary,
    pub series: Vec<DailyCount>,
    pub recent: Vec<&'a DevEvent>,
}

impl<'a> DashboardView<'a> {
    pub fn build<T>(events: &'a [DevEvent], state: &ViewState, now: DateTime<Utc>, timezone: &T) -> Self
    where
        T: TimeZone,
    {
        let filtered = filter_events(events, &state.search_query);
        DashboardView {
            overview: overview(&filtered),
            project_stats: project_stats(&filtered),
            gauge: gauge_summary(&filtered, &state.gauge_scope, now),
            series: daily_counts(&filtered, timezone),
            recent: recent_activity(&filtered, RECENT_ACTIVITY_LIMIT),
        }
    }
}

/// Case-insensitive substring match over developer, action and project name.
pub fn filter_events<'a>(events: &'a [DevEvent], query: &str) -> Vec<&'a DevEvent> {
    if query.is_empty() {
        return events.iter().collect();
    }
    let query = query.to_lowercase();
    events
        .iter()
        .filter(|event| {
            event.developer.to_lowercase().contains(&query)
                || event.action.to_lowercase().contains(&query)
                || event
                    .project_name
                    .as_deref()
                    .unwrap_or_default()
                    .to_lowercase()
                    .contains(&query)
        })
        .collect()
}

pub fn overview(events: &[&DevEvent]) -> Overview {
    let developers: HashSet<&str> = events.iter().map(|event| event.developer.as_str()).collect();
    let projects: HashSet<Option<&str>> = events.iter().map(|event| event.project_name.as_deref()).collect();
    let success_count = events.iter().filter(|event| event.is_success()).count();
    let failed_count = events.iter().filter(|event| event.is_failed()).count();
    Overview {
        total_events: events.len(),
        unique_developers: developers.len(),
        unique_projects: projects.len(),
        success_count,
        failed_count,
        success_rate: percentage(success_count, events.len()),
        report_count: success_count + failed_count,
        holiday_count: 0, // placeholder, there is no holiday source
    }
}

/// One pass over the filtered set, entries appear in first-sight order.
pub fn project_stats(events: &[&DevEvent]) -> Vec<ProjectStat> {
    let mut stats: IndexMap<&str, ProjectStat> = IndexMap::new();
    for event in events {
        let stat = stats.entry(event.project()).or_insert_with(|| ProjectStat {
            project: event.project().to_string(),
            success: 0,
            failed: 0,
        });
        if event.is_success() {
            stat.success += 1;
        } else if event.is_failed() {
            stat.failed += 1;
        }
    }
    stats.into_values().collect()
}

pub fn gauge_summary(events: &[&DevEvent], scope: &GaugeScope, now: DateTime<Utc>) -> GaugeSummary {
    let scoped: Vec<&DevEvent> = events
        .iter()
        .copied()
        .filter(|event| match scope {
            GaugeScope::All => true,
            GaugeScope::Project(name) => event.project() == name,
        })
        .collect();

    let week_start = now - Days::new(7);
    let weekly: Vec<&DevEvent> = scoped
        .iter()
        .copied()
        .filter(|event| event.timestamp >= week_start)
        .collect();
    let weekly_success = weekly.iter().filter(|event| event.is_success()).count();
    let all_time_success = scoped.iter().filter(|event| event.is_success()).count();

    GaugeSummary {
        weekly_rate: percentage(weekly_success, weekly.len()),
        weekly_builds: weekly.len(),
        all_time_rate: percentage(all_time_success, scoped.len()),
    }
}

/// Success/failed tallies per calendar date, unique dates in ascending order.
pub fn daily_counts<T>(events: &[&DevEvent], timezone: &T) -> Vec<DailyCount>
where
    T: TimeZone,
{
    let mut days: BTreeMap<NaiveDate, (usize, usize)> = BTreeMap::new();
    for event in events {
        let date = event.timestamp.with_timezone(timezone).date_naive();
        let counts = days.entry(date).or_default();
        if event.is_success() {
            counts.0 += 1;
        } else if event.is_failed() {
            counts.1 += 1;
        }
    }
    days.into_iter()
        .map(|(date, (success, failed))| DailyCount { date, success, failed })
        .collect()
}

pub fn recent_activity<'a>(events: &[&'a DevEvent], limit: usize) -> Vec<&'a DevEvent> {
    let mut recent = events.to_vec();
    recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)); // stable, ties keep fetch order
    recent.truncate(limit);
    recent
}

fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((count * 100 + total / 2) / total) as u32 // rounds half up
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use chrono::NaiveDate;
    use chrono::Utc;

    use super::GaugeScope;
    use crate::event::DevEvent;
    use crate::event::UNKNOWN_PROJECT;

    fn event(id: i64, developer: &str, action: &str, project: Option<&str>, timestamp: &str) -> DevEvent {
        DevEvent {
            id,
            developer: developer.to_string(),
            action: action.to_string(),
            project_name: project.map(str::to_string),
            timestamp: timestamp.parse().unwrap(),
            metadata: None,
        }
    }

    fn date(value: &str) -> NaiveDate {
        value.parse().unwrap()
    }

    fn now(value: &str) -> DateTime<Utc> {
        value.parse().unwrap()
    }

    #[test]
    fn overview_of_two_events() {
        let events = [
            event(1, "a", "BUILD_SUCCESS", Some("X"), "2024-01-01T00:00:00Z"),
            event(2, "b", "BUILD_FAILED", Some("X"), "2024-01-02T00:00:00Z"),
        ];
        let filtered = super::filter_events(&events, "");
        let overview = super::overview(&filtered);
        assert_eq!(overview.total_events, 2);
        assert_eq!(overview.unique_developers, 2);
        assert_eq!(overview.unique_projects, 1);
        assert_eq!(overview.success_count, 1);
        assert_eq!(overview.failed_count, 1);
        assert_eq!(overview.success_rate, 50);
        assert_eq!(overview.report_count, 2);
        assert_eq!(overview.holiday_count, 0);

        let stats = super::project_stats(&filtered);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].project, "X");
        assert_eq!(stats[0].success, 1);
        assert_eq!(stats[0].failed, 1);
        assert_eq!(stats[0].success_pct(), 50);
    }

    #[test]
    fn overview_of_empty_collection() {
        let filtered = super::filter_events(&[], "");
        let overview = super::overview(&filtered);
        assert_eq!(overview.total_events, 0);
        assert_eq!(overview.unique_developers, 0);
        assert_eq!(overview.unique_projects, 0);
        assert_eq!(overview.success_rate, 0);
        assert!(super::project_stats(&filtered).is_empty());
        assert!(super::daily_counts(&filtered, &Utc).is_empty());
        assert!(super::recent_activity(&filtered, 10).is_empty());
        let gauge = super::gauge_summary(&filtered, &GaugeScope::All, now("2024-06-01T00:00:00Z"));
        assert_eq!(gauge.weekly_rate, 0);
        assert_eq!(gauge.weekly_builds, 0);
        assert_eq!(gauge.all_time_rate, 0);
    }

    #[test]
    fn other_actions_count_towards_total_only() {
        let events = [
            event(1, "a", "BUILD_SUCCESS", Some("X"), "2024-01-01T00:00:00Z"),
            event(2, "a", "DEPLOY_STARTED", Some("X"), "2024-01-02T00:00:00Z"),
            event(3, "a", "BUILD_FAILED", Some("X"), "2024-01-03T00:00:00Z"),
        ];
        let filtered = super::filter_events(&events, "");
        let overview = super::overview(&filtered);
        assert_eq!(overview.total_events, 3);
        assert_eq!(overview.success_count + overview.failed_count, 2);
        assert_eq!(overview.report_count, 2);
        assert_eq!(overview.success_rate, 33);
    }

    #[test]
    fn filter_matches_developer_action_and_project() {
        let events = [
            event(1, "Alice", "BUILD_SUCCESS", Some("checkout"), "2024-01-01T00:00:00Z"),
            event(2, "bob", "BUILD_FAILED", Some("billing"), "2024-01-02T00:00:00Z"),
        ];
        assert_eq!(super::filter_events(&events, "ALICE").len(), 1);
        assert_eq!(super::filter_events(&events, "failed")[0].id, 2);
        assert_eq!(super::filter_events(&events, "check")[0].id, 1);
        assert_eq!(super::filter_events(&events, "build").len(), 2);
        assert!(super::filter_events(&events, "nothing-matches").is_empty());
    }

    #[test]
    fn filter_totals_come_from_filtered_set_only() {
        let events = [
            event(1, "a", "BUILD_SUCCESS", Some("X"), "2024-01-01T00:00:00Z"),
            event(2, "b", "BUILD_FAILED", Some("Y"), "2024-01-02T00:00:00Z"),
        ];
        let filtered = super::filter_events(&events, "x");
        assert_eq!(filtered.len(), 1);
        let overview = super::overview(&filtered);
        assert_eq!(overview.total_events, 1);
        assert_eq!(overview.failed_count, 0);
        assert_eq!(overview.success_rate, 100);
    }

    #[test]
    fn project_stats_group_missing_project_under_unknown() {
        let events = [
            event(1, "a", "BUILD_SUCCESS", None, "2024-01-01T00:00:00Z"),
            event(2, "a", "BUILD_FAILED", None, "2024-01-02T00:00:00Z"),
            event(3, "a", "BUILD_SUCCESS", Some("X"), "2024-01-03T00:00:00Z"),
        ];
        let filtered = super::filter_events(&events, "");
        let stats = super::project_stats(&filtered);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].project, UNKNOWN_PROJECT); // first-sight order
        assert_eq!(stats[0].success, 1);
        assert_eq!(stats[0].failed, 1);
        assert_eq!(stats[1].project, "X");
    }

    #[test]
    fn success_pct_with_zero_denominator() {
        let events = [event(1, "a", "DEPLOY_STARTED", Some("X"), "2024-01-01T00:00:00Z")];
        let filtered = super::filter_events(&events, "");
        let stats = super::project_stats(&filtered);
        assert_eq!(stats[0].success + stats[0].failed, 0);
        assert_eq!(stats[0].success_pct(), 0);
    }

    #[test]
    fn gauge_scope_narrows_rolling_window() {
        let now = now("2024-06-10T00:00:00Z");
        let events = [
            event(1, "a", "BUILD_SUCCESS", Some("X"), "2024-06-08T00:00:00Z"),
            event(2, "a", "BUILD_FAILED", Some("X"), "2024-06-09T00:00:00Z"),
            event(3, "a", "BUILD_SUCCESS", Some("Y"), "2024-06-09T12:00:00Z"),
            event(4, "a", "BUILD_FAILED", Some("X"), "2024-01-01T00:00:00Z"), // outside the window
        ];
        let filtered = super::filter_events(&events, "");

        let all = super::gauge_summary(&filtered, &GaugeScope::All, now);
        assert_eq!(all.weekly_builds, 3);
        assert_eq!(all.weekly_rate, 67);
        assert_eq!(all.all_time_rate, 50);

        let scoped = super::gauge_summary(&filtered, &GaugeScope::Project("X".to_string()), now);
        assert_eq!(scoped.weekly_builds, 2);
        assert_eq!(scoped.weekly_rate, 50);
        assert_eq!(scoped.all_time_rate, 33);
    }

    #[test]
    fn gauge_window_includes_exact_boundary() {
        let now = now("2024-06-10T00:00:00Z");
        let events = [event(1, "a", "BUILD_SUCCESS", Some("X"), "2024-06-03T00:00:00Z")];
        let filtered = super::filter_events(&events, "");
        let gauge = super::gauge_summary(&filtered, &GaugeScope::All, now);
        assert_eq!(gauge.weekly_builds, 1);
        assert_eq!(gauge.weekly_rate, 100);
    }

    #[test]
    fn daily_counts_are_unique_and_sorted() {
        let events = [
            event(1, "a", "BUILD_SUCCESS", Some("X"), "2024-03-05T10:00:00Z"),
            event(2, "a", "BUILD_FAILED", Some("X"), "2024-03-01T08:00:00Z"),
            event(3, "a", "BUILD_SUCCESS", Some("X"), "2024-03-05T18:00:00Z"),
            event(4, "a", "BUILD_SUCCESS", Some("X"), "2024-03-03T00:00:00Z"),
        ];
        let filtered = super::filter_events(&events, "");
        let series = super::daily_counts(&filtered, &Utc);
        let dates: Vec<_> = series.iter().map(|day| day.date).collect();
        assert_eq!(dates, vec![date("2024-03-01"), date("2024-03-03"), date("2024-03-05")]);
        assert_eq!(series[2].success, 2);
        assert_eq!(series[2].failed, 0);
        assert_eq!(series[0].failed, 1);
    }

    #[test]
    fn recent_activity_is_descending_and_capped() {
        let events: Vec<DevEvent> = (0..15)
            .map(|i| {
                event(
                    i,
                    "a",
                    "BUILD_SUCCESS",
                    Some("X"),
                    &format!("2024-01-{:02}T00:00:00Z", i + 1),
                )
            })
            .collect();
        let filtered = super::filter_events(&events, "");
        let recent = super::recent_activity(&filtered, super::RECENT_ACTIVITY_LIMIT);
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].id, 14);
        assert!(recent.windows(2).all(|pair| pair[0].timestamp >= pair[1].timestamp));
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(super::percentage(1, 3), 33);
        assert_eq!(super::percentage(2, 3), 67);
        assert_eq!(super::percentage(1, 2), 50);
        assert_eq!(super::percentage(5, 8), 63);
        assert_eq!(super::percentage(0, 0), 0);
        assert_eq!(super::percentage(3, 3), 100);
    }
}
