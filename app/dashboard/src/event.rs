use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

pub const BUILD_SUCCESS: &str = "BUILD_SUCCESS";
pub const BUILD_FAILED: &str = "BUILD_FAILED";

pub const UNKNOWN_PROJECT: &str = "Unknown";

// event schema from the dev-events api
#[derive(Debug, Clone, Deserialize)]
pub struct DevEvent {
    pub id: i64,
    #[serde(default)]
    pub developer: String,
    #[serde(default)]
    pub action: String,
    #[serde(default, rename = "projectName")]
    pub project_name: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub metadata: Option<String>,
}

impl DevEvent {
    pub fn is_success(&self) -> bool {
        self.action == BUILD_SUCCESS
    }

    pub fn is_failed(&self) -> bool {
        self.action == BUILD_FAILED
    }

    // grouping key, events without a project land under "Unknown"
    pub fn project(&self) -> &str {
        self.project_name.as_deref().unwrap_or(UNKNOWN_PROJECT)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum TimeRange {
    #[default]
    #[serde(rename = "THIS_YEAR")]
    ThisYear,
    #[serde(rename = "30_DAYS")]
    Last30Days,
    #[serde(rename = "7_DAYS")]
    Last7Days,
}

impl TimeRange {
    pub fn label(self) -> &'static str {
        match self {
            TimeRange::ThisYear => "This year",
            TimeRange::Last30Days => "Last 30 days",
            TimeRange::Last7Days => "Last 7 days",
        }
    }

    pub fn next(self) -> Self {
        match self {
            TimeRange::ThisYear => TimeRange::Last30Days,
            TimeRange::Last30Days => TimeRange::Last7Days,
            TimeRange::Last7Days => TimeRange::ThisYear,
        }
    }
}

#[cfg(test)]
mod tests {
    use framework::json;

    use super::DevEvent;
    use super::TimeRange;

    #[test]
    fn deserialize_event() {
        let event: DevEvent = json::from_json(
            r#"{"id":1,"developer":"alice","action":"BUILD_SUCCESS","projectName":"api","timestamp":"2024-01-01T00:00:00Z","metadata":"{\"branch\":\"main\"}"}"#,
        )
        .unwrap();
        assert_eq!(event.project(), "api");
        assert!(event.is_success());
        assert!(!event.is_failed());
    }

    #[test]
    fn deserialize_event_with_missing_fields() {
        let event: DevEvent = json::from_json(r#"{"id":2,"timestamp":"2024-01-01T00:00:00Z"}"#).unwrap();
        assert_eq!(event.developer, "");
        assert_eq!(event.action, "");
        assert_eq!(event.project(), "Unknown");
        assert_eq!(event.metadata, None);
        assert!(!event.is_success());
        assert!(!event.is_failed());
    }

    #[test]
    fn time_range_cycle() {
        assert_eq!(TimeRange::ThisYear.next(), TimeRange::Last30Days);
        assert_eq!(TimeRange::Last30Days.next(), TimeRange::Last7Days);
        assert_eq!(TimeRange::Last7Days.next(), TimeRange::ThisYear);
    }
}
