use chrono::DateTime;
use chrono::Datelike;
use chrono::Local;
use chrono::SecondsFormat;
use chrono::TimeZone;
use chrono::Utc;
use framework::exception;
use framework::exception::DevPulseResult;
use framework::exception::error_code;
use framework::http::HttpClient;
use framework::http::HttpRequest;
use framework::json;

use crate::event::DevEvent;
use crate::event::TimeRange;

pub struct EventApi {
    base_url: String,
    client: HttpClient,
}

impl EventApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        EventApi {
            base_url: base_url.into(),
            client: HttpClient::default(),
        }
    }

    pub async fn events_in_range(&self, range: TimeRange) -> DevPulseResult<Vec<DevEvent>> {
        self.fetch(range_url(&self.base_url, range, Local::now())).await
    }

    pub async fn all_events(&self) -> DevPulseResult<Vec<DevEvent>> {
        self.fetch(format!("{}/dev-events", self.base_url)).await
    }

    async fn fetch(&self, url: String) -> DevPulseResult<Vec<DevEvent>> {
        let response = self.client.execute(HttpRequest::get(url)).await?;
        if !response.is_success() {
            return Err(exception!(
                code = error_code::HTTP_REQUEST_FAILED,
                message = format!("failed to fetch dev events, status={}", response.status)
            ));
        }
        json::from_json(&response.body)
    }
}

fn range_url<T>(base: &str, range: TimeRange, now: DateTime<T>) -> String
where
    T: TimeZone,
{
    match range {
        TimeRange::Last7Days => format!("{base}/dev-events/filter/last-days?days=7"),
        TimeRange::Last30Days => format!("{base}/dev-events/filter/last-days?days=30"),
        TimeRange::ThisYear => {
            // Jan 1 through Dec 31 of the current calendar year in client local time
            let timezone = now.timezone();
            let year = now.year();
            let start = timezone.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap().with_timezone(&Utc);
            let end = timezone
                .with_ymd_and_hms(year, 12, 31, 23, 59, 59)
                .unwrap()
                .with_timezone(&Utc);
            format!(
                "{base}/dev-events/filter/date-range?start={}&end={}",
                start.to_rfc3339_opts(SecondsFormat::Millis, true),
                end.to_rfc3339_opts(SecondsFormat::Millis, true)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;
    use chrono::TimeZone;

    use crate::event::TimeRange;

    const BASE: &str = "http://localhost:8080/api";

    #[test]
    fn range_url_for_last_days() {
        let now = FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(
            super::range_url(BASE, TimeRange::Last7Days, now),
            "http://localhost:8080/api/dev-events/filter/last-days?days=7"
        );
        assert_eq!(
            super::range_url(BASE, TimeRange::Last30Days, now),
            "http://localhost:8080/api/dev-events/filter/last-days?days=30"
        );
    }

    #[test]
    fn range_url_for_this_year() {
        let now = FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(
            super::range_url(BASE, TimeRange::ThisYear, now),
            "http://localhost:8080/api/dev-events/filter/date-range?start=2024-01-01T00:00:00.000Z&end=2024-12-31T23:59:59.000Z"
        );
    }

    #[test]
    fn range_url_uses_local_year_bounds() {
        // UTC+2, the year boundary shifts back two hours in UTC
        let now = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 1, 8, 30, 0)
            .unwrap();
        assert_eq!(
            super::range_url(BASE, TimeRange::ThisYear, now),
            "http://localhost:8080/api/dev-events/filter/date-range?start=2024-12-31T22:00:00.000Z&end=2025-12-31T21:59:59.000Z"
        );
    }
}
