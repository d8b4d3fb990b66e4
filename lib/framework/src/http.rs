use std::collections::HashMap;
use std::time::Duration;

pub use http::HeaderName;
pub use http::header;
use reqwest::Method;
use reqwest::Request;
use reqwest::Url;
use tracing::Instrument;
use tracing::debug;
use tracing::debug_span;

use crate::exception::DevPulseResult;

pub struct HttpClient {
    client: reqwest::Client,
}

/// Read-only request, the dashboard only ever issues GETs.
pub struct HttpRequest {
    pub url: String,
    pub headers: HashMap<HeaderName, String>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        HttpRequest {
            url: url.into(),
            headers: HashMap::new(),
        }
    }
}

pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<HeaderName, String>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl HttpClient {
    pub async fn execute(&self, request: HttpRequest) -> DevPulseResult<HttpResponse> {
        let span = debug_span!("http_client", url = request.url);
        async {
            debug!(url = request.url, "[request] method=GET");
            let url = Url::parse(&request.url)?;
            let mut http_request = Request::new(Method::GET, url);
            for (key, value) in request.headers {
                debug!("[header] {}={}", key, value);
                http_request.headers_mut().insert(key, value.parse()?);
            }

            let response = self.client.execute(http_request).await?;
            let status = response.status().as_u16();
            let mut headers = HashMap::new();
            debug!(status, "[response]");
            for (key, value) in response.headers() {
                let value = value.to_str()?;
                debug!("[header] {key}={value}");
                headers.insert(key.to_owned(), value.to_string());
            }

            let body = response.text().await?;
            if let Some(content_type) = headers.get(&header::CONTENT_TYPE)
                && (content_type.contains("json") || content_type.contains("text"))
            {
                debug!("[response] body={body}");
            }

            Ok(HttpResponse { status, headers, body })
        }
        .instrument(span)
        .await
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        HttpClient {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .pool_idle_timeout(Duration::from_secs(300))
                .connection_verbose(false)
                .build()
                .unwrap(),
        }
    }
}
