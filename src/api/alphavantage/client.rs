use std::sync::Arc;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::models::ProviderNotice;
use crate::api::http::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::config::Config;
use crate::models::query::Query;
use crate::utils::errors::FetchError;

/// Alpha Vantage time-series client. One GET per call, no retries.
pub struct AlphaVantageClient {
    http_client: Arc<dyn HttpClient>,
    api_key: String,
    base_url: String,
}

impl AlphaVantageClient {
    /// Create a client that talks to the configured endpoint over reqwest
    pub fn new(config: &Config) -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()), config)
    }

    /// Create a client over a custom transport (for testing)
    pub fn with_http_client(http_client: Arc<dyn HttpClient>, config: &Config) -> Self {
        Self {
            http_client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
        }
    }

    /// Query string for one request: function, symbol, outputsize, apikey,
    /// and interval for intraday series only.
    pub fn build_request(&self, query: &Query) -> HttpRequest {
        let kind = query.series_kind;
        let mut request = HttpRequest::get(&self.base_url)
            .with_param("function", kind.function())
            .with_param("symbol", query.symbol.as_str())
            .with_param("outputsize", "full")
            .with_param("apikey", &self.api_key);

        if let Some(interval) = kind.interval() {
            request = request.with_param("interval", interval);
        }
        request
    }

    /// GET the series for `query` and return the decoded JSON body.
    ///
    /// # Returns
    /// * `Ok(Value)` - the payload, with object keys in the order the provider sent them
    /// * `Err(FetchError)` - transport failure, non-2xx status, invalid JSON or a provider notice
    pub async fn fetch_payload(&self, query: &Query) -> Result<Value, FetchError> {
        let request = self.build_request(query);
        debug!(
            "GET {} function={} symbol={} interval={:?}",
            request.url,
            query.series_kind.function(),
            query.symbol,
            query.series_kind.interval()
        );

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(FetchError::Transport)?;

        if !response.is_success() {
            warn!("Provider returned status {}", response.status);
            return Err(FetchError::Http {
                status: response.status,
                body: response.body,
            });
        }

        let payload: Value = serde_json::from_str(&response.body)?;

        if payload.get(query.series_kind.collection_key()).is_none() {
            if let Ok(notice) = ProviderNotice::deserialize(&payload) {
                if let Some(message) = notice.message() {
                    warn!("Provider notice for {}: {}", query.symbol, message);
                    return Err(FetchError::ProviderMessage(message.to_string()));
                }
            }
        }

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::http::HttpResponse;
    use crate::models::query::{ChartStyle, SeriesKind, Symbol};
    use chrono::NaiveDate;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;

    struct RecordingHttpClient {
        response: Result<HttpResponse, String>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl RecordingHttpClient {
        fn returning(response: Result<HttpResponse, String>) -> Arc<Self> {
            Arc::new(Self {
                response,
                requests: Mutex::new(Vec::new()),
            })
        }

        fn recorded_requests(&self) -> Vec<HttpRequest> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .clone()
        }
    }

    impl HttpClient for RecordingHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, String>> + Send + 'a>> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .push(request);
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    fn config() -> Config {
        Config::from_lookup(|key| match key {
            "ALPHAVANTAGE_API_KEY" => Some("test-key".to_string()),
            "ALPHAVANTAGE_BASE_URL" => Some("https://example.test/query".to_string()),
            _ => None,
        })
        .expect("valid config")
    }

    fn query(kind: SeriesKind) -> Query {
        Query {
            symbol: Symbol("IBM".to_string()),
            series_kind: kind,
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2023, 1, 31).unwrap(),
            chart_style: ChartStyle::Line,
        }
    }

    #[tokio::test]
    async fn intraday_request_carries_interval() {
        let transport = RecordingHttpClient::returning(Ok(HttpResponse::ok_json(
            r#"{"Time Series (5min)": {}}"#,
        )));
        let client = AlphaVantageClient::with_http_client(transport.clone(), &config());

        client.fetch_payload(&query(SeriesKind::Intraday)).await.unwrap();

        let requests = transport.recorded_requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.url, "https://example.test/query");
        assert_eq!(request.param("function"), Some("TIME_SERIES_INTRADAY"));
        assert_eq!(request.param("symbol"), Some("IBM"));
        assert_eq!(request.param("outputsize"), Some("full"));
        assert_eq!(request.param("apikey"), Some("test-key"));
        assert_eq!(request.param("interval"), Some("5min"));
    }

    #[test]
    fn non_intraday_request_has_no_interval() {
        let transport = RecordingHttpClient::returning(Ok(HttpResponse::ok_json("{}")));
        let client = AlphaVantageClient::with_http_client(transport, &config());

        let request = client.build_request(&query(SeriesKind::DailyAdjusted));
        assert_eq!(request.param("function"), Some("TIME_SERIES_DAILY_ADJUSTED"));
        assert_eq!(request.param("interval"), None);
        assert_eq!(request.query.len(), 4);
    }

    #[tokio::test]
    async fn error_status_is_http_error() {
        let transport = RecordingHttpClient::returning(Ok(HttpResponse {
            status: 503,
            body: "unavailable".to_string(),
        }));
        let client = AlphaVantageClient::with_http_client(transport, &config());

        match client.fetch_payload(&query(SeriesKind::Weekly)).await {
            Err(FetchError::Http { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "unavailable");
            }
            other => panic!("expected HTTP error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn invalid_json_is_parse_error() {
        let transport = RecordingHttpClient::returning(Ok(HttpResponse::ok_json("<html>")));
        let client = AlphaVantageClient::with_http_client(transport, &config());

        let err = client.fetch_payload(&query(SeriesKind::Monthly)).await.unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[tokio::test]
    async fn transport_failure_is_reported() {
        let transport = RecordingHttpClient::returning(Err("connection failed: refused".to_string()));
        let client = AlphaVantageClient::with_http_client(transport, &config());

        let err = client.fetch_payload(&query(SeriesKind::Monthly)).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(ref m) if m.contains("refused")));
    }

    #[tokio::test]
    async fn provider_notice_is_surfaced() {
        let transport = RecordingHttpClient::returning(Ok(HttpResponse::ok_json(
            r#"{"Error Message": "Invalid API call. Please retry or visit the documentation."}"#,
        )));
        let client = AlphaVantageClient::with_http_client(transport, &config());

        let err = client.fetch_payload(&query(SeriesKind::Weekly)).await.unwrap_err();
        assert!(matches!(err, FetchError::ProviderMessage(ref m) if m.starts_with("Invalid API call")));
    }

    #[tokio::test]
    async fn payload_without_series_or_notice_is_passed_through() {
        let transport = RecordingHttpClient::returning(Ok(HttpResponse::ok_json(r#"{"Meta Data": {}}"#)));
        let client = AlphaVantageClient::with_http_client(transport, &config());

        let payload = client.fetch_payload(&query(SeriesKind::Weekly)).await.unwrap();
        assert!(payload.get("Meta Data").is_some());
    }
}
