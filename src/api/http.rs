use std::future::Future;
use std::pin::Pin;

/// Outgoing GET request: base URL plus ordered query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok_json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport contract for the provider client, so tests can swap the network out.
pub trait HttpClient: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, String>> + Send + 'a>>;
}

/// Production transport backed by reqwest with its default timeouts.
#[derive(Debug, Clone, Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(concat!("stockchart/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, String>> + Send + 'a>> {
        Box::pin(async move {
            let response = self
                .client
                .get(&request.url)
                .query(&request.query)
                .send()
                .await
                .map_err(|e| {
                    // The URL carries the API key.
                    let connect = e.is_connect();
                    let e = e.without_url();
                    if connect {
                        format!("connection failed: {}", e)
                    } else {
                        e.to_string()
                    }
                })?;

            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| format!("failed to read response body: {}", e.without_url()))?;

            Ok::<_, String>(HttpResponse { status, body })
        })
    }
}
