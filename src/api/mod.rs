pub mod alphavantage;
pub mod http;

pub use alphavantage::AlphaVantageClient;
pub use http::{HttpClient, HttpRequest, HttpResponse, ReqwestHttpClient};
