use thiserror::Error;

/// Rejected user input. The session re-asks the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid symbol. Symbol must be 1-7 capitalized alpha characters.")]
    Symbol(String),
    #[error("Invalid time series. Please enter 1, 2, 3, or 4.")]
    SeriesCode(String),
    #[error("Invalid {field} date. Please enter a valid date in the format YYYY-MM-DD.")]
    Date { field: &'static str, value: String },
    #[error("End date must not be before the start date.")]
    DateOrder,
    #[error("Invalid chart type. Please choose 1 for Line or 2 for Bar.")]
    ChartCode(String),
}

/// Startup configuration problems. These are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Failure talking to the market-data provider.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("HTTP error ({status}): {body}")]
    Http { status: u16, body: String },
    #[error("response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("provider says: {0}")]
    ProviderMessage(String),
}

/// Malformed payload content found while walking a time series.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("missing field '{0}' in response")]
    MissingField(String),
    #[error("could not parse timestamp '{value}' with format '{format}'")]
    InvalidTimestamp { value: String, format: &'static str },
    #[error("could not convert {field} '{value}' to a number")]
    InvalidNumber { field: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("no price data in the selected range")]
    Empty,
    #[error("failed to draw chart: {0}")]
    Drawing(String),
    #[error("failed to prepare chart output: {0}")]
    Io(#[from] std::io::Error),
}

/// Anything that aborts one iteration of the interactive session.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Chart(#[from] ChartError),
}

/// Strip the transport noise from an error message before showing it at the prompt.
///
/// reqwest errors arrive as "error sending request for url (https://...): <cause>";
/// the URL carries the API key, so only the cause is kept.
pub fn extract_clean_error(error_msg: &str) -> String {
    if error_msg.contains("for url (") {
        if let Some(last_colon) = error_msg.rfind("): ") {
            return error_msg[last_colon + 3..].trim().to_string();
        }
    }
    error_msg.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_error_drops_request_url() {
        let raw = "request failed: error sending request for url (https://x.test/query?apikey=secret): connection refused";
        assert_eq!(extract_clean_error(raw), "connection refused");
    }

    #[test]
    fn clean_error_keeps_plain_messages() {
        assert_eq!(
            extract_clean_error("missing field '1. open' in response"),
            "missing field '1. open' in response"
        );
    }

    #[test]
    fn app_error_is_transparent() {
        let err = AppError::from(ExtractError::MissingField("4. close".into()));
        assert_eq!(err.to_string(), "missing field '4. close' in response");

        let err = AppError::from(ChartError::Empty);
        assert!(matches!(err, AppError::Chart(ChartError::Empty)));
        assert_eq!(err.to_string(), ChartError::Empty.to_string());
    }
}
