//! Query models: what the user asked for in one iteration

use std::fmt::{Display, Formatter};
use chrono::{Duration, NaiveDate};

/// Uppercase ticker of one to seven ASCII letters.
///
/// Only [`crate::services::validation_service::validate_symbol`] constructs one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(pub(crate) String);

impl Symbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sampling granularity requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    Intraday,
    DailyAdjusted,
    Weekly,
    Monthly,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 4] = [
        SeriesKind::Intraday,
        SeriesKind::DailyAdjusted,
        SeriesKind::Weekly,
        SeriesKind::Monthly,
    ];

    /// Menu code shown at the series prompt
    pub fn code(self) -> &'static str {
        match self {
            SeriesKind::Intraday => "1",
            SeriesKind::DailyAdjusted => "2",
            SeriesKind::Weekly => "3",
            SeriesKind::Monthly => "4",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// Value of the provider's `function` query parameter
    pub fn function(self) -> &'static str {
        match self {
            SeriesKind::Intraday => "TIME_SERIES_INTRADAY",
            SeriesKind::DailyAdjusted => "TIME_SERIES_DAILY_ADJUSTED",
            SeriesKind::Weekly => "TIME_SERIES_WEEKLY",
            SeriesKind::Monthly => "TIME_SERIES_MONTHLY",
        }
    }

    /// Name of the payload object holding the series
    pub fn collection_key(self) -> &'static str {
        match self {
            SeriesKind::Intraday => "Time Series (5min)",
            SeriesKind::DailyAdjusted => "Time Series (Daily)",
            SeriesKind::Weekly => "Weekly Time Series",
            SeriesKind::Monthly => "Monthly Time Series",
        }
    }

    /// `interval` parameter, only sent for intraday requests
    pub fn interval(self) -> Option<&'static str> {
        match self {
            SeriesKind::Intraday => Some("5min"),
            _ => None,
        }
    }

    /// chrono format of the entry keys inside the collection
    pub fn key_format(self) -> &'static str {
        match self {
            SeriesKind::Intraday => "%Y-%m-%d %H:%M:%S",
            _ => "%Y-%m-%d",
        }
    }

    /// chrono format of the x-axis tick labels
    pub fn label_format(self) -> &'static str {
        match self {
            SeriesKind::Intraday => "%Y-%m-%d %H:%M",
            _ => "%Y-%m-%d",
        }
    }

    /// Nominal distance between two samples
    pub fn spacing(self) -> Duration {
        match self {
            SeriesKind::Intraday => Duration::minutes(5),
            SeriesKind::DailyAdjusted => Duration::days(1),
            SeriesKind::Weekly => Duration::weeks(1),
            SeriesKind::Monthly => Duration::days(30),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SeriesKind::Intraday => "intraday",
            SeriesKind::DailyAdjusted => "daily",
            SeriesKind::Weekly => "weekly",
            SeriesKind::Monthly => "monthly",
        }
    }
}

impl Display for SeriesKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.function())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartStyle {
    Line,
    Bar,
}

impl ChartStyle {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(ChartStyle::Line),
            "2" => Some(ChartStyle::Bar),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChartStyle::Line => "line",
            ChartStyle::Bar => "bar",
        }
    }
}

/// One fully validated request. Built once per iteration and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub symbol: Symbol,
    pub series_kind: SeriesKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub chart_style: ChartStyle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_codes_map_to_provider_functions() {
        assert_eq!(SeriesKind::from_code("1"), Some(SeriesKind::Intraday));
        assert_eq!(
            SeriesKind::from_code("2").map(SeriesKind::function),
            Some("TIME_SERIES_DAILY_ADJUSTED")
        );
        assert_eq!(SeriesKind::from_code("4"), Some(SeriesKind::Monthly));
        assert_eq!(SeriesKind::from_code("5"), None);
        assert_eq!(SeriesKind::from_code(""), None);
    }

    #[test]
    fn only_intraday_sends_an_interval() {
        assert_eq!(SeriesKind::Intraday.interval(), Some("5min"));
        assert!(SeriesKind::Weekly.interval().is_none());
        assert_eq!(SeriesKind::Intraday.key_format(), "%Y-%m-%d %H:%M:%S");
        assert_eq!(SeriesKind::Monthly.key_format(), "%Y-%m-%d");
    }

    #[test]
    fn chart_codes() {
        assert_eq!(ChartStyle::from_code("1"), Some(ChartStyle::Line));
        assert_eq!(ChartStyle::from_code("2"), Some(ChartStyle::Bar));
        assert_eq!(ChartStyle::from_code("line"), None);
    }
}
