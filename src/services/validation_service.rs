use std::sync::OnceLock;
use chrono::NaiveDate;
use regex::Regex;

use crate::models::query::{ChartStyle, SeriesKind, Symbol};
use crate::utils::errors::ValidationError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn symbol_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z]{1,7}$").expect("symbol pattern is valid"))
}

/// Accept one to seven uppercase ASCII letters, nothing else.
/// No case folding: "aapl" is rejected.
pub fn validate_symbol(input: &str) -> Result<Symbol, ValidationError> {
    if symbol_pattern().is_match(input) {
        Ok(Symbol(input.to_string()))
    } else {
        Err(ValidationError::Symbol(input.to_string()))
    }
}

/// Map a menu code (1-4) to a series kind
pub fn validate_series_code(input: &str) -> Result<SeriesKind, ValidationError> {
    SeriesKind::from_code(input).ok_or_else(|| ValidationError::SeriesCode(input.to_string()))
}

/// Parse a `YYYY-MM-DD` calendar date. `field` names the prompt in the error ("start", "end").
pub fn validate_date(field: &'static str, input: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| ValidationError::Date {
        field,
        value: input.to_string(),
    })
}

pub fn validate_date_order(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end < start {
        return Err(ValidationError::DateOrder);
    }
    Ok(())
}

/// Map a menu code (1 line, 2 bar) to a chart style
pub fn validate_chart_code(input: &str) -> Result<ChartStyle, ValidationError> {
    ChartStyle::from_code(input).ok_or_else(|| ValidationError::ChartCode(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols() {
        for ok in ["AAPL", "A", "GOOGLEX", "IBM"] {
            assert_eq!(validate_symbol(ok).map(|s| s.to_string()), Ok(ok.to_string()));
        }
        for bad in ["aapl", "TOOLONGSYM", "", "BRK.B", "AAPL ", "A1", "ÄPFEL"] {
            assert_eq!(
                validate_symbol(bad),
                Err(ValidationError::Symbol(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn dates() {
        assert_eq!(
            validate_date("start", "2023-01-15"),
            Ok(NaiveDate::from_ymd_opt(2023, 1, 15).unwrap())
        );
        for bad in ["2023-13-01", "2023-02-30", "15/01/2023", "2023-01-15 09:30:00", ""] {
            assert!(validate_date("end", bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn date_error_names_the_field() {
        let err = validate_date("start", "tomorrow").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid start date. Please enter a valid date in the format YYYY-MM-DD."
        );
    }

    #[test]
    fn end_may_equal_start_but_not_precede_it() {
        let day = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
        assert!(validate_date_order(day, day).is_ok());
        assert_eq!(
            validate_date_order(day, day.pred_opt().unwrap()),
            Err(ValidationError::DateOrder)
        );
    }

    #[test]
    fn menu_codes() {
        assert_eq!(validate_series_code("3"), Ok(SeriesKind::Weekly));
        assert!(validate_series_code("0").is_err());
        assert!(validate_series_code("weekly").is_err());
        assert_eq!(validate_chart_code("2"), Ok(ChartStyle::Bar));
        assert!(validate_chart_code("3").is_err());
    }
}
