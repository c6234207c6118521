use std::io::{self, BufRead, Write};

use crate::models::query::Query;
use crate::services::validation_service::{
    validate_chart_code, validate_date, validate_date_order, validate_series_code, validate_symbol,
};
use crate::utils::errors::ValidationError;

pub const SYMBOL_PROMPT: &str = "Enter stock symbol: ";
pub const SERIES_PROMPT: &str = "Enter time series (1: Intraday, 2: Daily Adjusted, 3: Weekly, 4: Monthly): ";
pub const START_PROMPT: &str = "Enter start date (YYYY-MM-DD): ";
pub const END_PROMPT: &str = "Enter end date (YYYY-MM-DD): ";
pub const CHART_PROMPT: &str = "Choose a graph type (1: Line, 2: Bar): ";
pub const REPEAT_PROMPT: &str = "Do you want to search for another stock price? (y/n) ";

/// Line-oriented prompt over any reader/writer pair.
/// `None` from an `ask*` method means the input was closed.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message)?;
        self.output.flush()
    }

    /// Print `prompt` and read one trimmed line
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Re-ask `prompt` until `validate` accepts the answer
    pub fn ask_until_valid<T, F>(&mut self, prompt: &str, validate: F) -> io::Result<Option<T>>
    where
        F: Fn(&str) -> Result<T, ValidationError>,
    {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            match validate(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => {
                    tracing::debug!("Rejected input {:?}: {:?}", answer, e);
                    self.say(&e.to_string())?;
                }
            }
        }
    }

    /// Ask every field in order. Each field is re-asked on its own until valid.
    pub fn collect_query(&mut self) -> io::Result<Option<Query>> {
        let Some(symbol) = self.ask_until_valid(SYMBOL_PROMPT, validate_symbol)? else {
            return Ok(None);
        };
        let Some(series_kind) = self.ask_until_valid(SERIES_PROMPT, validate_series_code)? else {
            return Ok(None);
        };
        let Some(start_date) = self.ask_until_valid(START_PROMPT, |s| validate_date("start", s))? else {
            return Ok(None);
        };
        let Some(end_date) = self.ask_until_valid(END_PROMPT, |s| {
            let end = validate_date("end", s)?;
            validate_date_order(start_date, end)?;
            Ok(end)
        })?
        else {
            return Ok(None);
        };
        let Some(chart_style) = self.ask_until_valid(CHART_PROMPT, validate_chart_code)? else {
            return Ok(None);
        };

        Ok(Some(Query {
            symbol,
            series_kind,
            start_date,
            end_date,
            chart_style,
        }))
    }

    /// `Some(true)` only for "y"/"Y"
    pub fn ask_repeat(&mut self) -> io::Result<Option<bool>> {
        Ok(self
            .ask(REPEAT_PROMPT)?
            .map(|answer| answer.eq_ignore_ascii_case("y")))
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
