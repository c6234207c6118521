//! Runtime configuration, read once at startup from the environment (and `.env`)

use std::path::PathBuf;
use crate::utils::errors::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
pub const DEFAULT_OUTPUT_DIR: &str = "charts";
pub const DEFAULT_CHART_WIDTH: u32 = 1000;
pub const DEFAULT_CHART_HEIGHT: u32 = 500;

const API_KEY_VAR: &str = "ALPHAVANTAGE_API_KEY";
const BASE_URL_VAR: &str = "ALPHAVANTAGE_BASE_URL";
const OUTPUT_DIR_VAR: &str = "STOCKCHART_OUTPUT_DIR";
const WIDTH_VAR: &str = "STOCKCHART_CHART_WIDTH";
const HEIGHT_VAR: &str = "STOCKCHART_CHART_HEIGHT";

#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub output_dir: PathBuf,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Config {
    /// Build from the process environment. Call `dotenv::dotenv()` first.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = non_empty(API_KEY_VAR).ok_or(ConfigError::Missing(API_KEY_VAR))?;
        let base_url = non_empty(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let output_dir = non_empty(OUTPUT_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        let chart_width = parse_dimension(WIDTH_VAR, non_empty(WIDTH_VAR), DEFAULT_CHART_WIDTH)?;
        let chart_height = parse_dimension(HEIGHT_VAR, non_empty(HEIGHT_VAR), DEFAULT_CHART_HEIGHT)?;

        Ok(Self {
            api_key,
            base_url,
            output_dir,
            chart_width,
            chart_height,
        })
    }
}

// Keep the key out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("output_dir", &self.output_dir)
            .field("chart_width", &self.chart_width)
            .field("chart_height", &self.chart_height)
            .finish()
    }
}

fn parse_dimension(key: &'static str, value: Option<String>, default: u32) -> Result<u32, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => match raw.parse::<u32>() {
            Ok(px) if px > 0 => Ok(px),
            _ => Err(ConfigError::Invalid { key, value: raw }),
        },
    }
}
