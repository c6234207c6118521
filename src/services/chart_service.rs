use std::path::{Path, PathBuf};
use plotters::prelude::*;
use plotters::style::FontTransform;
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use tracing::{debug, info};

use crate::config::Config;
use crate::models::price::{PriceRecord, PriceSeries};
use crate::models::query::{ChartStyle, Query, SeriesKind};
use crate::utils::errors::ChartError;

/// Legend label, colour and column of each plotted series, in drawing order
const COLUMNS: [(&str, RGBColor, fn(&PriceRecord) -> f64); 4] = [
    ("Close", BLUE, close_of),
    ("Open", GREEN, open_of),
    ("Low", RED, low_of),
    ("High", MAGENTA, high_of),
];

const BAR_ALPHA: f64 = 0.3;

fn close_of(r: &PriceRecord) -> f64 {
    r.close
}

fn open_of(r: &PriceRecord) -> f64 {
    r.open
}

fn low_of(r: &PriceRecord) -> f64 {
    r.low
}

fn high_of(r: &PriceRecord) -> f64 {
    r.high
}

/// Turns an extracted series into a chart somewhere the user can look at it.
pub trait ChartRenderer {
    fn render(&self, series: &PriceSeries, query: &Query) -> Result<PathBuf, ChartError>;
}

/// Writes PNG files into a directory
#[derive(Debug, Clone)]
pub struct PngChartRenderer {
    output_dir: PathBuf,
    width: u32,
    height: u32,
}

impl PngChartRenderer {
    pub fn new(output_dir: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            output_dir: output_dir.into(),
            width,
            height,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.output_dir, config.chart_width, config.chart_height)
    }
}

impl ChartRenderer for PngChartRenderer {
    fn render(&self, series: &PriceSeries, query: &Query) -> Result<PathBuf, ChartError> {
        let bounds = ChartBounds::of(series, query.series_kind).ok_or(ChartError::Empty)?;

        std::fs::create_dir_all(&self.output_dir)?;
        let path = chart_path(&self.output_dir, query, Utc::now());
        debug!("Writing {} chart to {}", query.chart_style.label(), path.display());

        draw_chart(&path, (self.width, self.height), series, query, &bounds)?;

        info!("✓ Chart for {} written to {}", query.symbol, path.display());
        Ok(path)
    }
}

/// Axis ranges for a series: time padded by one sample spacing on each side,
/// price padded by a tenth of its span and clamped at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBounds {
    pub x_min: DateTime<Utc>,
    pub x_max: DateTime<Utc>,
    pub y_min: f64,
    pub y_max: f64,
    pub bar_half_width: Duration,
}

impl ChartBounds {
    pub fn of(series: &PriceSeries, kind: SeriesKind) -> Option<Self> {
        let (first, last) = series.time_bounds()?;
        let (min_price, max_price) = series.price_bounds()?;

        let spacing = kind.spacing();
        let price_range = (max_price - min_price).max(1e-8);
        let padding = price_range * 0.1;

        Some(Self {
            x_min: to_utc(first) - spacing,
            x_max: to_utc(last) + spacing,
            y_min: (min_price - padding).max(0.0),
            y_max: max_price + padding,
            // 80% of a sample slot
            bar_half_width: spacing * 2 / 5,
        })
    }
}

/// `<dir>/<SYMBOL>_<kind>_<style>_<yyyymmddHHMMSSmmm>.png`
pub fn chart_path(dir: &Path, query: &Query, now: DateTime<Utc>) -> PathBuf {
    dir.join(format!(
        "{}_{}_{}_{}.png",
        query.symbol,
        query.series_kind.label(),
        query.chart_style.label(),
        now.format("%Y%m%d%H%M%S%3f")
    ))
}

fn to_utc(timestamp: NaiveDateTime) -> DateTime<Utc> {
    DateTime::<Utc>::from_naive_utc_and_offset(timestamp, Utc)
}

fn drawing_error<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Drawing(e.to_string())
}

fn draw_chart(
    path: &Path,
    size: (u32, u32),
    series: &PriceSeries,
    query: &Query,
    bounds: &ChartBounds,
) -> Result<(), ChartError> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(drawing_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("{} Stock Prices", query.symbol),
            ("sans-serif", 30.0).into_font(),
        )
        .margin(15)
        .x_label_area_size(120)
        .y_label_area_size(60)
        .build_cartesian_2d(bounds.x_min..bounds.x_max, bounds.y_min..bounds.y_max)
        .map_err(drawing_error)?;

    let label_format = query.series_kind.label_format();
    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Price ($)")
        .x_labels(12)
        .x_label_formatter(&|d: &DateTime<Utc>| d.format(label_format).to_string())
        .x_label_style(
            ("sans-serif", 12)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .draw()
        .map_err(drawing_error)?;

    for (label, color, column) in COLUMNS {
        let mut points: Vec<(DateTime<Utc>, f64)> = series
            .records()
            .iter()
            .map(|r| (to_utc(r.timestamp), column(r)))
            .collect();

        match query.chart_style {
            ChartStyle::Line => {
                // The series stays in payload order; only the drawn path is chronological.
                points.sort_by_key(|p| p.0);
                chart
                    .draw_series(LineSeries::new(points, color.stroke_width(2)))
                    .map_err(drawing_error)?
                    .label(label)
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
            }
            ChartStyle::Bar => {
                let half = bounds.bar_half_width;
                let base = bounds.y_min;
                chart
                    .draw_series(points.into_iter().map(|(t, price)| {
                        Rectangle::new(
                            [(t - half, base), (t + half, price)],
                            color.mix(BAR_ALPHA).filled(),
                        )
                    }))
                    .map_err(drawing_error)?
                    .label(label)
                    .legend(move |(x, y)| {
                        Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.mix(BAR_ALPHA).filled())
                    });
            }
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(drawing_error)?;

    root.present().map_err(drawing_error)?;
    Ok(())
}
