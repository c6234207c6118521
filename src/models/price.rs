//! Price models produced by the series extractor

use chrono::NaiveDateTime;

/// A single date-stamped open/high/low/close tuple
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRecord {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Records kept in the order the payload listed them.
///
/// The provider lists newest first, so this is usually reverse-chronological.
/// Nothing here sorts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    records: Vec<PriceRecord>,
}

impl PriceSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: PriceRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDateTime> {
        self.records.iter().map(|r| r.timestamp).collect()
    }

    pub fn opens(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.open).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.low).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.close).collect()
    }

    /// Earliest and latest timestamps, regardless of payload order
    pub fn time_bounds(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let min = self.records.iter().map(|r| r.timestamp).min()?;
        let max = self.records.iter().map(|r| r.timestamp).max()?;
        Some((min, max))
    }

    /// Lowest and highest value across all four price columns
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        if self.records.is_empty() {
            return None;
        }
        let (min, max) = self
            .records
            .iter()
            .flat_map(|r| [r.open, r.high, r.low, r.close])
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p), hi.max(p))
            });
        Some((min, max))
    }
}

impl FromIterator<PriceRecord> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = PriceRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
