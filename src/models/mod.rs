//! Data models shared by the session and its services
//!
//! `query` holds what the user asked for, `price` what the provider returned.

pub mod price;
pub mod query;

pub use price::{PriceRecord, PriceSeries};
pub use query::{ChartStyle, Query, SeriesKind, Symbol};
