//! Fetch historical equity prices from Alpha Vantage and chart them.

pub mod api;
pub mod config;
pub mod models;
pub mod services;
pub mod session;
pub mod utils;
