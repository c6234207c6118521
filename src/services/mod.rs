pub mod chart_service;
pub mod series_service;
pub mod validation_service;
