//! Dashboard module - time-bucketed harvest and cash-flow aggregation.
//!
//! Harvest, income and expense records are folded into one `DayBucket` per
//! calendar day, then filtered to a trailing [`Window`] and, for the
//! multi-year window, rolled up into `YearBucket`s for the chart.

mod aggregator;
mod dashboard_errors;
mod dashboard_model;
mod dashboard_service;
mod date_key;
mod supplier;
mod window;


pub use aggregator::{aggregate, Aggregator};
pub use dashboard_errors::AggregationError;
pub use dashboard_model::{
    Aggregation, AggregationDiagnostics, AggregationMode, Category, DashboardView, DatedRecord,
    DayBucket, DisplaySeries, SkippedRecord, Window, WindowSelection, WindowTotals, YearBucket,
};
pub use dashboard_service::{
    DashboardCache, DashboardCacheInvalidator, DashboardService, DashboardServiceTrait,
};
pub use date_key::{normalize_day_key, year_key, DateInput, DayKey};
pub use supplier::{decimal_to_f64, expense_record, harvest_record, income_record};
pub use window::select_window;
