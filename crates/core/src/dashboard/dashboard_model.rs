use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{AggregationError, DateInput, DayKey};
use crate::constants::LONG_WINDOW_DAYS;

/// Which dashboard series a record contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Harvest,
    Income,
    Expense,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Harvest => "harvest",
            Category::Income => "income",
            Category::Expense => "expense",
        };
        f.write_str(s)
    }
}

/// A single dated quantity handed to the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedRecord {
    pub date: DateInput,
    pub amount: f64,
}

impl DatedRecord {
    pub fn new(date: impl Into<DateInput>, amount: f64) -> Self {
        Self {
            date: date.into(),
            amount,
        }
    }
}

/// Aggregated totals for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBucket {
    pub date_key: DayKey,
    pub harvest: f64,
    pub income: f64,
    pub expenses: f64,
}

impl DayBucket {
    pub fn empty(date_key: DayKey) -> Self {
        Self {
            date_key,
            harvest: 0.0,
            income: 0.0,
            expenses: 0.0,
        }
    }
}

/// Aggregated totals for one calendar year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearBucket {
    pub year_key: String,
    /// `YYYY-01-01` placeholder used as the chart's x value.
    pub date: String,
    pub harvest: f64,
    pub income: f64,
    pub expenses: f64,
}

impl YearBucket {
    pub fn empty(year_key: String) -> Self {
        let date = format!("{year_key}-01-01");
        Self {
            year_key,
            date,
            harvest: 0.0,
            income: 0.0,
            expenses: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowTotals {
    pub harvest: f64,
    pub income: f64,
    pub expenses: f64,
}

impl WindowTotals {
    pub fn net_income(&self) -> f64 {
        self.income - self.expenses
    }
}

/// Trailing range shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Window {
    #[serde(rename = "7d")]
    Week,
    #[default]
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
    #[serde(rename = "365d")]
    Year,
    #[serde(rename = "5y")]
    Long,
}

impl Window {
    pub const ALL: [Window; 5] = [
        Window::Week,
        Window::Month,
        Window::Quarter,
        Window::Year,
        Window::Long,
    ];

    pub fn days(&self) -> i64 {
        match self {
            Window::Week => 7,
            Window::Month => 30,
            Window::Quarter => 90,
            Window::Year => 365,
            Window::Long => LONG_WINDOW_DAYS,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Window::Week => "7d",
            Window::Month => "30d",
            Window::Quarter => "90d",
            Window::Year => "365d",
            Window::Long => "5y",
        }
    }

    /// Whether the display series is rolled up into years.
    pub fn is_yearly(&self) -> bool {
        matches!(self, Window::Long)
    }
}

impl FromStr for Window {
    type Err = AggregationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "7d" => Ok(Window::Week),
            "30d" => Ok(Window::Month),
            "90d" => Ok(Window::Quarter),
            "365d" => Ok(Window::Year),
            "5y" | "long" => Ok(Window::Long),
            other => Err(AggregationError::UnknownWindow(other.to_string())),
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The chart series: daily points, or yearly roll-ups for the long window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "granularity", content = "points", rename_all = "lowercase")]
pub enum DisplaySeries {
    Day(Vec<DayBucket>),
    Year(Vec<YearBucket>),
}

impl DisplaySeries {
    pub fn len(&self) -> usize {
        match self {
            DisplaySeries::Day(points) => points.len(),
            DisplaySeries::Year(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element-wise sum over the displayed points.
    pub fn totals(&self) -> WindowTotals {
        let mut totals = WindowTotals::default();
        match self {
            DisplaySeries::Day(points) => {
                for p in points {
                    totals.harvest += p.harvest;
                    totals.income += p.income;
                    totals.expenses += p.expenses;
                }
            }
            DisplaySeries::Year(points) => {
                for p in points {
                    totals.harvest += p.harvest;
                    totals.income += p.income;
                    totals.expenses += p.expenses;
                }
            }
        }
        totals
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSelection {
    pub window: Window,
    pub series: DisplaySeries,
    pub totals: WindowTotals,
}

/// What to do with a record whose date cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMode {
    /// Skip the record and report it in the diagnostics.
    #[default]
    Lenient,
    /// Abort the whole aggregation.
    Strict,
}

impl FromStr for AggregationMode {
    type Err = AggregationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(AggregationMode::Lenient),
            "strict" => Ok(AggregationMode::Strict),
            other => Err(AggregationError::UnknownMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRecord {
    pub category: Category,
    pub raw_date: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationDiagnostics {
    pub skipped: Vec<SkippedRecord>,
    pub negative_quantities: usize,
    /// Categories whose records could not be fetched.
    pub unavailable: Vec<Category>,
}

impl AggregationDiagnostics {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.negative_quantities == 0 && self.unavailable.is_empty()
    }
}

/// Day buckets ascending by key, plus what was dropped along the way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregation {
    pub buckets: Vec<DayBucket>,
    pub diagnostics: AggregationDiagnostics,
}

/// Response model for the dashboard chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub window: Window,
    pub series: DisplaySeries,
    pub totals: WindowTotals,
    pub diagnostics: AggregationDiagnostics,
}
