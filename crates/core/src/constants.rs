/// External identity used when the server runs without an auth provider
pub const LOCAL_EXTERNAL_ID: &str = "local";

/// Default lifetime of a cached dashboard aggregation, in seconds
pub const DEFAULT_DASHBOARD_CACHE_TTL_SECS: u64 = 60;

/// Number of days covered by the long (multi-year) dashboard window
pub const LONG_WINDOW_DAYS: i64 = 365 * 5;

/// Income source prefix for incomes derived from invoices
pub const INVOICE_INCOME_SOURCE_PREFIX: &str = "Invoice";
