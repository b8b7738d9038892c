use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use super::{DayBucket, DisplaySeries, Window, WindowSelection, WindowTotals, YearBucket};

/// Filters day buckets to the trailing window ending at `now` and computes
/// the window totals.
///
/// `buckets` must be ascending by day key, as returned by the aggregator.
/// The long window rolls the filtered days up into one bucket per year.
/// Totals are always summed from the filtered days, so they are the same
/// whether or not the series was rolled up.
pub fn select_window(buckets: &[DayBucket], window: Window, now: DateTime<Utc>) -> WindowSelection {
    let start = (now - Duration::days(window.days())).date_naive();

    let filtered: Vec<DayBucket> = buckets
        .iter()
        .filter(|b| b.date_key.date() >= start)
        .cloned()
        .collect();

    let totals = sum_days(&filtered);

    let series = if window.is_yearly() {
        DisplaySeries::Year(roll_up_years(&filtered))
    } else {
        DisplaySeries::Day(filtered)
    };

    WindowSelection {
        window,
        series,
        totals,
    }
}

fn sum_days(days: &[DayBucket]) -> WindowTotals {
    days.iter().fold(WindowTotals::default(), |mut acc, day| {
        acc.harvest += day.harvest;
        acc.income += day.income;
        acc.expenses += day.expenses;
        acc
    })
}

/// Every day contributes to exactly one year, keyed by its `YYYY` prefix.
fn roll_up_years(days: &[DayBucket]) -> Vec<YearBucket> {
    let mut years: BTreeMap<String, YearBucket> = BTreeMap::new();
    for day in days {
        let year_key = day.date_key.year_key();
        let bucket = years
            .entry(year_key.clone())
            .or_insert_with(|| YearBucket::empty(year_key));
        bucket.harvest += day.harvest;
        bucket.income += day.income;
        bucket.expenses += day.expenses;
    }
    years.into_values().collect()
}
