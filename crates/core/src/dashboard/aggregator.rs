use std::collections::BTreeMap;

use log::{debug, warn};

use super::{
    normalize_day_key, Aggregation, AggregationDiagnostics, AggregationError, AggregationMode,
    Category, DatedRecord, DayBucket, DayKey, SkippedRecord,
};

/// Folds harvest, income and expense records into day buckets.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator {
    mode: AggregationMode,
}

/// Per-day contributions, kept until every record has been seen.
#[derive(Default)]
struct DayContributions {
    harvest: Vec<f64>,
    income: Vec<f64>,
    expenses: Vec<f64>,
}

impl DayContributions {
    fn push(&mut self, category: Category, amount: f64) {
        match category {
            Category::Harvest => self.harvest.push(amount),
            Category::Income => self.income.push(amount),
            Category::Expense => self.expenses.push(amount),
        }
    }

    fn into_bucket(self, key: DayKey) -> DayBucket {
        DayBucket {
            date_key: key,
            harvest: ordered_sum(self.harvest),
            income: ordered_sum(self.income),
            expenses: ordered_sum(self.expenses),
        }
    }
}

/// Sums in ascending order so the result does not depend on input order.
fn ordered_sum(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    values.into_iter().fold(0.0, |acc, v| acc + v)
}

impl Aggregator {
    pub fn new(mode: AggregationMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> AggregationMode {
        self.mode
    }

    /// Merges the three record lists into one bucket per calendar day,
    /// ascending by day key.
    ///
    /// In lenient mode a record with an unparseable date is dropped and listed
    /// in the diagnostics; in strict mode it aborts the call.
    pub fn aggregate(
        &self,
        harvests: &[DatedRecord],
        incomes: &[DatedRecord],
        expenses: &[DatedRecord],
    ) -> Result<Aggregation, AggregationError> {
        let mut days: BTreeMap<DayKey, DayContributions> = BTreeMap::new();
        let mut diagnostics = AggregationDiagnostics::default();

        let inputs = [
            (Category::Harvest, harvests),
            (Category::Income, incomes),
            (Category::Expense, expenses),
        ];

        for (category, records) in inputs {
            for record in records {
                let key = match normalize_day_key(&record.date, category) {
                    Ok(key) => key,
                    Err(err) => match self.mode {
                        AggregationMode::Strict => return Err(err),
                        AggregationMode::Lenient => {
                            warn!("Skipping {} record: {}", category, err);
                            diagnostics.skipped.push(skipped_record(category, err));
                            continue;
                        }
                    },
                };

                if record.amount < 0.0 {
                    warn!(
                        "Negative {} amount {} on {}; upstream validation should reject it",
                        category, record.amount, key
                    );
                    diagnostics.negative_quantities += 1;
                }

                days.entry(key).or_default().push(category, record.amount);
            }
        }

        let buckets: Vec<DayBucket> = days
            .into_iter()
            .map(|(key, contributions)| contributions.into_bucket(key))
            .collect();

        debug!(
            "Aggregated {} harvest, {} income, {} expense records into {} day buckets ({} skipped)",
            harvests.len(),
            incomes.len(),
            expenses.len(),
            buckets.len(),
            diagnostics.skipped_count()
        );

        Ok(Aggregation {
            buckets,
            diagnostics,
        })
    }
}

fn skipped_record(category: Category, err: AggregationError) -> SkippedRecord {
    let raw_date = match &err {
        AggregationError::MalformedDate { raw, .. } => raw.clone(),
        _ => String::new(),
    };
    SkippedRecord {
        category,
        raw_date,
        reason: err.to_string(),
    }
}

/// Lenient aggregation: malformed dates are skipped, never fatal.
pub fn aggregate(
    harvests: &[DatedRecord],
    incomes: &[DatedRecord],
    expenses: &[DatedRecord],
) -> Aggregation {
    // Lenient mode records malformed dates in the diagnostics and never errors.
    Aggregator::new(AggregationMode::Lenient)
        .aggregate(harvests, incomes, expenses)
        .unwrap_or_default()
}
