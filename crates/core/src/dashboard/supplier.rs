//! Conversion of stored records into aggregation input.
//!
//! Amounts are `Decimal` in storage and `f64` in the chart. The coercion
//! happens here and nowhere else.

use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use super::DatedRecord;
use crate::expenses::Expense;
use crate::harvests::Harvest;
use crate::incomes::Income;

/// Lossy `Decimal -> f64`, rounding to the nearest float.
///
/// A `Decimal` never exceeds about 7.9e28 in magnitude, well inside the
/// finite `f64` range, so `to_f64` always yields a value.
pub fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

pub fn harvest_record(harvest: &Harvest) -> DatedRecord {
    DatedRecord::new(harvest.harvested_on, decimal_to_f64(harvest.amount))
}

pub fn income_record(income: &Income) -> DatedRecord {
    DatedRecord::new(income.received_on, decimal_to_f64(income.amount))
}

pub fn expense_record(expense: &Expense) -> DatedRecord {
    DatedRecord::new(expense.spent_on, decimal_to_f64(expense.amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::DateInput;
    use crate::utils::now_naive;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_decimal_to_f64() {
        assert_eq!(decimal_to_f64(dec!(12.5)), 12.5);
        assert_eq!(decimal_to_f64(dec!(0)), 0.0);
        assert_eq!(decimal_to_f64(dec!(-3.25)), -3.25);
        assert!((decimal_to_f64(dec!(0.1)) - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_decimal_extremes_stay_finite() {
        for value in [Decimal::MAX, Decimal::MIN] {
            let converted = decimal_to_f64(value);
            assert!(converted.is_finite());
            assert!((converted.abs() / 7.922816251426434e28 - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_income_record_uses_received_date() {
        let day = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        let income = Income {
            id: "inc-1".to_string(),
            user_id: "u1".to_string(),
            received_on: day,
            amount: dec!(120.40),
            source: "Farmers market".to_string(),
            description: None,
            invoice_id: None,
            created_at: now_naive(),
            updated_at: now_naive(),
        };

        let record = income_record(&income);

        assert_eq!(record.date, DateInput::Date(day));
        assert_eq!(record.amount, 120.4);
    }
}
