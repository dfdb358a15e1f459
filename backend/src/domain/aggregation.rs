//! Aggregation over transaction snapshots.
//!
//! All date arithmetic for the dashboard and calendar views lives here:
//! month windows, signed per-day totals and selected-date filtering. Every
//! fallible function returns a `Result`; coordinators substitute the empty
//! default and log, so a derived view can degrade but never crash the
//! session.

use crate::error::{FinancesError, Result};
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, TimeZone, Utc};
use shared::Transaction;
use std::collections::HashMap;

/// Inclusive month window containing `today`, in local time: first day
/// 00:00:00.000 through last day 23:59:59.999. Callers pass the wall-clock
/// date at evaluation time, so the window rolls over silently at month
/// boundaries.
pub fn month_range(today: NaiveDate) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let first = today
        .with_day(1)
        .ok_or_else(|| FinancesError::Aggregation(format!("invalid month start for {today}")))?;
    let last = today
        .with_day(days_in_month(today.month(), today.year()))
        .ok_or_else(|| FinancesError::Aggregation(format!("invalid month end for {today}")))?;

    let start = first
        .and_hms_opt(0, 0, 0)
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .ok_or_else(|| FinancesError::Aggregation(format!("no local midnight on {first}")))?;
    let end = last
        .and_hms_milli_opt(23, 59, 59, 999)
        .and_then(|naive| Local.from_local_datetime(&naive).latest())
        .ok_or_else(|| FinancesError::Aggregation(format!("no local end of day on {last}")))?;

    Ok((start.with_timezone(&Utc), end.with_timezone(&Utc)))
}

/// Signed totals per local calendar day. A date with no transactions is
/// absent from the map; absence is distinct from a zero balance produced by
/// offsetting entries.
pub fn daily_totals(transactions: &[Transaction]) -> Result<HashMap<NaiveDate, f64>> {
    let mut totals: HashMap<NaiveDate, f64> = HashMap::new();

    for transaction in transactions {
        let day = transaction.date.with_timezone(&Local).date_naive();
        *totals.entry(day).or_insert(0.0) += transaction.signed_amount();
    }

    Ok(totals)
}

/// Transactions whose timestamp falls within the given local calendar date,
/// where the day ends at start-of-next-day minus one millisecond.
pub fn transactions_on(transactions: &[Transaction], date: NaiveDate) -> Result<Vec<Transaction>> {
    let (start, end) = day_bounds(date)?;
    Ok(transactions
        .iter()
        .filter(|t| t.date >= start && t.date <= end)
        .cloned()
        .collect())
}

/// Inclusive bounds of one local calendar day in UTC.
fn day_bounds(date: NaiveDate) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let next = date
        .succ_opt()
        .ok_or_else(|| FinancesError::Aggregation(format!("no day after {date}")))?;

    let start = date
        .and_hms_opt(0, 0, 0)
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .ok_or_else(|| FinancesError::Aggregation(format!("no local midnight on {date}")))?;
    let next_start = next
        .and_hms_opt(0, 0, 0)
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .ok_or_else(|| FinancesError::Aggregation(format!("no local midnight on {next}")))?;

    let end = next_start.with_timezone(&Utc) - Duration::milliseconds(1);
    Ok((start.with_timezone(&Utc), end))
}

/// Number of days in a given month and year.
pub fn days_in_month(month: u32, year: i32) -> u32 {
    match month {
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Whether a year is a leap year.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{TransactionCategory, TransactionType};

    fn local_utc(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(year, month, day, hour, minute, second)
            .single()
            .expect("unambiguous local time")
            .with_timezone(&Utc)
    }

    fn transaction(
        amount: f64,
        date: DateTime<Utc>,
        transaction_type: TransactionType,
    ) -> Transaction {
        Transaction {
            id: 0,
            amount,
            description: "test".to_string(),
            date,
            transaction_type,
            category: TransactionCategory::Other,
        }
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(1, 2025), 31);
        assert_eq!(days_in_month(4, 2025), 30);
        assert_eq!(days_in_month(2, 2025), 28);
        assert_eq!(days_in_month(2, 2024), 29);
        assert_eq!(days_in_month(2, 1900), 28);
        assert_eq!(days_in_month(2, 2000), 29);
    }

    #[test]
    fn test_is_leap_year() {
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2025));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
    }

    #[test]
    fn test_month_range_spans_first_to_last_day() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let (start, end) = month_range(today).unwrap();

        assert_eq!(start, local_utc(2025, 3, 1, 0, 0, 0));
        assert_eq!(
            end,
            local_utc(2025, 3, 31, 23, 59, 59) + Duration::milliseconds(999)
        );
    }

    #[test]
    fn test_month_range_handles_leap_february() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let (_, end) = month_range(today).unwrap();

        assert_eq!(
            end,
            local_utc(2024, 2, 29, 23, 59, 59) + Duration::milliseconds(999)
        );
    }

    #[test]
    fn test_daily_totals_accumulates_signed_amounts() {
        let d1_morning = local_utc(2025, 6, 10, 9, 0, 0);
        let d1_evening = local_utc(2025, 6, 10, 20, 0, 0);
        let d2 = local_utc(2025, 6, 11, 12, 0, 0);

        let transactions = vec![
            transaction(1000.0, d1_morning, TransactionType::Income),
            transaction(200.0, d1_evening, TransactionType::Expense),
            transaction(50.0, d2, TransactionType::Expense),
        ];

        let totals = daily_totals(&transactions).unwrap();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[&NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()], 800.0);
        assert_eq!(totals[&NaiveDate::from_ymd_opt(2025, 6, 11).unwrap()], -50.0);
    }

    #[test]
    fn test_daily_totals_omits_dates_without_transactions() {
        let transactions = vec![transaction(
            10.0,
            local_utc(2025, 6, 10, 9, 0, 0),
            TransactionType::Income,
        )];

        let totals = daily_totals(&transactions).unwrap();
        assert!(!totals.contains_key(&NaiveDate::from_ymd_opt(2025, 6, 11).unwrap()));
    }

    #[test]
    fn test_daily_totals_keeps_offsetting_entries_as_explicit_zero() {
        let date = local_utc(2025, 6, 10, 9, 0, 0);
        let transactions = vec![
            transaction(25.0, date, TransactionType::Income),
            transaction(25.0, date, TransactionType::Expense),
        ];

        let totals = daily_totals(&transactions).unwrap();
        // Offsetting entries yield a present zero, not an absent key
        assert_eq!(totals[&NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()], 0.0);
    }

    #[test]
    fn test_transactions_on_day_boundaries() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let at_midnight = local_utc(2025, 6, 10, 0, 0, 0);
        let last_millisecond = local_utc(2025, 6, 11, 0, 0, 0) - Duration::milliseconds(1);
        let next_midnight = local_utc(2025, 6, 11, 0, 0, 0);

        let transactions = vec![
            transaction(1.0, at_midnight, TransactionType::Expense),
            transaction(2.0, last_millisecond, TransactionType::Expense),
            transaction(3.0, next_midnight, TransactionType::Expense),
        ];

        let on_day = transactions_on(&transactions, date).unwrap();
        let amounts: Vec<f64> = on_day.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![1.0, 2.0]);
    }

    #[test]
    fn test_transactions_on_empty_date() {
        let transactions = vec![transaction(
            10.0,
            local_utc(2025, 6, 10, 9, 0, 0),
            TransactionType::Income,
        )];

        let on_day =
            transactions_on(&transactions, NaiveDate::from_ymd_opt(2025, 6, 12).unwrap()).unwrap();
        assert!(on_day.is_empty());
    }
}
