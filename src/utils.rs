use chrono::{Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::consts::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// First and last calendar day of the month, both inclusive
pub fn month_range(month: u32, year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let first_day = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last_day = first_day.checked_add_months(Months::new(1))?.pred_opt()?;

    Some((first_day, last_day))
}

/// Rounds a money amount to cents, half away from zero
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Normalizes 1-based `page` and `limit` query parameters
pub fn page_window(page: Option<u64>, limit: Option<u64>) -> (u64, u64) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);

    (page, limit)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_month_range() {
        let (start, end) = month_range(2, 2024).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let (start, end) = month_range(12, 2025).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());

        assert!(month_range(13, 2025).is_none());
        assert!(month_range(0, 2025).is_none());
    }

    #[test]
    fn test_round_money() {
        assert_eq!(round_money(dec!(666.666666)), dec!(666.67));
        assert_eq!(round_money(dec!(1999.9999999999)), dec!(2000.00));
        assert_eq!(round_money(dec!(0.125)), dec!(0.13));
        assert_eq!(round_money(dec!(-0.125)), dec!(-0.13));
    }

    #[test]
    fn test_page_window() {
        assert_eq!(page_window(None, None), (1, 10));
        assert_eq!(page_window(Some(0), Some(0)), (1, 1));
        assert_eq!(page_window(Some(3), Some(500)), (3, 100));
    }
}
