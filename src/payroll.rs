//! Monthly payroll engine
//!
//! Attendance and approved leave for an employee's month are reduced into
//! summaries, combined with the employee's compensation profile by the
//! calculator, and persisted as a `DRAFT` payroll record. Drafts can be
//! recalculated or deleted until they are finalized; finalized records are
//! permanent.

use chrono::NaiveDate;

use crate::utils;

pub use attendance::{aggregate_attendance, AttendanceSummary};
pub use calculator::{calculate, CompensationProfile, PayrollFigures, Rates};
pub use error::PayrollError;
pub use leave::{aggregate_leaves, LeaveProration, LeaveSummary};
pub use manager::{delete, finalize, generate, recalculate};
pub use query::{download_payslip, find_visible, list, stats, PayrollFilter};

mod attendance;
mod calculator;
mod error;
mod leave;
mod manager;
mod query;

/// A validated payroll month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    month: i32,
    year: i32,
    start: NaiveDate,
    end: NaiveDate,
}

impl Period {
    pub fn new(month: i32, year: i32) -> Result<Self, PayrollError> {
        if !(1..=12).contains(&month) {
            return Err(PayrollError::validation("month", "must be between 1 and 12"));
        }

        if !(1000..=9999).contains(&year) {
            return Err(PayrollError::validation("year", "must be a four-digit year"));
        }

        let Some((start, end)) = utils::month_range(month as u32, year) else {
            return Err(PayrollError::validation("year", "is out of the supported calendar range"));
        };

        Ok(Self { month, year, start, end })
    }

    pub fn month(&self) -> i32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// First and last day of the month, inclusive
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end)
    }
}

/// Tunables applied to every computation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PayrollSettings {
    pub leave_proration: LeaveProration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period() {
        let period = Period::new(2, 2025).unwrap();
        assert_eq!(period.month(), 2);
        assert_eq!(period.year(), 2025);
        assert_eq!(
            period.date_range(),
            (NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(), NaiveDate::from_ymd_opt(2025, 2, 28).unwrap())
        );
    }

    #[test]
    fn test_period_validation() {
        assert!(matches!(Period::new(0, 2025), Err(PayrollError::Validation { field: "month", .. })));
        assert!(matches!(Period::new(13, 2025), Err(PayrollError::Validation { field: "month", .. })));
        assert!(matches!(Period::new(5, 25), Err(PayrollError::Validation { field: "year", .. })));
        assert!(matches!(Period::new(5, 20250), Err(PayrollError::Validation { field: "year", .. })));
    }
}
