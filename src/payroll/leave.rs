use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::{
    consts::{HALF_DAY_FACTOR, PAID_LEAVE_TYPES},
    entity::{leave, sea_orm_active_enums::LeaveStatus},
};

use super::Period;

/// How a leave that crosses the month boundary is counted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LeaveProration {
    /// The whole leave counts in every month it touches
    #[default]
    FullDuration,
    /// Only the days inside the payroll month count
    ClipToMonth,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaveSummary {
    pub paid_leave_days: Decimal,
    pub unpaid_leave_days: Decimal,
    /// Unrounded `daily_rate × unpaid days`
    pub leave_deduction: Decimal,
}

impl LeaveSummary {
    pub fn from_leaves<'a>(
        leaves: impl IntoIterator<Item = &'a leave::Model>,
        period: Period,
        daily_rate: Decimal,
        proration: LeaveProration,
    ) -> Self {
        leaves.into_iter().fold(Self::default(), |mut summary, leave| {
            let days = leave_days(leave, period, proration);

            if PAID_LEAVE_TYPES.contains(&leave.leave_type) {
                summary.paid_leave_days += days;
            } else {
                summary.unpaid_leave_days += days;
                summary.leave_deduction += daily_rate * days;
            }

            summary
        })
    }
}

/// Calendar days covered by the leave, halved for half-day leaves
pub fn leave_days(leave: &leave::Model, period: Period, proration: LeaveProration) -> Decimal {
    let (start, end) = match proration {
        LeaveProration::FullDuration => (leave.start_date, leave.end_date),
        LeaveProration::ClipToMonth => {
            let (month_start, month_end) = period.date_range();
            (leave.start_date.max(month_start), leave.end_date.min(month_end))
        }
    };

    let days = Decimal::from(inclusive_days(start, end));

    if leave.half_day {
        days * HALF_DAY_FACTOR
    } else {
        days
    }
}

fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    ((end - start).num_days() + 1).max(0)
}

/// Approved leaves whose date interval overlaps the month
pub async fn approved_leaves<C: ConnectionTrait>(
    db: &C,
    employee_id: Uuid,
    period: Period,
) -> Result<Vec<leave::Model>, DbErr> {
    let (start, end) = period.date_range();

    leave::Entity::find()
        .filter(leave::Column::EmployeeId.eq(employee_id))
        .filter(leave::Column::Status.eq(LeaveStatus::Approved))
        .filter(leave::Column::StartDate.lte(end))
        .filter(leave::Column::EndDate.gte(start))
        .all(db).await
}

pub async fn aggregate_leaves<C: ConnectionTrait>(
    db: &C,
    employee_id: Uuid,
    period: Period,
    daily_rate: Decimal,
    proration: LeaveProration,
) -> Result<LeaveSummary, DbErr> {
    let leaves = approved_leaves(db, employee_id, period).await?;

    Ok(LeaveSummary::from_leaves(&leaves, period, daily_rate, proration))
}
