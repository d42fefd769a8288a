use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entity::{attendance, sea_orm_active_enums::AttendanceStatus};

use super::Period;

/// An employee's attendance reduced over one month
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceSummary {
    pub working_days: u32,
    pub late_days: u32,
    pub half_days: u32,
    pub total_hours: Decimal,
    pub overtime_hours: Decimal,
}

impl AttendanceSummary {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a attendance::Model>) -> Self {
        records.into_iter().fold(Self::default(), |mut summary, record| {
            if is_working_day(record.status) {
                summary.working_days += 1;
            }

            match record.status {
                AttendanceStatus::Late => summary.late_days += 1,
                AttendanceStatus::HalfDay => summary.half_days += 1,
                _ => {}
            }

            summary.total_hours += record.total_hours.unwrap_or_default();
            summary.overtime_hours += record.overtime_hours.unwrap_or_default();

            summary
        })
    }
}

/// Late, half and remote days all count as days worked
fn is_working_day(status: AttendanceStatus) -> bool {
    matches!(
        status,
        AttendanceStatus::Present | AttendanceStatus::Late | AttendanceStatus::Wfh | AttendanceStatus::HalfDay
    )
}

pub async fn aggregate_attendance<C: ConnectionTrait>(
    db: &C,
    employee_id: Uuid,
    period: Period,
) -> Result<AttendanceSummary, DbErr> {
    let (start, end) = period.date_range();

    let records = attendance::Entity::find()
        .filter(attendance::Column::EmployeeId.eq(employee_id))
        .filter(attendance::Column::Date.between(start, end))
        .all(db).await?;

    Ok(AttendanceSummary::from_records(&records))
}
