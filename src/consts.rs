use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::entity::sea_orm_active_enums::LeaveType;

/// Every month is paid as if it had this many working days, whatever the calendar says
pub const WORKING_DAYS_IN_MONTH: Decimal = dec!(22);

/// Length of a standard working day, also the overtime threshold
pub const HOURS_PER_DAY: Decimal = dec!(9);

pub const OVERTIME_MULTIPLIER: Decimal = dec!(1.5);

pub const HALF_DAY_FACTOR: Decimal = dec!(0.5);

/// Leave types that do not reduce salary; everything else is unpaid
pub const PAID_LEAVE_TYPES: [LeaveType; 4] = [
    LeaveType::Sick,
    LeaveType::Casual,
    LeaveType::Paid,
    LeaveType::Earned,
];

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;
