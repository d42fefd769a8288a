use rust_decimal::Decimal;

use crate::{
    consts::{HALF_DAY_FACTOR, HOURS_PER_DAY, OVERTIME_MULTIPLIER, WORKING_DAYS_IN_MONTH},
    entity::{compensation::Components, employee},
    utils::round_money,
};

use super::{AttendanceSummary, LeaveSummary};

/// Salary inputs read from an employee at computation time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompensationProfile {
    pub base_salary: Decimal,
    pub allowances: Components,
    pub deductions: Components,
}

impl From<&employee::Model> for CompensationProfile {
    fn from(employee: &employee::Model) -> Self {
        Self {
            base_salary: employee.base_salary,
            allowances: employee.allowances.clone(),
            deductions: employee.deductions.clone(),
        }
    }
}

/// Pay rates derived from the fixed 22-day, 9-hour month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rates {
    pub daily: Decimal,
    pub hourly: Decimal,
}

impl Rates {
    pub fn for_salary(base_salary: Decimal) -> Self {
        Self {
            daily: base_salary / WORKING_DAYS_IN_MONTH,
            hourly: base_salary / (WORKING_DAYS_IN_MONTH * HOURS_PER_DAY),
        }
    }
}

/// Every computed field of a payroll record
///
/// Money components are rounded to cents; `gross_salary` and `net_salary` are
/// exact sums of the rounded components so the payslip always reconciles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollFigures {
    pub base_salary: Decimal,
    pub allowances: Components,
    pub deductions: Components,
    pub calculated_base_salary: Decimal,
    pub overtime_pay: Decimal,
    pub late_deduction: Decimal,
    pub absent_deduction: Decimal,
    pub leave_deductions: Decimal,
    pub working_days: u32,
    pub late_days: u32,
    pub half_days: u32,
    pub absent_days: Decimal,
    pub paid_leave_days: Decimal,
    pub unpaid_leave_days: Decimal,
    pub total_hours: Decimal,
    pub overtime_hours: Decimal,
    pub gross_salary: Decimal,
    pub net_salary: Decimal,
}

pub fn calculate(
    profile: &CompensationProfile,
    attendance: &AttendanceSummary,
    leave: &LeaveSummary,
) -> PayrollFigures {
    let rates = Rates::for_salary(profile.base_salary);
    let working_days = Decimal::from(attendance.working_days);
    let half_days = Decimal::from(attendance.half_days);

    // Half days are already inside `working_days`, so this only goes negative on inconsistent input
    let calculated_base_salary = round_money(
        (rates.daily * working_days - rates.daily * HALF_DAY_FACTOR * half_days).max(Decimal::ZERO)
    );

    let overtime_pay = round_money(attendance.overtime_hours * rates.hourly * OVERTIME_MULTIPLIER);
    let late_deduction = round_money(Decimal::from(attendance.late_days) * rates.hourly);

    let absent_days = (WORKING_DAYS_IN_MONTH - working_days - leave.paid_leave_days - leave.unpaid_leave_days)
        .max(Decimal::ZERO);
    let absent_deduction = round_money(absent_days * rates.daily);
    let leave_deductions = round_money(leave.leave_deduction);

    let total_allowances = round_money(profile.allowances.total());
    let total_deductions = round_money(profile.deductions.total());

    let gross_salary = calculated_base_salary + total_allowances + overtime_pay;
    let net_salary = (gross_salary - total_deductions - late_deduction - absent_deduction - leave_deductions)
        .max(Decimal::ZERO);

    PayrollFigures {
        base_salary: profile.base_salary,
        allowances: profile.allowances.clone(),
        deductions: profile.deductions.clone(),
        calculated_base_salary,
        overtime_pay,
        late_deduction,
        absent_deduction,
        leave_deductions,
        working_days: attendance.working_days,
        late_days: attendance.late_days,
        half_days: attendance.half_days,
        absent_days,
        paid_leave_days: leave.paid_leave_days,
        unpaid_leave_days: leave.unpaid_leave_days,
        total_hours: attendance.total_hours,
        overtime_hours: attendance.overtime_hours,
        gross_salary,
        net_salary,
    }
}
