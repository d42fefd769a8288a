//! Model builders shared by the unit tests

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, Statement, Value};
use uuid::Uuid;

use crate::entity::{
    attendance,
    compensation::Components,
    employee,
    leave,
    notification,
    payroll,
    sea_orm_active_enums::{AttendanceStatus, LeaveStatus, LeaveType, PayrollStatus, RoleType},
};

pub fn employee(base_salary: Decimal) -> employee::Model {
    let id = Uuid::new_v4();

    employee::Model {
        id,
        created_at: Local::now().into(),
        updated_at: Local::now().into(),
        user_id: Uuid::new_v4(),
        employee_code: format!("EMP-{}", &id.simple().to_string()[..6]),
        first_name: "Bob".to_owned(),
        last_name: "Smith".to_owned(),
        email: format!("{}@example.com", id.simple()),
        department: Some("Engineering".to_owned()),
        designation: Some("Engineer".to_owned()),
        role: RoleType::Employee,
        is_active: true,
        manager_id: None,
        base_salary,
        allowances: Components::default(),
        deductions: Components::default(),
    }
}

/// Attendance on `day` of March 2025
pub fn attendance(
    employee_id: Uuid,
    day: u32,
    status: AttendanceStatus,
    total_hours: Option<Decimal>,
    overtime_hours: Option<Decimal>,
) -> attendance::Model {
    attendance::Model {
        id: Uuid::new_v4(),
        created_at: Local::now().into(),
        updated_at: Local::now().into(),
        employee_id,
        date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
        check_in: None,
        check_out: None,
        status,
        total_hours,
        overtime_hours,
    }
}

/// An approved leave
pub fn leave(
    employee_id: Uuid,
    leave_type: LeaveType,
    start_date: NaiveDate,
    end_date: NaiveDate,
    half_day: bool,
) -> leave::Model {
    leave::Model {
        id: Uuid::new_v4(),
        created_at: Local::now().into(),
        updated_at: Local::now().into(),
        employee_id,
        leave_type,
        start_date,
        end_date,
        half_day,
        status: LeaveStatus::Approved,
        reason: None,
    }
}

pub fn payroll(employee_id: Uuid, month: i32, year: i32, status: PayrollStatus) -> payroll::Model {
    payroll::Model {
        id: Uuid::new_v4(),
        created_at: Local::now().into(),
        updated_at: Local::now().into(),
        created_by: None,
        updated_by: None,
        employee_id,
        month,
        year,
        base_salary: Decimal::from(66000),
        allowances: Components::default(),
        deductions: Components::default(),
        calculated_base_salary: Decimal::from(66000),
        overtime_pay: Decimal::ZERO,
        late_deduction: Decimal::ZERO,
        absent_deduction: Decimal::ZERO,
        leave_deductions: Decimal::ZERO,
        working_days: 22,
        late_days: 0,
        half_days: 0,
        absent_days: Decimal::ZERO,
        paid_leave_days: Decimal::ZERO,
        unpaid_leave_days: Decimal::ZERO,
        total_hours: Decimal::from(198),
        overtime_hours: Decimal::ZERO,
        gross_salary: Decimal::from(66000),
        net_salary: Decimal::from(66000),
        status,
        finalized_at: None,
        finalized_by: None,
    }
}

pub fn notification(user_id: Uuid) -> notification::Model {
    notification::Model {
        id: Uuid::new_v4(),
        created_at: Local::now().into(),
        user_id,
        kind: "PAYROLL_CREDITED".to_owned(),
        title: "Salary Credited".to_owned(),
        message: "Your salary has been credited".to_owned(),
        metadata: serde_json::json!({}),
        is_read: false,
    }
}

/// Every statement a mock connection received, in order
pub fn statements(db: DatabaseConnection) -> Vec<Statement> {
    db.into_transaction_log()
        .iter()
        .flat_map(|transaction| transaction.statements().to_vec())
        .collect()
}

/// Pairs the written columns of a single-row `INSERT` or an `UPDATE ... SET` with their bound values
pub fn written_columns(statement: &Statement) -> BTreeMap<String, Value> {
    let sql = statement.sql.as_str();
    let values = statement.values.as_ref().map(|values| values.0.clone()).unwrap_or_default();

    let columns: Vec<&str> = if sql.starts_with("INSERT INTO ") {
        let (_, rest) = sql.split_once('(').expect("INSERT without a column list");
        let (columns, _) = rest.split_once(')').expect("unterminated column list");

        columns.split(", ").collect()
    } else {
        let (_, rest) = sql.split_once(" SET ").expect("UPDATE without SET");
        let assignments = rest.split_once(" WHERE ").map_or(rest, |(assignments, _)| assignments);

        assignments.split(", ")
            .map(|assignment| assignment.split_once(" = ").map_or(assignment, |(column, _)| column))
            .collect()
    };

    columns.into_iter()
        .map(|column| column.trim_matches('"').to_owned())
        .zip(values)
        .collect()
}
