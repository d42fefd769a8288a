use rust_decimal::Decimal;
use sea_orm::{
    sea_query::{Expr, Func, Query, SimpleExpr},
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, FromQueryResult, ItemsAndPagesNumber,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    auth::Visibility,
    entity::{employee, payroll, prelude::*, sea_orm_active_enums::PayrollStatus},
    payslip,
    utils::round_money,
};

use super::{PayrollError, Period};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayrollFilter {
    pub month: Option<i32>,
    pub year: Option<i32>,
    pub status: Option<PayrollStatus>,
    pub employee_id: Option<Uuid>,
}

impl PayrollFilter {
    fn condition(&self) -> Condition {
        Condition::all()
            .add_option(self.month.map(|month| payroll::Column::Month.eq(month)))
            .add_option(self.year.map(|year| payroll::Column::Year.eq(year)))
            .add_option(self.status.map(|status| payroll::Column::Status.eq(status)))
            .add_option(self.employee_id.map(|id| payroll::Column::EmployeeId.eq(id)))
    }
}

fn visibility_condition(visibility: &Visibility) -> Condition {
    match *visibility {
        Visibility::Everyone => Condition::all(),
        Visibility::Own(employee_id) => Condition::all()
            .add(payroll::Column::EmployeeId.eq(employee_id)),
        Visibility::Team(lead_id) => Condition::any()
            .add(payroll::Column::EmployeeId.eq(lead_id))
            .add(payroll::Column::EmployeeId.in_subquery(
                Query::select()
                    .column(employee::Column::Id)
                    .from(employee::Entity)
                    .and_where(employee::Column::ManagerId.eq(lead_id))
                    .to_owned()
            )),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayrollPage {
    pub data: Vec<payroll::Model>,
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

/// Newest periods first; `page` is 1-based
pub async fn list<C: ConnectionTrait>(
    db: &C,
    filter: &PayrollFilter,
    visibility: &Visibility,
    page: u64,
    limit: u64,
) -> Result<PayrollPage, PayrollError> {
    let paginator = Payroll::find()
        .filter(filter.condition())
        .filter(visibility_condition(visibility))
        .order_by_desc(payroll::Column::Year)
        .order_by_desc(payroll::Column::Month)
        .order_by_asc(payroll::Column::CreatedAt)
        .paginate(db, limit);

    let ItemsAndPagesNumber { number_of_items, number_of_pages } = paginator.num_items_and_pages().await?;
    let data = paginator.fetch_page(page.saturating_sub(1)).await?;

    Ok(PayrollPage {
        data,
        page,
        limit,
        total: number_of_items,
        total_pages: number_of_pages,
    })
}

/// Fetches one record, refusing records outside the caller's visibility
pub async fn find_visible<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    visibility: &Visibility,
) -> Result<payroll::Model, PayrollError> {
    let record = Payroll::find_by_id(id)
        .one(db).await?
        .ok_or(PayrollError::NotFound("payroll"))?;

    let visible = match *visibility {
        Visibility::Everyone => true,
        Visibility::Own(employee_id) => record.employee_id == employee_id,
        Visibility::Team(lead_id) if record.employee_id == lead_id => true,
        Visibility::Team(lead_id) => Employee::find_by_id(record.employee_id)
            .one(db).await?
            .is_some_and(|employee| employee.manager_id == Some(lead_id)),
    };

    if !visible {
        return Err(PayrollError::Forbidden);
    }

    Ok(record)
}

/// A rendered payslip ready to be served
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payslip {
    pub filename: String,
    pub bytes: Vec<u8>,
}

pub async fn download_payslip<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    visibility: &Visibility,
) -> Result<Payslip, PayrollError> {
    let record = find_visible(db, id, visibility).await?;

    let employee = Employee::find_by_id(record.employee_id)
        .one(db).await?
        .ok_or(PayrollError::NotFound("employee"))?;

    Ok(Payslip {
        filename: payslip::file_name(&employee),
        bytes: payslip::render(&record, &employee)?,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub draft: u64,
    pub finalized: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollStats {
    pub month: i32,
    pub year: i32,
    pub total_payroll: Decimal,
    pub avg_salary: Decimal,
    pub total_overtime_pay: Decimal,
    pub status_counts: StatusCounts,
}

#[derive(Debug, FromQueryResult)]
struct Totals {
    total_payroll: Option<Decimal>,
    avg_salary: Option<Decimal>,
    total_overtime_pay: Option<Decimal>,
}

#[derive(Debug, FromQueryResult)]
struct StatusCount {
    status: PayrollStatus,
    count: i64,
}

/// Net salary totals and lifecycle counts for one period
pub async fn stats<C: ConnectionTrait>(db: &C, period: Period) -> Result<PayrollStats, PayrollError> {
    let in_period = Condition::all()
        .add(payroll::Column::Month.eq(period.month()))
        .add(payroll::Column::Year.eq(period.year()));

    let totals = Payroll::find()
        .select_only()
        .column_as(SimpleExpr::from(Func::sum(Expr::col(payroll::Column::NetSalary))), "total_payroll")
        .column_as(SimpleExpr::from(Func::avg(Expr::col(payroll::Column::NetSalary))), "avg_salary")
        .column_as(SimpleExpr::from(Func::sum(Expr::col(payroll::Column::OvertimePay))), "total_overtime_pay")
        .filter(in_period.clone())
        .into_model::<Totals>()
        .one(db).await?;

    let counts = Payroll::find()
        .select_only()
        .column(payroll::Column::Status)
        .column_as(SimpleExpr::from(Func::count(Expr::col(payroll::Column::Id))), "count")
        .filter(in_period)
        .group_by(payroll::Column::Status)
        .into_model::<StatusCount>()
        .all(db).await?;

    let status_counts = counts.into_iter().fold(StatusCounts::default(), |mut counts, row| {
        let count = u64::try_from(row.count).unwrap_or_default();
        match row.status {
            PayrollStatus::Draft => counts.draft += count,
            PayrollStatus::Finalized => counts.finalized += count,
        }
        counts
    });

    let (total_payroll, avg_salary, total_overtime_pay) = totals
        .map(|totals| (totals.total_payroll, totals.avg_salary, totals.total_overtime_pay))
        .unwrap_or_default();

    Ok(PayrollStats {
        month: period.month(),
        year: period.year(),
        total_payroll: total_payroll.unwrap_or_default(),
        avg_salary: round_money(avg_salary.unwrap_or_default()),
        total_overtime_pay: total_overtime_pay.unwrap_or_default(),
        status_counts,
    })
}
