use chrono::Local;
use sea_orm::{ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    dispatch::{self, templates, Attachment, Mail, Mailer, Notice},
    entity::{employee, payroll, prelude::*, sea_orm_active_enums::{PayrollStatus, RoleType}},
    payslip,
};

use super::{
    aggregate_attendance, aggregate_leaves, calculate, CompensationProfile,
    PayrollError, PayrollFigures, PayrollSettings, Period, Rates,
};

/// Outcome of a bulk generation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generated {
    pub created: Vec<payroll::Model>,
    /// Eligible or not, every loaded employee that did not get a new record
    pub skipped: usize,
}

/// Admins are never paid through payroll, and a zero salary has nothing to pay
fn is_eligible(employee: &employee::Model) -> bool {
    employee.is_active
        && employee.role != RoleType::Admin
        && employee.base_salary > rust_decimal::Decimal::ZERO
}

async fn compute<C: ConnectionTrait>(
    db: &C,
    settings: &PayrollSettings,
    employee: &employee::Model,
    period: Period,
) -> Result<PayrollFigures, PayrollError> {
    let rates = Rates::for_salary(employee.base_salary);

    let attendance = aggregate_attendance(db, employee.id, period).await?;
    let leave = aggregate_leaves(db, employee.id, period, rates.daily, settings.leave_proration).await?;

    Ok(calculate(&CompensationProfile::from(employee), &attendance, &leave))
}

/// Writes every computed column onto `model`
fn assign(model: &mut payroll::ActiveModel, figures: PayrollFigures) {
    model.base_salary = Set(figures.base_salary);
    model.allowances = Set(figures.allowances);
    model.deductions = Set(figures.deductions);
    model.calculated_base_salary = Set(figures.calculated_base_salary);
    model.overtime_pay = Set(figures.overtime_pay);
    model.late_deduction = Set(figures.late_deduction);
    model.absent_deduction = Set(figures.absent_deduction);
    model.leave_deductions = Set(figures.leave_deductions);
    model.working_days = Set(figures.working_days as i32);
    model.late_days = Set(figures.late_days as i32);
    model.half_days = Set(figures.half_days as i32);
    model.absent_days = Set(figures.absent_days);
    model.paid_leave_days = Set(figures.paid_leave_days);
    model.unpaid_leave_days = Set(figures.unpaid_leave_days);
    model.total_hours = Set(figures.total_hours);
    model.overtime_hours = Set(figures.overtime_hours);
    model.gross_salary = Set(figures.gross_salary);
    model.net_salary = Set(figures.net_salary);
}

async fn find<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<payroll::Model, PayrollError> {
    Payroll::find_by_id(id)
        .one(db).await?
        .ok_or(PayrollError::NotFound("payroll"))
}

async fn find_employee<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<employee::Model, PayrollError> {
    Employee::find_by_id(id)
        .one(db).await?
        .ok_or(PayrollError::NotFound("employee"))
}

fn ensure_draft(record: &payroll::Model, action: &str) -> Result<(), PayrollError> {
    match record.status {
        PayrollStatus::Draft => Ok(()),
        PayrollStatus::Finalized => Err(PayrollError::invalid_state(format!("finalized payroll cannot be {action}"))),
    }
}

/// Creates a `DRAFT` record for every eligible employee that has none for the period
///
/// Limited to `employee_ids` when given. Existing records, including ones
/// inserted concurrently by another request, are skipped rather than reported.
pub async fn generate<C: ConnectionTrait>(
    db: &C,
    settings: &PayrollSettings,
    period: Period,
    employee_ids: Option<&[Uuid]>,
    actor: Uuid,
) -> Result<Generated, PayrollError> {
    let mut query = Employee::find()
        .filter(employee::Column::IsActive.eq(true));

    if let Some(ids) = employee_ids {
        query = query.filter(employee::Column::Id.is_in(ids.iter().copied()));
    }

    let employees = query.all(db).await?;

    let mut created = Vec::new();
    let mut skipped = 0;

    for employee in employees {
        if !is_eligible(&employee) {
            skipped += 1;
            continue;
        }

        let existing = Payroll::find()
            .filter(payroll::Column::EmployeeId.eq(employee.id))
            .filter(payroll::Column::Month.eq(period.month()))
            .filter(payroll::Column::Year.eq(period.year()))
            .one(db).await?;

        if existing.is_some() {
            tracing::debug!(employee_id = %employee.id, month = period.month(), year = period.year(), "payroll exists, skipping");
            skipped += 1;
            continue;
        }

        let figures = compute(db, settings, &employee, period).await?;

        let now = Local::now().fixed_offset();
        let mut model = payroll::ActiveModel {
            created_at: Set(now),
            updated_at: Set(now),
            created_by: Set(Some(actor)),
            updated_by: Set(Some(actor)),
            employee_id: Set(employee.id),
            month: Set(period.month()),
            year: Set(period.year()),
            status: Set(PayrollStatus::Draft),
            finalized_at: Set(None),
            finalized_by: Set(None),
            ..Default::default()
        };
        assign(&mut model, figures);

        match Payroll::insert(model).exec_with_returning(db).await {
            Ok(record) => {
                tracing::info!(
                    employee_id = %employee.id, payroll_id = %record.id, month = record.month, year = record.year,
                    net_salary = %record.net_salary, "payroll generated"
                );
                created.push(record);
            }
            Err(err) => match PayrollError::from_insert(err) {
                PayrollError::Conflict => {
                    tracing::debug!(employee_id = %employee.id, month = period.month(), year = period.year(), "payroll inserted concurrently, skipping");
                    skipped += 1;
                }
                err => return Err(err),
            },
        }
    }

    Ok(Generated { created, skipped })
}

/// Recomputes a `DRAFT` record from current attendance, leave and compensation
pub async fn recalculate<C: ConnectionTrait>(
    db: &C,
    settings: &PayrollSettings,
    id: Uuid,
    actor: Uuid,
) -> Result<payroll::Model, PayrollError> {
    let record = find(db, id).await?;
    ensure_draft(&record, "recalculated")?;

    let employee = find_employee(db, record.employee_id).await?;
    let period = Period::new(record.month, record.year)?;
    let figures = compute(db, settings, &employee, period).await?;

    let mut model = payroll::ActiveModel {
        updated_at: Set(Local::now().fixed_offset()),
        updated_by: Set(Some(actor)),
        ..Default::default()
    };
    assign(&mut model, figures);

    // Only lands if nobody finalized the record in between
    let result = Payroll::update_many()
        .set(model)
        .filter(payroll::Column::Id.eq(id))
        .filter(payroll::Column::Status.eq(PayrollStatus::Draft))
        .exec(db).await?;

    if result.rows_affected == 0 {
        return Err(PayrollError::invalid_state("payroll was finalized during recalculation"));
    }

    tracing::info!(payroll_id = %id, employee_id = %record.employee_id, "payroll recalculated");

    find(db, id).await
}

/// Moves a `DRAFT` record to `FINALIZED`, then notifies the employee
///
/// The payslip is rendered before the transition so a rendering failure leaves
/// the record untouched. Notification and email are best effort.
pub async fn finalize<C: ConnectionTrait>(
    db: &C,
    mailer: &dyn Mailer,
    id: Uuid,
    actor: Uuid,
) -> Result<payroll::Model, PayrollError> {
    let record = find(db, id).await?;
    ensure_draft(&record, "finalized again")?;

    let employee = find_employee(db, record.employee_id).await?;
    let payslip = payslip::render(&record, &employee)?;

    let now = Local::now().fixed_offset();
    let result = Payroll::update_many()
        .set(payroll::ActiveModel {
            status: Set(PayrollStatus::Finalized),
            finalized_at: Set(Some(now)),
            finalized_by: Set(Some(actor)),
            updated_at: Set(now),
            updated_by: Set(Some(actor)),
            ..Default::default()
        })
        .filter(payroll::Column::Id.eq(id))
        .filter(payroll::Column::Status.eq(PayrollStatus::Draft))
        .exec(db).await?;

    if result.rows_affected == 0 {
        return Err(PayrollError::invalid_state("payroll is already finalized"));
    }

    tracing::info!(payroll_id = %id, employee_id = %employee.id, "payroll finalized");

    let record = find(db, id).await?;

    dispatch::notify(db, Notice {
        user_id: employee.user_id,
        kind: "PAYROLL_CREDITED",
        title: "Payroll Generated".to_owned(),
        message: format!("Your payroll for {}/{} has been generated", record.month, record.year),
        metadata: serde_json::json!({ "payrollId": record.id }),
    }).await;

    dispatch::deliver_best_effort(mailer, Mail {
        to: employee.email.clone(),
        subject: "Payroll Generated".to_owned(),
        html: templates::payroll_generated(
            &format!("{} {}", employee.first_name, employee.last_name),
            record.month,
            record.year,
        ),
        attachment: Some(Attachment {
            filename: payslip::file_name(&employee),
            content_type: "application/pdf",
            bytes: payslip,
        }),
    }).await;

    Ok(record)
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<(), PayrollError> {
    let record = find(db, id).await?;
    ensure_draft(&record, "deleted")?;

    let result = Payroll::delete_many()
        .filter(payroll::Column::Id.eq(id))
        .filter(payroll::Column::Status.eq(PayrollStatus::Draft))
        .exec(db).await?;

    if result.rows_affected == 0 {
        return Err(PayrollError::invalid_state("payroll was finalized before it could be deleted"));
    }

    tracing::info!(payroll_id = %id, employee_id = %record.employee_id, "payroll deleted");

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, Statement, Value};

    use crate::{
        dispatch::MailError,
        entity::{attendance, compensation::Components, leave, sea_orm_active_enums::AttendanceStatus},
        test_utils,
    };

    use super::*;

    #[derive(Default)]
    struct RecordingMailer(Mutex<Vec<Mail>>);

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, mail: Mail) -> Result<(), MailError> {
            self.0.lock().unwrap().push(mail);
            Ok(())
        }
    }

    struct FailingMailer;

    #[async_trait]
    impl Mailer for FailingMailer {
        async fn send(&self, _: Mail) -> Result<(), MailError> {
            Err(MailError::Build("smtp unavailable".to_owned()))
        }
    }

    fn march() -> Period {
        Period::new(3, 2025).unwrap()
    }

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult { last_insert_id: 0, rows_affected }
    }

    /// Asserts the computed columns a statement writes for a 66000 salary over `full_month`
    fn assert_writes_full_month_figures(statement: &Statement, gross_salary: Decimal, net_salary: Decimal) {
        let columns = test_utils::written_columns(statement);

        for (column, value) in [
            ("base_salary", Value::from(dec!(66000))),
            ("calculated_base_salary", Value::from(dec!(63000))),
            ("overtime_pay", Value::from(dec!(0))),
            ("late_deduction", Value::from(dec!(0))),
            ("absent_deduction", Value::from(dec!(3000))),
            ("leave_deductions", Value::from(dec!(0))),
            ("working_days", Value::from(21)),
            ("late_days", Value::from(0)),
            ("half_days", Value::from(0)),
            ("absent_days", Value::from(dec!(1))),
            ("paid_leave_days", Value::from(dec!(0))),
            ("unpaid_leave_days", Value::from(dec!(0))),
            ("total_hours", Value::from(dec!(189))),
            ("overtime_hours", Value::from(dec!(0))),
            ("gross_salary", Value::from(gross_salary)),
            ("net_salary", Value::from(net_salary)),
        ] {
            assert_eq!(columns.get(column), Some(&value), "column `{column}` in {}", statement.sql);
        }
    }

    /// Every weekday of March 2025
    fn full_month(employee_id: Uuid) -> Vec<attendance::Model> {
        (3..=31)
            .filter(|day| ![8, 9, 15, 16, 22, 23, 29, 30].contains(day))
            .map(|day| test_utils::attendance(employee_id, day, AttendanceStatus::Present, Some(dec!(9)), Some(dec!(0))))
            .collect()
    }

    #[test]
    fn test_eligibility() {
        let employee = test_utils::employee(dec!(50000));
        assert!(is_eligible(&employee));

        assert!(!is_eligible(&employee::Model { is_active: false, ..employee.clone() }));
        assert!(!is_eligible(&employee::Model { role: RoleType::Admin, ..employee.clone() }));
        assert!(!is_eligible(&employee::Model { base_salary: Decimal::ZERO, ..employee.clone() }));
        assert!(is_eligible(&employee::Model { role: RoleType::Hr, ..employee }));
    }

    #[actix_web::test]
    async fn test_generate() {
        let existing = test_utils::employee(dec!(44000));
        let admin = employee::Model { role: RoleType::Admin, ..test_utils::employee(dec!(90000)) };
        let fresh = employee::Model {
            allowances: Components::from([("hra", dec!(1500))]),
            deductions: Components::from([("pf", dec!(500))]),
            ..test_utils::employee(dec!(66000))
        };
        let inserted = test_utils::payroll(fresh.id, 3, 2025, PayrollStatus::Draft);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing.clone(), admin, fresh.clone()]])
            .append_query_results([vec![test_utils::payroll(existing.id, 3, 2025, PayrollStatus::Draft)]])
            .append_query_results([Vec::<payroll::Model>::new()])
            .append_query_results([full_month(fresh.id)])
            .append_query_results([Vec::<leave::Model>::new()])
            .append_query_results([vec![inserted.clone()]])
            .into_connection();

        let actor = Uuid::new_v4();
        let generated = generate(&db, &PayrollSettings::default(), march(), None, actor).await.unwrap();

        assert_eq!(generated.created, vec![inserted]);
        assert_eq!(generated.skipped, 2);

        let statements = test_utils::statements(db);
        let inserts = statements.iter()
            .filter(|statement| statement.sql.starts_with(r#"INSERT INTO "payroll""#))
            .collect::<Vec<_>>();
        assert_eq!(inserts.len(), 1);

        // 21 weekdays of 3000 plus hra, less pf and one absent day
        assert_writes_full_month_figures(inserts[0], dec!(64500), dec!(61000));

        let columns = test_utils::written_columns(inserts[0]);
        assert_eq!(columns.get("employee_id"), Some(&Value::from(fresh.id)));
        assert_eq!(columns.get("month"), Some(&Value::from(3)));
        assert_eq!(columns.get("year"), Some(&Value::from(2025)));
        let draft: Value = PayrollStatus::Draft.into();
        assert_eq!(columns.get("status"), Some(&draft));
        assert_eq!(columns.get("created_by"), Some(&Value::from(Some(actor))));
    }

    #[actix_web::test]
    async fn test_generate_twice_creates_nothing() {
        let employee = test_utils::employee(dec!(66000));

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![employee.clone()]])
            .append_query_results([vec![test_utils::payroll(employee.id, 3, 2025, PayrollStatus::Finalized)]])
            .into_connection();

        let generated = generate(&db, &PayrollSettings::default(), march(), Some(&[employee.id]), Uuid::new_v4())
            .await.unwrap();

        assert!(generated.created.is_empty());
        assert_eq!(generated.skipped, 1);
    }

    #[actix_web::test]
    async fn test_generate_folds_duplicate_insert_into_skip() {
        let racing = test_utils::employee(dec!(66000));
        let other = test_utils::employee(dec!(22000));
        let inserted = test_utils::payroll(other.id, 3, 2025, PayrollStatus::Draft);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![racing.clone(), other.clone()]])
            // racing: no record yet, but the insert hits the unique index
            .append_query_results([Vec::<payroll::Model>::new()])
            .append_query_results([full_month(racing.id)])
            .append_query_results([Vec::<leave::Model>::new()])
            .append_query_errors([DbErr::RecordNotInserted])
            // other
            .append_query_results([Vec::<payroll::Model>::new()])
            .append_query_results([full_month(other.id)])
            .append_query_results([Vec::<leave::Model>::new()])
            .append_query_results([vec![inserted.clone()]])
            .into_connection();

        let generated = generate(&db, &PayrollSettings::default(), march(), None, Uuid::new_v4()).await.unwrap();

        assert_eq!(generated.created, vec![inserted]);
        assert_eq!(generated.skipped, 1);
    }

    #[actix_web::test]
    async fn test_generate_propagates_store_failure() {
        let employee = test_utils::employee(dec!(66000));

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![employee.clone()]])
            .append_query_errors([DbErr::Custom("connection reset".to_owned())])
            .into_connection();

        let result = generate(&db, &PayrollSettings::default(), march(), None, Uuid::new_v4()).await;

        assert!(matches!(result, Err(PayrollError::DataAccess(_))));
    }

    #[actix_web::test]
    async fn test_recalculate() {
        let employee = test_utils::employee(dec!(66000));
        let draft = test_utils::payroll(employee.id, 3, 2025, PayrollStatus::Draft);
        let updated = payroll::Model { net_salary: dec!(60000), ..draft.clone() };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![draft.clone()]])
            .append_query_results([vec![employee.clone()]])
            .append_query_results([full_month(employee.id)])
            .append_query_results([Vec::<leave::Model>::new()])
            .append_exec_results([exec(1)])
            .append_query_results([vec![updated.clone()]])
            .into_connection();

        let actor = Uuid::new_v4();
        let record = recalculate(&db, &PayrollSettings::default(), draft.id, actor).await.unwrap();

        assert_eq!(record, updated);

        let statements = test_utils::statements(db);
        let updates = statements.iter()
            .filter(|statement| statement.sql.starts_with(r#"UPDATE "payroll""#))
            .collect::<Vec<_>>();
        assert_eq!(updates.len(), 1);

        let sql = &updates[0].sql;
        // Compare-and-swap: the write only lands on a draft
        let (_, filter) = sql.split_once(" WHERE ").expect("unfiltered update");
        assert!(filter.contains(r#""id" = $"#), "{sql}");
        assert!(filter.contains(r#""status" = CAST($"#), "{sql}");

        assert_writes_full_month_figures(updates[0], dec!(63000), dec!(60000));

        let columns = test_utils::written_columns(updates[0]);
        assert_eq!(columns.get("updated_by"), Some(&Value::from(Some(actor))));
        assert!(!columns.contains_key("status"));
        assert!(!columns.contains_key("month"));
    }

    #[actix_web::test]
    async fn test_recalculate_rejects_finalized() {
        let finalized = test_utils::payroll(Uuid::new_v4(), 3, 2025, PayrollStatus::Finalized);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![finalized.clone()]])
            .into_connection();

        let result = recalculate(&db, &PayrollSettings::default(), finalized.id, Uuid::new_v4()).await;

        assert!(matches!(result, Err(PayrollError::InvalidState(_))));
    }

    #[actix_web::test]
    async fn test_recalculate_loses_race_against_finalize() {
        let employee = test_utils::employee(dec!(66000));
        let draft = test_utils::payroll(employee.id, 3, 2025, PayrollStatus::Draft);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![draft.clone()]])
            .append_query_results([vec![employee.clone()]])
            .append_query_results([full_month(employee.id)])
            .append_query_results([Vec::<leave::Model>::new()])
            .append_exec_results([exec(0)])
            .into_connection();

        let result = recalculate(&db, &PayrollSettings::default(), draft.id, Uuid::new_v4()).await;

        assert!(matches!(result, Err(PayrollError::InvalidState(_))));
    }

    #[actix_web::test]
    async fn test_recalculate_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<payroll::Model>::new()])
            .into_connection();

        let result = recalculate(&db, &PayrollSettings::default(), Uuid::new_v4(), Uuid::new_v4()).await;

        assert!(matches!(result, Err(PayrollError::NotFound("payroll"))));
    }

    #[actix_web::test]
    async fn test_finalize() {
        let employee = test_utils::employee(dec!(66000));
        let draft = test_utils::payroll(employee.id, 3, 2025, PayrollStatus::Draft);
        let finalized = payroll::Model { status: PayrollStatus::Finalized, ..draft.clone() };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![draft.clone()]])
            .append_query_results([vec![employee.clone()]])
            .append_exec_results([exec(1)])
            .append_query_results([vec![finalized.clone()]])
            .append_exec_results([exec(1)])
            .into_connection();

        let mailer = RecordingMailer::default();
        let record = finalize(&db, &mailer, draft.id, Uuid::new_v4()).await.unwrap();

        assert_eq!(record, finalized);

        let sent = mailer.0.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, employee.email);

        let attachment = sent[0].attachment.as_ref().unwrap();
        assert_eq!(attachment.filename, payslip::file_name(&employee));
        assert!(attachment.bytes.starts_with(b"%PDF"));
    }

    #[actix_web::test]
    async fn test_finalize_survives_side_effect_failures() {
        let employee = test_utils::employee(dec!(66000));
        let draft = test_utils::payroll(employee.id, 3, 2025, PayrollStatus::Draft);
        let finalized = payroll::Model { status: PayrollStatus::Finalized, ..draft.clone() };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![draft.clone()]])
            .append_query_results([vec![employee.clone()]])
            .append_exec_results([exec(1)])
            .append_query_results([vec![finalized.clone()]])
            .append_exec_errors([DbErr::Custom("notification table locked".to_owned())])
            .into_connection();

        let record = finalize(&db, &FailingMailer, draft.id, Uuid::new_v4()).await.unwrap();

        assert_eq!(record.status, PayrollStatus::Finalized);
    }

    #[actix_web::test]
    async fn test_finalize_rejects_finalized() {
        let finalized = test_utils::payroll(Uuid::new_v4(), 3, 2025, PayrollStatus::Finalized);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![finalized.clone()]])
            .into_connection();

        let mailer = RecordingMailer::default();
        let result = finalize(&db, &mailer, finalized.id, Uuid::new_v4()).await;

        assert!(matches!(result, Err(PayrollError::InvalidState(_))));
        assert!(mailer.0.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_finalize_loses_race() {
        let employee = test_utils::employee(dec!(66000));
        let draft = test_utils::payroll(employee.id, 3, 2025, PayrollStatus::Draft);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![draft.clone()]])
            .append_query_results([vec![employee.clone()]])
            .append_exec_results([exec(0)])
            .into_connection();

        let mailer = RecordingMailer::default();
        let result = finalize(&db, &mailer, draft.id, Uuid::new_v4()).await;

        assert!(matches!(result, Err(PayrollError::InvalidState(_))));
        assert!(mailer.0.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_delete() {
        let draft = test_utils::payroll(Uuid::new_v4(), 3, 2025, PayrollStatus::Draft);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![draft.clone()]])
            .append_exec_results([exec(1)])
            .into_connection();

        delete(&db, draft.id).await.unwrap();
    }

    #[actix_web::test]
    async fn test_delete_rejects_finalized() {
        let finalized = test_utils::payroll(Uuid::new_v4(), 3, 2025, PayrollStatus::Finalized);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![finalized.clone()]])
            .into_connection();

        assert!(matches!(delete(&db, finalized.id).await, Err(PayrollError::InvalidState(_))));
    }

    #[actix_web::test]
    async fn test_delete_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<payroll::Model>::new()])
            .into_connection();

        assert!(matches!(delete(&db, Uuid::new_v4()).await, Err(PayrollError::NotFound("payroll"))));
    }
}
