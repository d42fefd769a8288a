use sea_orm_migration::{prelude::{extension::postgres::TypeDropStatement, *}, sea_orm::{ActiveEnum, DbBackend, DeriveActiveEnum, EnumIter, Schema}};

use crate::{setup_employee_fk, util::{audited_table_statement, base_table_statement, default_table_statement, DefaultColumn, EmployeeColumn}};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(DbBackend::Postgres);

        manager.create_type(schema.create_enum_from_active_enum::<RoleType>()).await?;
        manager.create_type(schema.create_enum_from_active_enum::<AttendanceStatus>()).await?;
        manager.create_type(schema.create_enum_from_active_enum::<LeaveType>()).await?;
        manager.create_type(schema.create_enum_from_active_enum::<LeaveStatus>()).await?;
        manager.create_type(schema.create_enum_from_active_enum::<PayrollStatus>()).await?;

        manager
            .create_table(default_table_statement()
                .table(Employee::Table)
                .col(ColumnDef::new(Employee::UserId)
                    .uuid()
                    .unique_key()
                    .not_null())
                .col(ColumnDef::new(Employee::EmployeeCode)
                    .text()
                    .unique_key()
                    .not_null())
                .col(ColumnDef::new(Employee::FirstName)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Employee::LastName)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Employee::Email)
                    .text()
                    .unique_key()
                    .not_null())
                .col(ColumnDef::new(Employee::Department)
                    .text())
                .col(ColumnDef::new(Employee::Designation)
                    .text())
                .col(ColumnDef::new(Employee::Role)
                    .custom(RoleType::name())
                    .not_null())
                .col(ColumnDef::new(Employee::IsActive)
                    .boolean()
                    .not_null()
                    .default(true))
                .col(ColumnDef::new(Employee::ManagerId)
                    .uuid())
                .col(ColumnDef::new(Employee::BaseSalary)
                    .decimal_len(14, 2)
                    .not_null()
                    .default(0))
                .col(ColumnDef::new(Employee::Allowances)
                    .json_binary()
                    .not_null()
                    .default(Expr::cust("'{}'::jsonb")))
                .col(ColumnDef::new(Employee::Deductions)
                    .json_binary()
                    .not_null()
                    .default(Expr::cust("'{}'::jsonb")))
                .take()
            ).await?;

        manager.create_foreign_key(ForeignKeyCreateStatement::new()
            .name("fk_employee_manager")
            .from(Employee::Table, Employee::ManagerId)
            .to(Employee::Table, DefaultColumn::Id)
            .on_delete(ForeignKeyAction::SetNull)
            .on_update(ForeignKeyAction::Cascade)
            .take()
        ).await?;

        manager
            .create_table(default_table_statement()
                .table(Attendance::Table)
                .col(ColumnDef::new(EmployeeColumn::EmployeeId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(Attendance::Date)
                    .date()
                    .not_null())
                .col(ColumnDef::new(Attendance::CheckIn)
                    .timestamp_with_time_zone())
                .col(ColumnDef::new(Attendance::CheckOut)
                    .timestamp_with_time_zone())
                .col(ColumnDef::new(Attendance::Status)
                    .custom(AttendanceStatus::name())
                    .not_null())
                .col(ColumnDef::new(Attendance::TotalHours)
                    .decimal_len(6, 2))
                .col(ColumnDef::new(Attendance::OvertimeHours)
                    .decimal_len(6, 2))
                .take()
            ).await?;
        setup_employee_fk!(manager, Attendance::Table, "fk_attendance_employee");

        // One attendance row per employee per day
        manager.create_index(Index::create()
            .name("idx_attendance_employee_date")
            .table(Attendance::Table)
            .col(EmployeeColumn::EmployeeId)
            .col(Attendance::Date)
            .unique()
            .take()
        ).await?;

        manager
            .create_table(default_table_statement()
                .table(LeaveRequest::Table)
                .col(ColumnDef::new(EmployeeColumn::EmployeeId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(LeaveRequest::LeaveType)
                    .custom(LeaveType::name())
                    .not_null())
                .col(ColumnDef::new(LeaveRequest::StartDate)
                    .date()
                    .not_null())
                .col(ColumnDef::new(LeaveRequest::EndDate)
                    .date()
                    .not_null())
                .col(ColumnDef::new(LeaveRequest::HalfDay)
                    .boolean()
                    .not_null()
                    .default(false))
                .col(ColumnDef::new(LeaveRequest::Status)
                    .custom(LeaveStatus::name())
                    .not_null())
                .col(ColumnDef::new(LeaveRequest::Reason)
                    .text())
                .take()
            ).await?;
        setup_employee_fk!(manager, LeaveRequest::Table, "fk_leave_request_employee");

        manager.create_index(Index::create()
            .name("idx_leave_request_employee_dates")
            .table(LeaveRequest::Table)
            .col(EmployeeColumn::EmployeeId)
            .col(LeaveRequest::StartDate)
            .col(LeaveRequest::EndDate)
            .take()
        ).await?;

        manager
            .create_table(audited_table_statement()
                .table(Payroll::Table)
                .col(ColumnDef::new(EmployeeColumn::EmployeeId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(Payroll::Month)
                    .integer()
                    .not_null()
                    .check(Expr::col(Payroll::Month).between(1, 12)))
                .col(ColumnDef::new(Payroll::Year)
                    .integer()
                    .not_null())
                .col(money(Payroll::BaseSalary))
                .col(ColumnDef::new(Payroll::Allowances)
                    .json_binary()
                    .not_null()
                    .default(Expr::cust("'{}'::jsonb")))
                .col(ColumnDef::new(Payroll::Deductions)
                    .json_binary()
                    .not_null()
                    .default(Expr::cust("'{}'::jsonb")))
                .col(money(Payroll::CalculatedBaseSalary))
                .col(money(Payroll::OvertimePay))
                .col(money(Payroll::LateDeduction))
                .col(money(Payroll::AbsentDeduction))
                .col(money(Payroll::LeaveDeductions))
                .col(count(Payroll::WorkingDays))
                .col(count(Payroll::LateDays))
                .col(count(Payroll::HalfDays))
                .col(days(Payroll::AbsentDays))
                .col(days(Payroll::PaidLeaveDays))
                .col(days(Payroll::UnpaidLeaveDays))
                .col(hours(Payroll::TotalHours))
                .col(hours(Payroll::OvertimeHours))
                .col(money(Payroll::GrossSalary))
                .col(money(Payroll::NetSalary))
                .col(ColumnDef::new(Payroll::Status)
                    .custom(PayrollStatus::name())
                    .not_null())
                .col(ColumnDef::new(Payroll::FinalizedAt)
                    .timestamp_with_time_zone())
                .col(ColumnDef::new(Payroll::FinalizedBy)
                    .uuid())
                .take()
            ).await?;
        setup_employee_fk!(manager, Payroll::Table, "fk_payroll_employee");

        // Generation relies on this to reject duplicates from concurrent requests
        manager.create_index(Index::create()
            .name("idx_payroll_employee_period")
            .table(Payroll::Table)
            .col(EmployeeColumn::EmployeeId)
            .col(Payroll::Month)
            .col(Payroll::Year)
            .unique()
            .take()
        ).await?;

        manager
            .create_table(base_table_statement()
                .table(Notification::Table)
                .col(ColumnDef::new(Notification::UserId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(Notification::Kind)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Notification::Title)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Notification::Message)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Notification::Metadata)
                    .json_binary()
                    .not_null()
                    .default(Expr::cust("'{}'::jsonb")))
                .col(ColumnDef::new(Notification::IsRead)
                    .boolean()
                    .not_null()
                    .default(false))
                .take()
            ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [Notification::Table.into_iden(), Payroll::Table.into_iden(), LeaveRequest::Table.into_iden(), Attendance::Table.into_iden(), Employee::Table.into_iden()] {
            manager.drop_table(
                TableDropStatement::new()
                    .table(table)
                    .take()
            ).await?;
        }

        for name in [PayrollStatus::name(), LeaveStatus::name(), LeaveType::name(), AttendanceStatus::name(), RoleType::name()] {
            manager.drop_type(
                TypeDropStatement::new()
                    .name(name)
                    .to_owned()
            ).await?;
        }

        Ok(())
    }
}

fn money(column: Payroll) -> ColumnDef {
    ColumnDef::new(column)
        .decimal_len(14, 2)
        .not_null()
        .default(0)
        .take()
}

fn days(column: Payroll) -> ColumnDef {
    ColumnDef::new(column)
        .decimal_len(6, 1)
        .not_null()
        .default(0)
        .take()
}

fn hours(column: Payroll) -> ColumnDef {
    ColumnDef::new(column)
        .decimal_len(8, 2)
        .not_null()
        .default(0)
        .take()
}

fn count(column: Payroll) -> ColumnDef {
    ColumnDef::new(column)
        .integer()
        .not_null()
        .default(0)
        .take()
}

#[derive(DeriveIden)]
pub(crate) enum Employee {
    Table,
    UserId,
    EmployeeCode,
    FirstName,
    LastName,
    Email,
    Department,
    Designation,
    Role,
    IsActive,
    ManagerId,
    BaseSalary,
    Allowances,
    Deductions,
}

#[derive(DeriveIden)]
enum Attendance {
    Table,
    Date,
    CheckIn,
    CheckOut,
    Status,
    TotalHours,
    OvertimeHours,
}

#[derive(DeriveIden)]
enum LeaveRequest {
    Table,
    LeaveType,
    StartDate,
    EndDate,
    HalfDay,
    Status,
    Reason,
}

#[derive(DeriveIden)]
enum Payroll {
    Table,
    Month,
    Year,
    BaseSalary,
    Allowances,
    Deductions,
    CalculatedBaseSalary,
    OvertimePay,
    LateDeduction,
    AbsentDeduction,
    LeaveDeductions,
    WorkingDays,
    LateDays,
    HalfDays,
    AbsentDays,
    PaidLeaveDays,
    UnpaidLeaveDays,
    TotalHours,
    OvertimeHours,
    GrossSalary,
    NetSalary,
    Status,
    FinalizedAt,
    FinalizedBy,
}

#[derive(DeriveIden)]
enum Notification {
    Table,
    UserId,
    Kind,
    Title,
    Message,
    Metadata,
    IsRead,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "role_type")]
enum RoleType {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "hr")]
    Hr,
    #[sea_orm(string_value = "team_lead")]
    TeamLead,
    #[sea_orm(string_value = "employee")]
    Employee,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "attendance_status")]
enum AttendanceStatus {
    #[sea_orm(string_value = "present")]
    Present,
    #[sea_orm(string_value = "late")]
    Late,
    #[sea_orm(string_value = "absent")]
    Absent,
    #[sea_orm(string_value = "half_day")]
    HalfDay,
    #[sea_orm(string_value = "wfh")]
    Wfh,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "leave_type")]
enum LeaveType {
    #[sea_orm(string_value = "sick")]
    Sick,
    #[sea_orm(string_value = "casual")]
    Casual,
    #[sea_orm(string_value = "paid")]
    Paid,
    #[sea_orm(string_value = "earned")]
    Earned,
    #[sea_orm(string_value = "maternity")]
    Maternity,
    #[sea_orm(string_value = "paternity")]
    Paternity,
    #[sea_orm(string_value = "half_day")]
    HalfDay,
    #[sea_orm(string_value = "wfh")]
    Wfh,
    #[sea_orm(string_value = "unpaid")]
    Unpaid,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "leave_status")]
enum LeaveStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payroll_status")]
enum PayrollStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "finalized")]
    Finalized,
}
