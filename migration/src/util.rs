use sea_orm_migration::prelude::*;

/// `id` and `created_at`, for append-only tables
pub(crate) fn base_table_statement() -> TableCreateStatement {
    TableCreateStatement::new()
        .if_not_exists()
        .col(ColumnDef::new(DefaultColumn::Id)
            .uuid()
            .primary_key()
            .default(Expr::cust("GEN_RANDOM_UUID()"))
            .take())
        .col(ColumnDef::new(DefaultColumn::CreatedAt)
            .timestamp_with_time_zone()
            .not_null()
            .take())
        .take()
}

pub(crate) fn default_table_statement() -> TableCreateStatement {
    base_table_statement()
        .col(ColumnDef::new(DefaultColumn::UpdatedAt)
            .timestamp_with_time_zone()
            .not_null()
            .take())
        .take()
}

#[derive(DeriveIden)]
pub(crate) enum DefaultColumn {
    Id,
    CreatedAt,
    UpdatedAt,
}

/// Adds the acting user columns; users live in the identity service so these carry no foreign key
pub(crate) fn audited_table_statement() -> TableCreateStatement {
    default_table_statement()
        .col(ColumnDef::new(AuditColumn::CreatedBy)
            .uuid())
        .col(ColumnDef::new(AuditColumn::UpdatedBy)
            .uuid())
        .take()
}

#[derive(DeriveIden)]
pub(crate) enum AuditColumn {
    CreatedBy,
    UpdatedBy,
}

/// Owner column shared by every per-employee table
#[derive(DeriveIden)]
pub(crate) enum EmployeeColumn {
    EmployeeId,
}

/// Links `employee_id` of the table to `employee.id`, cascading deletes
///
/// # Example
///
/// ```rs
/// manager
///     .create_table(default_table_statement()
///         .table(Attendance::Table)
///         .col(ColumnDef::new(EmployeeColumn::EmployeeId)
///             .uuid()
///             .not_null())
///         .take()
///     ).await?;
/// setup_employee_fk!(manager, Attendance::Table, "fk_attendance_employee");
/// ```
#[macro_export]
macro_rules! setup_employee_fk {
    ($m:expr,$t:expr,$name:expr) => {{
        use crate::util::*;
        use crate::m20250701_090000_create_payroll_schema::Employee;

        $m.create_foreign_key(ForeignKeyCreateStatement::new()
                .name($name)
                .from($t, EmployeeColumn::EmployeeId)
                .to(Employee::Table, DefaultColumn::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .on_update(ForeignKeyAction::Cascade)
                .take()
        ).await?;
    }};
}
