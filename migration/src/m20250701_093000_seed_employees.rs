use sea_orm_migration::prelude::*;

use crate::m20250701_090000_create_payroll_schema::Employee;

const HR: u128 = 9001;
const ADMIN: u128 = 9002;
const TEAM_SIZE: u128 = 20;

#[derive(DeriveMigrationName)]
pub struct Migration;

struct Seed<'a> {
    number: u128,
    first_name: &'a str,
    last_name: String,
    department: &'a str,
    designation: &'a str,
    role: &'a str,
    manager: Option<u128>,
    base_salary: i64,
    allowances: serde_json::Value,
    deductions: serde_json::Value,
}

fn uuid(number: u128) -> SimpleExpr {
    Expr::val(format!("{:032x}", number)).cast_as("uuid")
}

/// Users live in the identity service; their ids are derived from the employee number
fn user_uuid(number: u128) -> SimpleExpr {
    uuid(0x1_0000 + number)
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let time = Expr::val("2025-07-01T09:30:00.000Z").cast_as("timestamptz");

        let mut seeds = vec![
            Seed {
                number: HR,
                first_name: "Hana",
                last_name: "Resources".into(),
                department: "People",
                designation: "HR Manager",
                role: "hr",
                manager: None,
                base_salary: 90_000,
                allowances: serde_json::json!({ "hra": 9000 }),
                deductions: serde_json::json!({ "pf": 5400 }),
            },
            Seed {
                number: ADMIN,
                first_name: "Adam",
                last_name: "Ministrator".into(),
                department: "Operations",
                designation: "Administrator",
                role: "admin",
                manager: None,
                base_salary: 100_000,
                allowances: serde_json::json!({}),
                deductions: serde_json::json!({}),
            },
            Seed {
                number: 1,
                first_name: "Lena",
                last_name: "Lead".into(),
                department: "Engineering",
                designation: "Team Lead",
                role: "team_lead",
                manager: None,
                base_salary: 120_000,
                allowances: serde_json::json!({ "hra": 12000, "transport": 3000 }),
                deductions: serde_json::json!({ "pf": 7200, "tax": 6000 }),
            },
        ];

        // The rest of the team reports to employee 1
        for number in 2..=TEAM_SIZE {
            let base_salary = rand::random_range(40..=90) * 1_000;

            seeds.push(Seed {
                number,
                first_name: "Employee",
                last_name: number.to_string(),
                department: "Engineering",
                designation: "Software Engineer",
                role: "employee",
                manager: Some(1),
                base_salary,
                allowances: serde_json::json!({ "hra": base_salary / 10, "transport": 2000 }),
                deductions: serde_json::json!({ "pf": base_salary * 6 / 100 }),
            });
        }

        for seed in seeds {
            let manager_id = match seed.manager {
                Some(number) => uuid(number),
                None => Expr::val(Option::<String>::None).cast_as("uuid"),
            };

            manager
                .exec_stmt(Query::insert()
                    .into_table(Employee::Table)
                    .columns([
                        "id", "created_at", "updated_at", "user_id", "employee_code", "first_name", "last_name", "email",
                        "department", "designation", "role", "is_active", "manager_id", "base_salary", "allowances", "deductions",
                    ])
                    .values_panic([
                        uuid(seed.number),
                        time.clone(),
                        time.clone(),
                        user_uuid(seed.number),
                        format!("EMP{:04}", seed.number).into(),
                        seed.first_name.into(),
                        seed.last_name.clone().into(),
                        format!("{}.{}@example.com", seed.first_name, seed.last_name).to_lowercase().into(),
                        seed.department.into(),
                        seed.designation.into(),
                        Expr::val(seed.role).cast_as("role_type"),
                        true.into(),
                        manager_id,
                        seed.base_salary.into(),
                        Expr::val(seed.allowances.to_string()).cast_as("jsonb"),
                        Expr::val(seed.deductions.to_string()).cast_as("jsonb"),
                    ])
                    .to_owned()
            ).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let numbers = (1..=TEAM_SIZE).chain([HR, ADMIN]);

        // Reports first so the lead is no longer referenced
        for number in numbers.rev() {
            manager
                .exec_stmt(Query::delete()
                    .from_table(Employee::Table)
                    .and_where(Expr::col("id").eq(uuid(number)))
                    .to_owned()
            ).await?;
        }

        Ok(())
    }
}
