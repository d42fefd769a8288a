use super::*;

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct GeneratePayroll {
    pub(super) month: Option<i32>,
    pub(super) year: Option<i32>,
    pub(super) employee_ids: Option<Vec<Uuid>>,
}

impl GeneratePayroll {
    pub(super) fn period(&self) -> Result<Period, PayrollError> {
        let month = self.month.ok_or_else(|| PayrollError::validation("month", "is required"))?;
        let year = self.year.ok_or_else(|| PayrollError::validation("year", "is required"))?;

        Period::new(month, year)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct GeneratedPayrolls {
    pub(super) message: String,
    pub(super) count: usize,
    pub(super) skipped: usize,
    pub(super) data: Vec<payroll::Model>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(super) struct ListPayrolls {
    pub(super) month: Option<i32>,
    pub(super) year: Option<i32>,
    pub(super) status: Option<PayrollStatus>,
    pub(super) employee_id: Option<Uuid>,
    pub(super) page: Option<u64>,
    pub(super) limit: Option<u64>,
}

impl ListPayrolls {
    pub(super) fn filter(&self) -> PayrollFilter {
        PayrollFilter {
            month: self.month,
            year: self.year,
            status: self.status,
            employee_id: self.employee_id,
        }
    }
}

/// Defaults to the current month
#[derive(Debug, Default, Serialize, Deserialize)]
pub(super) struct StatsPeriod {
    pub(super) month: Option<i32>,
    pub(super) year: Option<i32>,
}

impl StatsPeriod {
    pub(super) fn period(&self) -> Result<Period, PayrollError> {
        let today = Local::now().date_naive();

        Period::new(
            self.month.unwrap_or(today.month() as i32),
            self.year.unwrap_or(today.year()),
        )
    }
}
