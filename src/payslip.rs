//! Payslip rendering: `(payroll record, employee) → PDF bytes`

use chrono::{Local, Month};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{entity::{employee, payroll}, utils::round_money};

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const MARGIN: f32 = 20.0;
const LINE_HEIGHT: f32 = 7.0;

#[derive(Debug, Error)]
pub enum PayslipError {
    #[error("pdf error: {0}")]
    Pdf(#[from] printpdf::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Title,
    Heading,
    Body,
    Total,
    Footnote,
}

/// One rendered line of the payslip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub emphasis: Emphasis,
    pub text: String,
}

impl Line {
    fn new(emphasis: Emphasis, text: impl Into<String>) -> Self {
        Self { emphasis, text: text.into() }
    }

    fn blank() -> Self {
        Self::new(Emphasis::Body, "")
    }
}

pub fn file_name(employee: &employee::Model) -> String {
    let name = format!("{}-{}", employee.first_name, employee.last_name)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");

    format!("{}-{}.pdf", name, employee.employee_code)
}

fn money(amount: Decimal) -> String {
    format!("Rs. {:.2}", amount)
}

fn month_name(month: i32) -> String {
    u8::try_from(month)
        .ok()
        .and_then(|month| Month::try_from(month).ok())
        .map(|month| month.name().to_owned())
        .unwrap_or_else(|| month.to_string())
}

/// Textual content of the payslip, top to bottom
pub fn lines(record: &payroll::Model, employee: &employee::Model) -> Vec<Line> {
    let mut lines = vec![
        Line::new(Emphasis::Title, "PAYSLIP"),
        Line::blank(),
        Line::new(Emphasis::Body, format!("Employee: {} {}", employee.first_name, employee.last_name)),
        Line::new(Emphasis::Body, format!("Employee ID: {}", employee.employee_code)),
        Line::new(Emphasis::Body, format!("Department: {}", employee.department.as_deref().unwrap_or("-"))),
        Line::new(Emphasis::Body, format!("Designation: {}", employee.designation.as_deref().unwrap_or("-"))),
        Line::new(Emphasis::Body, format!("Pay Period: {} {}", month_name(record.month), record.year)),
        Line::blank(),
        Line::new(Emphasis::Body, format!(
            "Working Days: {} | Late Days: {} | Absent Days: {}",
            record.working_days, record.late_days, record.absent_days.normalize()
        )),
        Line::new(Emphasis::Body, format!("Total Hours Worked: {:.1} hrs", record.total_hours)),
        Line::new(Emphasis::Body, format!("Monthly Base Salary: {}", money(record.base_salary))),
        Line::blank(),
        Line::new(Emphasis::Heading, "EARNINGS"),
        Line::new(Emphasis::Body, format!(
            "Base Salary ({} days): {}", record.working_days, money(record.calculated_base_salary)
        )),
    ];

    lines.extend(record.allowances.iter().map(|(label, amount)|
        Line::new(Emphasis::Body, format!("{}: {}", label.to_uppercase(), money(amount)))
    ));

    if record.overtime_pay > Decimal::ZERO {
        lines.push(Line::new(Emphasis::Body, format!(
            "Overtime ({} hrs): {}", record.overtime_hours.normalize(), money(record.overtime_pay)
        )));
    }

    lines.push(Line::new(Emphasis::Total, format!("Gross Salary: {}", money(record.gross_salary))));
    lines.push(Line::blank());
    lines.push(Line::new(Emphasis::Heading, "DEDUCTIONS"));

    lines.extend(record.deductions.iter().map(|(label, amount)|
        Line::new(Emphasis::Body, format!("{}: {}", label.to_uppercase(), money(amount)))
    ));

    if record.late_deduction > Decimal::ZERO {
        lines.push(Line::new(Emphasis::Body, format!(
            "LATE DEDUCTION ({} days): {}", record.late_days, money(record.late_deduction)
        )));
    }

    if record.absent_deduction > Decimal::ZERO {
        lines.push(Line::new(Emphasis::Body, format!(
            "ABSENT DEDUCTION ({} days): {}", record.absent_days.normalize(), money(record.absent_deduction)
        )));
    }

    if record.leave_deductions > Decimal::ZERO {
        lines.push(Line::new(Emphasis::Body, format!(
            "UNPAID LEAVE DEDUCTION ({} days): {}", record.unpaid_leave_days.normalize(), money(record.leave_deductions)
        )));
    }

    // Same rounding the calculator applies before subtracting from gross
    let total_deductions = round_money(record.deductions.total())
        + record.late_deduction
        + record.absent_deduction
        + record.leave_deductions;

    lines.push(Line::new(Emphasis::Total, format!("Total Deductions: {}", money(total_deductions))));
    lines.push(Line::blank());
    lines.push(Line::new(Emphasis::Title, format!("NET SALARY: {}", money(record.net_salary))));
    lines.push(Line::blank());
    lines.push(Line::new(Emphasis::Footnote, format!("Generated on: {}", Local::now().format("%d/%m/%Y"))));
    lines.push(Line::new(Emphasis::Footnote, "This is a computer-generated document. No signature required."));

    lines
}

pub fn render(record: &payroll::Model, employee: &employee::Model) -> Result<Vec<u8>, PayslipError> {
    let title = format!("Payslip {}/{} {}", record.month, record.year, employee.employee_code);
    let (doc, page, layer) = PdfDocument::new(title, PAGE_WIDTH, PAGE_HEIGHT, "payslip");

    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
    let layer = doc.get_page(page).get_layer(layer);

    let mut y = PAGE_HEIGHT.0 - MARGIN;
    for line in lines(record, employee) {
        let (size, font): (f32, &IndirectFontRef) = match line.emphasis {
            Emphasis::Title => (16.0, &bold),
            Emphasis::Heading => (13.0, &bold),
            Emphasis::Total => (12.0, &bold),
            Emphasis::Body => (11.0, &regular),
            Emphasis::Footnote => (8.0, &regular),
        };

        if !line.text.is_empty() {
            layer.use_text(line.text, size, Mm(MARGIN), Mm(y), font);
        }
        y -= LINE_HEIGHT;
    }

    Ok(doc.save_to_bytes()?)
}
