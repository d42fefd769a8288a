use actix_web::{body, http::{header::ContentType, StatusCode}, HttpResponse};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::payslip::PayslipError;

#[derive(Debug, Error)]
pub enum PayrollError {
    #[error("invalid `{field}`: {message}")]
    Validation { field: &'static str, message: String },

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("not authorized to access this payroll")]
    Forbidden,

    #[error("{0}")]
    InvalidState(String),

    #[error("payroll already exists for this employee and period")]
    Conflict,

    #[error("unable to render payslip")]
    Render(#[from] PayslipError),

    #[error("data access error")]
    DataAccess(#[from] DbErr),
}

impl PayrollError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation { field, message: message.into() }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// Classifies an insert failure, folding duplicate keys into [`PayrollError::Conflict`]
    pub fn from_insert(err: DbErr) -> Self {
        if is_unique_violation(&err) {
            Self::Conflict
        } else {
            Self::DataAccess(err)
        }
    }
}

pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err, DbErr::RecordNotInserted)
        || matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

impl actix_web::error::ResponseError for PayrollError {
    fn error_response(&self) -> HttpResponse<body::BoxBody> {
        if let Self::DataAccess(err) = self {
            tracing::error!(error = %err, "payroll storage failure");
        }

        HttpResponse::build(self.status_code())
            .insert_header(ContentType::plaintext())
            .body(self.to_string())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            PayrollError::Validation { .. } => StatusCode::BAD_REQUEST,
            PayrollError::NotFound(_) => StatusCode::NOT_FOUND,
            PayrollError::Forbidden => StatusCode::FORBIDDEN,
            PayrollError::InvalidState(_) | PayrollError::Conflict => StatusCode::CONFLICT,
            PayrollError::Render(_) | PayrollError::DataAccess(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
