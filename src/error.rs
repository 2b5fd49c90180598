use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use chrono::NaiveDate;
use serde_json::json;

use crate::model::leave_request::{LeaveStatus, LeaveType};

#[derive(Debug, thiserror::Error)]
pub enum LeaveError {
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("to_date {to} is before from_date {from}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    #[error("invalid leave type '{0}'. Allowed: Casual, Sick, Earned, Combo")]
    InvalidLeaveType(String),

    #[error("{0} leave is only available after one year of service")]
    IneligibleLeaveType(LeaveType),

    #[error("insufficient leave balance: {balance} available, {days} requested")]
    InsufficientBalanceAtApproval { balance: i32, days: i32 },

    #[error("leave {0} cannot be cancelled")]
    NotCancellable(u64),

    #[error("leave {id} is {from}, it cannot become {to}")]
    InvalidTransition {
        id: u64,
        from: LeaveStatus,
        to: LeaveStatus,
    },

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("invalid credentials")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error("persistence failure: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ResponseError for LeaveError {
    fn status_code(&self) -> StatusCode {
        match self {
            LeaveError::InvalidDate(_)
            | LeaveError::InvalidRange { .. }
            | LeaveError::InvalidLeaveType(_)
            | LeaveError::IneligibleLeaveType(_)
            | LeaveError::Validation(_) => StatusCode::BAD_REQUEST,
            LeaveError::Unauthorized => StatusCode::UNAUTHORIZED,
            LeaveError::Forbidden(_) => StatusCode::FORBIDDEN,
            LeaveError::NotFound(_) => StatusCode::NOT_FOUND,
            LeaveError::InsufficientBalanceAtApproval { .. }
            | LeaveError::NotCancellable(_)
            | LeaveError::InvalidTransition { .. }
            | LeaveError::Conflict(_) => StatusCode::CONFLICT,
            LeaveError::Persistence(_) | LeaveError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            LeaveError::Persistence(e) => {
                tracing::error!(error = %e, "Store transaction failed");
                "Internal Server Error".to_string()
            }
            LeaveError::Internal(detail) => {
                tracing::error!(detail = %detail, "Internal failure");
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({ "message": message }))
    }
}
