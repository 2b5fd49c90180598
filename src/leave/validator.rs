use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::LeaveError;
use crate::leave::LeavePolicy;
use crate::leave::eligibility::parse_date;
use crate::model::leave_request::{LeaveType, NewLeave};

/// Leave application as submitted by the requester.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LeaveApplication {
    #[schema(example = "2026-01-10", format = "date")]
    pub from_date: String,
    #[schema(example = "2026-01-15", format = "date")]
    pub to_date: String,
    #[schema(example = "family trip")]
    #[serde(default)]
    pub reason: String,
    /// Casual, Sick, Earned or Combo (any case)
    #[schema(example = "Earned")]
    pub leave_type: String,
}

/// What the validator needs to know about the requester.
#[derive(Debug, Clone, Copy)]
pub struct Applicant {
    pub experience_days: i64,
    pub leave_balance: i32,
    /// Approved days whose start falls in the current month number. Only
    /// consulted for juniors.
    pub approved_days_this_month: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLeave {
    pub leave: NewLeave,
    /// Days over the junior monthly quota, reported when the request is LOP.
    pub extra_days: Option<i32>,
}

pub fn validate(
    policy: &LeavePolicy,
    emp_code: &str,
    applicant: &Applicant,
    application: &LeaveApplication,
) -> Result<ValidatedLeave, LeaveError> {
    let from_date = parse_date(&application.from_date)?;
    let to_date = parse_date(&application.to_date)?;
    if to_date < from_date {
        return Err(LeaveError::InvalidRange {
            from: from_date,
            to: to_date,
        });
    }
    let days = i32::try_from((to_date - from_date).num_days() + 1)
        .map_err(|_| LeaveError::Validation("leave range is too long".to_string()))?;

    let leave_type: LeaveType = application
        .leave_type
        .trim()
        .parse()
        .map_err(|_| LeaveError::InvalidLeaveType(application.leave_type.clone()))?;

    let senior = policy.is_senior(applicant.experience_days);
    if !senior && leave_type != LeaveType::Casual {
        return Err(LeaveError::IneligibleLeaveType(leave_type));
    }

    let is_long_leave = days > policy.long_leave_days;

    let (is_lop, extra_days) = if senior {
        (applicant.leave_balance < days, None)
    } else {
        let total = applicant.approved_days_this_month + days;
        if total > policy.junior_monthly_casual_days {
            (true, Some(total - policy.junior_monthly_casual_days))
        } else {
            (false, None)
        }
    };

    Ok(ValidatedLeave {
        leave: NewLeave {
            emp_code: emp_code.to_string(),
            from_date,
            to_date,
            days,
            reason: application.reason.clone(),
            leave_type,
            is_lop,
            is_long_leave,
        },
        extra_days,
    })
}
