use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::LeaveError;
use crate::leave::LeavePolicy;

/// Label shown in the HR overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum Tenure {
    New,
    Experienced,
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, LeaveError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| LeaveError::InvalidDate(raw.to_string()))
}

/// Whole days between joining and `today`. A join date in the future is
/// rejected rather than producing a negative tenure.
pub fn experience_days(join_date: NaiveDate, today: NaiveDate) -> Result<i64, LeaveError> {
    let days = (today - join_date).num_days();
    if days < 0 {
        return Err(LeaveError::InvalidDate(format!(
            "join date {join_date} is after {today}"
        )));
    }
    Ok(days)
}

impl LeavePolicy {
    pub fn is_senior(&self, experience_days: i64) -> bool {
        experience_days >= self.seniority_days
    }

    /// Entitlement granted at creation time. It is not recomputed when the
    /// person later crosses the seniority threshold.
    pub fn initial_balance(&self, experience_days: i64) -> i32 {
        if self.is_senior(experience_days) {
            self.senior_entitlement
        } else {
            self.junior_entitlement
        }
    }

    pub fn tenure(&self, join_date: NaiveDate, today: NaiveDate) -> Tenure {
        match experience_days(join_date, today) {
            Ok(days) if self.is_senior(days) => Tenure::Experienced,
            _ => Tenure::New,
        }
    }
}
