use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

use crate::leave::eligibility::Tenure;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum LeaveType {
    Casual,
    Sick,
    Earned,
    Combo,
}

impl LeaveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Casual => "Casual",
            LeaveType::Sick => "Sick",
            LeaveType::Earned => "Earned",
            LeaveType::Combo => "Combo",
        }
    }
}

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
            LeaveStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[schema(example = json!({
    "id": 1,
    "emp_code": "100001",
    "from_date": "2026-01-10",
    "to_date": "2026-01-15",
    "days": 6,
    "reason": "family trip",
    "leave_type": "Earned",
    "status": "pending",
    "is_lop": false,
    "is_long_leave": true
}))]
pub struct LeaveRequest {
    pub id: u64,
    pub emp_code: String,
    #[schema(value_type = String, format = "date")]
    pub from_date: NaiveDate,
    #[schema(value_type = String, format = "date")]
    pub to_date: NaiveDate,
    pub days: i32,
    pub reason: String,
    pub leave_type: LeaveType,
    pub status: LeaveStatus,
    pub is_lop: bool,
    pub is_long_leave: bool,
}

/// A validated request that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLeave {
    pub emp_code: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub days: i32,
    pub reason: String,
    pub leave_type: LeaveType,
    pub is_lop: bool,
    pub is_long_leave: bool,
}

impl NewLeave {
    pub fn into_pending(self, id: u64) -> LeaveRequest {
        LeaveRequest {
            id,
            emp_code: self.emp_code,
            from_date: self.from_date,
            to_date: self.to_date,
            days: self.days,
            reason: self.reason,
            leave_type: self.leave_type,
            status: LeaveStatus::Pending,
            is_lop: self.is_lop,
            is_long_leave: self.is_long_leave,
        }
    }
}

/// A leave joined with the owner columns the HR overview needs.
#[derive(Debug, Clone)]
pub struct LeaveWithOwner {
    pub leave: LeaveRequest,
    pub owner_name: String,
    pub department: String,
    pub join_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaveOverview {
    #[serde(flatten)]
    pub leave: LeaveRequest,
    #[schema(example = "Jane Doe")]
    pub owner_name: String,
    #[schema(example = "Engineering")]
    pub department: String,
    pub tenure: Tenure,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leave_type_parses_any_case() {
        assert_eq!("casual".parse::<LeaveType>().ok(), Some(LeaveType::Casual));
        assert_eq!("EARNED".parse::<LeaveType>().ok(), Some(LeaveType::Earned));
        assert!("vacation".parse::<LeaveType>().is_err());
    }

    #[test]
    fn status_strings_match_stored_values() {
        assert_eq!(LeaveStatus::Cancelled.as_str(), "cancelled");
        assert_eq!("approved".parse::<LeaveStatus>().ok(), Some(LeaveStatus::Approved));
    }
}
