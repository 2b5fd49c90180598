use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

use crate::model::role::PersonRole;

/// Whether the person is at work or inside a committed long-leave window.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LiveStatus {
    Live,
    LongLeave,
}

impl LiveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LiveStatus::Live => "live",
            LiveStatus::LongLeave => "longleave",
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[schema(
    example = json!({
        "emp_code": "100001",
        "name": "Jane Doe",
        "role": "employee",
        "department": "Engineering",
        "designation": "Engineer",
        "post": "Backend",
        "dept_id": "ENGG",
        "join_date": "2025-01-01",
        "relieve_date": null,
        "leave_balance": 36,
        "live_status": "live",
        "created_by_hr": "Alice"
    })
)]
pub struct PersonRecord {
    pub emp_code: String,
    pub name: String,
    pub role: PersonRole,
    pub department: String,
    pub designation: String,
    pub post: String,
    pub dept_id: String,
    #[schema(value_type = String, format = "date")]
    pub join_date: NaiveDate,
    #[schema(value_type = Option<String>, format = "date")]
    pub relieve_date: Option<NaiveDate>,
    pub leave_balance: i32,
    pub live_status: LiveStatus,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_by_hr: String,
}

/// Onboarding form filled in by HR.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "emp_code": "100001",
        "name": "Jane Doe",
        "dept_id": "ENGG",
        "designation": "Engineer",
        "post": "Backend",
        "join_date": "2025-01-01",
        "password": "changeme",
        "is_head": false
    })
)]
pub struct NewPerson {
    pub emp_code: String,
    pub name: String,
    pub dept_id: String,
    /// Defaults to the department's name.
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub post: String,
    pub join_date: String,
    pub password: String,
    #[serde(default)]
    pub is_head: bool,
}

/// Fields written by the leave lifecycle. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonUpdate {
    pub leave_balance: Option<i32>,
    pub live_status: Option<LiveStatus>,
}

impl PersonUpdate {
    pub fn is_empty(&self) -> bool {
        self.leave_balance.is_none() && self.live_status.is_none()
    }

    pub fn apply_to(&self, person: &mut PersonRecord) {
        if let Some(balance) = self.leave_balance {
            person.leave_balance = balance;
        }
        if let Some(status) = self.live_status {
            person.live_status = status;
        }
    }
}

/// Administrative edit of descriptive fields. Balance, status and role are
/// owned by the leave lifecycle and cannot be edited here.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PersonDetailsUpdate {
    #[schema(example = "Jane Roe")]
    pub name: Option<String>,
    #[schema(example = "Platform")]
    pub department: Option<String>,
    pub designation: Option<String>,
    pub post: Option<String>,
    #[schema(value_type = Option<String>, format = "date", example = "2027-01-31")]
    pub relieve_date: Option<NaiveDate>,
}

impl PersonDetailsUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.department.is_none()
            && self.designation.is_none()
            && self.post.is_none()
            && self.relieve_date.is_none()
    }

    pub fn apply_to(&self, person: &mut PersonRecord) {
        if let Some(name) = &self.name {
            person.name = name.clone();
        }
        if let Some(department) = &self.department {
            person.department = department.clone();
        }
        if let Some(designation) = &self.designation {
            person.designation = designation.clone();
        }
        if let Some(post) = &self.post {
            person.post = post.clone();
        }
        if let Some(relieve_date) = self.relieve_date {
            person.relieve_date = Some(relieve_date);
        }
    }
}
