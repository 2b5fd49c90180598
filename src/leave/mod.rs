//! Leave accrual, eligibility and balance reconciliation.
//!
//! `eligibility`, `validator` and `lifecycle` are pure: they decide, the
//! `service` reads and writes through one store transaction per operation.

pub mod eligibility;
pub mod lifecycle;
pub mod service;
pub mod validator;

/// Tenure thresholds and entitlements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeavePolicy {
    /// Days of service after which a person counts as senior.
    pub seniority_days: i64,
    pub junior_entitlement: i32,
    pub senior_entitlement: i32,
    /// Requests spanning more than this many days are long leave.
    pub long_leave_days: i32,
    pub junior_monthly_casual_days: i32,
}

impl Default for LeavePolicy {
    fn default() -> Self {
        Self {
            seniority_days: 365,
            junior_entitlement: 12,
            senior_entitlement: 36,
            long_leave_days: 4,
            junior_monthly_casual_days: 1,
        }
    }
}
