//! Persistence seam for the leave core.
//!
//! Every service operation opens one `StoreTx`, and nothing it wrote is
//! visible to anyone else until `commit`. Dropping a transaction without
//! committing discards it.

#[cfg(test)]
pub mod memory;
pub mod mysql;

use crate::error::LeaveError;
use crate::model::department::Department;
use crate::model::hr::HrAccount;
use crate::model::leave_request::{LeaveRequest, LeaveStatus, LeaveWithOwner, NewLeave};
use crate::model::person::{PersonDetailsUpdate, PersonRecord, PersonUpdate};

#[allow(async_fn_in_trait)]
pub trait LeaveStore {
    type Tx: StoreTx;

    async fn begin(&self) -> Result<Self::Tx, LeaveError>;
}

#[allow(async_fn_in_trait)]
pub trait StoreTx {
    /// Reads lock the row until the transaction ends.
    async fn get_person(&mut self, emp_code: &str) -> Result<PersonRecord, LeaveError>;
    async fn insert_person(&mut self, person: &PersonRecord) -> Result<(), LeaveError>;
    async fn update_person(&mut self, emp_code: &str, update: &PersonUpdate)
    -> Result<(), LeaveError>;
    async fn update_person_details(
        &mut self,
        emp_code: &str,
        update: &PersonDetailsUpdate,
    ) -> Result<(), LeaveError>;
    async fn set_password(&mut self, emp_code: &str, password_hash: &str)
    -> Result<(), LeaveError>;
    async fn delete_person(&mut self, emp_code: &str) -> Result<(), LeaveError>;

    async fn get_department(&mut self, dept_id: &str) -> Result<Department, LeaveError>;
    async fn insert_department(&mut self, department: &Department) -> Result<(), LeaveError>;
    async fn rename_department(&mut self, dept_id: &str, dept_name: &str)
    -> Result<(), LeaveError>;
    async fn set_department_head(
        &mut self,
        dept_id: &str,
        head_emp_code: Option<&str>,
    ) -> Result<(), LeaveError>;
    async fn count_department_members(&mut self, dept_id: &str) -> Result<i64, LeaveError>;
    async fn delete_department(&mut self, dept_id: &str) -> Result<(), LeaveError>;

    async fn insert_hr(&mut self, hr: &HrAccount) -> Result<(), LeaveError>;
    async fn find_hr_by_username(&mut self, username: &str)
    -> Result<Option<HrAccount>, LeaveError>;

    async fn create_leave(&mut self, leave: &NewLeave) -> Result<u64, LeaveError>;
    async fn get_leave(&mut self, id: u64) -> Result<LeaveRequest, LeaveError>;
    /// Fails with `InvalidTransition` unless the stored status is still `from`.
    async fn update_leave_status(
        &mut self,
        id: u64,
        from: LeaveStatus,
        to: LeaveStatus,
    ) -> Result<(), LeaveError>;
    /// Approved days of requests starting in `month` (1-12) of any year.
    async fn sum_approved_days_in_month(
        &mut self,
        emp_code: &str,
        month: u32,
    ) -> Result<i32, LeaveError>;
    async fn list_pending_for_department(
        &mut self,
        dept_id: &str,
    ) -> Result<Vec<LeaveRequest>, LeaveError>;
    async fn list_leaves_for(&mut self, emp_code: &str) -> Result<Vec<LeaveRequest>, LeaveError>;
    async fn delete_leaves_for(&mut self, emp_code: &str) -> Result<(), LeaveError>;
    /// All requests, ordered by status then newest start date first.
    async fn list_leaves_with_owner(&mut self) -> Result<Vec<LeaveWithOwner>, LeaveError>;

    async fn commit(self) -> Result<(), LeaveError>;
}
