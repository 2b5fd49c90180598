use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Datelike;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::error::LeaveError;
use crate::model::department::Department;
use crate::model::hr::HrAccount;
use crate::model::leave_request::{LeaveRequest, LeaveStatus, LeaveWithOwner, NewLeave};
use crate::model::person::{PersonDetailsUpdate, PersonRecord, PersonUpdate};
use crate::store::{LeaveStore, StoreTx};

#[derive(Debug, Clone, Default)]
struct State {
    hrs: BTreeMap<String, HrAccount>,
    departments: BTreeMap<String, Department>,
    persons: BTreeMap<String, PersonRecord>,
    leaves: BTreeMap<u64, LeaveRequest>,
    last_leave_id: u64,
}

/// Store kept in process memory. A transaction holds the lock for its whole
/// life and edits a staged copy that replaces the state on commit.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
    fail_person_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later `update_person` fail, to exercise rollback.
    pub fn fail_person_writes(&self, fail: bool) {
        self.fail_person_writes.store(fail, Ordering::SeqCst);
    }
}

pub struct MemoryTx {
    guard: OwnedMutexGuard<State>,
    staged: State,
    fail_person_writes: bool,
}

impl LeaveStore for MemoryStore {
    type Tx = MemoryTx;

    async fn begin(&self) -> Result<MemoryTx, LeaveError> {
        let guard = self.state.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(MemoryTx {
            guard,
            staged,
            fail_person_writes: self.fail_person_writes.load(Ordering::SeqCst),
        })
    }
}

fn not_found(what: &str, key: impl std::fmt::Display) -> LeaveError {
    LeaveError::NotFound(format!("{what} {key}"))
}

impl MemoryTx {
    fn person_mut(&mut self, emp_code: &str) -> Result<&mut PersonRecord, LeaveError> {
        self.staged
            .persons
            .get_mut(emp_code)
            .ok_or_else(|| not_found("person", emp_code))
    }

    fn department_mut(&mut self, dept_id: &str) -> Result<&mut Department, LeaveError> {
        self.staged
            .departments
            .get_mut(dept_id)
            .ok_or_else(|| not_found("department", dept_id))
    }
}

impl StoreTx for MemoryTx {
    async fn get_person(&mut self, emp_code: &str) -> Result<PersonRecord, LeaveError> {
        self.person_mut(emp_code).map(|p| p.clone())
    }

    async fn insert_person(&mut self, person: &PersonRecord) -> Result<(), LeaveError> {
        if self.staged.persons.contains_key(&person.emp_code) {
            return Err(LeaveError::Conflict(format!(
                "Employee code {} already exists",
                person.emp_code
            )));
        }
        self.staged
            .persons
            .insert(person.emp_code.clone(), person.clone());
        Ok(())
    }

    async fn update_person(
        &mut self,
        emp_code: &str,
        update: &PersonUpdate,
    ) -> Result<(), LeaveError> {
        if self.fail_person_writes {
            return Err(LeaveError::Persistence(sqlx::Error::Protocol(
                "injected person write failure".to_string(),
            )));
        }
        update.apply_to(self.person_mut(emp_code)?);
        Ok(())
    }

    async fn update_person_details(
        &mut self,
        emp_code: &str,
        update: &PersonDetailsUpdate,
    ) -> Result<(), LeaveError> {
        update.apply_to(self.person_mut(emp_code)?);
        Ok(())
    }

    async fn set_password(
        &mut self,
        emp_code: &str,
        password_hash: &str,
    ) -> Result<(), LeaveError> {
        self.person_mut(emp_code)?.password_hash = password_hash.to_string();
        Ok(())
    }

    async fn delete_person(&mut self, emp_code: &str) -> Result<(), LeaveError> {
        self.staged
            .persons
            .remove(emp_code)
            .map(|_| ())
            .ok_or_else(|| not_found("person", emp_code))
    }

    async fn get_department(&mut self, dept_id: &str) -> Result<Department, LeaveError> {
        self.department_mut(dept_id).map(|d| d.clone())
    }

    async fn insert_department(&mut self, department: &Department) -> Result<(), LeaveError> {
        if self.staged.departments.contains_key(&department.dept_id) {
            return Err(LeaveError::Conflict(format!(
                "Department {} already exists",
                department.dept_id
            )));
        }
        self.staged
            .departments
            .insert(department.dept_id.clone(), department.clone());
        Ok(())
    }

    async fn rename_department(
        &mut self,
        dept_id: &str,
        dept_name: &str,
    ) -> Result<(), LeaveError> {
        self.department_mut(dept_id)?.dept_name = dept_name.to_string();
        Ok(())
    }

    async fn set_department_head(
        &mut self,
        dept_id: &str,
        head_emp_code: Option<&str>,
    ) -> Result<(), LeaveError> {
        self.department_mut(dept_id)?.head_emp_code = head_emp_code.map(str::to_string);
        Ok(())
    }

    async fn count_department_members(&mut self, dept_id: &str) -> Result<i64, LeaveError> {
        Ok(self
            .staged
            .persons
            .values()
            .filter(|p| p.dept_id == dept_id)
            .count() as i64)
    }

    async fn delete_department(&mut self, dept_id: &str) -> Result<(), LeaveError> {
        self.staged
            .departments
            .remove(dept_id)
            .map(|_| ())
            .ok_or_else(|| not_found("department", dept_id))
    }

    async fn insert_hr(&mut self, hr: &HrAccount) -> Result<(), LeaveError> {
        let taken = self.staged.hrs.contains_key(&hr.hr_id)
            || self.staged.hrs.values().any(|h| h.username == hr.username);
        if taken {
            return Err(LeaveError::Conflict(
                "HR ID or Username already exists".to_string(),
            ));
        }
        self.staged.hrs.insert(hr.hr_id.clone(), hr.clone());
        Ok(())
    }

    async fn find_hr_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<HrAccount>, LeaveError> {
        Ok(self
            .staged
            .hrs
            .values()
            .find(|h| h.username == username)
            .cloned())
    }

    async fn create_leave(&mut self, leave: &NewLeave) -> Result<u64, LeaveError> {
        self.staged.last_leave_id += 1;
        let id = self.staged.last_leave_id;
        self.staged
            .leaves
            .insert(id, leave.clone().into_pending(id));
        Ok(id)
    }

    async fn get_leave(&mut self, id: u64) -> Result<LeaveRequest, LeaveError> {
        self.staged
            .leaves
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found("leave", id))
    }

    async fn update_leave_status(
        &mut self,
        id: u64,
        from: LeaveStatus,
        to: LeaveStatus,
    ) -> Result<(), LeaveError> {
        let leave = self
            .staged
            .leaves
            .get_mut(&id)
            .ok_or_else(|| not_found("leave", id))?;
        if leave.status != from {
            return Err(LeaveError::InvalidTransition {
                id,
                from: leave.status,
                to,
            });
        }
        leave.status = to;
        Ok(())
    }

    async fn sum_approved_days_in_month(
        &mut self,
        emp_code: &str,
        month: u32,
    ) -> Result<i32, LeaveError> {
        Ok(self
            .staged
            .leaves
            .values()
            .filter(|l| {
                l.emp_code == emp_code
                    && l.status == LeaveStatus::Approved
                    && l.from_date.month() == month
            })
            .map(|l| l.days)
            .sum())
    }

    async fn list_pending_for_department(
        &mut self,
        dept_id: &str,
    ) -> Result<Vec<LeaveRequest>, LeaveError> {
        let persons = &self.staged.persons;
        let mut pending: Vec<LeaveRequest> = self
            .staged
            .leaves
            .values()
            .filter(|l| l.status == LeaveStatus::Pending)
            .filter(|l| {
                persons
                    .get(&l.emp_code)
                    .is_some_and(|p| p.dept_id == dept_id)
            })
            .cloned()
            .collect();
        pending.sort_by(|a, b| a.from_date.cmp(&b.from_date).then(a.id.cmp(&b.id)));
        Ok(pending)
    }

    async fn list_leaves_for(&mut self, emp_code: &str) -> Result<Vec<LeaveRequest>, LeaveError> {
        Ok(self
            .staged
            .leaves
            .values()
            .filter(|l| l.emp_code == emp_code)
            .cloned()
            .collect())
    }

    async fn delete_leaves_for(&mut self, emp_code: &str) -> Result<(), LeaveError> {
        self.staged.leaves.retain(|_, l| l.emp_code != emp_code);
        Ok(())
    }

    async fn list_leaves_with_owner(&mut self) -> Result<Vec<LeaveWithOwner>, LeaveError> {
        let mut rows: Vec<LeaveWithOwner> = self
            .staged
            .leaves
            .values()
            .filter_map(|l| {
                self.staged.persons.get(&l.emp_code).map(|p| LeaveWithOwner {
                    leave: l.clone(),
                    owner_name: p.name.clone(),
                    department: p.department.clone(),
                    join_date: p.join_date,
                })
            })
            .collect();
        rows.sort_by(|a, b| {
            a.leave
                .status
                .as_str()
                .cmp(b.leave.status.as_str())
                .then(b.leave.from_date.cmp(&a.leave.from_date))
        });
        Ok(rows)
    }

    async fn commit(self) -> Result<(), LeaveError> {
        let MemoryTx {
            mut guard, staged, ..
        } = self;
        *guard = staged;
        Ok(())
    }
}
