use chrono::{Datelike, NaiveDate};
use tracing::{debug, info, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::error::LeaveError;
use crate::leave::eligibility::{experience_days, parse_date};
use crate::leave::lifecycle::{self, Transition};
use crate::leave::validator::{self, Applicant, LeaveApplication};
use crate::leave::LeavePolicy;
use crate::model::department::{Department, NewDepartment};
use crate::model::hr::{HrAccount, NewHr};
use crate::model::leave_request::{LeaveOverview, LeaveRequest};
use crate::model::person::{LiveStatus, NewPerson, PersonDetailsUpdate, PersonRecord};
use crate::model::role::{PersonRole, Role};
use crate::store::{LeaveStore, StoreTx};
use crate::utils::validation;

/// Who a successful login belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub code: String,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct AppliedLeave {
    pub leave: LeaveRequest,
    pub extra_days: Option<i32>,
}

#[derive(Debug, Clone, Copy)]
enum Decision {
    Approve,
    Reject,
}

pub struct LeaveService<S> {
    store: S,
    policy: LeavePolicy,
}

impl<S: LeaveStore> LeaveService<S> {
    pub fn new(store: S, policy: LeavePolicy) -> Self {
        Self { store, policy }
    }

    /* =========================
    HR accounts
    ========================= */

    pub async fn register_hr(&self, new: &NewHr) -> Result<HrAccount, LeaveError> {
        validation::hr_id(&new.hr_id)?;
        validation::person_name(&new.name)?;
        validation::not_blank(&new.username, "Username")?;
        validation::not_blank(&new.password, "Password")?;

        let hr = HrAccount {
            hr_id: new.hr_id.clone(),
            name: new.name.clone(),
            designation: new.designation.clone(),
            username: new.username.trim().to_string(),
            password_hash: hash_password(&new.password)?,
        };

        let mut tx = self.store.begin().await?;
        tx.insert_hr(&hr).await?;
        tx.commit().await?;

        info!(hr_id = %hr.hr_id, "HR registered");
        Ok(hr)
    }

    pub async fn login_hr(&self, username: &str, password: &str) -> Result<Identity, LeaveError> {
        let mut tx = self.store.begin().await?;
        let hr = tx.find_hr_by_username(username.trim()).await?;
        tx.commit().await?;

        match hr {
            Some(hr) if verify_password(password, &hr.password_hash) => Ok(Identity {
                code: hr.hr_id,
                name: hr.name,
                role: Role::Hr,
            }),
            _ => {
                warn!(username, "HR login rejected");
                Err(LeaveError::Unauthorized)
            }
        }
    }

    pub async fn login_person(
        &self,
        emp_code: &str,
        password: &str,
    ) -> Result<Identity, LeaveError> {
        let mut tx = self.store.begin().await?;
        let person = match tx.get_person(emp_code.trim()).await {
            Ok(person) => person,
            Err(LeaveError::NotFound(_)) => return Err(LeaveError::Unauthorized),
            Err(e) => return Err(e),
        };
        tx.commit().await?;

        if !verify_password(password, &person.password_hash) {
            warn!(emp_code, "Login rejected");
            return Err(LeaveError::Unauthorized);
        }

        Ok(Identity {
            code: person.emp_code,
            name: person.name,
            role: person.role.into(),
        })
    }

    pub async fn change_password(
        &self,
        emp_code: &str,
        current: &str,
        new_password: &str,
        confirm: &str,
    ) -> Result<(), LeaveError> {
        validation::not_blank(new_password, "New password")?;
        if new_password != confirm {
            return Err(LeaveError::Validation("Passwords don't match".to_string()));
        }

        let mut tx = self.store.begin().await?;
        let person = tx.get_person(emp_code).await?;
        if !verify_password(current, &person.password_hash) {
            return Err(LeaveError::Unauthorized);
        }
        tx.set_password(emp_code, &hash_password(new_password)?)
            .await?;
        tx.commit().await?;

        info!(emp_code, "Password updated");
        Ok(())
    }

    /* =========================
    Departments
    ========================= */

    pub async fn create_department(&self, new: &NewDepartment) -> Result<Department, LeaveError> {
        validation::dept_id(&new.dept_id)?;
        validation::not_blank(&new.dept_name, "Department name")?;

        let department = Department {
            dept_id: new.dept_id.clone(),
            dept_name: new.dept_name.trim().to_string(),
            head_emp_code: None,
        };

        let mut tx = self.store.begin().await?;
        tx.insert_department(&department).await?;
        tx.commit().await?;

        info!(dept_id = %department.dept_id, "Department created");
        Ok(department)
    }

    pub async fn rename_department(
        &self,
        dept_id: &str,
        dept_name: &str,
    ) -> Result<Department, LeaveError> {
        validation::not_blank(dept_name, "Department name")?;

        let mut tx = self.store.begin().await?;
        let mut department = tx.get_department(dept_id).await?;
        department.dept_name = dept_name.trim().to_string();
        tx.rename_department(dept_id, &department.dept_name).await?;
        tx.commit().await?;
        Ok(department)
    }

    pub async fn delete_department(&self, dept_id: &str) -> Result<(), LeaveError> {
        let mut tx = self.store.begin().await?;
        tx.get_department(dept_id).await?;
        if tx.count_department_members(dept_id).await? > 0 {
            return Err(LeaveError::Conflict(
                "Cannot delete department: Employees or Heads assigned to this department"
                    .to_string(),
            ));
        }
        tx.delete_department(dept_id).await?;
        tx.commit().await?;

        info!(dept_id, "Department deleted");
        Ok(())
    }

    /* =========================
    Persons
    ========================= */

    /// The entitlement tier is fixed here, from tenure on `today`.
    pub async fn create_person(
        &self,
        created_by_hr: &str,
        new: &NewPerson,
        today: NaiveDate,
    ) -> Result<PersonRecord, LeaveError> {
        validation::emp_code(&new.emp_code)?;
        validation::person_name(&new.name)?;
        validation::not_blank(&new.password, "Password")?;
        let join_date = parse_date(&new.join_date)?;
        let experience = experience_days(join_date, today)?;

        let role = if new.is_head {
            PersonRole::Head
        } else {
            PersonRole::Employee
        };

        let mut tx = self.store.begin().await?;
        let department = tx.get_department(&new.dept_id).await.map_err(|e| match e {
            LeaveError::NotFound(_) => LeaveError::Validation(
                "Department not created. Please create department first".to_string(),
            ),
            other => other,
        })?;

        let person = PersonRecord {
            emp_code: new.emp_code.clone(),
            name: new.name.clone(),
            role,
            department: new
                .department
                .clone()
                .unwrap_or_else(|| department.dept_name.clone()),
            designation: new.designation.clone(),
            post: new.post.clone(),
            dept_id: department.dept_id.clone(),
            join_date,
            relieve_date: None,
            leave_balance: self.policy.initial_balance(experience),
            live_status: LiveStatus::Live,
            password_hash: hash_password(&new.password)?,
            created_by_hr: created_by_hr.to_string(),
        };

        tx.insert_person(&person).await?;
        if role == PersonRole::Head {
            tx.set_department_head(&department.dept_id, Some(&person.emp_code))
                .await?;
        }
        tx.commit().await?;

        info!(
            emp_code = %person.emp_code,
            role = %person.role,
            leave_balance = person.leave_balance,
            "Person created"
        );
        Ok(person)
    }

    pub async fn person(&self, emp_code: &str) -> Result<PersonRecord, LeaveError> {
        let mut tx = self.store.begin().await?;
        let person = tx.get_person(emp_code).await?;
        tx.commit().await?;
        Ok(person)
    }

    pub async fn update_person_details(
        &self,
        emp_code: &str,
        update: &PersonDetailsUpdate,
    ) -> Result<PersonRecord, LeaveError> {
        if update.is_empty() {
            return Err(LeaveError::Validation("No changes provided".to_string()));
        }
        if let Some(name) = &update.name {
            validation::person_name(name)?;
        }

        let mut tx = self.store.begin().await?;
        let mut person = tx.get_person(emp_code).await?;
        tx.update_person_details(emp_code, update).await?;
        tx.commit().await?;

        update.apply_to(&mut person);
        Ok(person)
    }

    /// Removes the person with all of their leave requests.
    pub async fn delete_person(&self, emp_code: &str) -> Result<(), LeaveError> {
        let mut tx = self.store.begin().await?;
        let person = tx.get_person(emp_code).await?;

        if person.role == PersonRole::Head {
            let department = tx.get_department(&person.dept_id).await?;
            if department.head_emp_code.as_deref() == Some(emp_code) {
                tx.set_department_head(&person.dept_id, None).await?;
            }
        }
        tx.delete_leaves_for(emp_code).await?;
        tx.delete_person(emp_code).await?;
        tx.commit().await?;

        info!(emp_code, "Person deleted");
        Ok(())
    }

    /* =========================
    Leave lifecycle
    ========================= */

    pub async fn apply(
        &self,
        emp_code: &str,
        application: &LeaveApplication,
        today: NaiveDate,
    ) -> Result<AppliedLeave, LeaveError> {
        let mut tx = self.store.begin().await?;
        let person = tx.get_person(emp_code).await?;
        // no one above a head decides on leave, so heads do not apply
        if person.role == PersonRole::Head {
            return Err(LeaveError::Forbidden(
                "Department heads cannot apply for leave".to_string(),
            ));
        }
        let experience = experience_days(person.join_date, today)?;

        let approved_days_this_month = if self.policy.is_senior(experience) {
            0
        } else {
            tx.sum_approved_days_in_month(emp_code, today.month())
                .await?
        };

        let applicant = Applicant {
            experience_days: experience,
            leave_balance: person.leave_balance,
            approved_days_this_month,
        };
        let validated = validator::validate(&self.policy, emp_code, &applicant, application)?;

        let id = tx.create_leave(&validated.leave).await?;
        tx.update_person(emp_code, &lifecycle::on_create(&validated.leave))
            .await?;
        tx.commit().await?;

        let leave = validated.leave.into_pending(id);
        if let Some(extra_days) = validated.extra_days {
            warn!(
                emp_code,
                leave_id = id,
                extra_days,
                "Monthly casual quota exceeded, leave marked as LOP"
            );
        }
        info!(
            emp_code,
            leave_id = id,
            days = leave.days,
            is_lop = leave.is_lop,
            is_long_leave = leave.is_long_leave,
            "Leave applied"
        );

        Ok(AppliedLeave {
            leave,
            extra_days: validated.extra_days,
        })
    }

    pub async fn approve(&self, head_code: &str, leave_id: u64) -> Result<LeaveRequest, LeaveError> {
        self.decide(head_code, leave_id, Decision::Approve).await
    }

    pub async fn reject(&self, head_code: &str, leave_id: u64) -> Result<LeaveRequest, LeaveError> {
        self.decide(head_code, leave_id, Decision::Reject).await
    }

    async fn decide(
        &self,
        head_code: &str,
        leave_id: u64,
        decision: Decision,
    ) -> Result<LeaveRequest, LeaveError> {
        let mut tx = self.store.begin().await?;
        let head = tx.get_person(head_code).await?;
        let mut leave = tx.get_leave(leave_id).await?;
        let owner = tx.get_person(&leave.emp_code).await?;

        lifecycle::authorize_head(&head, &owner)?;
        let transition = match decision {
            Decision::Approve => lifecycle::approve(&leave, &owner)?,
            Decision::Reject => lifecycle::reject(&leave)?,
        };

        apply_transition(&mut tx, &leave.emp_code, &transition).await?;
        tx.commit().await?;

        leave.status = transition.to;
        info!(
            head_code,
            leave_id,
            emp_code = %leave.emp_code,
            status = %leave.status,
            leave_balance = ?transition.owner_update.leave_balance,
            "Leave decided"
        );
        Ok(leave)
    }

    pub async fn cancel(&self, emp_code: &str, leave_id: u64) -> Result<LeaveRequest, LeaveError> {
        let mut tx = self.store.begin().await?;
        let mut leave = match tx.get_leave(leave_id).await {
            Ok(leave) => leave,
            Err(LeaveError::NotFound(_)) => return Err(LeaveError::NotCancellable(leave_id)),
            Err(e) => return Err(e),
        };
        let owner = tx.get_person(&leave.emp_code).await?;

        let transition = lifecycle::cancel(&leave, emp_code, &owner)?;
        apply_transition(&mut tx, emp_code, &transition).await?;
        tx.commit().await?;

        leave.status = transition.to;
        info!(
            emp_code,
            leave_id,
            restored_balance = ?transition.owner_update.leave_balance,
            "Leave cancelled"
        );
        Ok(leave)
    }

    /* =========================
    Views
    ========================= */

    pub async fn pending_for_head(&self, head_code: &str) -> Result<Vec<LeaveRequest>, LeaveError> {
        let mut tx = self.store.begin().await?;
        let head = tx.get_person(head_code).await?;
        if head.role != PersonRole::Head {
            return Err(LeaveError::Forbidden("Department head only".to_string()));
        }
        let pending = tx.list_pending_for_department(&head.dept_id).await?;
        tx.commit().await?;

        Ok(pending
            .into_iter()
            .filter(|leave| leave.emp_code != head.emp_code)
            .collect())
    }

    pub async fn leave_history(&self, emp_code: &str) -> Result<Vec<LeaveRequest>, LeaveError> {
        let mut tx = self.store.begin().await?;
        let leaves = tx.list_leaves_for(emp_code).await?;
        tx.commit().await?;
        Ok(leaves)
    }

    pub async fn leave_overview(&self, today: NaiveDate) -> Result<Vec<LeaveOverview>, LeaveError> {
        let mut tx = self.store.begin().await?;
        let rows = tx.list_leaves_with_owner().await?;
        tx.commit().await?;

        debug!(count = rows.len(), "Leave overview loaded");
        Ok(rows
            .into_iter()
            .map(|row| LeaveOverview {
                tenure: self.policy.tenure(row.join_date, today),
                leave: row.leave,
                owner_name: row.owner_name,
                department: row.department,
            })
            .collect())
    }
}

/// Status first, so a concurrent change aborts before the owner is touched.
async fn apply_transition<T: StoreTx>(
    tx: &mut T,
    owner: &str,
    transition: &Transition,
) -> Result<(), LeaveError> {
    tx.update_leave_status(transition.leave_id, transition.from, transition.to)
        .await?;
    tx.update_person(owner, &transition.owner_update).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leave::eligibility::Tenure;
    use crate::model::leave_request::LeaveStatus;
    use crate::store::memory::MemoryStore;
    use chrono::Duration;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn today() -> NaiveDate {
        day("2026-01-05")
    }

    fn record(code: &str, role: PersonRole, dept: &str, joined: NaiveDate, balance: i32) -> PersonRecord {
        PersonRecord {
            emp_code: code.to_string(),
            name: "Test Person".to_string(),
            role,
            department: "Engineering".to_string(),
            designation: "Engineer".to_string(),
            post: "Backend".to_string(),
            dept_id: dept.to_string(),
            join_date: joined,
            relieve_date: None,
            leave_balance: balance,
            live_status: LiveStatus::Live,
            password_hash: "not-a-hash".to_string(),
            created_by_hr: "Alice".to_string(),
        }
    }

    fn application(from: &str, to: &str, leave_type: &str) -> LeaveApplication {
        LeaveApplication {
            from_date: from.to_string(),
            to_date: to.to_string(),
            reason: "personal".to_string(),
            leave_type: leave_type.to_string(),
        }
    }

    /// ENGG with head 200001, senior 100001 (balance 36), junior 100002.
    /// OPS with head 300001.
    async fn seeded() -> (MemoryStore, LeaveService<MemoryStore>) {
        let store = MemoryStore::new();
        let mut tx = store.begin().await.unwrap();
        for (id, name, head) in [("ENGG", "Engineering", "200001"), ("OPS1", "Operations", "300001")] {
            tx.insert_department(&Department {
                dept_id: id.to_string(),
                dept_name: name.to_string(),
                head_emp_code: Some(head.to_string()),
            })
            .await
            .unwrap();
        }
        let senior_join = today() - Duration::days(400);
        let junior_join = today() - Duration::days(30);
        for person in [
            record("200001", PersonRole::Head, "ENGG", senior_join, 36),
            record("300001", PersonRole::Head, "OPS1", senior_join, 36),
            record("100001", PersonRole::Employee, "ENGG", senior_join, 36),
            record("100002", PersonRole::Employee, "ENGG", junior_join, 12),
        ] {
            tx.insert_person(&person).await.unwrap();
        }
        tx.commit().await.unwrap();

        let service = LeaveService::new(store.clone(), LeavePolicy::default());
        (store, service)
    }

    #[actix_web::test]
    async fn long_earned_leave_round_trip() {
        let (_, service) = seeded().await;

        let applied = service
            .apply("100001", &application("2026-01-10", "2026-01-15", "Earned"), today())
            .await
            .unwrap();
        assert_eq!(applied.leave.days, 6);
        assert!(applied.leave.is_long_leave);
        assert!(!applied.leave.is_lop);
        assert_eq!(applied.leave.status, LeaveStatus::Pending);

        let owner = service.person("100001").await.unwrap();
        assert_eq!(owner.leave_balance, 36);
        assert_eq!(owner.live_status, LiveStatus::LongLeave);

        let approved = service.approve("200001", applied.leave.id).await.unwrap();
        assert_eq!(approved.status, LeaveStatus::Approved);
        let owner = service.person("100001").await.unwrap();
        assert_eq!(owner.leave_balance, 30);
        assert_eq!(owner.live_status, LiveStatus::LongLeave);

        let cancelled = service.cancel("100001", applied.leave.id).await.unwrap();
        assert_eq!(cancelled.status, LeaveStatus::Cancelled);
        let owner = service.person("100001").await.unwrap();
        assert_eq!(owner.leave_balance, 36);
        assert_eq!(owner.live_status, LiveStatus::Live);
    }

    #[actix_web::test]
    async fn junior_second_casual_day_in_month_is_lop() {
        let (_, service) = seeded().await;

        let first = service
            .apply("100002", &application("2026-01-07", "2026-01-07", "casual"), today())
            .await
            .unwrap();
        assert!(!first.leave.is_lop);
        assert_eq!(first.extra_days, None);
        service.approve("200001", first.leave.id).await.unwrap();

        let second = service
            .apply("100002", &application("2026-01-20", "2026-01-20", "Casual"), today())
            .await
            .unwrap();
        assert!(second.leave.is_lop);
        assert_eq!(second.extra_days, Some(1));
    }

    #[actix_web::test]
    async fn junior_quota_counts_same_month_of_another_year() {
        let (store, service) = seeded().await;

        let mut tx = store.begin().await.unwrap();
        let id = tx
            .create_leave(&crate::model::leave_request::NewLeave {
                emp_code: "100002".to_string(),
                from_date: day("2025-01-20"),
                to_date: day("2025-01-20"),
                days: 1,
                reason: String::new(),
                leave_type: crate::model::leave_request::LeaveType::Casual,
                is_lop: false,
                is_long_leave: false,
            })
            .await
            .unwrap();
        tx.update_leave_status(id, LeaveStatus::Pending, LeaveStatus::Approved)
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let applied = service
            .apply("100002", &application("2026-01-07", "2026-01-07", "Casual"), today())
            .await
            .unwrap();
        assert!(applied.leave.is_lop);
    }

    #[actix_web::test]
    async fn junior_cannot_take_earned_leave() {
        let (_, service) = seeded().await;
        let err = service
            .apply("100002", &application("2026-01-07", "2026-01-08", "Earned"), today())
            .await
            .unwrap_err();
        assert!(matches!(err, LeaveError::IneligibleLeaveType(_)));
        assert!(service.leave_history("100002").await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn approval_refused_when_balance_dropped() {
        let (store, service) = seeded().await;
        let applied = service
            .apply("100001", &application("2026-01-10", "2026-01-12", "Sick"), today())
            .await
            .unwrap();
        assert!(!applied.leave.is_lop);

        let mut tx = store.begin().await.unwrap();
        tx.update_person(
            "100001",
            &crate::model::person::PersonUpdate {
                leave_balance: Some(2),
                live_status: None,
            },
        )
        .await
        .unwrap();
        tx.commit().await.unwrap();

        let err = service.approve("200001", applied.leave.id).await.unwrap_err();
        assert!(matches!(
            err,
            LeaveError::InsufficientBalanceAtApproval { balance: 2, days: 3 }
        ));
        let history = service.leave_history("100001").await.unwrap();
        assert_eq!(history[0].status, LeaveStatus::Pending);
        assert_eq!(service.person("100001").await.unwrap().leave_balance, 2);
    }

    #[actix_web::test]
    async fn lop_approval_leaves_balance_untouched() {
        let (_, service) = seeded().await;
        // 40 days against a balance of 36
        let applied = service
            .apply("100001", &application("2026-02-01", "2026-03-12", "Combo"), today())
            .await
            .unwrap();
        assert!(applied.leave.is_lop);

        service.approve("200001", applied.leave.id).await.unwrap();
        assert_eq!(service.person("100001").await.unwrap().leave_balance, 36);

        service.cancel("100001", applied.leave.id).await.unwrap();
        assert_eq!(service.person("100001").await.unwrap().leave_balance, 36);
    }

    #[actix_web::test]
    async fn failed_owner_write_rolls_back_the_approval() {
        let (store, service) = seeded().await;
        let applied = service
            .apply("100001", &application("2026-01-10", "2026-01-11", "Earned"), today())
            .await
            .unwrap();

        store.fail_person_writes(true);
        let err = service.approve("200001", applied.leave.id).await.unwrap_err();
        assert!(matches!(err, LeaveError::Persistence(_)));
        store.fail_person_writes(false);

        let history = service.leave_history("100001").await.unwrap();
        assert_eq!(history[0].status, LeaveStatus::Pending);
        assert_eq!(service.person("100001").await.unwrap().leave_balance, 36);

        service.approve("200001", applied.leave.id).await.unwrap();
        assert_eq!(service.person("100001").await.unwrap().leave_balance, 34);
    }

    #[actix_web::test]
    async fn concurrent_approvals_charge_both_requests() {
        let (_, service) = seeded().await;
        let first = service
            .apply("100001", &application("2026-01-10", "2026-01-12", "Earned"), today())
            .await
            .unwrap();
        let second = service
            .apply("100001", &application("2026-02-02", "2026-02-06", "Earned"), today())
            .await
            .unwrap();
        assert!(!first.leave.is_lop && !second.leave.is_lop);

        let (a, b) = futures::join!(
            service.approve("200001", first.leave.id),
            service.approve("200001", second.leave.id)
        );
        assert!(a.is_ok());
        assert!(b.is_ok());
        assert_eq!(service.person("100001").await.unwrap().leave_balance, 28);
    }

    #[actix_web::test]
    async fn concurrent_approvals_never_overdraw() {
        let (_, service) = seeded().await;
        // 20 days each against a balance of 36
        let first = service
            .apply("100001", &application("2026-02-01", "2026-02-20", "Earned"), today())
            .await
            .unwrap();
        let second = service
            .apply("100001", &application("2026-03-01", "2026-03-20", "Earned"), today())
            .await
            .unwrap();
        assert!(!first.leave.is_lop && !second.leave.is_lop);

        let (a, b) = futures::join!(
            service.approve("200001", first.leave.id),
            service.approve("200001", second.leave.id)
        );
        let refused: Vec<_> = [a, b].into_iter().filter_map(Result::err).collect();
        assert_eq!(refused.len(), 1);
        assert!(matches!(
            refused[0],
            LeaveError::InsufficientBalanceAtApproval { balance: 16, days: 20 }
        ));
        assert_eq!(service.person("100001").await.unwrap().leave_balance, 16);

        let statuses: Vec<_> = service
            .leave_history("100001")
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.status)
            .collect();
        assert!(statuses.contains(&LeaveStatus::Approved));
        assert!(statuses.contains(&LeaveStatus::Pending));
    }

    #[actix_web::test]
    async fn heads_decide_only_within_their_department() {
        let (_, service) = seeded().await;
        let applied = service
            .apply("100001", &application("2026-01-10", "2026-01-10", "Sick"), today())
            .await
            .unwrap();

        let err = service.approve("300001", applied.leave.id).await.unwrap_err();
        assert!(matches!(err, LeaveError::Forbidden(_)));
        let err = service.reject("100002", applied.leave.id).await.unwrap_err();
        assert!(matches!(err, LeaveError::Forbidden(_)));

        assert!(service.pending_for_head("300001").await.unwrap().is_empty());
        assert_eq!(service.pending_for_head("200001").await.unwrap().len(), 1);

        let rejected = service.reject("200001", applied.leave.id).await.unwrap();
        assert_eq!(rejected.status, LeaveStatus::Rejected);
        let err = service.approve("200001", applied.leave.id).await.unwrap_err();
        assert!(matches!(err, LeaveError::InvalidTransition { .. }));
    }

    #[actix_web::test]
    async fn heads_cannot_apply_for_leave() {
        let (_, service) = seeded().await;
        let err = service
            .apply("200001", &application("2026-01-10", "2026-01-10", "Earned"), today())
            .await
            .unwrap_err();
        assert!(matches!(err, LeaveError::Forbidden(_)));

        assert!(service.leave_history("200001").await.unwrap().is_empty());
        let head = service.person("200001").await.unwrap();
        assert_eq!(head.live_status, LiveStatus::Live);
        assert!(service.pending_for_head("300001").await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn only_the_owner_cancels() {
        let (_, service) = seeded().await;
        let applied = service
            .apply("100001", &application("2026-01-10", "2026-01-10", "Sick"), today())
            .await
            .unwrap();

        let err = service.cancel("100002", applied.leave.id).await.unwrap_err();
        assert!(matches!(err, LeaveError::NotCancellable(_)));
        let err = service.cancel("100001", 9999).await.unwrap_err();
        assert!(matches!(err, LeaveError::NotCancellable(9999)));

        service.reject("200001", applied.leave.id).await.unwrap();
        let err = service.cancel("100001", applied.leave.id).await.unwrap_err();
        assert!(matches!(err, LeaveError::NotCancellable(_)));
    }

    #[actix_web::test]
    async fn overview_labels_tenure() {
        let (_, service) = seeded().await;
        service
            .apply("100001", &application("2026-01-10", "2026-01-10", "Sick"), today())
            .await
            .unwrap();
        service
            .apply("100002", &application("2026-01-12", "2026-01-12", "Casual"), today())
            .await
            .unwrap();

        let overview = service.leave_overview(today()).await.unwrap();
        assert_eq!(overview.len(), 2);
        let junior = overview.iter().find(|o| o.leave.emp_code == "100002").unwrap();
        assert_eq!(junior.tenure, Tenure::New);
        let senior = overview.iter().find(|o| o.leave.emp_code == "100001").unwrap();
        assert_eq!(senior.tenure, Tenure::Experienced);
    }

    #[actix_web::test]
    async fn deleting_a_head_clears_the_department_head() {
        let (store, service) = seeded().await;
        service.delete_person("200001").await.unwrap();

        let mut tx = store.begin().await.unwrap();
        assert_eq!(tx.get_department("ENGG").await.unwrap().head_emp_code, None);
        assert!(matches!(
            tx.get_person("200001").await,
            Err(LeaveError::NotFound(_))
        ));
    }

    #[actix_web::test]
    async fn deleting_a_person_removes_their_leaves() {
        let (store, service) = seeded().await;
        service
            .apply("100001", &application("2026-01-10", "2026-01-10", "Sick"), today())
            .await
            .unwrap();

        service.delete_person("100001").await.unwrap();

        let mut tx = store.begin().await.unwrap();
        assert!(tx.list_leaves_for("100001").await.unwrap().is_empty());
        assert_eq!(
            tx.get_department("ENGG").await.unwrap().head_emp_code.as_deref(),
            Some("200001")
        );
    }

    #[actix_web::test]
    async fn department_with_members_is_not_deleted() {
        let (_, service) = seeded().await;
        let err = service.delete_department("ENGG").await.unwrap_err();
        assert!(matches!(err, LeaveError::Conflict(_)));

        service
            .create_department(&NewDepartment {
                dept_id: "EMPT".to_string(),
                dept_name: "Empty".to_string(),
            })
            .await
            .unwrap();
        service.delete_department("EMPT").await.unwrap();
        let err = service.delete_department("EMPT").await.unwrap_err();
        assert!(matches!(err, LeaveError::NotFound(_)));
    }

    #[actix_web::test]
    async fn person_onboarding_and_login() {
        let (store, service) = seeded().await;
        let new = NewPerson {
            emp_code: "100010".to_string(),
            name: "New Head".to_string(),
            dept_id: "OPS1".to_string(),
            department: None,
            designation: "Lead".to_string(),
            post: "Ops".to_string(),
            join_date: "2025-12-01".to_string(),
            password: "hunter2".to_string(),
            is_head: true,
        };
        let person = service.create_person("Alice", &new, today()).await.unwrap();
        assert_eq!(person.leave_balance, 12);
        assert_eq!(person.department, "Operations");

        let mut tx = store.begin().await.unwrap();
        assert_eq!(
            tx.get_department("OPS1").await.unwrap().head_emp_code.as_deref(),
            Some("100010")
        );
        drop(tx);

        let identity = service.login_person("100010", "hunter2").await.unwrap();
        assert_eq!(identity.role, Role::Head);
        assert!(matches!(
            service.login_person("100010", "wrong").await,
            Err(LeaveError::Unauthorized)
        ));

        let err = service.create_person("Alice", &new, today()).await.unwrap_err();
        assert!(matches!(err, LeaveError::Conflict(_)));
    }

    #[actix_web::test]
    async fn onboarding_rejects_bad_input() {
        let (_, service) = seeded().await;
        let mut new = NewPerson {
            emp_code: "12345".to_string(),
            name: "Someone".to_string(),
            dept_id: "ENGG".to_string(),
            department: None,
            designation: String::new(),
            post: String::new(),
            join_date: "2025-12-01".to_string(),
            password: "pw".to_string(),
            is_head: false,
        };
        assert!(matches!(
            service.create_person("Alice", &new, today()).await,
            Err(LeaveError::Validation(_))
        ));

        new.emp_code = "100011".to_string();
        new.join_date = "2026-02-01".to_string();
        assert!(matches!(
            service.create_person("Alice", &new, today()).await,
            Err(LeaveError::InvalidDate(_))
        ));

        new.join_date = "2025-12-01".to_string();
        new.dept_id = "NONE".to_string();
        assert!(matches!(
            service.create_person("Alice", &new, today()).await,
            Err(LeaveError::Validation(_))
        ));
    }

    #[actix_web::test]
    async fn details_update_requires_a_change() {
        let (_, service) = seeded().await;
        let err = service
            .update_person_details("100001", &PersonDetailsUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LeaveError::Validation(_)));

        let update = PersonDetailsUpdate {
            post: Some("Frontend".to_string()),
            ..Default::default()
        };
        let person = service.update_person_details("100001", &update).await.unwrap();
        assert_eq!(person.post, "Frontend");
        assert_eq!(person.leave_balance, 36);
    }

    #[actix_web::test]
    async fn hr_registration_and_login() {
        let (_, service) = seeded().await;
        let new = NewHr {
            hr_id: "HR0001".to_string(),
            name: "Alice Smith".to_string(),
            designation: "Manager".to_string(),
            username: "alice".to_string(),
            password: "secret".to_string(),
        };
        service.register_hr(&new).await.unwrap();

        let identity = service.login_hr("alice", "secret").await.unwrap();
        assert_eq!(identity.role, Role::Hr);
        assert_eq!(identity.code, "HR0001");
        assert!(matches!(
            service.login_hr("alice", "nope").await,
            Err(LeaveError::Unauthorized)
        ));
        assert!(matches!(
            service.register_hr(&new).await,
            Err(LeaveError::Conflict(_))
        ));

        let bad = NewHr {
            hr_id: "HR1".to_string(),
            ..new
        };
        assert!(matches!(
            service.register_hr(&bad).await,
            Err(LeaveError::Validation(_))
        ));
    }
}
