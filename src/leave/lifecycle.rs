use crate::error::LeaveError;
use crate::model::leave_request::{LeaveRequest, LeaveStatus, NewLeave};
use crate::model::person::{LiveStatus, PersonRecord, PersonUpdate};
use crate::model::role::PersonRole;

/// A decided status change and the owner writes that go with it. The store
/// applies both in one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub leave_id: u64,
    pub from: LeaveStatus,
    pub to: LeaveStatus,
    pub owner_update: PersonUpdate,
}

pub fn can_transition(from: LeaveStatus, to: LeaveStatus) -> bool {
    use LeaveStatus::*;
    matches!(
        (from, to),
        (Pending, Approved) | (Pending, Rejected) | (Pending, Cancelled) | (Approved, Cancelled)
    )
}

fn ensure_transition(leave: &LeaveRequest, to: LeaveStatus) -> Result<(), LeaveError> {
    if can_transition(leave.status, to) {
        Ok(())
    } else {
        Err(LeaveError::InvalidTransition {
            id: leave.id,
            from: leave.status,
            to,
        })
    }
}

/// The long-absence window is committed as soon as the request exists.
pub fn on_create(leave: &NewLeave) -> PersonUpdate {
    PersonUpdate {
        leave_balance: None,
        live_status: leave.is_long_leave.then_some(LiveStatus::LongLeave),
    }
}

/// Heads decide on requests of their own department, never on their own.
pub fn authorize_head(head: &PersonRecord, owner: &PersonRecord) -> Result<(), LeaveError> {
    if head.role != PersonRole::Head {
        return Err(LeaveError::Forbidden("Department head only".to_string()));
    }
    if head.dept_id != owner.dept_id {
        return Err(LeaveError::Forbidden(
            "Leave belongs to another department".to_string(),
        ));
    }
    if head.emp_code == owner.emp_code {
        return Err(LeaveError::Forbidden(
            "Heads cannot decide on their own leave".to_string(),
        ));
    }
    Ok(())
}

/// LOP days are never charged. Paid days are charged in full or the approval
/// is refused.
pub fn approve(leave: &LeaveRequest, owner: &PersonRecord) -> Result<Transition, LeaveError> {
    ensure_transition(leave, LeaveStatus::Approved)?;

    let leave_balance = if leave.is_lop {
        None
    } else if owner.leave_balance < leave.days {
        return Err(LeaveError::InsufficientBalanceAtApproval {
            balance: owner.leave_balance,
            days: leave.days,
        });
    } else {
        Some(owner.leave_balance - leave.days)
    };

    Ok(Transition {
        leave_id: leave.id,
        from: leave.status,
        to: LeaveStatus::Approved,
        owner_update: PersonUpdate {
            leave_balance,
            live_status: None,
        },
    })
}

pub fn reject(leave: &LeaveRequest) -> Result<Transition, LeaveError> {
    ensure_transition(leave, LeaveStatus::Rejected)?;
    Ok(Transition {
        leave_id: leave.id,
        from: leave.status,
        to: LeaveStatus::Rejected,
        owner_update: PersonUpdate::default(),
    })
}

pub fn cancel(
    leave: &LeaveRequest,
    caller: &str,
    owner: &PersonRecord,
) -> Result<Transition, LeaveError> {
    if leave.emp_code != caller || !can_transition(leave.status, LeaveStatus::Cancelled) {
        return Err(LeaveError::NotCancellable(leave.id));
    }

    let leave_balance = (leave.status == LeaveStatus::Approved && !leave.is_lop)
        .then(|| owner.leave_balance + leave.days);
    let live_status = leave.is_long_leave.then_some(LiveStatus::Live);

    Ok(Transition {
        leave_id: leave.id,
        from: leave.status,
        to: LeaveStatus::Cancelled,
        owner_update: PersonUpdate {
            leave_balance,
            live_status,
        },
    })
}
