use crate::api::AppService;
use crate::auth::auth::AuthUser;
use crate::leave::validator::LeaveApplication;
use crate::model::leave_request::LeaveRequest;
use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
#[schema(example = json!({
    "message": "Leave request submitted",
    "leave": {
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
    },
    "extra_days": null
}))]
pub struct AppliedLeaveResponse {
    pub message: String,
    pub leave: LeaveRequest,
    /// Days over the junior monthly casual quota when the request became LOP
    pub extra_days: Option<i32>,
}

fn submitted_message(extra_days: Option<i32>) -> String {
    match extra_days {
        Some(extra) => format!(
            "Leave request submitted as loss of pay: monthly casual quota exceeded by {extra} day(s)"
        ),
        None => "Leave request submitted".to_string(),
    }
}

/* =========================
Apply for leave
========================= */
#[utoipa::path(
    post,
    path = "/api/leave",
    request_body(
        content = LeaveApplication,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Leave request submitted", body = AppliedLeaveResponse),
        (status = 400, description = "Invalid dates, leave type or eligibility"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "HR accounts and department heads cannot apply")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn create_leave(
    auth: AuthUser,
    service: web::Data<AppService>,
    payload: web::Json<LeaveApplication>,
) -> actix_web::Result<impl Responder> {
    auth.require_person()?;

    let applied = service
        .apply(&auth.code, &payload, Utc::now().date_naive())
        .await?;

    Ok(HttpResponse::Created().json(AppliedLeaveResponse {
        message: submitted_message(applied.extra_days),
        leave: applied.leave,
        extra_days: applied.extra_days,
    }))
}

#[utoipa::path(
    get,
    path = "/api/leave/mine",
    responses(
        (status = 200, description = "Own leave history in submission order", body = [LeaveRequest]),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn my_leaves(
    auth: AuthUser,
    service: web::Data<AppService>,
) -> actix_web::Result<impl Responder> {
    auth.require_person()?;

    let leaves = service.leave_history(&auth.code).await?;
    Ok(HttpResponse::Ok().json(leaves))
}

/* =========================
Head decisions
========================= */
/// Pending requests of the head's department, excluding the head's own.
#[utoipa::path(
    get,
    path = "/api/leave/pending",
    responses(
        (status = 200, description = "Pending requests awaiting a decision", body = [LeaveRequest]),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn pending_leaves(
    auth: AuthUser,
    service: web::Data<AppService>,
) -> actix_web::Result<impl Responder> {
    auth.require_head()?;

    let leaves = service.pending_for_head(&auth.code).await?;
    Ok(HttpResponse::Ok().json(leaves))
}

#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/approve",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to approve")
    ),
    responses(
        (status = 200, description = "Leave approved", body = LeaveRequest),
        (status = 403, description = "Not the head of the owner's department"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Already decided or balance insufficient", body = Object, example = json!({
            "message": "insufficient leave balance: 2 available, 3 requested"
        }))
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn approve_leave(
    auth: AuthUser,
    service: web::Data<AppService>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_head()?;

    let leave = service.approve(&auth.code, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(leave))
}

#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/reject",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to reject")
    ),
    responses(
        (status = 200, description = "Leave rejected", body = LeaveRequest),
        (status = 403, description = "Not the head of the owner's department"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Leave request already decided")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn reject_leave(
    auth: AuthUser,
    service: web::Data<AppService>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_head()?;

    let leave = service.reject(&auth.code, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(leave))
}

/// Approved requests give their paid days back to the balance.
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/cancel",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to cancel")
    ),
    responses(
        (status = 200, description = "Leave cancelled", body = LeaveRequest),
        (status = 409, description = "Not the owner's pending or approved request", body = Object, example = json!({
            "message": "leave 7 cannot be cancelled"
        }))
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn cancel_leave(
    auth: AuthUser,
    service: web::Data<AppService>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_person()?;

    let leave = service.cancel(&auth.code, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(leave))
}

/* =========================
HR overview
========================= */
#[utoipa::path(
    get,
    path = "/api/leave",
    responses(
        (status = 200, description = "All requests by status, newest first", body = [LeaveOverview]),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn leave_overview(
    auth: AuthUser,
    service: web::Data<AppService>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr()?;

    let overview = service.leave_overview(Utc::now().date_naive()).await?;
    Ok(HttpResponse::Ok().json(overview))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lop_submission_reports_extra_days() {
        assert_eq!(submitted_message(None), "Leave request submitted");
        let message = submitted_message(Some(2));
        assert!(message.contains("loss of pay"));
        assert!(message.contains("2 day(s)"));
    }
}
