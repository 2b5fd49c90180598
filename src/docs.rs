use crate::api::leave_request::AppliedLeaveResponse;
use crate::leave::eligibility::Tenure;
use crate::leave::validator::LeaveApplication;
use crate::model::department::{Department, NewDepartment, RenameDepartment};
use crate::model::hr::NewHr;
use crate::model::leave_request::{LeaveOverview, LeaveRequest, LeaveStatus, LeaveType};
use crate::model::person::{LiveStatus, NewPerson, PersonDetailsUpdate, PersonRecord};
use crate::model::role::PersonRole;
use crate::models::{ChangePasswordReq, LoginReqDto, PersonLoginReq, TokenResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave Management API",
        version = "1.0.0",
        description = r#"
## Leave Management Service

HR registers, onboards departments and people, and oversees every leave
request. Employees apply for leave; the head of their department decides.

### Leave rules
- Less than a year of service: **Casual** leave only, one paid day per month.
  Anything beyond is recorded as **loss of pay (LOP)**.
- A year or more: **Casual**, **Sick**, **Earned** or **Combo**. Requests
  larger than the remaining balance are LOP.
- Requests longer than 4 days are **long leave** and mark the person as away
  as soon as they are submitted.
- Approval charges the balance, cancelling an approved request refunds it.

### Security
All `/api` endpoints require a **JWT Bearer** token from `/auth/hr/login`
or `/auth/login`.
"#,
    ),
    paths(
        crate::auth::handlers::register_hr,
        crate::auth::handlers::hr_login,
        crate::auth::handlers::login,
        crate::auth::handlers::change_password,

        crate::api::department::create_department,
        crate::api::department::rename_department,
        crate::api::department::delete_department,

        crate::api::person::create_person,
        crate::api::person::update_person,
        crate::api::person::delete_person,
        crate::api::person::profile,

        crate::api::leave_request::create_leave,
        crate::api::leave_request::my_leaves,
        crate::api::leave_request::pending_leaves,
        crate::api::leave_request::approve_leave,
        crate::api::leave_request::reject_leave,
        crate::api::leave_request::cancel_leave,
        crate::api::leave_request::leave_overview
    ),
    components(
        schemas(
            NewHr,
            LoginReqDto,
            PersonLoginReq,
            ChangePasswordReq,
            TokenResponse,
            Department,
            NewDepartment,
            RenameDepartment,
            NewPerson,
            PersonDetailsUpdate,
            PersonRecord,
            PersonRole,
            LiveStatus,
            LeaveApplication,
            AppliedLeaveResponse,
            LeaveRequest,
            LeaveOverview,
            LeaveType,
            LeaveStatus,
            Tenure
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration, login and passwords"),
        (name = "Department", description = "Department administration (HR)"),
        (name = "Person", description = "Employee and head administration"),
        (name = "Leave", description = "Leave applications and decisions"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
