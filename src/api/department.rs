use crate::api::AppService;
use crate::auth::auth::AuthUser;
use crate::model::department::{NewDepartment, RenameDepartment};
use actix_web::{HttpResponse, Responder, web};

/* =========================
Create department (HR)
========================= */
#[utoipa::path(
    post,
    path = "/api/departments",
    request_body = NewDepartment,
    responses(
        (status = 201, description = "Department created", body = Department),
        (status = 400, description = "Department id must be 4 characters"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Department id already exists")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Department"
)]
pub async fn create_department(
    auth: AuthUser,
    service: web::Data<AppService>,
    payload: web::Json<NewDepartment>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr()?;

    let department = service.create_department(&payload).await?;
    Ok(HttpResponse::Created().json(department))
}

#[utoipa::path(
    put,
    path = "/api/departments/{dept_id}",
    params(
        ("dept_id" = String, Path, description = "Department ID")
    ),
    request_body = RenameDepartment,
    responses(
        (status = 200, description = "Department renamed", body = Department),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Department not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Department"
)]
pub async fn rename_department(
    auth: AuthUser,
    service: web::Data<AppService>,
    path: web::Path<String>,
    payload: web::Json<RenameDepartment>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr()?;

    let department = service
        .rename_department(&path.into_inner(), &payload.dept_name)
        .await?;
    Ok(HttpResponse::Ok().json(department))
}

/// Refused while any employee or head still belongs to the department.
#[utoipa::path(
    delete,
    path = "/api/departments/{dept_id}",
    params(
        ("dept_id" = String, Path, description = "Department ID")
    ),
    responses(
        (status = 200, description = "Department deleted", body = Object, example = json!({
            "message": "Department deleted"
        })),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Department not found"),
        (status = 409, description = "Department still has members")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Department"
)]
pub async fn delete_department(
    auth: AuthUser,
    service: web::Data<AppService>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr()?;

    service.delete_department(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Department deleted"
    })))
}
