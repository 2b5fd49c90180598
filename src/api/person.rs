use crate::api::AppService;
use crate::auth::auth::AuthUser;
use crate::model::person::{NewPerson, PersonDetailsUpdate};
use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;

/* =========================
Create employee or head (HR)
========================= */
/// The initial leave balance follows tenure on the day of creation.
#[utoipa::path(
    post,
    path = "/api/persons",
    request_body = NewPerson,
    responses(
        (status = 201, description = "Person created", body = PersonRecord),
        (status = 400, description = "Invalid code, name, join date or department"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Employee code already exists")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Person"
)]
pub async fn create_person(
    auth: AuthUser,
    service: web::Data<AppService>,
    payload: web::Json<NewPerson>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr()?;

    let person = service
        .create_person(&auth.code, &payload, Utc::now().date_naive())
        .await?;
    Ok(HttpResponse::Created().json(person))
}

#[utoipa::path(
    put,
    path = "/api/persons/{emp_code}",
    params(
        ("emp_code" = String, Path, description = "Employee code")
    ),
    request_body = PersonDetailsUpdate,
    responses(
        (status = 200, description = "Person updated", body = PersonRecord),
        (status = 400, description = "No changes provided"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Person not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Person"
)]
pub async fn update_person(
    auth: AuthUser,
    service: web::Data<AppService>,
    path: web::Path<String>,
    payload: web::Json<PersonDetailsUpdate>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr()?;

    let person = service
        .update_person_details(&path.into_inner(), &payload)
        .await?;
    Ok(HttpResponse::Ok().json(person))
}

/// Deletes the person together with their leave history.
#[utoipa::path(
    delete,
    path = "/api/persons/{emp_code}",
    params(
        ("emp_code" = String, Path, description = "Employee code")
    ),
    responses(
        (status = 200, description = "Person deleted", body = Object, example = json!({
            "message": "Person deleted"
        })),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Person not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Person"
)]
pub async fn delete_person(
    auth: AuthUser,
    service: web::Data<AppService>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr()?;

    service.delete_person(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Person deleted"
    })))
}

#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Own profile and leave balance", body = PersonRecord),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Person"
)]
pub async fn profile(
    auth: AuthUser,
    service: web::Data<AppService>,
) -> actix_web::Result<impl Responder> {
    auth.require_person()?;

    let person = service.person(&auth.code).await?;
    Ok(HttpResponse::Ok().json(person))
}
