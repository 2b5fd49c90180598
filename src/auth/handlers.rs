use crate::{
    api::AppService,
    auth::{auth::AuthUser, jwt::generate_access_token},
    config::Config,
    leave::service::Identity,
    model::hr::NewHr,
    models::{ChangePasswordReq, LoginReqDto, PersonLoginReq, TokenResponse},
};
use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use tracing::{debug, info, instrument};

fn token_response(identity: Identity, config: &Config) -> actix_web::Result<HttpResponse> {
    debug!("Generating access token");
    let access_token = generate_access_token(
        &identity.code,
        identity.role,
        &config.jwt_secret,
        config.access_token_ttl,
    )?;

    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token,
        token_type: "Bearer".to_string(),
        role: identity.role.as_str().to_string(),
        name: identity.name,
    }))
}

/* =========================
HR registration
========================= */
#[utoipa::path(
    post,
    path = "/auth/hr/register",
    request_body = NewHr,
    responses(
        (status = 201, description = "HR registered", body = Object, example = json!({
            "message": "HR registered successfully"
        })),
        (status = 400, description = "Invalid HR id, name or credentials"),
        (status = 409, description = "HR id or username already exists")
    ),
    tag = "Auth"
)]
#[instrument(name = "hr_register", skip(service, payload), fields(hr_id = %payload.hr_id))]
pub async fn register_hr(
    service: web::Data<AppService>,
    payload: web::Json<NewHr>,
) -> actix_web::Result<impl Responder> {
    service.register_hr(&payload).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "HR registered successfully"
    })))
}

#[utoipa::path(
    post,
    path = "/auth/hr/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Access token issued", body = TokenResponse),
        (status = 400, description = "Username or password missing"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
#[instrument(
    name = "hr_login",
    skip(service, config, payload),
    fields(username = %payload.username)
)]
pub async fn hr_login(
    service: web::Data<AppService>,
    config: web::Data<Config>,
    payload: web::Json<LoginReqDto>,
) -> actix_web::Result<HttpResponse> {
    info!("Login request received");

    if payload.username.trim().is_empty() || payload.password.is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "Username or password required"
        })));
    }

    let identity = service
        .login_hr(&payload.username, &payload.password)
        .await?;

    info!("Login successful");
    token_response(identity, &config)
}

/// Login for employees and department heads.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = PersonLoginReq,
    responses(
        (status = 200, description = "Access token issued", body = TokenResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
#[instrument(name = "auth_login", skip(service, config, payload), fields(emp_code = %payload.emp_code))]
pub async fn login(
    service: web::Data<AppService>,
    config: web::Data<Config>,
    payload: web::Json<PersonLoginReq>,
) -> actix_web::Result<HttpResponse> {
    info!("Login request received");

    let identity = service
        .login_person(&payload.emp_code, &payload.password)
        .await?;

    info!(role = identity.role.as_str(), "Login successful");
    token_response(identity, &config)
}

#[utoipa::path(
    put,
    path = "/api/password",
    request_body = ChangePasswordReq,
    responses(
        (status = 200, description = "Password updated", body = Object, example = json!({
            "message": "Password updated successfully"
        })),
        (status = 400, description = "New passwords don't match"),
        (status = 401, description = "Current password is wrong"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Auth"
)]
#[instrument(name = "change_password", skip(auth, service, payload), fields(emp_code = %auth.code))]
pub async fn change_password(
    auth: AuthUser,
    service: web::Data<AppService>,
    payload: web::Json<ChangePasswordReq>,
) -> actix_web::Result<impl Responder> {
    auth.require_person()?;

    service
        .change_password(
            &auth.code,
            &payload.current_password,
            &payload.new_password,
            &payload.confirm_password,
        )
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Password updated successfully"
    })))
}
