use crate::config::Config;
use crate::{auth::jwt::verify_token, model::role::Role};
use actix_web::{
    FromRequest, HttpMessage, HttpRequest, dev::Payload, error::ErrorUnauthorized, web::Data,
};
use futures::future::{Ready, ready};

/// Caller identity taken from the bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// HR id for HR accounts, employee code otherwise
    pub code: String,
    pub role: Role,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        // already resolved by auth_middleware
        if let Some(user) = req.extensions().get::<AuthUser>() {
            return ready(Ok(user.clone()));
        }

        let token = match req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
        {
            Some(t) => t,
            None => return ready(Err(ErrorUnauthorized("Missing token"))),
        };

        let config = match req.app_data::<Data<Config>>() {
            Some(c) => c,
            None => {
                return ready(Err(actix_web::error::ErrorInternalServerError(
                    "Config missing",
                )));
            }
        };

        let claims = match verify_token(token, &config.jwt_secret) {
            Ok(c) => c,
            Err(_) => return ready(Err(ErrorUnauthorized("Invalid token"))),
        };

        match Role::from_id(claims.role) {
            Some(role) => ready(Ok(AuthUser {
                code: claims.sub,
                role,
            })),
            None => ready(Err(ErrorUnauthorized("Invalid role"))),
        }
    }
}

impl AuthUser {
    pub fn require_hr(&self) -> actix_web::Result<()> {
        if self.role == Role::Hr {
            Ok(())
        } else {
            Err(actix_web::error::ErrorForbidden("HR only"))
        }
    }

    pub fn require_head(&self) -> actix_web::Result<()> {
        if self.role == Role::Head {
            Ok(())
        } else {
            Err(actix_web::error::ErrorForbidden("Department head only"))
        }
    }

    /// Employees and heads both own leave requests.
    pub fn require_person(&self) -> actix_web::Result<()> {
        if matches!(self.role, Role::Employee | Role::Head) {
            Ok(())
        } else {
            Err(actix_web::error::ErrorForbidden("Employees and heads only"))
        }
    }
}
