use crate::{
    api::{department, leave_request, person},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

type Limiter = Governor<PeerIpKeyExtractor, NoOpMiddleware>;

/// One token every `60s / requests_per_min`, bursting up to the full minute.
fn build_limiter(requests_per_min: u32) -> anyhow::Result<Limiter> {
    let requests_per_min = requests_per_min.max(1);
    let cfg = GovernorConfigBuilder::default()
        .milliseconds_per_request((60_000 / requests_per_min as u64).max(1))
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("invalid rate limit: {requests_per_min}/min"))?;
    Ok(Governor::new(&cfg))
}

/// Rate limiters are built once at startup and shared by every worker.
#[derive(Clone)]
pub struct Limiters {
    login: Arc<Limiter>,
    register: Arc<Limiter>,
    protected: Arc<Limiter>,
}

impl Limiters {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            login: Arc::new(build_limiter(config.rate_login_per_min)?),
            register: Arc::new(build_limiter(config.rate_register_per_min)?),
            protected: Arc::new(build_limiter(config.rate_protected_per_min)?),
        })
    }
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, limiters: Limiters) {
    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/hr/register")
                    .wrap(limiters.register.clone())
                    .route(web::post().to(handlers::register_hr)),
            )
            .service(
                web::resource("/hr/login")
                    .wrap(limiters.login.clone())
                    .route(web::post().to(handlers::hr_login)),
            )
            .service(
                web::resource("/login")
                    .wrap(limiters.login.clone())
                    .route(web::post().to(handlers::login)),
            ),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(limiters.protected) // rate limiting
            .service(web::resource("/password").route(web::put().to(handlers::change_password)))
            .service(web::resource("/me").route(web::get().to(person::profile)))
            .service(
                web::scope("/departments")
                    // /departments
                    .service(
                        web::resource("").route(web::post().to(department::create_department)),
                    )
                    // /departments/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(department::rename_department))
                            .route(web::delete().to(department::delete_department)),
                    ),
            )
            .service(
                web::scope("/persons")
                    .service(web::resource("").route(web::post().to(person::create_person)))
                    .service(
                        web::resource("/{code}")
                            .route(web::put().to(person::update_person))
                            .route(web::delete().to(person::delete_person)),
                    ),
            )
            .service(
                web::scope("/leave")
                    // /leave
                    .service(
                        web::resource("")
                            .route(web::get().to(leave_request::leave_overview))
                            .route(web::post().to(leave_request::create_leave)),
                    )
                    .service(web::resource("/mine").route(web::get().to(leave_request::my_leaves)))
                    .service(
                        web::resource("/pending").route(web::get().to(leave_request::pending_leaves)),
                    )
                    // /leave/{id}/approve
                    .service(
                        web::resource("/{id}/approve")
                            .route(web::put().to(leave_request::approve_leave)),
                    )
                    // /leave/{id}/reject
                    .service(
                        web::resource("/{id}/reject")
                            .route(web::put().to(leave_request::reject_leave)),
                    )
                    // /leave/{id}/cancel
                    .service(
                        web::resource("/{id}/cancel")
                            .route(web::put().to(leave_request::cancel_leave)),
                    ),
            ),
    );
}
