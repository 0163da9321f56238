use crate::{
    api::{analytics, attendance, auth, users},
    config::Config,
    error::ApiError,
    store::RecordStore,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{Responder, get, web};
use anyhow::{Result, anyhow};
use std::sync::Arc;

pub type LoginLimiter = Arc<Governor<PeerIpKeyExtractor, NoOpMiddleware>>;

/// Everything the handlers pull out of app data, built once and cloned into
/// each worker.
#[derive(Clone)]
pub struct AppState {
    store: web::Data<dyn RecordStore>,
    config: web::Data<Config>,
    login_limiter: LoginLimiter,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, config: Config, login_limiter: LoginLimiter) -> Self {
        Self {
            store: web::Data::from(store),
            config: web::Data::new(config),
            login_limiter,
        }
    }
}

/// Per-IP limiter for the login route. Shared by all workers.
pub fn login_limiter(config: &Config) -> Result<LoginLimiter> {
    let requests_per_min = config.rate_login_per_min.max(1);
    let per_ms = 60_000 / u64::from(requests_per_min);
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms.max(1))
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .ok_or_else(|| anyhow!("invalid login rate limit: {requests_per_min} per minute"))?;
    Ok(Arc::new(Governor::new(&cfg)))
}

#[get("/")]
async fn index() -> impl Responder {
    "Attendance tracker is running"
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::bad_request(format!("Invalid JSON body: {err}")).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| ApiError::bad_request(format!("Invalid query: {err}")).into())
}

pub fn configure(cfg: &mut web::ServiceConfig, state: AppState) {
    let api_prefix = state.config.api_prefix.clone();

    cfg.app_data(state.store)
        .app_data(state.config)
        .app_data(json_config())
        .app_data(query_config())
        .service(index);

    cfg.service(
        web::scope(&api_prefix)
            .service(
                web::resource("/auth/login")
                    .wrap(state.login_limiter)
                    .route(web::post().to(auth::login)),
            )
            .service(
                web::scope("/attendance")
                    // /attendance/check-in
                    .service(
                        web::resource("/check-in").route(web::post().to(attendance::check_in)),
                    )
                    // /attendance/check-out
                    .service(
                        web::resource("/check-out").route(web::post().to(attendance::check_out)),
                    )
                    // /attendance/status?userId=
                    .service(web::resource("/status").route(web::get().to(attendance::status)))
                    // /attendance/all?startDate=&endDate=
                    .service(web::resource("/all").route(web::get().to(attendance::list_all))),
            )
            .service(
                web::scope("/users")
                    .service(web::resource("").route(web::get().to(users::list_users)))
                    .service(web::resource("/{user_id}").route(web::get().to(users::get_user))),
            )
            .service(web::resource("/analytics").route(web::get().to(analytics::analytics))),
    );
}
