//! Helpers for handler tests: a full app over a given store, minus the
//! request logger and Swagger UI.

use actix_web::{body::MessageBody, dev::ServiceResponse, http::StatusCode, test};
use serde_json::Value;

macro_rules! test_app {
    ($store:expr) => {
        $crate::api::test_support::test_app!($store, $crate::config::Config::default())
    };
    ($store:expr, $config:expr) => {{
        let config: $crate::config::Config = $config;
        let limiter = $crate::routes::login_limiter(&config).expect("test limiter config");
        let state = $crate::routes::AppState::new(::std::sync::Arc::new($store), config, limiter);
        ::actix_web::test::init_service(
            ::actix_web::App::new()
                .wrap(::actix_web::middleware::NormalizePath::trim())
                .configure(|cfg| $crate::routes::configure(cfg, state.clone())),
        )
        .await
    }};
}
pub(crate) use test_app;

macro_rules! call_json {
    ($app:expr, $req:expr) => {
        $crate::api::test_support::into_json(
            ::actix_web::test::call_service($app, $req.to_request()).await,
        )
        .await
    };
}
pub(crate) use call_json;

pub async fn into_json<B: MessageBody>(resp: ServiceResponse<B>) -> (StatusCode, Value) {
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}
