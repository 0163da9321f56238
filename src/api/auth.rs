use actix_web::{HttpResponse, Responder, web};
use tracing::{debug, info, instrument};

use crate::{
    error::ApiError,
    model::user::PublicUser,
    models::{LoginReqDto, LoginResponse},
    store::RecordStore,
};

/// Plain email/password lookup; answers with the user minus the password.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Email or password missing", body = crate::error::ErrorBody, example = json!({
            "error": "Email and password are required"
        })),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorBody, example = json!({
            "error": "Invalid credentials"
        })),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(store, user),
    fields(email = user.email.as_deref().unwrap_or_default())
)]
pub async fn login(
    user: web::Json<LoginReqDto>,
    store: web::Data<dyn RecordStore>,
) -> actix_web::Result<impl Responder, ApiError> {
    info!("Login request received");

    let LoginReqDto { email, password } = user.into_inner();
    let (email, password) = match (email, password) {
        (Some(e), Some(p)) if !e.trim().is_empty() && !p.is_empty() => (e, p),
        _ => {
            info!("Validation failed: empty email or password");
            return Err(ApiError::bad_request("Email and password are required"));
        }
    };

    debug!("Fetching user from store");
    let db_user = match store.find_user_by_email(email.trim()).await? {
        Some(u) => u,
        None => {
            info!("Invalid credentials: user not found");
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        }
    };

    if !db_user.password_matches(&password) {
        info!(user_id = %db_user.id, "Invalid credentials: password mismatch");
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    info!(user_id = %db_user.id, role = %db_user.role, "Login successful");

    Ok(HttpResponse::Ok().json(LoginResponse {
        success: true,
        user: PublicUser::from(&db_user),
    }))
}
