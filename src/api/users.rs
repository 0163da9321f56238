use actix_web::{HttpResponse, Responder, web};
use tracing::debug;

use crate::{
    error::ApiError,
    model::user::PublicUser,
    models::UserListResponse,
    store::RecordStore,
};

/// Non-admin users
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users with the `user` role", body = UserListResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Users"
)]
pub async fn list_users(
    store: web::Data<dyn RecordStore>,
) -> actix_web::Result<impl Responder, ApiError> {
    let users: Vec<PublicUser> = store.list_users().await?.iter().map(PublicUser::from).collect();
    debug!(count = users.len(), "Listing users");

    Ok(HttpResponse::Ok().json(UserListResponse { users }))
}

/// Single user by id, any role
#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    params(
        ("user_id", Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = PublicUser),
        (status = 404, description = "User not found", body = crate::error::ErrorBody, example = json!({
            "error": "User not found"
        })),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Users"
)]
pub async fn get_user(
    store: web::Data<dyn RecordStore>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder, ApiError> {
    let user_id = path.into_inner();

    match store.find_user_by_id(&user_id).await? {
        Some(user) => Ok(HttpResponse::Ok().json(PublicUser::from(&user))),
        None => Err(ApiError::NotFound("User not found".to_string())),
    }
}
