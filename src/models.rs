use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::user::PublicUser;

/// Fields are optional so a missing one becomes our own 400, not a parse error.
#[derive(Deserialize, ToSchema)]
pub struct LoginReqDto {
    #[schema(example = "john@example.com")]
    pub email: Option<String>,
    #[schema(example = "user123")]
    pub password: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = true)]
    pub success: bool,
    pub user: PublicUser,
}

#[derive(Serialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<PublicUser>,
}
