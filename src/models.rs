use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct LoginReqDto {
    #[schema(example = "alice")]
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct PersonLoginReq {
    #[schema(example = "100001")]
    pub emp_code: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ChangePasswordReq {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    #[schema(example = "head")]
    pub role: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// HR id or employee code
    pub sub: String,
    pub role: u8, // role id
    pub exp: usize,
    pub jti: String,
}
