use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct HrAccount {
    #[schema(example = "HR0001")]
    pub hr_id: String,
    pub name: String,
    pub designation: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "hr_id": "HR0001",
        "name": "Alice Smith",
        "designation": "HR Manager",
        "username": "alice",
        "password": "secret"
    })
)]
pub struct NewHr {
    pub hr_id: String,
    pub name: String,
    #[serde(default)]
    pub designation: String,
    pub username: String,
    pub password: String,
}
