use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Department {
    #[schema(example = "ENGG")]
    pub dept_id: String,
    #[schema(example = "Engineering")]
    pub dept_name: String,
    #[schema(example = "100001", nullable = true)]
    pub head_emp_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewDepartment {
    #[schema(example = "ENGG")]
    pub dept_id: String,
    #[schema(example = "Engineering")]
    pub dept_name: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RenameDepartment {
    #[schema(example = "Platform Engineering")]
    pub dept_name: String,
}
