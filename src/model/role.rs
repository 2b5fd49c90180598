use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Role carried in the access token.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Role {
    Hr = 1,
    Head = 2,
    Employee = 3,
}

impl Role {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Role::Hr),
            2 => Some(Role::Head),
            3 => Some(Role::Employee),
            _ => None,
        }
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Hr => "hr",
            Role::Head => "head",
            Role::Employee => "employee",
        }
    }
}

/// Employees and heads share one record shape; the role tells them apart.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PersonRole {
    Employee,
    Head,
}

impl PersonRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonRole::Employee => "employee",
            PersonRole::Head => "head",
        }
    }
}

impl From<PersonRole> for Role {
    fn from(value: PersonRole) -> Self {
        match value {
            PersonRole::Employee => Role::Employee,
            PersonRole::Head => Role::Head,
        }
    }
}
