use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

/// Account profile. Vehicle details feed automated entry/exit at supported
/// lots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub role: Role,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub vehicle_number: Option<String>,
    pub vehicle_model: Option<String>,
}

impl UserProfile {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
            email: None,
            phone_number: None,
            vehicle_number: None,
            vehicle_model: None,
        }
    }
}
