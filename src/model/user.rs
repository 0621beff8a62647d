use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Login account. Passwords are kept and compared in plaintext.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub email: String,
    pub password: String,
    pub role: String,
}

impl UserAccount {
    pub fn new(email: &str, password: &str, role: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            role: role.to_string(),
        }
    }
}

/// What `/users` exposes of an account.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct UserSummary {
    #[schema(example = "admin@ayateke.com")]
    pub email: String,
    #[schema(example = "admin")]
    pub role: String,
}

impl From<&UserAccount> for UserSummary {
    fn from(account: &UserAccount) -> Self {
        Self {
            email: account.email.clone(),
            role: account.role.clone(),
        }
    }
}
