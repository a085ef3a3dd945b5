use serde::{Deserialize, Serialize};

use crate::models::User;

#[derive(Debug, Serialize)]
pub struct LoginIn<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SignupIn<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
    pub username: &'a str,
}

/// Successful login response. The token is persisted by the client so later
/// requests can attach it as a bearer header.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionOut {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

/// Signup only returns a confirmation message; the caller logs in afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupOut {
    #[serde(default)]
    pub message: String,
}
