use serde::{Deserialize, Serialize};

/// The authenticated account as returned by the auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}
