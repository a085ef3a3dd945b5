use serde::{Deserialize, Serialize};

use crate::models::Post;

/// Envelope returned by `GET /feed`, `GET /feed/user/{id}` and `GET /posts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPageOut {
    pub posts: Vec<Post>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pages: u64,
    #[serde(default)]
    pub current_page: u64,
    #[serde(default)]
    pub per_page: u64,
    /// Only present on the per-user feed endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRef>,
}

/// Lightweight user reference embedded in feed envelopes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRef {
    pub id: u64,
    pub name: String,
    pub username: String,
}
