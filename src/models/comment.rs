use serde::{Deserialize, Serialize};

use crate::models::post::PostAuthor;

/// A comment on a post. Append-only from the client's point of view within a
/// session; the server never pages or reorders them today.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub user_id: u64,
    pub content: String,
    pub created_at: String,
    #[serde(default)]
    pub user: Option<PostAuthor>,
}
