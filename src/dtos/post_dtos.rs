use serde::{Deserialize, Serialize};

/// Client-side draft of a post. `media` switches the request from JSON to
/// multipart when present.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub content: String,
    pub title: Option<String>,
    pub media: Option<MediaAttachment>,
}

impl NewPost {
    pub fn text(content: impl Into<String>) -> Self {
        NewPost {
            content: content.into(),
            ..Default::default()
        }
    }
}

/// Binary attachment for a post, uploaded as a multipart part.
#[derive(Debug, Clone)]
pub struct MediaAttachment {
    pub file_name: String,
    pub content_type: mime::Mime,
    pub bytes: Vec<u8>,
}

/// JSON body for `POST /posts` (no attachment).
#[derive(Debug, Serialize)]
pub struct CreatePostIn<'a> {
    pub content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
}

/// Acknowledgement from `POST /posts/{id}/like`.
#[derive(Debug, Clone, Deserialize)]
pub struct LikeAck {
    #[serde(default)]
    pub message: String,
    pub likes_count: u64,
}

/// JSON body for `POST /posts/{id}/comments`.
#[derive(Debug, Serialize)]
pub struct CreateCommentIn<'a> {
    pub content: &'a str,
}
