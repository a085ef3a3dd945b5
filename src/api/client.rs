use std::sync::Arc;

use log::debug;
use reqwest::{Client, Method, RequestBuilder, Response, multipart};
use serde::de::DeserializeOwned;

use crate::api::error::ApiError;
use crate::auth::TokenStore;
use crate::config::ClientConfig;
use crate::dtos::auth::{LoginIn, SessionOut, SignupIn, SignupOut};
use crate::dtos::feed::FeedPageOut;
use crate::dtos::posts::{CreateCommentIn, CreatePostIn, LikeAck, NewPost};
use crate::models::{Comment, Post};

/// Thin facade over the LinkUp REST API.
///
/// Owns the shared `reqwest::Client` (connection pool plus the configured
/// request deadline) and the token store. Cloning is cheap; clones share
/// both.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: Arc<TokenStore>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(concat!("linkup-client/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .build()?;

        Ok(ApiClient {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            tokens: Arc::new(TokenStore::open(config.token_path.clone())),
        })
    }

    pub fn token_store(&self) -> &TokenStore {
        &self.tokens
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Starts a request with the bearer token attached when one is stored.
    /// A missing token is not an error here; the server rejects on its own.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self.http.request(method, self.url(path));
        if let Some(token) = self.tokens.get() {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::from_error_body(status, &body));
        }
        Ok(serde_json::from_str(&body)?)
    }

    // --- feed ---

    pub async fn get_feed(&self, page: u64, per_page: u64) -> Result<FeedPageOut, ApiError> {
        debug!("GET /feed page={} per_page={}", page, per_page);
        let response = self
            .request(Method::GET, "/feed")
            .query(&[("page", page), ("per_page", per_page)])
            .send()
            .await?;
        Self::read_json(response).await
    }

    pub async fn get_user_feed(
        &self,
        user_id: u64,
        page: u64,
        per_page: u64,
    ) -> Result<FeedPageOut, ApiError> {
        debug!("GET /feed/user/{} page={}", user_id, page);
        let response = self
            .request(Method::GET, &format!("/feed/user/{}", user_id))
            .query(&[("page", page), ("per_page", per_page)])
            .send()
            .await?;
        Self::read_json(response).await
    }

    // --- posts ---

    /// Unfiltered post listing; same envelope as the feed but without the
    /// server's per-viewer selection.
    pub async fn get_posts(&self, page: u64, per_page: u64) -> Result<FeedPageOut, ApiError> {
        debug!("GET /posts page={} per_page={}", page, per_page);
        let response = self
            .request(Method::GET, "/posts")
            .query(&[("page", page), ("per_page", per_page)])
            .send()
            .await?;
        Self::read_json(response).await
    }

    pub async fn get_post(&self, post_id: u64) -> Result<Post, ApiError> {
        let response = self
            .request(Method::GET, &format!("/posts/{}", post_id))
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Creates a post. Sends JSON for text-only drafts and switches to
    /// multipart when a media attachment is present.
    pub async fn create_post(&self, draft: &NewPost) -> Result<Post, ApiError> {
        let req = self.request(Method::POST, "/posts");
        let response = match &draft.media {
            None => {
                req.json(&CreatePostIn {
                    content: &draft.content,
                    title: draft.title.as_deref(),
                })
                .send()
                .await?
            }
            Some(media) => {
                let part = multipart::Part::bytes(media.bytes.clone())
                    .file_name(media.file_name.clone())
                    .mime_str(media.content_type.as_ref())?;
                let mut form = multipart::Form::new()
                    .text("content", draft.content.clone())
                    .part("media", part);
                if let Some(title) = &draft.title {
                    form = form.text("title", title.clone());
                }
                req.multipart(form).send().await?
            }
        };
        Self::read_json(response).await
    }

    pub async fn like_post(&self, post_id: u64) -> Result<LikeAck, ApiError> {
        let response = self
            .request(Method::POST, &format!("/posts/{}/like", post_id))
            .send()
            .await?;
        Self::read_json(response).await
    }

    // --- comments ---

    pub async fn get_comments(&self, post_id: u64) -> Result<Vec<Comment>, ApiError> {
        let response = self
            .request(Method::GET, &format!("/posts/{}/comments", post_id))
            .send()
            .await?;
        Self::read_json(response).await
    }

    pub async fn add_comment(&self, post_id: u64, content: &str) -> Result<Comment, ApiError> {
        let response = self
            .request(Method::POST, &format!("/posts/{}/comments", post_id))
            .json(&CreateCommentIn { content })
            .send()
            .await?;
        Self::read_json(response).await
    }

    // --- auth ---

    /// Exchanges credentials for a session and persists the bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionOut, ApiError> {
        let response = self
            .request(Method::POST, "/auth/login")
            .json(&LoginIn { email, password })
            .send()
            .await?;
        let session: SessionOut = Self::read_json(response).await?;
        self.tokens.set(&session.token);
        Ok(session)
    }

    pub async fn signup(&self, input: &SignupIn<'_>) -> Result<SignupOut, ApiError> {
        let response = self
            .request(Method::POST, "/auth/signup")
            .json(input)
            .send()
            .await?;
        Self::read_json(response).await
    }

    pub fn logout(&self) {
        self.tokens.clear();
    }
}
