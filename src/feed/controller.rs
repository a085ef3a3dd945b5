use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, warn};
use thiserror::Error;

use crate::api::{ApiClient, ApiError};
use crate::dtos::feed::FeedPageOut;
use crate::dtos::posts::NewPost;
use crate::models::{Comment, Post};
use crate::validate::{self, ValidationError};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Which backing endpoint the controller pages through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedScope {
    /// `GET /feed` — the viewer's home feed.
    Home,
    /// `GET /feed/user/{id}` — a single member's posts.
    User(u64),
}

/// Immutable copy of the feed state for a view layer to render from.
/// An empty `posts` with `loading: false` and `error: None` is the explicit
/// empty state, distinct from both loading and failure.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    pub posts: Vec<Post>,
    pub loading: bool,
    pub exhausted: bool,
    pub error: Option<String>,
}

struct FeedState {
    posts: Vec<Post>,
    comments: HashMap<u64, Vec<Comment>>,
    next_page: u64,
    exhausted: bool,
    /// Bumped on every reload. A page response tagged with an older
    /// generation is discarded instead of being merged.
    generation: u64,
    /// Generation that owns the outstanding page request, if any. Cleared on
    /// success, failure and timeout alike.
    in_flight: Option<u64>,
    loading: bool,
    error: Option<String>,
}

impl FeedState {
    fn new() -> Self {
        FeedState {
            posts: Vec::new(),
            comments: HashMap::new(),
            next_page: 1,
            exhausted: false,
            generation: 0,
            in_flight: None,
            loading: false,
            error: None,
        }
    }

    fn find_post_mut(&mut self, post_id: u64) -> Option<&mut Post> {
        self.posts.iter_mut().find(|p| p.id == post_id)
    }

    /// Appends a page in server order, skipping any id already present.
    fn append_posts(&mut self, posts: Vec<Post>) {
        for post in posts {
            if self.posts.iter().any(|p| p.id == post.id) {
                debug!("skipping duplicate post {} in page merge", post.id);
                continue;
            }
            self.posts.push(post);
        }
    }

    /// Optimistic half of a like: flips the flag and bumps the count before
    /// the request is sent. Returns false when there is nothing to do.
    fn apply_like(&mut self, post_id: u64) -> bool {
        match self.find_post_mut(post_id) {
            Some(post) if !post.liked_by_current_user => {
                post.liked_by_current_user = true;
                post.likes_count += 1;
                true
            }
            _ => false,
        }
    }

    /// Inverse delta of `apply_like`, used to roll back a failed request.
    fn revert_like(&mut self, post_id: u64) {
        if let Some(post) = self.find_post_mut(post_id) {
            post.liked_by_current_user = false;
            post.likes_count = post.likes_count.saturating_sub(1);
        }
    }
}

/// Maintains the in-memory post list backing a feed view: pagination,
/// optimistic like/comment mutations, and reconciliation with server state.
///
/// Cloneable; clones share state, so a view layer and background tasks can
/// hold the same controller. Page loads are serialized through the in-flight
/// marker and reloads invalidate older responses via the generation counter.
#[derive(Clone)]
pub struct FeedController {
    api: ApiClient,
    scope: FeedScope,
    per_page: u64,
    state: Arc<Mutex<FeedState>>,
}

impl FeedController {
    pub fn new(api: ApiClient, per_page: u64) -> Self {
        Self::with_scope(api, FeedScope::Home, per_page)
    }

    pub fn with_scope(api: ApiClient, scope: FeedScope, per_page: u64) -> Self {
        FeedController {
            api,
            scope,
            per_page,
            state: Arc::new(Mutex::new(FeedState::new())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FeedState> {
        // Never held across an await point.
        self.state.lock().expect("feed state poisoned")
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        let state = self.lock();
        FeedSnapshot {
            posts: state.posts.clone(),
            loading: state.loading,
            exhausted: state.exhausted,
            error: state.error.clone(),
        }
    }

    /// Comments fetched for a post so far, in server order with local
    /// additions appended.
    pub fn comments_for(&self, post_id: u64) -> Vec<Comment> {
        self.lock().comments.get(&post_id).cloned().unwrap_or_default()
    }

    async fn fetch_page(&self, page: u64) -> Result<FeedPageOut, ApiError> {
        match self.scope {
            FeedScope::Home => self.api.get_feed(page, self.per_page).await,
            FeedScope::User(user_id) => {
                self.api.get_user_feed(user_id, page, self.per_page).await
            }
        }
    }

    /// Loads page 1 and replaces the whole list. Any page request still in
    /// flight is invalidated: its response will carry a stale generation and
    /// be discarded, so the list only ever reflects one coherent server view.
    pub async fn load_first_page(&self) -> Result<(), FeedError> {
        let generation = {
            let mut state = self.lock();
            state.generation += 1;
            state.in_flight = Some(state.generation);
            state.loading = true;
            state.error = None;
            state.generation
        };

        let result = self.fetch_page(1).await;

        let mut state = self.lock();
        if state.generation != generation {
            // A newer reload superseded this one while it was in flight.
            return Ok(());
        }
        state.in_flight = None;
        state.loading = false;
        match result {
            Ok(page) => {
                let fetched = page.posts.len() as u64;
                state.posts.clear();
                state.comments.clear();
                state.append_posts(page.posts);
                state.next_page = 2;
                state.exhausted = fetched < self.per_page;
                Ok(())
            }
            Err(err) => {
                state.posts.clear();
                state.comments.clear();
                state.next_page = 1;
                state.exhausted = false;
                state.error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Requests the next page and appends it. A no-op while a page request
    /// is outstanding or once the feed is exhausted (a page shorter than
    /// `per_page` means the server has nothing further).
    pub async fn load_next_page(&self) -> Result<(), FeedError> {
        let (generation, page) = {
            let mut state = self.lock();
            if state.in_flight.is_some() || state.exhausted {
                return Ok(());
            }
            state.in_flight = Some(state.generation);
            state.loading = true;
            (state.generation, state.next_page)
        };

        let result = self.fetch_page(page).await;

        let mut state = self.lock();
        if state.generation != generation {
            // The list was reloaded while this page was in flight; merging
            // it now would interleave two server views.
            debug!("discarding stale response for page {}", page);
            return Ok(());
        }
        state.in_flight = None;
        state.loading = false;
        match result {
            Ok(page_out) => {
                let fetched = page_out.posts.len() as u64;
                state.append_posts(page_out.posts);
                state.next_page = page + 1;
                if fetched < self.per_page {
                    state.exhausted = true;
                }
                Ok(())
            }
            Err(err) => {
                state.error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Likes a post optimistically: the flag and count change before the
    /// request resolves, and the inverse delta is re-applied if it fails.
    /// Already-liked posts are left alone; the server has no unlike.
    pub async fn like(&self, post_id: u64) -> Result<(), FeedError> {
        let generation = {
            let mut state = self.lock();
            if !state.apply_like(post_id) {
                return Ok(());
            }
            state.generation
        };

        match self.api.like_post(post_id).await {
            Ok(ack) => {
                let mut state = self.lock();
                // A reload in between already replaced local state with
                // server truth; only reconcile if this view is still live.
                if state.generation == generation {
                    if let Some(post) = state.find_post_mut(post_id) {
                        post.likes_count = ack.likes_count;
                    }
                }
                Ok(())
            }
            Err(err) => {
                warn!("like failed for post {}: {}", post_id, err);
                let mut state = self.lock();
                if state.generation == generation {
                    state.revert_like(post_id);
                }
                Err(err.into())
            }
        }
    }

    /// Validates and submits a new post, then reloads page 1 so the list
    /// reflects the server's ordering rather than a local insertion.
    pub async fn create_post(&self, draft: NewPost) -> Result<(), FeedError> {
        validate::post_content(&draft.content)?;
        self.api.create_post(&draft).await?;
        self.load_first_page().await
    }

    /// Fetches and caches the comment list for a post.
    pub async fn load_comments(&self, post_id: u64) -> Result<Vec<Comment>, FeedError> {
        let generation = self.lock().generation;
        let comments = self.api.get_comments(post_id).await?;
        let mut state = self.lock();
        if state.generation == generation {
            state.comments.insert(post_id, comments.clone());
        }
        Ok(comments)
    }

    /// Submits a comment; on success appends it locally and bumps the
    /// post's comment count.
    pub async fn add_comment(&self, post_id: u64, content: &str) -> Result<Comment, FeedError> {
        validate::comment_content(content)?;
        let generation = self.lock().generation;
        let comment = self.api.add_comment(post_id, content).await?;
        let mut state = self.lock();
        if state.generation == generation {
            state.comments.entry(post_id).or_default().push(comment.clone());
            if let Some(post) = state.find_post_mut(post_id) {
                post.comments_count += 1;
            }
        }
        Ok(comment)
    }
}
