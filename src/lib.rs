//! Client library for the LinkUp social network API.
//!
//! The [`api::ApiClient`] facade wraps the REST endpoints; the
//! [`feed::FeedController`] on top of it keeps an in-memory post list
//! consistent across pagination, reloads and optimistic like/comment
//! mutations.

pub mod api;
pub mod auth;
pub mod config;
pub mod dtos;
pub mod feed;
pub mod models;
pub mod validate;

pub use api::{ApiClient, ApiError};
pub use config::ClientConfig;
pub use feed::{FeedController, FeedError, FeedScope, FeedSnapshot};
