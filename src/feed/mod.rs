pub mod controller;

pub use controller::{FeedController, FeedError, FeedScope, FeedSnapshot};
