pub mod auth_dtos;
pub mod feed_dtos;
pub mod post_dtos;

pub use auth_dtos as auth;
pub use feed_dtos as feed;
pub use post_dtos as posts;
