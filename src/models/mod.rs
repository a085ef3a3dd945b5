pub mod comment;
pub mod post;
pub mod user;

pub use comment::Comment;
pub use post::{Post, PostAuthor};
pub use user::User;
