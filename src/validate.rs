use thiserror::Error;

/// Server-enforced limit; checked client-side so an oversized draft never
/// leaves the machine.
pub const MAX_POST_CHARS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Post content is required")]
    EmptyPost,
    #[error("Post content must be less than {MAX_POST_CHARS} characters")]
    PostTooLong,
    #[error("Comment content is required")]
    EmptyComment,
}

/// Mirrors the server's rules for `POST /posts`: non-blank content, at most
/// `MAX_POST_CHARS` characters (counted before trimming, as the server does).
pub fn post_content(content: &str) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyPost);
    }
    if content.chars().count() > MAX_POST_CHARS {
        return Err(ValidationError::PostTooLong);
    }
    Ok(())
}

pub fn comment_content(content: &str) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyComment);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_post() {
        assert_eq!(post_content(""), Err(ValidationError::EmptyPost));
        assert_eq!(post_content("   \n\t"), Err(ValidationError::EmptyPost));
    }

    #[test]
    fn rejects_oversized_post() {
        let long = "x".repeat(MAX_POST_CHARS + 1);
        assert_eq!(post_content(&long), Err(ValidationError::PostTooLong));
        let exactly = "x".repeat(MAX_POST_CHARS);
        assert!(post_content(&exactly).is_ok());
    }

    #[test]
    fn length_is_counted_in_chars_not_bytes() {
        let long = "é".repeat(MAX_POST_CHARS);
        assert!(post_content(&long).is_ok());
    }

    #[test]
    fn rejects_blank_comment() {
        assert_eq!(comment_content(" "), Err(ValidationError::EmptyComment));
        assert!(comment_content("nice post").is_ok());
    }
}
