use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author summary embedded in every post by the feed endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostAuthor {
    pub id: u64,
    pub name: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// A single feed post. `likes_count`, `liked_by_current_user` and
/// `comments_count` are the fields the feed controller mutates locally
/// between reloads; everything else is server-owned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub user_id: u64,
    /// Rich-text content; may contain HTML produced by the web editor.
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub comments_count: u64,
    // Older API deployments omit this field entirely.
    #[serde(default)]
    pub liked_by_current_user: bool,
    #[serde(default)]
    pub user: Option<PostAuthor>,
}

impl Post {
    /// Parses the server timestamp. The API emits naive ISO-8601
    /// (`2024-06-01T12:34:56`, UTC implied) but some deployments include an
    /// offset, so both forms are accepted.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.created_at) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&self.created_at, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }

    /// Relative age label for display: "Just now", "5h", "3d", "2w", "4mo".
    pub fn time_ago(&self, now: DateTime<Utc>) -> String {
        let Some(created) = self.created_at_utc() else {
            return self.created_at.clone();
        };
        let hours = (now - created).num_hours().max(0);
        match hours {
            0 => "Just now".to_string(),
            1..=23 => format!("{}h", hours),
            24..=167 => format!("{}d", hours / 24),
            168..=719 => format!("{}w", hours / 168),
            _ => format!("{}mo", hours / 720),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post_created_at(ts: &str) -> Post {
        Post {
            id: 1,
            user_id: 7,
            content: "hello".into(),
            title: None,
            media_url: None,
            created_at: ts.to_string(),
            likes_count: 0,
            comments_count: 0,
            liked_by_current_user: false,
            user: None,
        }
    }

    #[test]
    fn parses_naive_and_offset_timestamps() {
        assert!(post_created_at("2024-06-01T12:00:00").created_at_utc().is_some());
        assert!(post_created_at("2024-06-01T12:00:00.123456").created_at_utc().is_some());
        assert!(post_created_at("2024-06-01T12:00:00+00:00").created_at_utc().is_some());
        assert!(post_created_at("not a date").created_at_utc().is_none());
    }

    #[test]
    fn time_ago_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        assert_eq!(post_created_at("2024-06-10T11:30:00").time_ago(now), "Just now");
        assert_eq!(post_created_at("2024-06-10T07:00:00").time_ago(now), "5h");
        assert_eq!(post_created_at("2024-06-07T12:00:00").time_ago(now), "3d");
        assert_eq!(post_created_at("2024-05-27T12:00:00").time_ago(now), "2w");
        assert_eq!(post_created_at("2024-01-10T12:00:00").time_ago(now), "5mo");
    }

    #[test]
    fn missing_like_fields_default() {
        let post: Post = serde_json::from_str(
            r#"{"id":3,"user_id":9,"content":"<p>hi</p>","created_at":"2024-06-01T00:00:00"}"#,
        )
        .unwrap();
        assert_eq!(post.likes_count, 0);
        assert!(!post.liked_by_current_user);
        assert!(post.user.is_none());
    }
}
