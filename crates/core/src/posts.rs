//! Community post rules.

pub const POST_STATUS_PUBLISHED: i16 = 1;

pub const MAX_POST_TITLE_LENGTH: usize = 200;
pub const MAX_POST_CONTENT_LENGTH: usize = 20_000;

/// Number of hot posts returned when the client does not ask for a limit.
pub const DEFAULT_HOT_LIMIT: i64 = 3;
pub const MAX_HOT_LIMIT: i64 = 50;

pub fn validate_post_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Post title cannot be empty".to_string());
    }
    if title.chars().count() > MAX_POST_TITLE_LENGTH {
        return Err(format!(
            "Post title exceeds maximum length of {MAX_POST_TITLE_LENGTH} characters"
        ));
    }
    Ok(())
}

pub fn validate_post_content(content: &str) -> Result<(), String> {
    if content.trim().is_empty() {
        return Err("Post content cannot be empty".to_string());
    }
    if content.chars().count() > MAX_POST_CONTENT_LENGTH {
        return Err(format!(
            "Post content exceeds maximum length of {MAX_POST_CONTENT_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Resolve the `limit` query parameter of the hot-posts listing.
pub fn clamp_hot_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_HOT_LIMIT).clamp(1, MAX_HOT_LIMIT)
}
