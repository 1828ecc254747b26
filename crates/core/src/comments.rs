//! Post comment rules.

pub const MAX_COMMENT_LENGTH: usize = 2_000;

pub fn validate_comment_content(content: &str) -> Result<(), String> {
    if content.trim().is_empty() {
        return Err("Comment cannot be empty".to_string());
    }
    if content.chars().count() > MAX_COMMENT_LENGTH {
        return Err(format!(
            "Comment exceeds maximum length of {MAX_COMMENT_LENGTH} characters"
        ));
    }
    Ok(())
}
