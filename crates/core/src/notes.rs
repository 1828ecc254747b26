//! Study-note constants, subjects, and validation rules.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Note is visible in the owner's default list.
pub const NOTE_STATUS_ACTIVE: i16 = 1;
/// Note has been logically deleted.
pub const NOTE_STATUS_DELETED: i16 = 0;

pub const MAX_NOTE_TITLE_LENGTH: usize = 200;
pub const MAX_NOTE_CONTENT_LENGTH: usize = 50_000;
pub const MAX_TAGS_PER_NOTE: usize = 20;
pub const MAX_TAG_LENGTH: usize = 50;
pub const MAX_ATTACHMENTS_PER_NOTE: usize = 20;

// ---------------------------------------------------------------------------
// Subjects
// ---------------------------------------------------------------------------

/// School subject a note is filed under.
///
/// The numeric id is what clients send as `categoryId`; the label is what the
/// mobile client displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    Chinese,
    Math,
    English,
    Physics,
    Chemistry,
    Biology,
    History,
    Geography,
    Politics,
    Other,
}

impl Subject {
    pub const ALL: [Subject; 10] = [
        Subject::Chinese,
        Subject::Math,
        Subject::English,
        Subject::Physics,
        Subject::Chemistry,
        Subject::Biology,
        Subject::History,
        Subject::Geography,
        Subject::Politics,
        Subject::Other,
    ];

    pub fn category_id(self) -> i32 {
        match self {
            Subject::Chinese => 1,
            Subject::Math => 2,
            Subject::English => 3,
            Subject::Physics => 4,
            Subject::Chemistry => 5,
            Subject::Biology => 6,
            Subject::History => 7,
            Subject::Geography => 8,
            Subject::Politics => 9,
            Subject::Other => 10,
        }
    }

    pub fn from_category_id(id: i32) -> Option<Subject> {
        Self::ALL.into_iter().find(|s| s.category_id() == id)
    }

    /// Display label used by the mobile client.
    pub fn label(self) -> &'static str {
        match self {
            Subject::Chinese => "语文",
            Subject::Math => "数学",
            Subject::English => "英语",
            Subject::Physics => "物理",
            Subject::Chemistry => "化学",
            Subject::Biology => "生物",
            Subject::History => "历史",
            Subject::Geography => "地理",
            Subject::Politics => "政治",
            Subject::Other => "其他",
        }
    }
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

pub fn validate_note_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Note title cannot be empty".to_string());
    }
    if title.chars().count() > MAX_NOTE_TITLE_LENGTH {
        return Err(format!(
            "Note title exceeds maximum length of {MAX_NOTE_TITLE_LENGTH} characters"
        ));
    }
    Ok(())
}

pub fn validate_note_content(content: &str) -> Result<(), String> {
    if content.chars().count() > MAX_NOTE_CONTENT_LENGTH {
        return Err(format!(
            "Note content exceeds maximum length of {MAX_NOTE_CONTENT_LENGTH} characters"
        ));
    }
    Ok(())
}

pub fn validate_category_id(category_id: i32) -> Result<(), String> {
    if Subject::from_category_id(category_id).is_none() {
        return Err(format!(
            "Invalid category id {category_id}. Must be between 1 and {}",
            Subject::ALL.len()
        ));
    }
    Ok(())
}

pub fn validate_tags(tags: &[String]) -> Result<(), String> {
    if tags.len() > MAX_TAGS_PER_NOTE {
        return Err(format!("A note can have at most {MAX_TAGS_PER_NOTE} tags"));
    }
    for tag in tags {
        if tag.trim().is_empty() {
            return Err("Tags cannot be empty".to_string());
        }
        if tag.chars().count() > MAX_TAG_LENGTH {
            return Err(format!(
                "Tag '{tag}' exceeds maximum length of {MAX_TAG_LENGTH} characters"
            ));
        }
    }
    Ok(())
}

pub fn validate_attachment_paths(paths: &[String]) -> Result<(), String> {
    if paths.len() > MAX_ATTACHMENTS_PER_NOTE {
        return Err(format!(
            "A note can have at most {MAX_ATTACHMENTS_PER_NOTE} attachments"
        ));
    }
    if paths.iter().any(|p| p.trim().is_empty()) {
        return Err("Attachment paths cannot be empty".to_string());
    }
    Ok(())
}

pub fn validate_note_status(status: i16) -> Result<(), String> {
    match status {
        NOTE_STATUS_ACTIVE | NOTE_STATUS_DELETED => Ok(()),
        other => Err(format!("Invalid note status {other}. Must be 0 or 1")),
    }
}
