//! Account constants and validation rules.
//!
//! Column limits mirror the `users` table (see the create-users migration).

use validator::ValidateEmail;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Account may log in.
pub const USER_STATUS_ACTIVE: i16 = 1;
/// Account is disabled; login and token refresh are refused.
pub const USER_STATUS_DISABLED: i16 = 0;

pub const MAX_USERNAME_LENGTH: usize = 50;
pub const MAX_EMAIL_LENGTH: usize = 100;
pub const MAX_AVATAR_LENGTH: usize = 255;
pub const MAX_STUDENT_TYPE_LENGTH: usize = 20;
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Domain used when a client registers without an email address.
pub const PLACEHOLDER_EMAIL_DOMAIN: &str = "example.com";

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Trim and validate a username. Returns the trimmed value.
pub fn validate_username(username: &str) -> Result<String, String> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err("Username is required".to_string());
    }
    if trimmed.chars().count() > MAX_USERNAME_LENGTH {
        return Err(format!(
            "Username must be at most {MAX_USERNAME_LENGTH} characters"
        ));
    }
    Ok(trimmed.to_string())
}

/// Validate a plaintext password before hashing.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.trim().is_empty() {
        return Err("Password is required".to_string());
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        ));
    }
    Ok(())
}

/// Trim and validate an email address. Returns the trimmed value.
pub fn validate_email(email: &str) -> Result<String, String> {
    let trimmed = email.trim().to_string();
    if trimmed.is_empty() {
        return Err("Email must not be empty".to_string());
    }
    if trimmed.chars().count() > MAX_EMAIL_LENGTH {
        return Err(format!("Email must be at most {MAX_EMAIL_LENGTH} characters"));
    }
    if !trimmed.validate_email() {
        return Err(format!("'{trimmed}' is not a valid email address"));
    }
    Ok(trimmed)
}

/// Email assigned when registration omits one.
pub fn default_email(username: &str) -> String {
    format!("{username}@{PLACEHOLDER_EMAIL_DOMAIN}")
}

/// Parse the optional `status` field of a registration request.
///
/// Clients send it as a string; absent means active.
pub fn parse_status(raw: Option<&str>) -> Result<i16, String> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(USER_STATUS_ACTIVE);
    };
    match raw.parse::<i16>() {
        Ok(USER_STATUS_ACTIVE) => Ok(USER_STATUS_ACTIVE),
        Ok(USER_STATUS_DISABLED) => Ok(USER_STATUS_DISABLED),
        _ => Err(format!("Invalid status '{raw}'. Must be 0 or 1")),
    }
}

pub fn validate_avatar(avatar: &str) -> Result<(), String> {
    if avatar.chars().count() > MAX_AVATAR_LENGTH {
        return Err(format!(
            "Avatar URL must be at most {MAX_AVATAR_LENGTH} characters"
        ));
    }
    Ok(())
}

pub fn validate_student_type(student_type: &str) -> Result<(), String> {
    if student_type.chars().count() > MAX_STUDENT_TYPE_LENGTH {
        return Err(format!(
            "Student type must be at most {MAX_STUDENT_TYPE_LENGTH} characters"
        ));
    }
    Ok(())
}
