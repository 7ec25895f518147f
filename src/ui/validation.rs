//! Input validation for form submissions.
//!
//! Field bounds match the store's column widths. Errors are plain strings
//! that handlers fold into a validation response or a re-rendered form.

use chrono::NaiveDateTime;

pub const MAX_USERNAME_LEN: usize = 20;
pub const MAX_PASSWORD_LEN: usize = 20;
pub const MAX_TITLE_LEN: usize = 20;
pub const MAX_CONTENT_LEN: usize = 150;
pub const MAX_FILENAME_LEN: usize = 40;

/// Format of the `date_TBD` form field.
const DEADLINE_FORMAT: &str = "%Y-%m-%dT%H:%M";

pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }
    if username.len() > MAX_USERNAME_LEN {
        return Err(format!(
            "Username is too long (max {MAX_USERNAME_LEN} characters)"
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(format!(
            "Password is too long (max {MAX_PASSWORD_LEN} characters)"
        ));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), String> {
    if title.is_empty() {
        return Err("Title is required".to_string());
    }
    if title.len() > MAX_TITLE_LEN {
        return Err(format!("Title is too long (max {MAX_TITLE_LEN} characters)"));
    }
    Ok(())
}

/// Empty content collapses to no content.
pub fn normalize_content(content: &str) -> Result<Option<String>, String> {
    if content.is_empty() {
        return Ok(None);
    }
    if content.len() > MAX_CONTENT_LEN {
        return Err(format!(
            "Content is too long (max {MAX_CONTENT_LEN} characters)"
        ));
    }
    Ok(Some(content.to_string()))
}

pub fn validate_filename(filename: &str) -> Result<(), String> {
    if filename.len() > MAX_FILENAME_LEN {
        return Err(format!(
            "Filename is too long (max {MAX_FILENAME_LEN} characters)"
        ));
    }
    Ok(())
}

/// Parse the `date_TBD` field. Empty means no deadline; a non-empty value
/// must be a local date-time at minute precision and is stored as submitted.
pub fn parse_deadline(raw: &str) -> Result<Option<String>, String> {
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDateTime::parse_from_str(raw, DEADLINE_FORMAT)
        .map_err(|_| "Deadline must be formatted as YYYY-MM-DDTHH:MM".to_string())?;
    Ok(Some(raw.to_string()))
}
