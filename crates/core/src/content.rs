//! Validation shared by ads and notices.

use crate::error::CoreError;

/// Maximum length of an ad or notice title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length of a notice message.
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// Seconds an ad stays on screen when none is given.
pub const DEFAULT_DISPLAY_SECONDS: i32 = 10;

/// Longest accepted on-screen time for a single ad.
pub const MAX_DISPLAY_SECONDS: i32 = 600;

/// Require a non-blank title of bounded length.
pub fn validate_title(title: &str, field: &str) -> Result<(), CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Require a non-blank notice message of bounded length.
pub fn validate_message(message: &str) -> Result<(), CoreError> {
    if message.trim().is_empty() {
        return Err(CoreError::Validation("message must not be empty".to_string()));
    }
    if message.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(CoreError::Validation(format!(
            "message must be at most {MAX_MESSAGE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Require an on-screen time in `1..=MAX_DISPLAY_SECONDS`.
pub fn validate_display_seconds(seconds: i32) -> Result<(), CoreError> {
    if !(1..=MAX_DISPLAY_SECONDS).contains(&seconds) {
        return Err(CoreError::Validation(format!(
            "display_seconds must be between 1 and {MAX_DISPLAY_SECONDS}, got {seconds}"
        )));
    }
    Ok(())
}

/// Refuse a new notice once the manager owns `limit` of them.
pub fn check_notice_limit(current: i64, limit: i32) -> Result<(), CoreError> {
    if current >= i64::from(limit) {
        return Err(CoreError::Conflict(format!(
            "Notice limit reached ({current} of {limit})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn title_rules() {
        assert!(validate_title("Pool closed", "name").is_ok());
        assert!(validate_title("  ", "name").is_err());
        assert!(validate_title(&"a".repeat(MAX_TITLE_LENGTH + 1), "name").is_err());
    }

    #[test]
    fn message_rules() {
        assert!(validate_message("Water shut-off on Friday").is_ok());
        assert!(validate_message("").is_err());
        assert!(validate_message(&"m".repeat(MAX_MESSAGE_LENGTH + 1)).is_err());
    }

    #[test]
    fn display_seconds_bounds() {
        assert!(validate_display_seconds(DEFAULT_DISPLAY_SECONDS).is_ok());
        assert!(validate_display_seconds(MAX_DISPLAY_SECONDS).is_ok());
        assert!(validate_display_seconds(0).is_err());
        assert!(validate_display_seconds(MAX_DISPLAY_SECONDS + 1).is_err());
    }

    #[test]
    fn notice_limit_is_exclusive() {
        assert!(check_notice_limit(9, 10).is_ok());
        assert_matches!(check_notice_limit(10, 10), Err(CoreError::Conflict(_)));
        assert_matches!(check_notice_limit(0, 0), Err(CoreError::Conflict(_)));
    }
}
