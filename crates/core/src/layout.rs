//! TV layout (template) identifiers.
//!
//! Only the second layout family carries a news strip. Identifiers are free
//! text entered by operators (`"Template 2"`, `"layout2"`), so the check is a
//! case-insensitive search for the digit `2`.

use crate::error::CoreError;

pub const TEMPLATE_STANDARD: &str = "Template 1";
pub const TEMPLATE_WITH_NEWS: &str = "Template 2";

/// Template assigned to TVs created without one.
pub const DEFAULT_TEMPLATE: &str = TEMPLATE_STANDARD;

/// Templates offered by the console.
pub const KNOWN_TEMPLATES: &[&str] = &[TEMPLATE_STANDARD, TEMPLATE_WITH_NEWS];

/// Maximum length of a template identifier.
pub const MAX_TEMPLATE_LENGTH: usize = 50;

/// Whether the layout identified by `template` shows a news strip.
pub fn layout_supports_news(template: &str) -> bool {
    template.to_lowercase().contains('2')
}

/// Validate a template identifier supplied on create or update.
pub fn validate_template(template: &str) -> Result<(), CoreError> {
    let trimmed = template.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Template must not be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_TEMPLATE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Template must be at most {MAX_TEMPLATE_LENGTH} characters"
        )));
    }
    Ok(())
}
