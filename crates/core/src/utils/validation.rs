//! Field checks shared by the goal, task and library item models.

use crate::errors::{Error, Result, ValidationError};

/// Titles are required and may not be whitespace only.
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "title".to_string(),
        )));
    }
    Ok(())
}

/// A goal link is either absent or a non-blank id.
pub fn validate_goal_ref(goal_id: Option<&str>) -> Result<()> {
    if matches!(goal_id, Some(id) if id.trim().is_empty()) {
        return Err(Error::invalid_input("goalId cannot be blank"));
    }
    Ok(())
}
