//! Small helpers shared by the repositories.

use uuid::Uuid;

/// Uses the caller-supplied id when present, otherwise a fresh UUID v4.
pub fn new_id(requested: Option<String>) -> String {
    requested
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}
