use serde_json::Value;

use crate::jiraevent::VISIBILITY_PATH;

/// Whether a comment is restricted to some Jira group or role.
///
/// Only the presence of `visibility` matters. Its content cannot be checked
/// against the rooms the message is posted to, so any value restricts.
pub fn is_restricted(comment: &Value) -> bool {
    comment
        .as_object()
        .map_or(false, |c| c.contains_key(VISIBILITY_PATH))
}
