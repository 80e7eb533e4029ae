//! Field names of the Jira webhook payload that the comment pipeline reads
//! or writes.

/// Root field carrying the issue event type, e.g. `issue_commented`.
pub const EVENT_TYPE_FIELD: &str = "issue_event_type_name";
/// Root field carrying the webhook kind, e.g. `jira:issue_updated`.
pub const WEBHOOK_EVENT_FIELD: &str = "webhookEvent";

pub const ISSUE_PATH: &str = "issue";
pub const ISSUE_SELF_PATH: &str = "self";
pub const ISSUE_KEY_PATH: &str = "key";

pub const COMMENT_PATH: &str = "comment";
pub const ID_PATH: &str = "id";
pub const BODY_PATH: &str = "body";
/// Present on comments restricted to a Jira group or role.
pub const VISIBILITY_PATH: &str = "visibility";

/// Written onto the issue and the comment: the browsable URL of each.
pub const LINK_FIELD: &str = "link";
/// Written onto the comment: the human readable action label.
pub const ACTION_FIELD: &str = "action";

/// Reads `field` of `node` as text: strings verbatim, numbers and booleans
/// in their JSON form. Missing fields, `null`, arrays and objects read as
/// the empty string.
pub fn text_at(node: &serde_json::Value, field: &str) -> String {
    match node.get(field) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}
