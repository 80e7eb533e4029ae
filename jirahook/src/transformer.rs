//! Comment event transformation.
//!
//! Takes a Jira comment webhook payload and prepares its `comment` node for
//! the message template: an action label, a permalink to the comment and a
//! body that is safe to render.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::action::ActionLabels;
use crate::body::BodyNormalizer;
use crate::jiraevent::{
    text_at, CommentEventType, ACTION_FIELD, BODY_PATH, COMMENT_PATH, EVENT_TYPE_FIELD, ID_PATH,
    ISSUE_PATH, LINK_FIELD,
};
use crate::permalink;
use crate::safetext::SafeText;

/// Error type for payloads too malformed to transform.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    /// The document root is not a JSON object.
    #[error("webhook payload must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    /// A subtree has the wrong JSON type.
    #[error("invalid field value for {field}: expected an object, found {found}")]
    InvalidField {
        field: &'static str,
        found: &'static str,
    },
}

static NULL: Value = Value::Null;

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The derived fields of one comment event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedComment {
    /// Label of the event type, `None` for event types without one.
    pub action: Option<&'static str>,
    /// Permalink to the comment.
    pub link: String,
    /// Normalized body, empty for restricted comments.
    pub body: SafeText,
    /// Browsable issue link, set only when derived because the payload had
    /// none.
    pub issue_link: Option<String>,
}

pub struct CommentTransformer {
    actions: ActionLabels,
    body: BodyNormalizer,
}

impl Default for CommentTransformer {
    fn default() -> CommentTransformer {
        CommentTransformer::new(BodyNormalizer::default())
    }
}

impl CommentTransformer {
    pub fn new(body: BodyNormalizer) -> CommentTransformer {
        CommentTransformer {
            actions: ActionLabels::new(),
            body,
        }
    }

    /// Event types this transformer handles.
    pub fn events(&self) -> Vec<CommentEventType> {
        CommentEventType::SUPPORTED.to_vec()
    }

    /// Computes the derived fields without touching the payload.
    ///
    /// Returns `Ok(None)` when the payload carries no comment.
    pub fn normalize(&self, payload: &Value) -> Result<Option<NormalizedComment>, PayloadError> {
        if !payload.is_object() {
            return Err(PayloadError::NotAnObject {
                found: kind_of(payload),
            });
        }

        let comment = match payload.get(COMMENT_PATH) {
            None | Some(Value::Null) => {
                debug!("Payload has no comment, nothing to normalize");
                return Ok(None);
            }
            Some(comment @ Value::Object(_)) => comment,
            Some(other) => {
                return Err(PayloadError::InvalidField {
                    field: COMMENT_PATH,
                    found: kind_of(other),
                })
            }
        };

        let event_type = text_at(payload, EVENT_TYPE_FIELD);
        let action = self.actions.label(&event_type);
        if action.is_none() {
            debug!(%event_type, "No action label for event type");
        }

        let issue = payload.get(ISSUE_PATH).unwrap_or(&NULL);
        let issue_link = permalink::derive_issue_link(issue);
        let base_link = match &issue_link {
            Some(derived) => derived.clone(),
            None => permalink::issue_link(issue),
        };
        let link = permalink::comment_permalink(&base_link, &text_at(comment, ID_PATH));

        let body = self.body.normalize(comment);

        info!(%event_type, %link, "Normalized Jira comment");
        Ok(Some(NormalizedComment {
            action,
            link,
            body,
            issue_link,
        }))
    }

    /// Writes the derived fields into the payload and returns it.
    ///
    /// A payload without a comment is returned unchanged.
    pub fn transform(&self, mut payload: Value) -> Result<Value, PayloadError> {
        let Some(normalized) = self.normalize(&payload)? else {
            return Ok(payload);
        };

        if let Some(link) = normalized.issue_link {
            if let Some(issue) = payload.get_mut(ISSUE_PATH).and_then(Value::as_object_mut) {
                issue.insert(LINK_FIELD.to_owned(), Value::String(link));
            }
        }

        if let Some(comment) = payload.get_mut(COMMENT_PATH).and_then(Value::as_object_mut) {
            comment.insert(
                ACTION_FIELD.to_owned(),
                normalized
                    .action
                    .map_or(Value::Null, |label| Value::String(label.to_owned())),
            );
            comment.insert(LINK_FIELD.to_owned(), Value::String(normalized.link));
            comment.insert(
                BODY_PATH.to_owned(),
                Value::String(normalized.body.into_string()),
            );
        }

        Ok(payload)
    }
}
