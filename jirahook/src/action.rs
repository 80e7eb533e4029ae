use std::collections::HashMap;

use crate::jiraevent::CommentEventType;

/// Fixed table of labels describing what happened to a comment.
///
/// Built once with the transformer and only read afterwards, so one table can
/// serve any number of concurrent payloads.
pub struct ActionLabels {
    labels: HashMap<CommentEventType, &'static str>,
}

impl Default for ActionLabels {
    fn default() -> ActionLabels {
        let mut labels = HashMap::new();
        labels.insert(CommentEventType::IssueCommented, "Commented");
        labels.insert(CommentEventType::IssueCommentEdited, "Edited Comment");
        labels.insert(CommentEventType::IssueCommentDeleted, "Deleted Comment");

        ActionLabels { labels }
    }
}

impl ActionLabels {
    pub fn new() -> ActionLabels {
        Default::default()
    }

    /// Label for the raw `issue_event_type_name` value. Unknown event types
    /// have no label.
    pub fn label(&self, event_type: &str) -> Option<&'static str> {
        self.label_for(CommentEventType::from_name(event_type))
    }

    pub fn label_for(&self, event: CommentEventType) -> Option<&'static str> {
        self.labels.get(&event).copied()
    }
}
