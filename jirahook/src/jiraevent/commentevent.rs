use std::fmt;

/// Comment related values of `issue_event_type_name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentEventType {
    IssueCommented,
    IssueCommentEdited,
    IssueCommentDeleted,
    Unknown,
}

impl CommentEventType {
    /// The event types the comment transformer registers for.
    pub const SUPPORTED: [CommentEventType; 3] = [
        CommentEventType::IssueCommented,
        CommentEventType::IssueCommentDeleted,
        CommentEventType::IssueCommentEdited,
    ];

    pub fn from_name(name: &str) -> CommentEventType {
        match name {
            "issue_commented" => CommentEventType::IssueCommented,
            "issue_comment_edited" => CommentEventType::IssueCommentEdited,
            "issue_comment_deleted" => CommentEventType::IssueCommentDeleted,
            _ => CommentEventType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommentEventType::IssueCommented => "issue_commented",
            CommentEventType::IssueCommentEdited => "issue_comment_edited",
            CommentEventType::IssueCommentDeleted => "issue_comment_deleted",
            CommentEventType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CommentEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
