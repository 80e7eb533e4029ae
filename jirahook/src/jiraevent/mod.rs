mod commentevent;
mod common;

pub use self::commentevent::CommentEventType;
pub use self::common::{
    text_at, ACTION_FIELD, BODY_PATH, COMMENT_PATH, EVENT_TYPE_FIELD, ID_PATH, ISSUE_KEY_PATH,
    ISSUE_PATH, ISSUE_SELF_PATH, LINK_FIELD, VISIBILITY_PATH, WEBHOOK_EVENT_FIELD,
};
