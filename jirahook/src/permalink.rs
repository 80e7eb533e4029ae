//! Browsable links for issues and comments.
//!
//! Jira only sends REST `self` URLs in its webhooks. The chat message needs
//! links a person can click, so the issue link is derived from the REST URL
//! when the payload does not carry one, and each comment gets a permalink
//! that focuses it on the issue page.

use serde_json::Value;

use crate::jiraevent::{text_at, ISSUE_KEY_PATH, ISSUE_SELF_PATH, LINK_FIELD};

const REST_API_SEGMENT: &str = "/rest/api/";
const COMMENT_TAB_PANEL: &str = "com.atlassian.jira.plugin.system.issuetabpanels%3Acomment-tabpanel";

/// Permalink to a comment within its issue page.
///
/// An empty `comment_id` yields the issue link unchanged. An empty
/// `issue_link` is accepted as is: the result is then just the query
/// fragment.
pub fn comment_permalink(issue_link: &str, comment_id: &str) -> String {
    let mut link = String::from(issue_link);

    if !comment_id.is_empty() {
        link.push('?');
        link.push_str(&format!(
            "focusedCommentId={comment_id}&amp;page={COMMENT_TAB_PANEL}#comment-{comment_id}"
        ));
    }

    link
}

/// The `link` field of an issue node, empty when missing.
pub fn issue_link(issue: &Value) -> String {
    text_at(issue, LINK_FIELD)
}

/// Builds `<base>/browse/<KEY>` from the issue's REST `self` URL and key.
///
/// Returns `None` when the issue already has a link or lacks the inputs.
pub fn derive_issue_link(issue: &Value) -> Option<String> {
    if issue.get(LINK_FIELD).is_some() {
        return None;
    }

    let key = text_at(issue, ISSUE_KEY_PATH);
    let rest_url = text_at(issue, ISSUE_SELF_PATH);
    if key.is_empty() || rest_url.is_empty() {
        return None;
    }

    let base = base_url(&rest_url)?;
    Some(format!("{base}/browse/{key}"))
}

fn base_url(rest_url: &str) -> Option<&str> {
    if let Some(idx) = rest_url.find(REST_API_SEGMENT) {
        return Some(&rest_url[..idx]);
    }

    // No REST segment: fall back to scheme and authority.
    let authority_start = rest_url.find("://")? + 3;
    match rest_url[authority_start..].find('/') {
        Some(idx) => Some(&rest_url[..authority_start + idx]),
        None => Some(rest_url),
    }
}
