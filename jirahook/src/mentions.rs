//! Mention tokens (`[~username]`) and their resolution to directory users.
//!
//! Resolution is off by default: the target markup does not render mentions
//! yet. [`DirectoryMentions`] is the resolver to plug in once it does.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use crate::safetext::SafeText;

pub(crate) static MENTION_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\[~)([\w.]+)(\])").unwrap());

/// Markup replacing a resolved mention token.
pub const MENTION_MARKUP: &str = "<mention username=\"{}\"/>";

/// A directory user.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub email_address: Option<String>,
}

impl User {
    fn has_email(&self) -> bool {
        self.email_address
            .as_deref()
            .map_or(false, |email| !email.is_empty())
    }
}

/// Looks users up by their Jira username.
pub trait UserLookup {
    fn resolve(&self, username: &str) -> Option<User>;
}

/// Rewrites mention tokens of the escaped comment text.
///
/// `raw` is the comment body before any markup was stripped; tokens are
/// searched for there.
pub trait MentionResolver {
    fn apply(&self, raw: &str, text: SafeText) -> SafeText;
}

/// Usernames mentioned in `raw`, each once.
pub fn find_mentions(raw: &str) -> BTreeSet<String> {
    MENTION_TOKEN
        .captures_iter(raw)
        .map(|caps| caps[2].to_owned())
        .collect()
}

fn mention_token(username: &str) -> SafeText {
    SafeText::escape(&format!("[~{username}]"))
}

/// Leaves the text untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledMentions;

impl MentionResolver for DisabledMentions {
    fn apply(&self, _raw: &str, text: SafeText) -> SafeText {
        text
    }
}

/// Replaces the tokens of users found in a directory with mention markup.
///
/// Only users with an email address are mentioned; any other token stays as
/// plain text.
pub struct DirectoryMentions<L> {
    lookup: L,
}

impl<L: UserLookup> DirectoryMentions<L> {
    pub fn new(lookup: L) -> DirectoryMentions<L> {
        DirectoryMentions { lookup }
    }

    pub fn users_to_mention(&self, raw: &str) -> BTreeMap<String, User> {
        let mut users = BTreeMap::new();

        for username in find_mentions(raw) {
            match self.lookup.resolve(&username) {
                Some(user) if user.has_email() => {
                    users.insert(username, user);
                }
                Some(_) => debug!(%username, "Mentioned user has no email address"),
                None => debug!(%username, "Mentioned user not found"),
            }
        }

        users
    }
}

impl<L: UserLookup> MentionResolver for DirectoryMentions<L> {
    fn apply(&self, raw: &str, mut text: SafeText) -> SafeText {
        for (username, user) in self.users_to_mention(raw) {
            trace!(%username, "Replacing mention token");
            text.safe_replace(
                &mention_token(&username),
                &SafeText::presentation_format(MENTION_MARKUP, &user.username),
            );
        }
        text
    }
}

/// In-memory directory, keyed by username.
#[derive(Debug, Default, Clone)]
pub struct StaticDirectory {
    users: HashMap<String, User>,
}

impl StaticDirectory {
    pub fn new<I: IntoIterator<Item = User>>(users: I) -> StaticDirectory {
        StaticDirectory {
            users: users
                .into_iter()
                .map(|user| (user.username.clone(), user))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl UserLookup for StaticDirectory {
    fn resolve(&self, username: &str) -> Option<User> {
        self.users.get(username).cloned()
    }
}
