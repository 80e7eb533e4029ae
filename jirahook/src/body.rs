use serde_json::Value;
use tracing::debug;

use crate::jiraevent::{text_at, BODY_PATH};
use crate::markup::{JiraMarkupStripper, MarkupStripper};
use crate::mentions::{DisabledMentions, MentionResolver};
use crate::safetext::{MessageMlFormatter, SafeText, SafeTextFormatter};
use crate::visibility;

/// Turns a raw Jira comment body into [`SafeText`]: strips the markup,
/// escapes, breaks lines and hands mention tokens to the resolver.
pub struct BodyNormalizer {
    stripper: Box<dyn MarkupStripper + Send + Sync>,
    formatter: Box<dyn SafeTextFormatter + Send + Sync>,
    mentions: Box<dyn MentionResolver + Send + Sync>,
}

impl Default for BodyNormalizer {
    fn default() -> BodyNormalizer {
        BodyNormalizer {
            stripper: Box::new(JiraMarkupStripper),
            formatter: Box::new(MessageMlFormatter),
            mentions: Box::new(DisabledMentions),
        }
    }
}

impl BodyNormalizer {
    pub fn new() -> BodyNormalizer {
        Default::default()
    }

    pub fn with_stripper(mut self, stripper: Box<dyn MarkupStripper + Send + Sync>) -> Self {
        self.stripper = stripper;
        self
    }

    pub fn with_formatter(mut self, formatter: Box<dyn SafeTextFormatter + Send + Sync>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn with_mentions(mut self, mentions: Box<dyn MentionResolver + Send + Sync>) -> Self {
        self.mentions = mentions;
        self
    }

    /// Normalized body of a comment node. Restricted comments are emptied
    /// without looking at their body.
    pub fn normalize(&self, comment: &Value) -> SafeText {
        if visibility::is_restricted(comment) {
            debug!("Comment is restricted, dropping its body");
            return SafeText::EMPTY;
        }

        self.format_comment(&text_at(comment, BODY_PATH))
    }

    pub fn format_comment(&self, raw: &str) -> SafeText {
        if raw.is_empty() {
            return SafeText::EMPTY;
        }

        let stripped = self.stripper.strip(raw);
        let text = self.formatter.escape_and_break(&stripped);

        self.mentions.apply(raw, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mentions::{DirectoryMentions, StaticDirectory, User};
    use serde_json::json;

    fn with_directory() -> BodyNormalizer {
        BodyNormalizer::new().with_mentions(Box::new(DirectoryMentions::new(
            StaticDirectory::new(
                ["jdoe", "_bot_", ".svc"].iter().map(|username| User {
                    username: (*username).to_owned(),
                    email_address: Some("team@example.com".to_owned()),
                }),
            ),
        )))
    }

    struct Uppercase;

    impl MarkupStripper for Uppercase {
        fn strip(&self, raw: &str) -> String {
            raw.to_uppercase()
        }
    }

    #[test]
    fn test_strips_and_breaks() {
        let normalizer = BodyNormalizer::new();
        assert_eq!(
            normalizer
                .format_comment("*Bold* first\n\nsecond <para>")
                .as_str(),
            "Bold first<br/><br/>second &lt;para&gt;"
        );
    }

    #[test]
    fn test_empty_body() {
        let normalizer = BodyNormalizer::new();
        assert_eq!(normalizer.format_comment(""), SafeText::EMPTY);
        assert_eq!(normalizer.normalize(&json!({ "id": "1" })), SafeText::EMPTY);
        assert_eq!(
            normalizer.normalize(&json!({ "body": null })),
            SafeText::EMPTY
        );
    }

    #[test]
    fn test_restricted_comment_is_emptied() {
        let normalizer = with_directory();
        for visibility in [json!(null), json!({}), json!({ "type": "group", "value": "jira-devs" })] {
            let comment = json!({ "body": "*secret* [~jdoe]", "visibility": visibility });
            assert_eq!(normalizer.normalize(&comment), SafeText::EMPTY);
        }
    }

    #[test]
    fn test_mentions_disabled_by_default() {
        let normalizer = BodyNormalizer::new();
        assert_eq!(
            normalizer.format_comment("ping [~jdoe]").as_str(),
            "ping [~jdoe]"
        );
    }

    #[test]
    fn test_mentions_with_directory() {
        let normalizer = with_directory();
        assert_eq!(
            normalizer.format_comment("ping *[~jdoe]* and [~ghost]").as_str(),
            "ping <mention username=\"jdoe\"/> and [~ghost]"
        );
    }

    #[test]
    fn test_mention_usernames_with_markup_characters() {
        let normalizer = with_directory();
        assert_eq!(
            normalizer.format_comment("ping [~_bot_] now").as_str(),
            "ping <mention username=\"_bot_\"/> now"
        );
        assert_eq!(
            normalizer.format_comment("[~jdoe] and [~.svc] please").as_str(),
            "<mention username=\"jdoe\"/> and <mention username=\".svc\"/> please"
        );

        let plain = BodyNormalizer::new();
        assert_eq!(
            plain.format_comment("ping [~_bot_] now").as_str(),
            "ping [~_bot_] now"
        );
        assert_eq!(
            plain.format_comment("[~jdoe] and [~.svc] please").as_str(),
            "[~jdoe] and [~.svc] please"
        );
    }

    struct Paragraphs;

    impl SafeTextFormatter for Paragraphs {
        fn escape_and_break(&self, plain: &str) -> SafeText {
            let mut text = SafeText::EMPTY;
            for line in plain.split('\n').filter(|line| !line.is_empty()) {
                text.push(&SafeText::markup("<p>"));
                text.push(&SafeText::escape(line));
                text.push(&SafeText::markup("</p>"));
            }
            text
        }
    }

    #[test]
    fn test_custom_formatter() {
        let normalizer = BodyNormalizer::new().with_formatter(Box::new(Paragraphs));
        assert_eq!(
            normalizer.format_comment("*one* & more\n\ntwo").as_str(),
            "<p>one &amp; more</p><p>two</p>"
        );
    }

    #[test]
    fn test_custom_stripper() {
        let normalizer = BodyNormalizer::new().with_stripper(Box::new(Uppercase));
        assert_eq!(normalizer.format_comment("a&b").as_str(), "A&amp;B");
    }
}
