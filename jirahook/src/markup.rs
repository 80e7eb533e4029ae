//! Removal of Jira wiki markup.
//!
//! Jira's rich text syntax has no counterpart in the target markup yet, so
//! formatting is dropped and only the text and its line structure survive.
//! Mention tokens (`[~user]`) are kept for the mention stage.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::trace;

use crate::mentions::MENTION_TOKEN;

/// Removes source markup from a raw comment body.
pub trait MarkupStripper {
    fn strip(&self, raw: &str) -> String;
}

fn build(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

/// Mention tokens are swapped for `\u{E000}<n>\u{E001}` while the markup is
/// stripped: neither marker is a word character, a space or a markup
/// delimiter, so no pass can split or rewrite a token.
const HOLD_OPEN: char = '\u{E000}';
const HOLD_CLOSE: char = '\u{E001}';
static HELD_TOKEN: Lazy<Regex> = Lazy::new(|| build(r"\x{E000}(\d+)\x{E001}"));

static FORCED_BREAK: Lazy<Regex> = Lazy::new(|| build(r"\\\\"));
static BLOCK_MACRO: Lazy<Regex> =
    Lazy::new(|| build(r"\{(?:code|noformat|quote|panel|color)(?::[^}]*)?\}"));
static EMBED: Lazy<Regex> =
    Lazy::new(|| build(r"![^!\s|\x{E000}\x{E001}]+(?:\|[^!\n\x{E000}\x{E001}]*)?!"));
static HORIZONTAL_RULE: Lazy<Regex> = Lazy::new(|| build(r"(?m)^[ \t]*-{4,}[ \t]*$"));
static BLOCK_PREFIX: Lazy<Regex> = Lazy::new(|| build(r"(?m)^[ \t]*(?:h[1-6]|bq)\.[ \t]*"));
static LIST_MARKER: Lazy<Regex> = Lazy::new(|| build(r"(?m)^[ \t]*[*#-]+[ \t]+"));
static ALIASED_LINK: Lazy<Regex> = Lazy::new(|| build(r"\[([^\[\]|~][^\[\]|]*)\|[^\[\]]+\]"));
static BARE_LINK: Lazy<Regex> = Lazy::new(|| build(r"\[([^\[\]|~][^\[\]]*)\]"));
static MONOSPACE: Lazy<Regex> = Lazy::new(|| build(r"\{\{(.+?)\}\}"));
static CITATION: Lazy<Regex> = Lazy::new(|| build(r"\?\?([^?\n]+)\?\?"));

/// Inline effects: bold, italic, strikethrough, underline, superscript and
/// subscript. Each applies only between non-word boundaries, so `snake_case`
/// or `well-known` stay intact.
static EFFECTS: Lazy<Vec<Regex>> = Lazy::new(|| {
    ['*', '_', '-', '+', '^', '~']
        .iter()
        .map(|d| {
            let d = regex::escape(&d.to_string());
            build(&format!(
                r"(?m)(^|[^\w{d}]){d}([^\s{d}](?:[^{d}\n]*[^\s{d}])?){d}($|[^\w{d}])"
            ))
        })
        .collect()
});

#[derive(Debug, Default, Clone, Copy)]
pub struct JiraMarkupStripper;

impl MarkupStripper for JiraMarkupStripper {
    fn strip(&self, raw: &str) -> String {
        let (mut text, tokens) = hold_mentions(&raw.replace("\r\n", "\n"));

        text = FORCED_BREAK.replace_all(&text, "\n").into_owned();
        text = BLOCK_MACRO.replace_all(&text, "").into_owned();
        text = EMBED.replace_all(&text, "").into_owned();
        text = HORIZONTAL_RULE.replace_all(&text, "").into_owned();
        text = BLOCK_PREFIX.replace_all(&text, "").into_owned();
        text = LIST_MARKER.replace_all(&text, "").into_owned();
        text = ALIASED_LINK.replace_all(&text, "$1").into_owned();
        text = BARE_LINK.replace_all(&text, "$1").into_owned();
        text = MONOSPACE.replace_all(&text, "$1").into_owned();
        text = CITATION.replace_all(&text, "$1").into_owned();

        for effect in EFFECTS.iter() {
            text = strip_effect(effect, text);
        }

        let text = release_mentions(&text, &tokens);
        trace!(raw, stripped = %text, "Stripped Jira markup");
        text
    }
}

fn hold_mentions(text: &str) -> (String, Vec<String>) {
    let text = text.replace(&[HOLD_OPEN, HOLD_CLOSE][..], "");
    let mut tokens = Vec::new();

    let held = MENTION_TOKEN.replace_all(&text, |caps: &Captures| {
        tokens.push(caps[0].to_owned());
        format!("{HOLD_OPEN}{}{HOLD_CLOSE}", tokens.len() - 1)
    });

    (held.into_owned(), tokens)
}

fn release_mentions(text: &str, tokens: &[String]) -> String {
    HELD_TOKEN
        .replace_all(text, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|idx| tokens.get(idx))
                .cloned()
                .unwrap_or_default()
        })
        .into_owned()
}

/// Matches consume the boundary character after the closing delimiter, which
/// hides directly adjacent effects from the same pass. Every replacement
/// removes two delimiters, so repeating until nothing changes terminates.
fn strip_effect(effect: &Regex, mut text: String) -> String {
    loop {
        let next = match effect.replace_all(&text, |caps: &Captures| {
            format!("{}{}{}", &caps[1], &caps[2], &caps[3])
        }) {
            Cow::Borrowed(_) => None,
            Cow::Owned(next) => Some(next),
        };

        match next {
            Some(next) => text = next,
            None => return text,
        }
    }
}
