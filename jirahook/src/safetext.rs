//! Text that is safe to embed into MessageML.
//!
//! A [`SafeText`] can only be built by escaping plain text or from static
//! markup written in this crate, so once a value has this type nothing else
//! needs to escape it again.

use std::fmt;

/// Line break markup inserted for every line boundary of the plain text.
pub const LINE_BREAK: &str = "<br/>";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SafeText(String);

impl SafeText {
    pub const EMPTY: SafeText = SafeText(String::new());

    /// Escapes `text` completely.
    pub fn escape(text: &str) -> SafeText {
        SafeText(escape_text(text))
    }

    /// Static markup, trusted as written.
    pub fn markup(markup: &'static str) -> SafeText {
        SafeText(String::from(markup))
    }

    /// Fills the single `{}` placeholder of `markup` with the escaped `value`.
    pub fn presentation_format(markup: &'static str, value: &str) -> SafeText {
        SafeText(markup.replacen("{}", &escape_text(value), 1))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, other: &SafeText) {
        self.0.push_str(&other.0);
    }

    /// Replaces every occurrence of `target` with `replacement`. Both sides
    /// are already escaped, so the result stays safe.
    pub fn safe_replace(&mut self, target: &SafeText, replacement: &SafeText) {
        if target.is_empty() {
            return;
        }
        self.0 = self.0.replace(&target.0, &replacement.0);
    }
}

impl fmt::Display for SafeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Escapes the characters that are significant in XML text and attributes.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Turns stripped plain text into [`SafeText`].
pub trait SafeTextFormatter {
    fn escape_and_break(&self, plain: &str) -> SafeText;
}

/// Escapes for MessageML and replaces each line boundary (`\r\n`, `\n` or
/// `\r`) with [`LINE_BREAK`].
#[derive(Debug, Default, Clone, Copy)]
pub struct MessageMlFormatter;

impl SafeTextFormatter for MessageMlFormatter {
    fn escape_and_break(&self, plain: &str) -> SafeText {
        let normalized = plain.replace("\r\n", "\n").replace('\r', "\n");

        let mut text = SafeText::EMPTY;
        let line_break = SafeText::markup(LINE_BREAK);
        for (i, line) in normalized.split('\n').enumerate() {
            if i > 0 {
                text.push(&line_break);
            }
            text.push(&SafeText::escape(line));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        assert_eq!(
            escape_text(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_text("plain text"), "plain text");
    }

    #[test]
    fn test_line_breaks() {
        let formatter = MessageMlFormatter;
        assert_eq!(
            formatter.escape_and_break("one\n\ntwo").as_str(),
            "one<br/><br/>two"
        );
        assert_eq!(
            formatter.escape_and_break("one\r\ntwo\rthree").as_str(),
            "one<br/>two<br/>three"
        );
        assert_eq!(formatter.escape_and_break("").as_str(), "");
    }

    #[test]
    fn test_escapes_before_breaking() {
        let formatter = MessageMlFormatter;
        assert_eq!(
            formatter.escape_and_break("a < b\nc & d").as_str(),
            "a &lt; b<br/>c &amp; d"
        );
    }

    #[test]
    fn test_presentation_format_escapes_value() {
        let text = SafeText::presentation_format("<mention username=\"{}\"/>", "a\"b");
        assert_eq!(text.as_str(), "<mention username=\"a&quot;b\"/>");
    }

    #[test]
    fn test_safe_replace() {
        let mut text = SafeText::escape("hi [~jdoe], bye [~jdoe] & [~other]");
        text.safe_replace(
            &SafeText::escape("[~jdoe]"),
            &SafeText::markup("<mention/>"),
        );
        assert_eq!(
            text.as_str(),
            "hi <mention/>, bye <mention/> &amp; [~other]"
        );

        let before = text.clone();
        text.safe_replace(&SafeText::EMPTY, &SafeText::markup("x"));
        assert_eq!(text, before);
    }
}
