use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

use crate::entities::decode_entities;

static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

static RE_PERMALINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)ispermalink").unwrap());

/// Turns a raw feed field into display text.
///
/// Implementations must be deterministic: the pipeline relies on the same
/// input always producing the same output.
pub trait TextCleaner: Send + Sync {
    fn clean(&self, text: &str) -> String;
}

/// Collapses every whitespace run to a single space and trims the ends.
pub struct DefaultCleaner;

impl TextCleaner for DefaultCleaner {
    fn clean(&self, text: &str) -> String {
        collapse_whitespace(text)
    }
}

/// Pattern based cleaner for RSS/XML feed text.
///
/// One pass strips `<...>` tags, decodes entities, drops any `isPermalink`
/// left outside a tag and collapses whitespace. Decoding can expose new
/// markup (`&lt;b&gt;` becomes `<b>`), so passes repeat until the text stops
/// changing, which makes cleaning idempotent.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedTextCleaner;

impl FeedTextCleaner {
    fn pass(text: &str) -> String {
        let stripped = RE_TAG.replace_all(text, "");
        let decoded = decode_entities(&stripped);
        let text = RE_PERMALINK.replace_all(&decoded, "");
        collapse_whitespace(&text)
    }
}

impl TextCleaner for FeedTextCleaner {
    fn clean(&self, text: &str) -> String {
        until_stable(text, Self::pass)
    }
}

/// Cleaner that lets an HTML parser decide what is markup.
///
/// The text is parsed as a fragment and only its text nodes are kept, so
/// every entity the parser knows is decoded. `isPermalink` removal and
/// whitespace collapsing match [`FeedTextCleaner`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlTextCleaner;

impl HtmlTextCleaner {
    fn pass(text: &str) -> String {
        let fragment = Html::parse_fragment(text);
        let joined = fragment.root_element().text().collect::<String>();
        let text = RE_PERMALINK.replace_all(&joined, "");
        collapse_whitespace(&text)
    }
}

impl TextCleaner for HtmlTextCleaner {
    fn clean(&self, text: &str) -> String {
        until_stable(text, Self::pass)
    }
}

// A pass that changes the text either shortens it or only turns whitespace
// into single spaces, which cannot happen twice in a row, so this ends.
fn until_stable(text: &str, pass: fn(&str) -> String) -> String {
    let mut current = pass(text);
    loop {
        let next = pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}
