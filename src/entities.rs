use std::sync::LazyLock;

use regex::{Captures, Regex};

// Named, decimal or hex character references.
static RE_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]+);").unwrap());

/// Decodes the entities feeds commonly emit and blanks out the rest.
///
/// `&nbsp;`, `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;` and numeric
/// references are decoded. Any other named entity becomes a single space.
/// Numeric references that do not name a valid `char` are left as is.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    RE_ENTITY
        .replace_all(text, |caps: &Captures| {
            let whole = &caps[0];
            let body = &caps[1];
            match decode_one(body) {
                Some(c) => c.to_string(),
                None if body.starts_with('#') => whole.to_string(),
                None => " ".to_string(),
            }
        })
        .into_owned()
}

fn decode_one(body: &str) -> Option<char> {
    match body {
        "nbsp" => Some(' '),
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ if body.starts_with("#x") || body.starts_with("#X") => {
            u32::from_str_radix(&body[2..], 16)
                .ok()
                .and_then(char::from_u32)
        }
        _ if body.starts_with('#') => body[1..].parse::<u32>().ok().and_then(char::from_u32),
        _ => None,
    }
}
