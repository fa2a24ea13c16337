/*!
 * Markup cleanup for cue text.
 *
 * SRT cues may carry simple HTML formatting (`<i>`, `<font color=..>`) and
 * entities; caption tracks carry XML-escaped text that is often escaped a
 * second time. This module turns both into plain display text.
 */

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Any HTML/XML tag
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^>]*>").unwrap()
});

/// Named or numeric character reference
static ENTITY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[A-Za-z][A-Za-z0-9]*);").unwrap()
});

/// Named references understood by `decode_html_entities`
const HTML_ENTITIES: &[(&str, &str)] = &[
    ("amp", "&"),
    ("lt", "<"),
    ("gt", ">"),
    ("quot", "\""),
    ("apos", "'"),
    ("nbsp", " "),
    ("hellip", "…"),
    ("mdash", "—"),
    ("ndash", "–"),
    ("lsquo", "‘"),
    ("rsquo", "’"),
    ("ldquo", "“"),
    ("rdquo", "”"),
    ("laquo", "«"),
    ("raquo", "»"),
    ("iexcl", "¡"),
    ("iquest", "¿"),
    ("copy", "©"),
    ("reg", "®"),
    ("trade", "™"),
    ("deg", "°"),
    ("middot", "·"),
    ("shy", ""),
];

/// The five entities predefined by XML
const XML_ENTITIES: &[(&str, &str)] = &[
    ("amp", "&"),
    ("lt", "<"),
    ("gt", ">"),
    ("quot", "\""),
    ("apos", "'"),
];

/// Remove every tag, keeping the text between them
pub fn strip_tags(text: &str) -> String {
    TAG_REGEX.replace_all(text, "").into_owned()
}

/// Decode named and numeric HTML character references.
///
/// Unknown names and invalid code points are left untouched.
pub fn decode_html_entities(text: &str) -> String {
    decode_with(text, HTML_ENTITIES)
}

/// Undo one level of XML escaping
pub fn unescape_xml(text: &str) -> String {
    decode_with(text, XML_ENTITIES)
}

/// Convert an HTML fragment to trimmed plain text.
///
/// Tags go first so that escaped angle brackets survive as literal text.
pub fn html_to_text(fragment: &str) -> String {
    let stripped = strip_tags(fragment);
    decode_html_entities(&stripped).trim().to_string()
}

fn decode_with(text: &str, table: &[(&str, &str)]) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    ENTITY_REGEX
        .replace_all(text, |caps: &Captures| {
            let whole = &caps[0];
            let name = &caps[1];

            if let Some(number) = name.strip_prefix('#') {
                let code = match number.strip_prefix(['x', 'X']) {
                    Some(hex) => u32::from_str_radix(hex, 16).ok(),
                    None => number.parse::<u32>().ok(),
                };
                return code
                    .and_then(char::from_u32)
                    .map(String::from)
                    .unwrap_or_else(|| whole.to_string());
            }

            table
                .iter()
                .find(|(entity, _)| *entity == name)
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| whole.to_string())
        })
        .into_owned()
}
