/*!
 * Tests for tag stripping and entity decoding
 */

use cuetrack::markup::{decode_html_entities, html_to_text, strip_tags, unescape_xml};

#[test]
fn test_stripTags_withFormattingTags_shouldKeepText() {
    assert_eq!(strip_tags("<i>Hello</i> <b>there</b>"), "Hello there");
    assert_eq!(
        strip_tags(r##"<font color="#ffff00">Yellow</font>"##),
        "Yellow"
    );
}

#[test]
fn test_decodeHtmlEntities_withNamedEntities_shouldDecode() {
    assert_eq!(decode_html_entities("Tom &amp; Jerry"), "Tom & Jerry");
    assert_eq!(decode_html_entities("&quot;Wait&hellip;&quot;"), "\"Wait…\"");
    assert_eq!(decode_html_entities("a&nbsp;b"), "a b");
}

#[test]
fn test_decodeHtmlEntities_withNumericEntities_shouldDecode() {
    assert_eq!(decode_html_entities("I&#39;m"), "I'm");
    assert_eq!(decode_html_entities("caf&#xE9;"), "café");
    assert_eq!(decode_html_entities("&#X41;&#66;"), "AB");
}

#[test]
fn test_decodeHtmlEntities_withUnknownEntity_shouldLeaveItAlone() {
    assert_eq!(decode_html_entities("&bogus; & friends"), "&bogus; & friends");
}

#[test]
fn test_htmlToText_withEscapedBrackets_shouldKeepThemAsText() {
    assert_eq!(html_to_text("<i>1 &lt; 2</i>"), "1 < 2");
}

#[test]
fn test_htmlToText_withPadding_shouldTrim() {
    assert_eq!(html_to_text("  <i> spaced </i>  "), "spaced");
}

#[test]
fn test_unescapeXml_withDoubleEscapedText_shouldUndoOneLevel() {
    assert_eq!(unescape_xml("I&amp;#39;m"), "I&#39;m");
    assert_eq!(html_to_text(&unescape_xml("I&amp;#39;m")), "I'm");
}
