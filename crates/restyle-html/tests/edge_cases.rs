//! Edge case tests for restyle-html
//!
//! Malformed markup must be repaired, never rejected.

use restyle_html::{HtmlParser, HtmlSerializer, ParseError, Parser};

fn count_tag(html: &str, tag: &str) -> usize {
    let tree = HtmlParser::new().parse(html).unwrap();
    tree.elements()
        .filter(|(id, _)| tree.tag_name(*id) == Some(tag))
        .count()
}

// ============================================================================
// EMPTY AND MINIMAL INPUT
// ============================================================================

#[test]
fn test_parse_empty() {
    let tree = HtmlParser::new().parse("").unwrap();
    // html5ever still synthesizes html/head/body
    assert!(tree.len() >= 1);
}

#[test]
fn test_parse_only_whitespace() {
    let tree = HtmlParser::new().parse("   \t\n\r\n   ").unwrap();
    assert!(tree.len() >= 1);
}

#[test]
fn test_parse_null_bytes() {
    // A stray NUL is not enough to call the input binary
    let tree = HtmlParser::new().parse("Hello\0World").unwrap();
    assert!(tree.len() > 1);
}

// ============================================================================
// MALFORMED HTML
// ============================================================================

#[test]
fn test_parse_unclosed_tags() {
    assert_eq!(count_tag("<div><p><span>text", "span"), 1);
}

#[test]
fn test_parse_mismatched_tags() {
    let tree = HtmlParser::new().parse("<div><p></div></p>").unwrap();
    assert!(tree.len() > 1);
}

#[test]
fn test_parse_implicit_paragraph_close() {
    // <p> cannot nest, so each one closes the previous
    assert_eq!(count_tag("<p>one<p>two<p>three", "p"), 3);
}

#[test]
fn test_parse_orphan_closing_tag() {
    let tree = HtmlParser::new().parse("</div>").unwrap();
    assert!(tree.len() >= 1);
}

#[test]
fn test_parse_unknown_entity_kept_as_text() {
    let tree = HtmlParser::new().parse("<p>fish &zzqfoo; ok</p>").unwrap();
    assert!(tree.text_content(tree.root()).contains("&zzqfoo;"));
}

// ============================================================================
// SPECIAL TAGS
// ============================================================================

#[test]
fn test_parse_style_content_is_raw() {
    let html = r#"<style>
        div > p { color: red; }
    </style><p>x</p>"#;
    let tree = HtmlParser::new().parse(html).unwrap();

    let (style, _) = tree
        .elements()
        .find(|(id, _)| tree.tag_name(*id) == Some("style"))
        .unwrap();
    assert!(tree.text_content(style).contains("div > p"));
}

#[test]
fn test_parse_script_content() {
    let html = r#"<script>if (a < b) { document.write("<p>no</p>"); }</script>"#;
    assert_eq!(count_tag(html, "p"), 0);
}

// ============================================================================
// SERIALIZATION
// ============================================================================

#[test]
fn test_serialize_round_trip_body() {
    let tree = HtmlParser::new().parse(r#"<p class="x">A &amp; B</p>"#).unwrap();
    let (body, _) = tree
        .elements()
        .find(|(id, _)| tree.tag_name(*id) == Some("body"))
        .unwrap();

    let html = HtmlSerializer::new().serialize_inner(&tree, body);
    assert_eq!(html, r#"<p class="x">A &amp; B</p>"#);
}

// ============================================================================
// NON-TEXT INPUT
// ============================================================================

#[test]
fn test_binary_input_rejected() {
    let bytes: Vec<u8> = (0u8..=8).cycle().take(512).collect();
    let text = String::from_utf8(bytes).unwrap();

    let err = restyle_html::parse(&text).unwrap_err();
    assert!(matches!(err, ParseError::BinaryInput { .. }));
}

#[test]
fn test_lossy_decoded_garbage_rejected() {
    let bytes: Vec<u8> = (0x80u8..=0xff).collect();
    let text = String::from_utf8_lossy(&bytes).into_owned();

    assert!(restyle_html::parse(&text).is_err());
}
