//! Comprehensive tests for restyle-engine
//!
//! End-to-end: source HTML + target content → styled HTML.

use restyle_engine::content;
use restyle_engine::dom::Category;
use restyle_engine::{
    Config, ContentType, Engine, StyleApplicator, StyleMode, StyleProfile, classify_and_render, transform,
};
use restyle_engine::html::{HtmlSerializer, parse};

// ============================================================================
// Transform pipeline
// ============================================================================

#[test]
fn test_scenario_two_paragraphs() {
    let source = r#"<p style="color:#333;font-size:14px">A</p><p style="color:#333">B</p>"#;

    let result = transform(source, "Hello\n\nWorld").unwrap();

    assert_eq!(result.content_type, ContentType::PlainText);
    assert_eq!(
        result.html,
        r#"<p style="color: #333;font-size: 14px;">Hello</p><p style="color: #333;font-size: 14px;">World</p>"#
    );
}

#[test]
fn test_heading_falls_back_to_lower_level() {
    let source = r#"<h2 style="color: navy">Section</h2>"#;

    let result = transform(source, "#### Deep heading\n\nBody").unwrap();

    assert_eq!(result.content_type, ContentType::Markdown);
    assert!(result.html.starts_with(r#"<h4 style="color: navy;">Deep heading</h4>"#));
    assert!(result.html.ends_with("<p>Body</p>"));
}

#[test]
fn test_markdown_structure_styled() {
    let source = r#"
        <html><head><style>
            li { line-height: 1.6 }
            .lead { font-family: Georgia }
            a:hover { color: red }
        </style></head>
        <body>
            <p class="lead">One</p><p class="lead">Two</p>
            <ul><li>x</li></ul>
            <a href="/" style="color: #06c">home</a>
        </body></html>
    "#;
    let target = "- first\n- second with [link](https://example.com)";

    let result = transform(source, target).unwrap();

    assert_eq!(
        result.html,
        concat!(
            r#"<ul><li style="line-height: 1.6;">first</li>"#,
            r#"<li style="line-height: 1.6;">second with "#,
            r#"<a href="https://example.com" style="color: #06c;">link</a></li></ul>"#,
        )
    );
    assert_eq!(result.summary.stylesheet_rules, 2);
    assert!(result.summary.classes.contains("lead"));
}

#[test]
fn test_unstyled_source_yields_plain_markup() {
    let result = transform("<p>nothing</p>", "Line one\nLine two").unwrap();
    assert_eq!(result.html, "<p>Line one<br>Line two</p>");
}

#[test]
fn test_empty_target() {
    let result = transform(r#"<p style="margin: 0">x</p>"#, "   ").unwrap();
    assert_eq!(result.content_type, ContentType::Empty);
    assert_eq!(result.html, r#"<p style="margin: 0;"></p>"#);
}

#[test]
fn test_target_text_is_escaped() {
    let result = transform("<p>x</p>", "a < b & <script>alert(1)</script>").unwrap();
    assert_eq!(result.html, "<p>a &lt; b &amp; &lt;script&gt;alert(1)&lt;/script&gt;</p>");
}

#[test]
fn test_wrapper_layout_stays_off_paragraphs() {
    let source = concat!(
        r#"<body style="margin: 0; background: #eee">"#,
        r#"<div style="width: 600px; display: flex; margin: 0 auto">"#,
        r#"<h1 style="color: navy">Title</h1></div></body>"#,
    );

    let result = transform(source, "Hello\n\nWorld").unwrap();

    assert_eq!(result.html, "<p>Hello</p><p>World</p>");
}

#[test]
fn test_markup_target_is_restyled() {
    let source = r#"<h2 style="color: navy">Section</h2><p style="margin: 0">b</p>"#;

    let result = transform(source, "<h2>Title</h2>\n<p>Body text</p>").unwrap();

    assert_eq!(result.content_type, ContentType::Markdown);
    assert_eq!(
        result.html,
        r#"<h2 style="color: navy;">Title</h2><p style="margin: 0;">Body text</p>"#
    );
}

#[test]
fn test_markup_target_drops_scripts_and_handlers() {
    let source = r#"<p style="margin: 0">b</p>"#;
    let target = r#"<p onclick="steal()" style="color: red">hi<script>alert(1)</script></p>"#;

    let result = transform(source, target).unwrap();

    assert_eq!(result.html, r#"<p style="margin: 0;">hi</p>"#);
}

#[test]
fn test_deeply_nested_target() {
    let target = format!("{} deep", ">".repeat(100_000));

    let result = transform(r#"<p style="color: red">x</p>"#, &target).unwrap();

    assert_eq!(result.content_type, ContentType::Markdown);
    // quotes fall back to the paragraph style
    assert!(result.html.starts_with(r#"<blockquote style="color: red;">"#));
    assert_eq!(result.html.matches("</blockquote>").count(), content::MAX_NESTING);
    assert!(result.html.contains(">deep</blockquote>"));
}

#[test]
fn test_source_values_cannot_break_attribute() {
    let source = r#"<p style='font-family: "A" , serif'>x</p>"#;
    let result = transform(source, "t").unwrap();
    assert_eq!(result.html, r#"<p style="font-family: &quot;A&quot; , serif;">t</p>"#);
}

#[test]
fn test_strategy_mentions_content_type() {
    let result = transform("<p>x</p>", "# Title").unwrap();
    assert!(result.strategy.starts_with("Rendered markdown content"));
}

#[test]
fn test_result_serializes() {
    let result = transform(r#"<p style="color: red">x</p>"#, "hi").unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["content_type"], "plain_text");
    assert_eq!(json["summary"]["styled_elements"], 1);
}

// ============================================================================
// classify_and_render
// ============================================================================

#[test]
fn test_classify_and_render_empty() {
    let (content_type, html) = classify_and_render("").unwrap();
    assert_eq!(content_type, ContentType::Empty);
    assert_eq!(html, "<p></p>");
}

#[test]
fn test_classify_and_render_heading_then_paragraph() {
    let (content_type, html) = classify_and_render("# Heading\n\nSome paragraph text.").unwrap();
    assert_eq!(content_type, ContentType::Markdown);
    assert_eq!(html, "<h1>Heading</h1><p>Some paragraph text.</p>");
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_profile_has_unique_properties() {
    let source = r#"<p style="color: red">a</p><p style="color: red">b</p><p style="color: red; color: blue">c</p>"#;

    let profile = Engine::default().extract_profile(source).unwrap();

    let props = profile.get(Category::Paragraph).unwrap();
    assert_eq!(props.iter().filter(|p| p.name == "color").count(), 1);
    assert_eq!(profile.value(Category::Paragraph, "color"), Some("red"));
}

#[test]
fn test_tie_break_is_deterministic() {
    let source = r#"<style>.a { color: olive } .b { color: plum }</style><p class="a">1</p><p class="b">2</p>"#;

    let first = transform(source, "x").unwrap().html;
    for _ in 0..20 {
        assert_eq!(transform(source, "x").unwrap().html, first);
    }
    assert_eq!(first, r#"<p style="color: olive;">x</p>"#);
}

#[test]
fn test_applicator_idempotent_on_real_output() {
    let profile = Engine::default()
        .extract_profile(r#"<h1 style="color: navy">T</h1><p style="margin: 0">b</p>"#)
        .unwrap();
    let mut tree = parse("<h1>a</h1><p>b</p>").unwrap();
    let applicator = StyleApplicator::new(&profile, StyleMode::Inline);

    applicator.apply(&mut tree).unwrap();
    let once = HtmlSerializer::new().serialize_inner(&tree, tree.root());
    applicator.apply(&mut tree).unwrap();
    let twice = HtmlSerializer::new().serialize_inner(&tree, tree.root());

    assert_eq!(once, twice);
}

#[test]
fn test_missing_profile_entry_never_fails() {
    let profile = StyleProfile::new();
    let mut tree = parse("<pre>code</pre><hr><blockquote>q</blockquote>").unwrap();
    let styled = StyleApplicator::new(&profile, StyleMode::Inline).apply(&mut tree).unwrap();
    assert_eq!(styled, 0);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_stylesheet_mode() {
    let config = Config {
        style_mode: StyleMode::Stylesheet,
        ..Config::default()
    };
    let engine = Engine::new(config);

    let result = engine.transform(r#"<p style="color: red">x</p>"#, "hi").unwrap();

    assert_eq!(result.html, "<style>\np { color: red; }\n</style><p>hi</p>");
}

#[test]
fn test_stylesheet_cannot_close_style_element() {
    let config = Config {
        style_mode: StyleMode::Stylesheet,
        ..Config::default()
    };
    let source = r#"<p style="font-family: '</style><script>x</script>'">x</p>"#;

    let result = Engine::new(config).transform(source, "hi").unwrap();

    assert_eq!(result.html.matches("</style>").count(), 1);
}

#[test]
fn test_pretty_print() {
    let config = Config {
        pretty_print: true,
        ..Config::default()
    };
    let result = Engine::new(config).transform("<p>x</p>", "- a\n- b").unwrap();
    assert_eq!(result.html, "<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>");
}

#[test]
fn test_pretty_print_keeps_inline_markup_in_line() {
    let config = Config {
        pretty_print: true,
        ..Config::default()
    };
    let result = Engine::new(config)
        .transform("<p>x</p>", "> Some **bold**, done.")
        .unwrap();
    assert_eq!(
        result.html,
        "<blockquote>\n  <p>Some <strong>bold</strong>, done.</p>\n</blockquote>"
    );
}

#[test]
fn test_markdown_threshold_from_config() {
    let config = Config::from_json(r#"{ "markdown_threshold": 1.0 }"#).unwrap();
    let engine = Engine::new(config);

    let (content_type, _) = engine.classify_and_render("# Title\nplain line").unwrap();
    assert_eq!(content_type, ContentType::PlainText);
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_concurrent_transforms() {
    let engine = Engine::default();
    let source = r#"<p style="color: #222">x</p>"#;

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let engine = &engine;
                scope.spawn(move || engine.transform(source, &format!("Request {i}")).unwrap().html)
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(
                handle.join().unwrap(),
                format!(r#"<p style="color: #222;">Request {i}</p>"#)
            );
        }
    });
}
